//! Domain models and parameter types.
//!
//! Domain models are converted from entity models at the repository boundary and from
//! Serenity types at the bot boundary, so the service layer works with neither.

pub mod voice;
pub mod voice_config;
