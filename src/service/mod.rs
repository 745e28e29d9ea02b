//! Service layer for business logic and orchestration.
//!
//! Services sit between the bot's event handlers and the data layer / Discord API,
//! working with domain models rather than entity models or raw Serenity events.

pub mod voice;
pub mod voice_config;
pub mod voice_log;
