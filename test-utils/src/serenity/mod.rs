//! Test factories for creating Serenity API objects.
//!
//! These factories create valid Serenity structs by deserializing JSON, simulating
//! what Discord's gateway and API would deliver.
//!
//! # Available Factories
//!
//! - `channel::create_test_voice_channel` - Create Serenity `GuildChannel` voice channels
//! - `voice_state::create_test_voice_state` - Create Serenity `VoiceState` objects

pub mod channel;
pub mod voice_state;

pub use channel::create_test_voice_channel;
pub use voice_state::create_test_voice_state;
