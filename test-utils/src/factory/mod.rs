//! Factory methods for creating test data.
//!
//! Each table has its own factory module with a `Factory` struct for customization
//! and a `create_*` convenience function for quick default creation.
//!
//! ```rust,ignore
//! use test_utils::factory;
//!
//! let config = factory::guild_voice_config::GuildVoiceConfigFactory::new(&db)
//!     .guild_id("987654321")
//!     .lobby_channel_id(Some("100"))
//!     .build()
//!     .await?;
//! ```

pub mod guild_voice_config;
pub mod helpers;

pub use guild_voice_config::create_guild_voice_config;
