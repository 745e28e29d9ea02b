//! Discord bot integration for transient voice channels.
//!
//! The bot reacts to voice state updates by creating, redirecting, deleting and
//! renumbering transient voice channels, rebuilds its bookkeeping when a guild becomes
//! available, and serves the slash commands, buttons and modals of the configuration
//! commands and the private channel panel.
//!
//! # Gateway Intents
//!
//! The bot requires the following gateway intents:
//! - `GUILDS` - Receive guild availability and channel data
//! - `GUILD_VOICE_STATES` - Receive voice state updates and keep cached voice states
//!
//! Neither is privileged.

pub mod command;
pub mod handler;
pub mod start;
