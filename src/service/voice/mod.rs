//! Voice channel lifecycle service.
//!
//! This module provides `VoiceChannelService`, which creates transient voice channels
//! when members join a lobby, deletes them once empty, and keeps the remaining ones
//! numbered 1..N within their category.
//!
//! The service is organized into separate modules by concern:
//! - `creation` - Public channel creation and private channel creation or redirect
//! - `cleanup` - Deleting empty channels and the renumbering pass
//! - `maintenance` - Periodic sweep and startup reconciliation
//! - `panel` - Owner control panel for private channels
//! - `naming` - Pure numbering functions
//! - `registry` - In-memory bookkeeping with per-guild serialization
//! - `platform` - Outbound Discord operations
//!
//! Every method takes the guild's `GuildVoiceState` by mutable reference; callers hold
//! the guild lock from `VoiceRegistry::lock` for the duration of the call. Platform
//! failures inside the lifecycle handlers are logged and abandoned, leaving the
//! sweep to repair anything left behind.

pub mod cleanup;
pub mod creation;
pub mod maintenance;
pub mod naming;
pub mod panel;
pub mod platform;
pub mod registry;

#[cfg(test)]
mod test;

use crate::model::{
    voice::{ChannelKind, ChannelNaming, VoiceStateChange},
    voice_config::GuildVoiceConfig,
};
use crate::service::voice::{platform::VoicePlatform, registry::GuildVoiceState};

/// Service driving the lifecycle of transient voice channels.
///
/// Holds no state of its own: bookkeeping lives in the `GuildVoiceState` passed to each
/// method, configuration in the `GuildVoiceConfig`.
pub struct VoiceChannelService<'a> {
    /// Outbound Discord operations
    platform: &'a dyn VoicePlatform,
    /// Name templates of public and private channels
    naming: &'a ChannelNaming,
}

impl<'a> VoiceChannelService<'a> {
    /// Creates a new VoiceChannelService instance.
    ///
    /// # Arguments
    /// - `platform` - Discord operations, `SerenityVoicePlatform` outside of tests
    /// - `naming` - Name templates of transient channels
    ///
    /// # Returns
    /// - `VoiceChannelService` - New service instance
    pub fn new(platform: &'a dyn VoicePlatform, naming: &'a ChannelNaming) -> Self {
        Self { platform, naming }
    }

    /// Reacts to a member's voice channel changing.
    ///
    /// A departure runs the empty-channel cleanup and then a renumbering pass, so a
    /// channel created for a join in the same update gets the lowest free number. A
    /// join into a lobby creates (or redirects to) the matching transient channel.
    /// Mute, deafen and other updates that keep the channel are ignored.
    pub async fn handle_voice_state_update(
        &self,
        state: &mut GuildVoiceState,
        config: &GuildVoiceConfig,
        change: VoiceStateChange,
    ) {
        if let Some(left) = change.left_channel() {
            self.cleanup_if_empty(state, change.guild_id, left).await;

            if config.manages_voice_channels() {
                self.renumber(state, config).await;
            }
        }

        let Some(joined) = change.joined_channel() else {
            return;
        };

        if config.lobby_for(ChannelKind::Public) == Some(joined) {
            self.create_public_channel(state, config, change.user_id)
                .await;
        } else if config.lobby_for(ChannelKind::Private) == Some(joined) {
            self.create_or_redirect_private_channel(state, config, change.user_id)
                .await;
        }
    }
}
