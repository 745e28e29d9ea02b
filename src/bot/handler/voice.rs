//! Voice state event handler.
//!
//! Every voice state update of a configured guild is posted to the voice log and
//! handed to the voice channel lifecycle while holding the guild's registry lock.

use std::sync::Arc;

use serenity::all::{Context, VoiceState};

use crate::model::voice::VoiceStateChange;
use crate::service::{
    voice::{platform::SerenityVoicePlatform, VoiceChannelService},
    voice_config::VoiceConfigService,
    voice_log::{VoiceLogEntry, VoiceLogService},
};
use crate::state::BotState;

/// Handles the voice_state_update event.
///
/// # Arguments
/// - `state` - Shared bot state
/// - `ctx` - Discord context providing HTTP client and cache
/// - `old` - Previous voice state from the cache, `None` if the member wasn't connected
/// - `new` - Current voice state
pub async fn handle_voice_state_update(
    state: &BotState,
    ctx: Context,
    old: Option<VoiceState>,
    new: VoiceState,
) {
    let Some(change) = voice_state_change(old.as_ref(), &new) else {
        return;
    };

    let config = match VoiceConfigService::new(&state.db).find(change.guild_id).await {
        Ok(Some(config)) => config,
        Ok(None) => return,
        Err(e) => {
            tracing::error!(
                "Failed to load voice config of guild {}: {}",
                change.guild_id,
                e
            );
            return;
        }
    };

    if let Some(entry) = VoiceLogEntry::voice_activity(&change) {
        VoiceLogService::new(ctx.http.clone())
            .post(&config, entry)
            .await;
    }

    if !config.manages_voice_channels() {
        return;
    }

    let platform = SerenityVoicePlatform::new(Arc::clone(&ctx.http), Arc::clone(&ctx.cache));
    let service = VoiceChannelService::new(&platform, &state.naming);

    let mut guild_state = state.registry.lock(change.guild_id).await;
    service
        .handle_voice_state_update(&mut guild_state, &config, change)
        .await;
}

/// Reduces a pair of serenity voice states to the channel change of a guild member.
///
/// # Returns
/// - `Some(VoiceStateChange)` - The member's channel changed within a guild
/// - `None` - Not a guild voice state, or the update kept the channel (mute, deafen, ...)
pub fn voice_state_change(old: Option<&VoiceState>, new: &VoiceState) -> Option<VoiceStateChange> {
    let guild_id = new.guild_id?;
    let before = old.and_then(|state| state.channel_id);

    let change = VoiceStateChange {
        guild_id,
        user_id: new.user_id,
        before,
        after: new.channel_id,
    };

    (change.left_channel().is_some() || change.joined_channel().is_some()).then_some(change)
}
