//! Guild event handler for voice bookkeeping recovery.
//!
//! Transient channels are only tracked in memory, so after a restart the bot would
//! otherwise forget the channels it created. When a guild becomes available its
//! configured categories are reconciled: numbered channels and owned private channels
//! are tracked again, empty ones are deleted, the rest renumbered.

use serenity::all::{Context, Guild};

use crate::service::{
    voice::{platform::SerenityVoicePlatform, VoiceChannelService},
    voice_config::VoiceConfigService,
};
use crate::state::BotState;

/// Handles the guild_create event when a guild becomes available or the bot joins a new guild.
///
/// # Arguments
/// - `state` - Shared bot state
/// - `ctx` - Discord context providing HTTP client and cache
/// - `guild` - Guild that became available
/// - `_is_new` - Whether the bot just joined (unused, new guilds have no configuration)
pub async fn handle_guild_create(state: &BotState, ctx: Context, guild: Guild, _is_new: Option<bool>) {
    let config = match VoiceConfigService::new(&state.db).find_managed(guild.id).await {
        Ok(Some(config)) => config,
        Ok(None) => {
            tracing::debug!("Guild {} ({}) has no voice channels configured", guild.name, guild.id);
            return;
        }
        Err(e) => {
            tracing::error!("Failed to load voice config of guild {}: {}", guild.id, e);
            return;
        }
    };

    let platform = SerenityVoicePlatform::new(ctx.http.clone(), ctx.cache.clone());
    let service = VoiceChannelService::new(&platform, &state.naming);

    let mut guild_state = state.registry.lock(guild.id).await;
    service.reconcile(&mut guild_state, &config).await;
}
