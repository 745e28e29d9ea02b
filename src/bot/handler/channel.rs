//! Channel event handlers feeding the guild's activity log.
//!
//! Channels inside the transient voice categories are skipped: the bot creates, renames
//! and deletes those itself, and their activity is already reported through the voice
//! and panel entries.

use serenity::all::{Context, GuildChannel, Message};

use crate::service::{
    voice_config::VoiceConfigService,
    voice_log::{VoiceLogEntry, VoiceLogService},
};
use crate::state::BotState;

/// Handles the channel_create event when a channel is created in a guild.
pub async fn handle_channel_create(state: &BotState, ctx: Context, channel: GuildChannel) {
    let entry = VoiceLogEntry::channel_created(channel.id, &channel.name);
    post_unless_transient(state, &ctx, &channel, entry).await;
}

/// Handles the channel_update event, logging renames only.
///
/// # Arguments
/// - `old` - Channel before the update from the cache, `None` if it wasn't cached
/// - `new` - Channel after the update
pub async fn handle_channel_update(
    state: &BotState,
    ctx: Context,
    old: Option<GuildChannel>,
    new: GuildChannel,
) {
    let Some(old) = old else {
        tracing::debug!("Channel {} updated without a cached previous state", new.id);
        return;
    };

    let Some(entry) = VoiceLogEntry::channel_renamed(new.id, &old.name, &new.name) else {
        return;
    };
    post_unless_transient(state, &ctx, &new, entry).await;
}

/// Handles the channel_delete event when a channel is deleted from a guild.
pub async fn handle_channel_delete(
    state: &BotState,
    ctx: Context,
    channel: GuildChannel,
    _messages: Option<Vec<Message>>,
) {
    let entry = VoiceLogEntry::channel_deleted(channel.id, &channel.name);
    post_unless_transient(state, &ctx, &channel, entry).await;
}

async fn post_unless_transient(
    state: &BotState,
    ctx: &Context,
    channel: &GuildChannel,
    entry: VoiceLogEntry,
) {
    let config = match VoiceConfigService::new(&state.db).find(channel.guild_id).await {
        Ok(Some(config)) => config,
        Ok(None) => return,
        Err(e) => {
            tracing::error!("Failed to load voice config of guild {}: {}", channel.guild_id, e);
            return;
        }
    };

    if config.is_transient_category(channel.parent_id) {
        return;
    }

    VoiceLogService::new(ctx.http.clone()).post(&config, entry).await;
}
