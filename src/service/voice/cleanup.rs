use std::collections::HashSet;

use serenity::all::{ChannelId, GuildId};

use crate::model::{
    voice::{ChannelKind, VoiceChannelSnapshot},
    voice_config::GuildVoiceConfig,
};
use crate::service::voice::{naming::plan_renumber, registry::GuildVoiceState, VoiceChannelService};

impl<'a> VoiceChannelService<'a> {
    /// Deletes a tracked channel once nobody is connected to it anymore.
    ///
    /// Untracked channels are never touched. A tracked channel that was already deleted
    /// outside the bot is only dropped from the bookkeeping. A failed delete keeps the
    /// channel tracked so the sweep retries it.
    ///
    /// # Returns
    /// - `true` - The channel is gone and no longer tracked
    /// - `false` - The channel is occupied, untracked, or could not be deleted
    pub async fn cleanup_if_empty(
        &self,
        state: &mut GuildVoiceState,
        guild_id: GuildId,
        channel_id: ChannelId,
    ) -> bool {
        if !state.is_tracked(channel_id) {
            return false;
        }

        match self.platform.channel(guild_id, channel_id).await {
            Ok(None) => {
                state.untrack(channel_id);
                true
            }
            Ok(Some(channel)) if channel.occupants > 0 => false,
            Ok(Some(_)) => match self.platform.delete_channel(channel_id).await {
                Ok(()) => {
                    state.untrack(channel_id);
                    tracing::info!("Deleted empty voice channel {} in guild {}", channel_id, guild_id);
                    true
                }
                Err(e) => {
                    tracing::error!("Failed to delete empty voice channel {}: {}", channel_id, e);
                    false
                }
            },
            Err(e) => {
                tracing::error!("Failed to look up voice channel {}: {}", channel_id, e);
                false
            }
        }
    }

    /// Renames occupied transient channels so each category reads 1..N again.
    ///
    /// Tracked channels missing from their category are dropped from the bookkeeping
    /// on the way. Running the pass twice without membership changes renames nothing
    /// the second time.
    ///
    /// # Returns
    /// - Number of channels renamed
    pub async fn renumber(&self, state: &mut GuildVoiceState, config: &GuildVoiceConfig) -> usize {
        let mut renamed = 0;

        for kind in ChannelKind::ALL {
            let Some(channels) = self.list_tracked_category(state, config, kind).await else {
                continue;
            };

            for (channel_id, name) in plan_renumber(self.naming.format_for(kind), &channels) {
                match self.platform.rename_channel(channel_id, &name).await {
                    Ok(()) => renamed += 1,
                    Err(e) => {
                        tracing::error!("Failed to rename voice channel {} to {}: {}", channel_id, name, e)
                    }
                }
            }
        }

        renamed
    }

    /// Lists the category of `kind` and returns the channels tracked as that kind.
    ///
    /// Tracked channels of `kind` that are no longer listed are untracked.
    ///
    /// # Returns
    /// - `Some(channels)` - Tracked channels currently in the category
    /// - `None` - Category not configured or the listing failed
    pub(super) async fn list_tracked_category(
        &self,
        state: &mut GuildVoiceState,
        config: &GuildVoiceConfig,
        kind: ChannelKind,
    ) -> Option<Vec<VoiceChannelSnapshot>> {
        let category_id = config.category_for(kind)?;

        let channels = match self
            .platform
            .category_channels(config.guild_id, category_id)
            .await
        {
            Ok(channels) => channels,
            Err(e) => {
                tracing::error!("Failed to list channels of category {}: {}", category_id, e);
                return None;
            }
        };

        let present: HashSet<ChannelId> = channels.iter().map(|c| c.channel_id).collect();
        for stale in state.retain_kind(kind, &present) {
            tracing::debug!("Dropped voice channel {} deleted outside the bot", stale);
        }

        Some(
            channels
                .into_iter()
                .filter(|channel| {
                    state
                        .get(channel.channel_id)
                        .is_some_and(|tracked| tracked.kind == kind)
                })
                .collect(),
        )
    }
}
