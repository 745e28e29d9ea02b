use chrono::{DateTime, Duration, Utc};

use crate::model::{
    voice::{ChannelKind, TransientChannel},
    voice_config::GuildVoiceConfig,
};
use crate::service::voice::{registry::GuildVoiceState, VoiceChannelService};

/// Age an empty channel must reach before the sweep deletes it.
pub const SWEEP_GRACE_SECONDS: i64 = 30;

impl<'a> VoiceChannelService<'a> {
    /// Deletes empty tracked channels missed by the event handlers.
    ///
    /// Channels younger than `SWEEP_GRACE_SECONDS` are skipped since their creator may
    /// still be on the way in. Ends with a renumbering pass.
    ///
    /// # Returns
    /// - Number of channels deleted
    pub async fn sweep(
        &self,
        state: &mut GuildVoiceState,
        config: &GuildVoiceConfig,
        now: DateTime<Utc>,
    ) -> usize {
        let grace = Duration::seconds(SWEEP_GRACE_SECONDS);
        let mut deleted = 0;

        for kind in ChannelKind::ALL {
            let Some(channels) = self.list_tracked_category(state, config, kind).await else {
                continue;
            };

            for channel in channels.iter().filter(|c| c.occupants == 0) {
                let expired = state
                    .get(channel.channel_id)
                    .is_some_and(|tracked| now - tracked.created_at >= grace);
                if !expired {
                    continue;
                }

                match self.platform.delete_channel(channel.channel_id).await {
                    Ok(()) => {
                        state.untrack(channel.channel_id);
                        deleted += 1;
                    }
                    Err(e) => tracing::error!(
                        "Failed to delete empty voice channel {}: {}",
                        channel.channel_id,
                        e
                    ),
                }
            }
        }

        if deleted > 0 {
            tracing::info!(
                "Swept {} empty voice channels in guild {}",
                deleted,
                config.guild_id
            );
        }

        self.renumber(state, config).await;

        deleted
    }

    /// Rebuilds the bookkeeping of a guild from the channels currently on Discord.
    ///
    /// Run when the guild becomes available, since tracked channels are never
    /// persisted. Channels in a configured category are adopted when their name follows
    /// the kind's template; private channels are also adopted when they carry an
    /// owner overwrite, which restores ownership (first channel per owner wins).
    /// Lobby channels are never adopted. Adopted channels that are empty are deleted
    /// and a renumbering pass follows.
    ///
    /// # Returns
    /// - Number of channels adopted
    pub async fn reconcile(&self, state: &mut GuildVoiceState, config: &GuildVoiceConfig) -> usize {
        let guild_id = config.guild_id;
        let mut adopted = 0;

        for kind in ChannelKind::ALL {
            let Some(category_id) = config.category_for(kind) else {
                continue;
            };

            let channels = match self.platform.category_channels(guild_id, category_id).await {
                Ok(channels) => channels,
                Err(e) => {
                    tracing::error!("Failed to list channels of category {}: {}", category_id, e);
                    continue;
                }
            };

            let format = self.naming.format_for(kind);
            let mut empty = Vec::new();

            for channel in channels {
                if config.is_lobby(channel.channel_id) || state.is_tracked(channel.channel_id) {
                    continue;
                }

                let numbered = format.parse(&channel.name).is_some();
                let transient = match (kind, channel.owner_id) {
                    (ChannelKind::Private, Some(owner_id)) => {
                        TransientChannel::private(channel.channel_id, owner_id)
                    }
                    _ if numbered => TransientChannel::new(channel.channel_id, kind, None),
                    _ => continue,
                };

                state.track(transient);
                adopted += 1;

                if channel.occupants == 0 {
                    empty.push(channel.channel_id);
                }
            }

            for channel_id in empty {
                match self.platform.delete_channel(channel_id).await {
                    Ok(()) => {
                        state.untrack(channel_id);
                    }
                    Err(e) => {
                        tracing::error!("Failed to delete empty voice channel {}: {}", channel_id, e)
                    }
                }
            }
        }

        self.renumber(state, config).await;

        tracing::info!(
            "Reconciled voice channels of guild {}: {} adopted",
            guild_id,
            adopted
        );

        adopted
    }
}
