use serenity::all::{ChannelId, GuildId, UserId};

use crate::model::{
    voice::{ChannelKind, CreateVoiceChannelParam, TransientChannel},
    voice_config::GuildVoiceConfig,
};
use crate::service::voice::{naming::next_free_number, registry::GuildVoiceState, VoiceChannelService};

impl<'a> VoiceChannelService<'a> {
    /// Creates a public channel for a member who joined the public lobby and moves them in.
    ///
    /// # Returns
    /// - `Some(ChannelId)` - The member now sits in the new channel
    /// - `None` - No public category configured or a platform call failed
    pub async fn create_public_channel(
        &self,
        state: &mut GuildVoiceState,
        config: &GuildVoiceConfig,
        user_id: UserId,
    ) -> Option<ChannelId> {
        let Some(category_id) = config.category_for(ChannelKind::Public) else {
            tracing::warn!(
                "Guild {} has a voice lobby but no voice category configured",
                config.guild_id
            );
            return None;
        };

        self.create_and_move(state, config.guild_id, ChannelKind::Public, category_id, user_id)
            .await
    }

    /// Moves a member who joined the private lobby into their private channel, creating
    /// it first if they don't own one.
    ///
    /// An ownership entry whose channel was deleted outside the bot is dropped and a new
    /// channel is created in its place.
    ///
    /// # Returns
    /// - `Some(ChannelId)` - The member now sits in their private channel
    /// - `None` - No private category configured or a platform call failed
    pub async fn create_or_redirect_private_channel(
        &self,
        state: &mut GuildVoiceState,
        config: &GuildVoiceConfig,
        user_id: UserId,
    ) -> Option<ChannelId> {
        let guild_id = config.guild_id;

        if let Some(owned) = state.owned_by(user_id) {
            match self.platform.channel(guild_id, owned).await {
                Ok(Some(_)) => {
                    return match self.platform.move_member(guild_id, user_id, owned).await {
                        Ok(()) => Some(owned),
                        Err(e) => {
                            tracing::error!(
                                "Failed to move user {} into private channel {}: {}",
                                user_id,
                                owned,
                                e
                            );
                            None
                        }
                    };
                }
                Ok(None) => {
                    tracing::info!(
                        "Private channel {} of user {} no longer exists, creating a new one",
                        owned,
                        user_id
                    );
                    state.untrack(owned);
                }
                Err(e) => {
                    tracing::error!("Failed to look up private channel {}: {}", owned, e);
                    return None;
                }
            }
        }

        let Some(category_id) = config.category_for(ChannelKind::Private) else {
            tracing::warn!(
                "Guild {} has a private lobby but no private category configured",
                guild_id
            );
            return None;
        };

        self.create_and_move(state, guild_id, ChannelKind::Private, category_id, user_id)
            .await
    }

    /// Creates a numbered channel in `category_id`, tracks it and moves `user_id` in.
    ///
    /// A channel whose member couldn't be moved in is deleted again right away.
    async fn create_and_move(
        &self,
        state: &mut GuildVoiceState,
        guild_id: GuildId,
        kind: ChannelKind,
        category_id: ChannelId,
        user_id: UserId,
    ) -> Option<ChannelId> {
        let format = self.naming.format_for(kind);

        let existing = match self.platform.category_channels(guild_id, category_id).await {
            Ok(existing) => existing,
            Err(e) => {
                tracing::error!("Failed to list channels of category {}: {}", category_id, e);
                return None;
            }
        };
        let number = next_free_number(format, existing.iter().map(|c| c.name.as_str()));

        let owner_id = (kind == ChannelKind::Private).then_some(user_id);
        let param = CreateVoiceChannelParam {
            name: format.render(number),
            category_id,
            owner_id,
        };

        let channel_id = match self.platform.create_voice_channel(guild_id, param).await {
            Ok(channel_id) => channel_id,
            Err(e) => {
                tracing::error!("Failed to create voice channel in guild {}: {}", guild_id, e);
                return None;
            }
        };

        state.track(match owner_id {
            Some(owner_id) => TransientChannel::private(channel_id, owner_id),
            None => TransientChannel::public(channel_id),
        });

        if let Err(e) = self.platform.move_member(guild_id, user_id, channel_id).await {
            tracing::warn!(
                "Failed to move user {} into new channel {}, deleting it: {}",
                user_id,
                channel_id,
                e
            );
            state.untrack(channel_id);
            if let Err(e) = self.platform.delete_channel(channel_id).await {
                tracing::error!("Failed to delete unused channel {}: {}", channel_id, e);
            }
            return None;
        }

        tracing::info!(
            "Created {:?} voice channel {} (#{}) for user {} in guild {}",
            kind,
            channel_id,
            number,
            user_id,
            guild_id
        );

        Some(channel_id)
    }
}
