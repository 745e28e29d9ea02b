//! Outbound platform operations used by the voice channel lifecycle.
//!
//! `VoiceChannelService` only talks to Discord through `VoicePlatform`, which keeps the
//! lifecycle logic independent of serenity's HTTP client and gateway cache.

use std::collections::HashMap;
use std::sync::Arc;

use serenity::all::{
    Cache, ChannelId, ChannelType, CreateChannel, EditChannel, GuildChannel, GuildId, Http,
    PermissionOverwrite, PermissionOverwriteType, Permissions, RoleId, UserId,
};
use serenity::async_trait;

use crate::error::AppError;
use crate::model::voice::{CreateVoiceChannelParam, VoiceChannelSnapshot};

/// Permissions granted to the owner of a private channel.
pub const OWNER_PERMISSIONS: Permissions = Permissions::MANAGE_CHANNELS
    .union(Permissions::CONNECT)
    .union(Permissions::MOVE_MEMBERS);

#[async_trait]
pub trait VoicePlatform: Send + Sync {
    /// Voice channels inside a category.
    async fn category_channels(
        &self,
        guild_id: GuildId,
        category_id: ChannelId,
    ) -> Result<Vec<VoiceChannelSnapshot>, AppError>;

    /// Current state of a single channel, `None` if it no longer exists.
    async fn channel(
        &self,
        guild_id: GuildId,
        channel_id: ChannelId,
    ) -> Result<Option<VoiceChannelSnapshot>, AppError>;

    async fn create_voice_channel(
        &self,
        guild_id: GuildId,
        param: CreateVoiceChannelParam,
    ) -> Result<ChannelId, AppError>;

    async fn rename_channel(&self, channel_id: ChannelId, name: &str) -> Result<(), AppError>;

    async fn set_user_limit(&self, channel_id: ChannelId, limit: u32) -> Result<(), AppError>;

    /// Allows or denies connecting to the channel for @everyone.
    async fn set_public_connect(
        &self,
        guild_id: GuildId,
        channel_id: ChannelId,
        allow: bool,
    ) -> Result<(), AppError>;

    async fn delete_channel(&self, channel_id: ChannelId) -> Result<(), AppError>;

    async fn move_member(
        &self,
        guild_id: GuildId,
        user_id: UserId,
        channel_id: ChannelId,
    ) -> Result<(), AppError>;
}

/// `VoicePlatform` backed by the serenity HTTP client and gateway cache.
///
/// Channel listings come from the HTTP API since freshly created channels may not be
/// cached yet. Occupant counts come from the cached voice states, which the gateway
/// keeps current with every voice state update.
pub struct SerenityVoicePlatform {
    http: Arc<Http>,
    cache: Arc<Cache>,
}

impl SerenityVoicePlatform {
    pub fn new(http: Arc<Http>, cache: Arc<Cache>) -> Self {
        Self { http, cache }
    }

    /// Connected member count per voice channel of a guild.
    fn occupancy(&self, guild_id: GuildId) -> HashMap<ChannelId, usize> {
        let mut occupancy = HashMap::new();

        if let Some(guild) = self.cache.guild(guild_id) {
            for channel_id in guild.voice_states.values().filter_map(|state| state.channel_id) {
                *occupancy.entry(channel_id).or_insert(0) += 1;
            }
        }

        occupancy
    }
}

#[async_trait]
impl VoicePlatform for SerenityVoicePlatform {
    async fn category_channels(
        &self,
        guild_id: GuildId,
        category_id: ChannelId,
    ) -> Result<Vec<VoiceChannelSnapshot>, AppError> {
        let channels = guild_id.channels(&self.http).await?;
        let occupancy = self.occupancy(guild_id);

        Ok(channels
            .values()
            .filter(|channel| {
                channel.kind == ChannelType::Voice && channel.parent_id == Some(category_id)
            })
            .map(|channel| {
                let occupants = occupancy.get(&channel.id).copied().unwrap_or(0);
                snapshot_from_channel(channel, occupants)
            })
            .collect())
    }

    async fn channel(
        &self,
        guild_id: GuildId,
        channel_id: ChannelId,
    ) -> Result<Option<VoiceChannelSnapshot>, AppError> {
        let channels = guild_id.channels(&self.http).await?;
        let Some(channel) = channels.get(&channel_id) else {
            return Ok(None);
        };

        let occupants = self
            .occupancy(guild_id)
            .get(&channel_id)
            .copied()
            .unwrap_or(0);

        Ok(Some(snapshot_from_channel(channel, occupants)))
    }

    async fn create_voice_channel(
        &self,
        guild_id: GuildId,
        param: CreateVoiceChannelParam,
    ) -> Result<ChannelId, AppError> {
        let mut builder = CreateChannel::new(param.name)
            .kind(ChannelType::Voice)
            .category(param.category_id);

        if let Some(owner_id) = param.owner_id {
            builder = builder.permissions(vec![
                PermissionOverwrite {
                    allow: Permissions::empty(),
                    deny: Permissions::CONNECT,
                    kind: PermissionOverwriteType::Role(everyone_role(guild_id)),
                },
                PermissionOverwrite {
                    allow: OWNER_PERMISSIONS,
                    deny: Permissions::empty(),
                    kind: PermissionOverwriteType::Member(owner_id),
                },
            ]);
        }

        let channel = guild_id.create_channel(&self.http, builder).await?;

        Ok(channel.id)
    }

    async fn rename_channel(&self, channel_id: ChannelId, name: &str) -> Result<(), AppError> {
        channel_id
            .edit(&self.http, EditChannel::new().name(name))
            .await?;

        Ok(())
    }

    async fn set_user_limit(&self, channel_id: ChannelId, limit: u32) -> Result<(), AppError> {
        channel_id
            .edit(&self.http, EditChannel::new().user_limit(limit))
            .await?;

        Ok(())
    }

    async fn set_public_connect(
        &self,
        guild_id: GuildId,
        channel_id: ChannelId,
        allow: bool,
    ) -> Result<(), AppError> {
        let (allow, deny) = if allow {
            (Permissions::CONNECT, Permissions::empty())
        } else {
            (Permissions::empty(), Permissions::CONNECT)
        };

        channel_id
            .create_permission(
                &self.http,
                PermissionOverwrite {
                    allow,
                    deny,
                    kind: PermissionOverwriteType::Role(everyone_role(guild_id)),
                },
            )
            .await?;

        Ok(())
    }

    async fn delete_channel(&self, channel_id: ChannelId) -> Result<(), AppError> {
        channel_id.delete(&self.http).await?;

        Ok(())
    }

    async fn move_member(
        &self,
        guild_id: GuildId,
        user_id: UserId,
        channel_id: ChannelId,
    ) -> Result<(), AppError> {
        guild_id
            .move_member(&self.http, user_id, channel_id)
            .await?;

        Ok(())
    }
}

/// The @everyone role shares the guild's id.
fn everyone_role(guild_id: GuildId) -> RoleId {
    RoleId::new(guild_id.get())
}

/// Builds the platform-independent view of a serenity channel.
///
/// The owner is the member whose overwrite grants `MANAGE_CHANNELS`, which is only
/// ever set on private channels at creation.
pub fn snapshot_from_channel(channel: &GuildChannel, occupants: usize) -> VoiceChannelSnapshot {
    let owner_id = channel
        .permission_overwrites
        .iter()
        .find_map(|overwrite| match overwrite.kind {
            PermissionOverwriteType::Member(user_id)
                if overwrite.allow.contains(Permissions::MANAGE_CHANNELS) =>
            {
                Some(user_id)
            }
            _ => None,
        });

    VoiceChannelSnapshot {
        channel_id: channel.id,
        name: channel.name.clone(),
        parent_id: channel.parent_id,
        occupants,
        owner_id,
    }
}

#[cfg(test)]
mod tests {
    use test_utils::serenity::create_test_voice_channel;

    use super::*;

    #[test]
    fn snapshot_reads_owner_overwrite() {
        let channel = create_test_voice_channel(1, 10, "🔊ㆍPVC 1", Some(100), Some(42));

        let snapshot = snapshot_from_channel(&channel, 2);

        assert_eq!(snapshot.channel_id, ChannelId::new(10));
        assert_eq!(snapshot.parent_id, Some(ChannelId::new(100)));
        assert_eq!(snapshot.owner_id, Some(UserId::new(42)));
        assert_eq!(snapshot.occupants, 2);
    }

    #[test]
    fn snapshot_without_overwrites_has_no_owner() {
        let channel = create_test_voice_channel(1, 10, "🔊ㆍVC 1", Some(100), None);

        let snapshot = snapshot_from_channel(&channel, 0);

        assert_eq!(snapshot.name, "🔊ㆍVC 1");
        assert_eq!(snapshot.owner_id, None);
    }

    #[test]
    fn owner_permissions_match_private_overwrite() {
        assert!(OWNER_PERMISSIONS.contains(Permissions::CONNECT));
        assert!(OWNER_PERMISSIONS.contains(Permissions::MANAGE_CHANNELS));
        assert!(OWNER_PERMISSIONS.contains(Permissions::MOVE_MEMBERS));
    }
}
