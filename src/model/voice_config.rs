//! Per-guild voice configuration domain models.
//!
//! Tracks which channels act as lobbies, which categories receive transient channels,
//! and where voice activity is logged. Handles conversion from the entity model, whose
//! snowflakes are stored as strings.

use chrono::{DateTime, Utc};
use sea_orm::DbErr;
use serenity::all::{ChannelId, GuildId};

use crate::model::voice::ChannelKind;

/// Voice channel configuration for a single guild.
///
/// Every channel is optional: a guild can run public lobbies without private ones and
/// the other way round. Missing values simply disable the matching feature.
#[derive(Debug, Clone, PartialEq)]
pub struct GuildVoiceConfig {
    pub guild_id: GuildId,
    /// Voice channel whose join creates a public transient channel.
    pub lobby_channel_id: Option<ChannelId>,
    /// Category receiving public transient channels.
    pub category_id: Option<ChannelId>,
    /// Voice channel whose join creates or redirects to a private channel.
    pub private_lobby_channel_id: Option<ChannelId>,
    /// Category receiving private transient channels.
    pub private_category_id: Option<ChannelId>,
    /// Text channel receiving voice activity log embeds.
    pub log_channel_id: Option<ChannelId>,
    pub updated_at: DateTime<Utc>,
}

impl GuildVoiceConfig {
    /// Configuration for a guild that has never been set up.
    pub fn empty(guild_id: GuildId) -> Self {
        Self {
            guild_id,
            lobby_channel_id: None,
            category_id: None,
            private_lobby_channel_id: None,
            private_category_id: None,
            log_channel_id: None,
            updated_at: Utc::now(),
        }
    }

    /// Converts an entity model to a domain model at the repository boundary.
    ///
    /// # Returns
    /// - `Ok(GuildVoiceConfig)` - Successfully converted domain model
    /// - `Err(DbErr::Custom)` - A stored id is not a valid snowflake
    pub fn from_entity(entity: entity::guild_voice_config::Model) -> Result<Self, DbErr> {
        Ok(Self {
            guild_id: GuildId::new(parse_snowflake("guild_id", &entity.guild_id)?),
            lobby_channel_id: parse_channel("lobby_channel_id", entity.lobby_channel_id)?,
            category_id: parse_channel("category_id", entity.category_id)?,
            private_lobby_channel_id: parse_channel(
                "private_lobby_channel_id",
                entity.private_lobby_channel_id,
            )?,
            private_category_id: parse_channel(
                "private_category_id",
                entity.private_category_id,
            )?,
            log_channel_id: parse_channel("log_channel_id", entity.log_channel_id)?,
            updated_at: entity.updated_at,
        })
    }

    pub fn lobby_for(&self, kind: ChannelKind) -> Option<ChannelId> {
        match kind {
            ChannelKind::Public => self.lobby_channel_id,
            ChannelKind::Private => self.private_lobby_channel_id,
        }
    }

    pub fn category_for(&self, kind: ChannelKind) -> Option<ChannelId> {
        match kind {
            ChannelKind::Public => self.category_id,
            ChannelKind::Private => self.private_category_id,
        }
    }

    /// Whether `channel_id` is one of the lobby channels.
    pub fn is_lobby(&self, channel_id: ChannelId) -> bool {
        self.lobby_channel_id == Some(channel_id)
            || self.private_lobby_channel_id == Some(channel_id)
    }

    /// Whether `parent_id` is one of the categories receiving transient channels.
    pub fn is_transient_category(&self, parent_id: Option<ChannelId>) -> bool {
        parent_id.is_some_and(|parent_id| {
            self.category_id == Some(parent_id) || self.private_category_id == Some(parent_id)
        })
    }

    /// Whether transient channels can exist in this guild at all.
    pub fn manages_voice_channels(&self) -> bool {
        self.category_id.is_some() || self.private_category_id.is_some()
    }
}

/// Single configurable channel of `GuildVoiceConfig`, set through admin commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoiceConfigField {
    Lobby,
    Category,
    PrivateLobby,
    PrivateCategory,
    LogChannel,
}

impl VoiceConfigField {
    /// Human readable name used in command replies and logs.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Lobby => "voice lobby",
            Self::Category => "voice category",
            Self::PrivateLobby => "private lobby",
            Self::PrivateCategory => "private category",
            Self::LogChannel => "voice log channel",
        }
    }
}

fn parse_snowflake(field: &str, value: &str) -> Result<u64, DbErr> {
    value
        .parse::<u64>()
        .ok()
        .filter(|id| *id != 0)
        .ok_or_else(|| DbErr::Custom(format!("Failed to parse {}: '{}'", field, value)))
}

fn parse_channel(field: &str, value: Option<String>) -> Result<Option<ChannelId>, DbErr> {
    value
        .map(|value| parse_snowflake(field, &value).map(ChannelId::new))
        .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entity(guild_id: &str, lobby: Option<&str>) -> entity::guild_voice_config::Model {
        entity::guild_voice_config::Model {
            id: 1,
            guild_id: guild_id.to_string(),
            lobby_channel_id: lobby.map(str::to_string),
            category_id: Some("200".to_string()),
            private_lobby_channel_id: None,
            private_category_id: None,
            log_channel_id: None,
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn converts_entity_ids() {
        let config = GuildVoiceConfig::from_entity(entity("10", Some("100"))).unwrap();

        assert_eq!(config.guild_id, GuildId::new(10));
        assert_eq!(config.lobby_channel_id, Some(ChannelId::new(100)));
        assert_eq!(config.category_id, Some(ChannelId::new(200)));
        assert_eq!(config.private_category_id, None);
        assert!(config.is_lobby(ChannelId::new(100)));
        assert!(config.manages_voice_channels());
        assert!(config.is_transient_category(Some(ChannelId::new(200))));
        assert!(!config.is_transient_category(Some(ChannelId::new(100))));
        assert!(!config.is_transient_category(None));
    }

    #[test]
    fn rejects_invalid_ids() {
        assert!(GuildVoiceConfig::from_entity(entity("guild", None)).is_err());
        assert!(GuildVoiceConfig::from_entity(entity("10", Some("0"))).is_err());
    }

    #[test]
    fn empty_config_manages_nothing() {
        let config = GuildVoiceConfig::empty(GuildId::new(10));

        assert!(!config.manages_voice_channels());
        assert_eq!(config.lobby_for(ChannelKind::Private), None);
    }
}
