//! Guild voice configuration management.
//!
//! Backs the administrator slash commands that choose lobbies, categories and the
//! voice log channel of a guild.

use sea_orm::DatabaseConnection;
use serenity::all::{ChannelId, GuildId};

use crate::data::voice_config::GuildVoiceConfigRepository;
use crate::error::AppError;
use crate::model::voice_config::{GuildVoiceConfig, VoiceConfigField};

pub struct VoiceConfigService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> VoiceConfigService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Configuration of a guild, empty if it was never set up.
    pub async fn get(&self, guild_id: GuildId) -> Result<GuildVoiceConfig, AppError> {
        let repo = GuildVoiceConfigRepository::new(self.db);

        Ok(repo
            .find_by_guild_id(guild_id.get())
            .await?
            .unwrap_or_else(|| GuildVoiceConfig::empty(guild_id)))
    }

    /// Stored configuration of a guild, `None` if it was never set up.
    pub async fn find(&self, guild_id: GuildId) -> Result<Option<GuildVoiceConfig>, AppError> {
        let repo = GuildVoiceConfigRepository::new(self.db);

        Ok(repo.find_by_guild_id(guild_id.get()).await?)
    }

    /// Configuration of a guild that has transient channels enabled.
    ///
    /// # Returns
    /// - `Ok(Some(GuildVoiceConfig))` - At least one transient channel category is set
    /// - `Ok(None)` - Guild not configured for voice channels
    /// - `Err(AppError::DbErr)` - Database error
    pub async fn find_managed(&self, guild_id: GuildId) -> Result<Option<GuildVoiceConfig>, AppError> {
        let repo = GuildVoiceConfigRepository::new(self.db);

        Ok(repo
            .find_by_guild_id(guild_id.get())
            .await?
            .filter(GuildVoiceConfig::manages_voice_channels))
    }

    /// Every guild configuration with transient channels enabled.
    pub async fn get_all_managed(&self) -> Result<Vec<GuildVoiceConfig>, AppError> {
        let repo = GuildVoiceConfigRepository::new(self.db);

        Ok(repo
            .get_all()
            .await?
            .into_iter()
            .filter(GuildVoiceConfig::manages_voice_channels)
            .collect())
    }

    /// Stores one configured channel and returns the updated configuration.
    pub async fn set_channel(
        &self,
        guild_id: GuildId,
        field: VoiceConfigField,
        channel_id: ChannelId,
    ) -> Result<GuildVoiceConfig, AppError> {
        let repo = GuildVoiceConfigRepository::new(self.db);

        let config = repo
            .set_channel(guild_id.get(), field, Some(channel_id.get()))
            .await?;

        tracing::info!(
            "Set {} of guild {} to channel {}",
            field.label(),
            guild_id,
            channel_id
        );

        Ok(config)
    }
}
