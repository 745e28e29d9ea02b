use chrono::Utc;
use migration::OnConflict;
use sea_orm::{ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter};

use crate::model::voice_config::{GuildVoiceConfig, VoiceConfigField};

/// Repository for per-guild voice configuration.
///
/// Converts between entity models and domain models at the infrastructure boundary.
pub struct GuildVoiceConfigRepository<'a> {
    /// Database connection for executing queries.
    db: &'a DatabaseConnection,
}

impl<'a> GuildVoiceConfigRepository<'a> {
    /// Creates a new repository instance.
    ///
    /// # Arguments
    /// - `db` - Database connection reference
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Finds the configuration for a guild.
    ///
    /// # Arguments
    /// - `guild_id` - Discord's unique identifier for the guild
    ///
    /// # Returns
    /// - `Ok(Some(GuildVoiceConfig))` - Guild has been configured
    /// - `Ok(None)` - Guild has never been configured
    /// - `Err(DbErr)` - Database error or invalid stored id
    pub async fn find_by_guild_id(&self, guild_id: u64) -> Result<Option<GuildVoiceConfig>, DbErr> {
        entity::prelude::GuildVoiceConfig::find()
            .filter(entity::guild_voice_config::Column::GuildId.eq(guild_id.to_string()))
            .one(self.db)
            .await?
            .map(GuildVoiceConfig::from_entity)
            .transpose()
    }

    /// Retrieves every stored guild configuration.
    ///
    /// Used by the sweep scheduler to visit each guild with voice channels.
    pub async fn get_all(&self) -> Result<Vec<GuildVoiceConfig>, DbErr> {
        entity::prelude::GuildVoiceConfig::find()
            .all(self.db)
            .await?
            .into_iter()
            .map(GuildVoiceConfig::from_entity)
            .collect()
    }

    /// Sets or clears a single configured channel for a guild.
    ///
    /// Creates the guild's row on first use. Only the given field and `updated_at` are
    /// written on conflict, leaving the other channels untouched.
    ///
    /// # Arguments
    /// - `guild_id` - Discord's unique identifier for the guild
    /// - `field` - Which configured channel to write
    /// - `channel_id` - New channel, or `None` to clear it
    ///
    /// # Returns
    /// - `Ok(GuildVoiceConfig)` - Configuration after the update
    /// - `Err(DbErr)` - Database error during upsert
    pub async fn set_channel(
        &self,
        guild_id: u64,
        field: VoiceConfigField,
        channel_id: Option<u64>,
    ) -> Result<GuildVoiceConfig, DbErr> {
        let value = ActiveValue::Set(channel_id.map(|id| id.to_string()));
        let column = Self::column_for(field);

        let mut model = entity::guild_voice_config::ActiveModel {
            guild_id: ActiveValue::Set(guild_id.to_string()),
            updated_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        };
        match field {
            VoiceConfigField::Lobby => model.lobby_channel_id = value,
            VoiceConfigField::Category => model.category_id = value,
            VoiceConfigField::PrivateLobby => model.private_lobby_channel_id = value,
            VoiceConfigField::PrivateCategory => model.private_category_id = value,
            VoiceConfigField::LogChannel => model.log_channel_id = value,
        }

        let entity = entity::prelude::GuildVoiceConfig::insert(model)
            .on_conflict(
                OnConflict::column(entity::guild_voice_config::Column::GuildId)
                    .update_columns([column, entity::guild_voice_config::Column::UpdatedAt])
                    .to_owned(),
            )
            .exec_with_returning(self.db)
            .await?;

        GuildVoiceConfig::from_entity(entity)
    }

    fn column_for(field: VoiceConfigField) -> entity::guild_voice_config::Column {
        use entity::guild_voice_config::Column;

        match field {
            VoiceConfigField::Lobby => Column::LobbyChannelId,
            VoiceConfigField::Category => Column::CategoryId,
            VoiceConfigField::PrivateLobby => Column::PrivateLobbyChannelId,
            VoiceConfigField::PrivateCategory => Column::PrivateCategoryId,
            VoiceConfigField::LogChannel => Column::LogChannelId,
        }
    }
}
