//! Guild voice configuration factory.
//!
//! Inserts `guild_voice_config` rows with every channel unset by default so tests only
//! spell out the ids they care about.

use crate::factory::helpers::next_id;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating test guild voice configurations.
///
/// # Example
///
/// ```rust,ignore
/// use test_utils::factory::guild_voice_config::GuildVoiceConfigFactory;
///
/// let config = GuildVoiceConfigFactory::new(&db)
///     .guild_id("987654321")
///     .category_id(Some("200"))
///     .build()
///     .await?;
/// ```
pub struct GuildVoiceConfigFactory<'a> {
    db: &'a DatabaseConnection,
    guild_id: String,
    lobby_channel_id: Option<String>,
    category_id: Option<String>,
    private_lobby_channel_id: Option<String>,
    private_category_id: Option<String>,
    log_channel_id: Option<String>,
}

impl<'a> GuildVoiceConfigFactory<'a> {
    /// Creates a new factory with a unique guild id and no channels configured.
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self {
            db,
            guild_id: next_id().to_string(),
            lobby_channel_id: None,
            category_id: None,
            private_lobby_channel_id: None,
            private_category_id: None,
            log_channel_id: None,
        }
    }

    pub fn guild_id(mut self, guild_id: impl Into<String>) -> Self {
        self.guild_id = guild_id.into();
        self
    }

    pub fn lobby_channel_id(mut self, id: Option<&str>) -> Self {
        self.lobby_channel_id = id.map(str::to_string);
        self
    }

    pub fn category_id(mut self, id: Option<&str>) -> Self {
        self.category_id = id.map(str::to_string);
        self
    }

    pub fn private_lobby_channel_id(mut self, id: Option<&str>) -> Self {
        self.private_lobby_channel_id = id.map(str::to_string);
        self
    }

    pub fn private_category_id(mut self, id: Option<&str>) -> Self {
        self.private_category_id = id.map(str::to_string);
        self
    }

    pub fn log_channel_id(mut self, id: Option<&str>) -> Self {
        self.log_channel_id = id.map(str::to_string);
        self
    }

    /// Builds and inserts the configuration row.
    ///
    /// # Returns
    /// - `Ok(entity::guild_voice_config::Model)` - Created row
    /// - `Err(DbErr)` - Database error during insert
    pub async fn build(self) -> Result<entity::guild_voice_config::Model, DbErr> {
        entity::guild_voice_config::ActiveModel {
            guild_id: ActiveValue::Set(self.guild_id),
            lobby_channel_id: ActiveValue::Set(self.lobby_channel_id),
            category_id: ActiveValue::Set(self.category_id),
            private_lobby_channel_id: ActiveValue::Set(self.private_lobby_channel_id),
            private_category_id: ActiveValue::Set(self.private_category_id),
            log_channel_id: ActiveValue::Set(self.log_channel_id),
            updated_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

/// Creates a guild voice configuration with default values.
///
/// Shorthand for `GuildVoiceConfigFactory::new(db).build().await`.
pub async fn create_guild_voice_config(
    db: &DatabaseConnection,
) -> Result<entity::guild_voice_config::Model, DbErr> {
    GuildVoiceConfigFactory::new(db).build().await
}
