use sea_orm::entity::prelude::*;

/// Per-guild voice channel configuration.
///
/// Discord snowflakes are stored as strings since SQLite has no unsigned 64-bit integer.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "guild_voice_config")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub guild_id: String,
    pub lobby_channel_id: Option<String>,
    pub category_id: Option<String>,
    pub private_lobby_channel_id: Option<String>,
    pub private_category_id: Option<String>,
    pub log_channel_id: Option<String>,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
