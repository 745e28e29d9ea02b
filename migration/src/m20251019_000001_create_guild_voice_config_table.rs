use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]

pub struct Migration;

#[async_trait::async_trait]

impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(GuildVoiceConfig::Table)
                    .if_not_exists()
                    .col(pk_auto(GuildVoiceConfig::Id))
                    .col(string_uniq(GuildVoiceConfig::GuildId))
                    .col(string_null(GuildVoiceConfig::LobbyChannelId))
                    .col(string_null(GuildVoiceConfig::CategoryId))
                    .col(string_null(GuildVoiceConfig::PrivateLobbyChannelId))
                    .col(string_null(GuildVoiceConfig::PrivateCategoryId))
                    .col(string_null(GuildVoiceConfig::LogChannelId))
                    .col(
                        timestamp(GuildVoiceConfig::UpdatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(GuildVoiceConfig::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]

pub enum GuildVoiceConfig {
    Table,
    Id,
    GuildId,
    LobbyChannelId,
    CategoryId,
    PrivateLobbyChannelId,
    PrivateCategoryId,
    LogChannelId,
    UpdatedAt,
}
