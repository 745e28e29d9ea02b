use super::*;

/// Tests finding a configured guild.
///
/// Expected: Ok(Some(config)) with parsed channel ids
#[tokio::test]
async fn finds_existing_config() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_voice_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    factory::guild_voice_config::GuildVoiceConfigFactory::new(db)
        .guild_id("123456789")
        .lobby_channel_id(Some("100"))
        .category_id(Some("200"))
        .build()
        .await?;

    let repo = GuildVoiceConfigRepository::new(db);
    let config = repo.find_by_guild_id(123456789).await?.unwrap();

    assert_eq!(config.guild_id.get(), 123456789);
    assert_eq!(config.lobby_channel_id, Some(ChannelId::new(100)));
    assert_eq!(config.category_id, Some(ChannelId::new(200)));
    assert_eq!(config.private_lobby_channel_id, None);

    Ok(())
}

/// Tests finding a guild that was never configured.
///
/// Expected: Ok(None)
#[tokio::test]
async fn returns_none_for_unconfigured_guild() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_voice_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = GuildVoiceConfigRepository::new(db);
    let result = repo.find_by_guild_id(999999999).await?;

    assert!(result.is_none());

    Ok(())
}

/// Tests that a corrupt stored id surfaces as an error instead of a panic.
///
/// Expected: Err(DbErr::Custom)
#[tokio::test]
async fn fails_on_invalid_stored_id() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_voice_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    factory::guild_voice_config::GuildVoiceConfigFactory::new(db)
        .guild_id("123456789")
        .lobby_channel_id(Some("not-a-snowflake"))
        .build()
        .await?;

    let repo = GuildVoiceConfigRepository::new(db);
    let result = repo.find_by_guild_id(123456789).await;

    assert!(matches!(result, Err(DbErr::Custom(_))));

    Ok(())
}
