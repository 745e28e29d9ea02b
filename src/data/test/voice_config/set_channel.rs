use super::*;

/// Tests that setting a channel creates the row for a new guild.
///
/// Expected: Ok(config) with only the given field set
#[tokio::test]
async fn creates_config_for_new_guild() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_voice_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = GuildVoiceConfigRepository::new(db);
    let config = repo
        .set_channel(123456789, VoiceConfigField::PrivateLobby, Some(300))
        .await?;

    assert_eq!(config.private_lobby_channel_id, Some(ChannelId::new(300)));
    assert_eq!(config.lobby_channel_id, None);
    assert_eq!(config.category_id, None);

    let stored = repo.find_by_guild_id(123456789).await?.unwrap();
    assert_eq!(stored, config);

    Ok(())
}

/// Tests that updating one channel leaves the others untouched.
///
/// Expected: Ok(config) with the previous fields preserved
#[tokio::test]
async fn preserves_other_fields_on_update() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_voice_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    factory::guild_voice_config::GuildVoiceConfigFactory::new(db)
        .guild_id("123456789")
        .lobby_channel_id(Some("100"))
        .category_id(Some("200"))
        .build()
        .await?;

    let repo = GuildVoiceConfigRepository::new(db);
    let config = repo
        .set_channel(123456789, VoiceConfigField::Category, Some(250))
        .await?;

    assert_eq!(config.lobby_channel_id, Some(ChannelId::new(100)));
    assert_eq!(config.category_id, Some(ChannelId::new(250)));
    assert_eq!(repo.get_all().await?.len(), 1);

    Ok(())
}

/// Tests clearing a configured channel.
///
/// Expected: Ok(config) with the field reset to None
#[tokio::test]
async fn clears_channel() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_voice_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    factory::guild_voice_config::GuildVoiceConfigFactory::new(db)
        .guild_id("123456789")
        .log_channel_id(Some("400"))
        .build()
        .await?;

    let repo = GuildVoiceConfigRepository::new(db);
    let config = repo
        .set_channel(123456789, VoiceConfigField::LogChannel, None)
        .await?;

    assert_eq!(config.log_channel_id, None);

    Ok(())
}
