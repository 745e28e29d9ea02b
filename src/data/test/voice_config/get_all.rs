use super::*;

/// Tests retrieving all guild configurations.
///
/// Expected: Ok(Vec) containing every stored guild
#[tokio::test]
async fn returns_every_config() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_voice_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    factory::create_guild_voice_config(db).await?;
    factory::create_guild_voice_config(db).await?;

    let repo = GuildVoiceConfigRepository::new(db);
    let configs = repo.get_all().await?;

    assert_eq!(configs.len(), 2);
    assert_ne!(configs[0].guild_id, configs[1].guild_id);

    Ok(())
}

/// Tests retrieving configurations from an empty table.
///
/// Expected: Ok(empty Vec)
#[tokio::test]
async fn returns_empty_when_nothing_configured() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_voice_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = GuildVoiceConfigRepository::new(db);

    assert!(repo.get_all().await?.is_empty());

    Ok(())
}
