use serenity::all::{ChannelId, UserId};

use crate::model::voice::TransientChannel;
use crate::service::voice::{registry::GuildVoiceState, VoiceChannelService};

use super::*;

#[tokio::test]
async fn public_lobby_join_creates_first_channel() {
    let platform = platform();
    let naming = naming();
    let config = config();
    let service = VoiceChannelService::new(&platform, &naming);
    let mut state = GuildVoiceState::new();

    let channel = join_lobby(&service, &platform, &mut state, &config, 1, LOBBY)
        .await
        .unwrap();

    assert_eq!(platform.name_of(channel).as_deref(), Some("VC 1"));
    assert!(state.is_tracked(channel));
    assert_eq!(state.owner_of(channel), None);
    assert_eq!(
        platform.calls()[0],
        Call::Create {
            name: "VC 1".to_string(),
            category_id: ChannelId::new(CATEGORY),
            owner_id: None,
        }
    );
}

#[tokio::test]
async fn public_channel_gets_lowest_free_number() {
    let platform = platform();
    platform.add_channel(300, "VC 1", Some(CATEGORY), None);
    platform.add_channel(301, "VC 3", Some(CATEGORY), None);
    platform.add_channel(302, "Music", Some(CATEGORY), None);
    platform.connect(9, Some(ChannelId::new(300)));
    platform.connect(8, Some(ChannelId::new(301)));
    let naming = naming();
    let config = config();
    let service = VoiceChannelService::new(&platform, &naming);
    let mut state = GuildVoiceState::new();
    state.track(TransientChannel::public(ChannelId::new(300)));
    state.track(TransientChannel::public(ChannelId::new(301)));

    let channel = join_lobby(&service, &platform, &mut state, &config, 1, LOBBY)
        .await
        .unwrap();

    assert_eq!(platform.name_of(channel).as_deref(), Some("VC 2"));
    assert_eq!(platform.name_of(ChannelId::new(301)).as_deref(), Some("VC 3"));
}

#[tokio::test]
async fn failed_move_deletes_new_channel() {
    let platform = platform();
    platform.fail_moves();
    let naming = naming();
    let config = config();
    let service = VoiceChannelService::new(&platform, &naming);
    let mut state = GuildVoiceState::new();

    let created = service
        .create_public_channel(&mut state, &config, UserId::new(1))
        .await;

    assert_eq!(created, None);
    assert!(state.is_empty());
    assert!(platform.names_in(CATEGORY).is_empty());
    assert!(matches!(platform.calls().last(), Some(Call::Delete(_))));
}

#[tokio::test]
async fn private_lobby_join_creates_owned_channel() {
    let platform = platform();
    let naming = naming();
    let config = config();
    let service = VoiceChannelService::new(&platform, &naming);
    let mut state = GuildVoiceState::new();

    let channel = join_lobby(&service, &platform, &mut state, &config, 7, PRIVATE_LOBBY)
        .await
        .unwrap();

    assert_eq!(platform.name_of(channel).as_deref(), Some("PVC 1"));
    assert_eq!(state.owned_by(UserId::new(7)), Some(channel));
    assert_eq!(
        platform.calls()[0],
        Call::Create {
            name: "PVC 1".to_string(),
            category_id: ChannelId::new(PRIVATE_CATEGORY),
            owner_id: Some(UserId::new(7)),
        }
    );
}

#[tokio::test]
async fn private_lobby_redirects_owner_to_existing_channel() {
    let platform = platform();
    let naming = naming();
    let config = config();
    let service = VoiceChannelService::new(&platform, &naming);
    let mut state = GuildVoiceState::new();

    // Owner stays in their channel through a friend, then leaves and comes back.
    let channel = join_lobby(&service, &platform, &mut state, &config, 7, PRIVATE_LOBBY)
        .await
        .unwrap();
    platform.connect(8, Some(channel));
    voice_update(&service, &platform, &mut state, &config, 7, Some(channel), None).await;
    platform.clear_calls();

    let back = join_lobby(&service, &platform, &mut state, &config, 7, PRIVATE_LOBBY).await;

    assert_eq!(back, Some(channel));
    assert_eq!(platform.calls(), vec![Call::Move(UserId::new(7), channel)]);
    assert_eq!(platform.names_in(PRIVATE_CATEGORY), vec!["PVC 1".to_string()]);
}

#[tokio::test]
async fn stale_ownership_is_replaced() {
    let platform = platform();
    let naming = naming();
    let config = config();
    let service = VoiceChannelService::new(&platform, &naming);
    let mut state = GuildVoiceState::new();

    let old = join_lobby(&service, &platform, &mut state, &config, 7, PRIVATE_LOBBY)
        .await
        .unwrap();
    platform.remove_channel(old);

    let new = join_lobby(&service, &platform, &mut state, &config, 7, PRIVATE_LOBBY)
        .await
        .unwrap();

    assert_ne!(old, new);
    assert!(!state.is_tracked(old));
    assert_eq!(state.owned_by(UserId::new(7)), Some(new));
}

#[tokio::test]
async fn joins_without_category_do_nothing() {
    let platform = platform();
    let naming = naming();
    let mut config = config();
    config.category_id = None;
    let service = VoiceChannelService::new(&platform, &naming);
    let mut state = GuildVoiceState::new();

    let channel = join_lobby(&service, &platform, &mut state, &config, 1, LOBBY).await;

    assert_eq!(channel, None);
    assert!(platform.calls().is_empty());
}

#[tokio::test]
async fn mute_updates_are_ignored() {
    let platform = platform();
    let naming = naming();
    let config = config();
    let service = VoiceChannelService::new(&platform, &naming);
    let mut state = GuildVoiceState::new();
    let lobby = Some(ChannelId::new(LOBBY));

    voice_update(&service, &platform, &mut state, &config, 1, lobby, lobby).await;

    assert!(platform.calls().is_empty());
}
