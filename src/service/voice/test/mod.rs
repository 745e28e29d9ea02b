//! Lifecycle tests running `VoiceChannelService` against an in-memory platform.

mod creation;

use std::collections::{BTreeMap, HashMap};
use std::sync::Mutex;

use chrono::Utc;
use serenity::all::{ChannelId, GuildId, UserId};
use serenity::async_trait;

use crate::error::AppError;
use crate::model::{
    voice::{ChannelNaming, CreateVoiceChannelParam, NameFormat, VoiceChannelSnapshot, VoiceStateChange},
    voice_config::GuildVoiceConfig,
};
use crate::service::voice::{platform::VoicePlatform, registry::GuildVoiceState, VoiceChannelService};

pub const GUILD: u64 = 1;
pub const LOBBY: u64 = 100;
pub const PRIVATE_LOBBY: u64 = 101;
pub const CATEGORY: u64 = 200;
pub const PRIVATE_CATEGORY: u64 = 201;

/// Outbound call recorded by `FakePlatform`.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Create {
        name: String,
        category_id: ChannelId,
        owner_id: Option<UserId>,
    },
    Rename(ChannelId, String),
    SetLimit(ChannelId, u32),
    SetPublicConnect(ChannelId, bool),
    Delete(ChannelId),
    Move(UserId, ChannelId),
}

#[derive(Default)]
struct FakeState {
    channels: BTreeMap<ChannelId, VoiceChannelSnapshot>,
    /// Voice channel each connected member sits in.
    members: HashMap<UserId, ChannelId>,
    next_id: u64,
    calls: Vec<Call>,
    fail_moves: bool,
    fail_deletes: bool,
}

impl FakeState {
    fn snapshot(&self, channel_id: ChannelId) -> Option<VoiceChannelSnapshot> {
        let mut channel = self.channels.get(&channel_id)?.clone();
        channel.occupants = self.members.values().filter(|c| **c == channel_id).count();
        Some(channel)
    }
}

/// In-memory `VoicePlatform` that applies calls to its own channel list and records them.
pub struct FakePlatform {
    inner: Mutex<FakeState>,
}

impl FakePlatform {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(FakeState {
                next_id: 1000,
                ..Default::default()
            }),
        }
    }

    /// Adds a channel that exists before the test starts.
    pub fn add_channel(&self, id: u64, name: &str, category: Option<u64>, owner: Option<u64>) {
        let channel_id = ChannelId::new(id);
        self.inner.lock().unwrap().channels.insert(
            channel_id,
            VoiceChannelSnapshot {
                channel_id,
                name: name.to_string(),
                parent_id: category.map(ChannelId::new),
                occupants: 0,
                owner_id: owner.map(UserId::new),
            },
        );
    }

    /// Removes a channel as if an administrator deleted it by hand.
    pub fn remove_channel(&self, channel_id: ChannelId) {
        let mut inner = self.inner.lock().unwrap();
        inner.channels.remove(&channel_id);
        inner.members.retain(|_, c| *c != channel_id);
    }

    /// Connects a member to a channel (or disconnects them), as the gateway would.
    pub fn connect(&self, user: u64, channel: Option<ChannelId>) {
        let mut inner = self.inner.lock().unwrap();
        match channel {
            Some(channel_id) => inner.members.insert(UserId::new(user), channel_id),
            None => inner.members.remove(&UserId::new(user)),
        };
    }

    pub fn fail_moves(&self) {
        self.inner.lock().unwrap().fail_moves = true;
    }

    pub fn fail_deletes(&self) {
        self.inner.lock().unwrap().fail_deletes = true;
    }

    pub fn location(&self, user: u64) -> Option<ChannelId> {
        self.inner.lock().unwrap().members.get(&UserId::new(user)).copied()
    }

    pub fn name_of(&self, channel_id: ChannelId) -> Option<String> {
        self.inner
            .lock()
            .unwrap()
            .channels
            .get(&channel_id)
            .map(|c| c.name.clone())
    }

    pub fn exists(&self, channel_id: ChannelId) -> bool {
        self.inner.lock().unwrap().channels.contains_key(&channel_id)
    }

    /// Sorted channel names of a category.
    pub fn names_in(&self, category: u64) -> Vec<String> {
        let inner = self.inner.lock().unwrap();
        let mut names: Vec<String> = inner
            .channels
            .values()
            .filter(|c| c.parent_id == Some(ChannelId::new(category)))
            .map(|c| c.name.clone())
            .collect();
        names.sort();
        names
    }

    pub fn calls(&self) -> Vec<Call> {
        self.inner.lock().unwrap().calls.clone()
    }

    pub fn clear_calls(&self) {
        self.inner.lock().unwrap().calls.clear();
    }
}

fn missing(channel_id: ChannelId) -> AppError {
    AppError::NotFound(format!("Unknown channel {}", channel_id))
}

#[async_trait]
impl VoicePlatform for FakePlatform {
    async fn category_channels(
        &self,
        _guild_id: GuildId,
        category_id: ChannelId,
    ) -> Result<Vec<VoiceChannelSnapshot>, AppError> {
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .channels
            .values()
            .filter(|c| c.parent_id == Some(category_id))
            .filter_map(|c| inner.snapshot(c.channel_id))
            .collect())
    }

    async fn channel(
        &self,
        _guild_id: GuildId,
        channel_id: ChannelId,
    ) -> Result<Option<VoiceChannelSnapshot>, AppError> {
        Ok(self.inner.lock().unwrap().snapshot(channel_id))
    }

    async fn create_voice_channel(
        &self,
        _guild_id: GuildId,
        param: CreateVoiceChannelParam,
    ) -> Result<ChannelId, AppError> {
        let mut inner = self.inner.lock().unwrap();
        inner.next_id += 1;
        let channel_id = ChannelId::new(inner.next_id);

        inner.calls.push(Call::Create {
            name: param.name.clone(),
            category_id: param.category_id,
            owner_id: param.owner_id,
        });
        inner.channels.insert(
            channel_id,
            VoiceChannelSnapshot {
                channel_id,
                name: param.name,
                parent_id: Some(param.category_id),
                occupants: 0,
                owner_id: param.owner_id,
            },
        );

        Ok(channel_id)
    }

    async fn rename_channel(&self, channel_id: ChannelId, name: &str) -> Result<(), AppError> {
        let mut inner = self.inner.lock().unwrap();
        inner.calls.push(Call::Rename(channel_id, name.to_string()));
        let channel = inner.channels.get_mut(&channel_id).ok_or_else(|| missing(channel_id))?;
        channel.name = name.to_string();
        Ok(())
    }

    async fn set_user_limit(&self, channel_id: ChannelId, limit: u32) -> Result<(), AppError> {
        self.inner
            .lock()
            .unwrap()
            .calls
            .push(Call::SetLimit(channel_id, limit));
        Ok(())
    }

    async fn set_public_connect(
        &self,
        _guild_id: GuildId,
        channel_id: ChannelId,
        allow: bool,
    ) -> Result<(), AppError> {
        self.inner
            .lock()
            .unwrap()
            .calls
            .push(Call::SetPublicConnect(channel_id, allow));
        Ok(())
    }

    async fn delete_channel(&self, channel_id: ChannelId) -> Result<(), AppError> {
        let mut inner = self.inner.lock().unwrap();
        inner.calls.push(Call::Delete(channel_id));
        if inner.fail_deletes {
            return Err(AppError::NotFound(format!("Missing permissions on {}", channel_id)));
        }
        inner.channels.remove(&channel_id).ok_or_else(|| missing(channel_id))?;
        inner.members.retain(|_, c| *c != channel_id);
        Ok(())
    }

    async fn move_member(
        &self,
        _guild_id: GuildId,
        user_id: UserId,
        channel_id: ChannelId,
    ) -> Result<(), AppError> {
        let mut inner = self.inner.lock().unwrap();
        inner.calls.push(Call::Move(user_id, channel_id));
        if inner.fail_moves {
            return Err(AppError::NotFound(format!("Member {} is not connected", user_id)));
        }
        inner.members.insert(user_id, channel_id);
        Ok(())
    }
}

pub fn naming() -> ChannelNaming {
    ChannelNaming {
        public: NameFormat::new("VC {n}").unwrap(),
        private: NameFormat::new("PVC {n}").unwrap(),
    }
}

/// Configuration with both lobbies and both categories set.
pub fn config() -> GuildVoiceConfig {
    GuildVoiceConfig {
        guild_id: GuildId::new(GUILD),
        lobby_channel_id: Some(ChannelId::new(LOBBY)),
        category_id: Some(ChannelId::new(CATEGORY)),
        private_lobby_channel_id: Some(ChannelId::new(PRIVATE_LOBBY)),
        private_category_id: Some(ChannelId::new(PRIVATE_CATEGORY)),
        log_channel_id: None,
        updated_at: Utc::now(),
    }
}

/// Platform with both lobby channels present.
pub fn platform() -> FakePlatform {
    let platform = FakePlatform::new();
    platform.add_channel(LOBBY, "Join to create", None, None);
    platform.add_channel(PRIVATE_LOBBY, "Join for private", None, None);
    platform
}

/// Moves `user` from `before` to `after` on the platform and feeds the update to the service.
pub async fn voice_update(
    service: &VoiceChannelService<'_>,
    platform: &FakePlatform,
    state: &mut GuildVoiceState,
    config: &GuildVoiceConfig,
    user: u64,
    before: Option<ChannelId>,
    after: Option<ChannelId>,
) {
    platform.connect(user, after);

    let change = VoiceStateChange {
        guild_id: GuildId::new(GUILD),
        user_id: UserId::new(user),
        before,
        after,
    };

    service.handle_voice_state_update(state, config, change).await;
}

/// Has `user` join a lobby and returns the channel the bot moved them into.
pub async fn join_lobby(
    service: &VoiceChannelService<'_>,
    platform: &FakePlatform,
    state: &mut GuildVoiceState,
    config: &GuildVoiceConfig,
    user: u64,
    lobby: u64,
) -> Option<ChannelId> {
    let before = platform.location(user);
    let lobby = ChannelId::new(lobby);
    voice_update(service, platform, state, config, user, before, Some(lobby)).await;

    let moved_to = platform.location(user).filter(|c| *c != lobby)?;
    // The move into the new channel arrives as its own update.
    voice_update(service, platform, state, config, user, Some(lobby), Some(moved_to)).await;

    Some(moved_to)
}
