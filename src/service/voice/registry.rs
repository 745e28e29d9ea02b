//! In-memory bookkeeping of transient channels.
//!
//! `GuildVoiceState` holds one guild's transient channels and private channel owners
//! and is only mutated through its methods, which keep both maps consistent.
//! `VoiceRegistry` hands out the state of a guild behind an async mutex: whoever
//! holds the guard may suspend on Discord API calls without another event for the
//! same guild observing half-applied changes.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use serenity::all::{ChannelId, GuildId, UserId};
use tokio::sync::{Mutex, OwnedMutexGuard};

use crate::model::voice::{ChannelKind, TransientChannel};

/// Transient channels and private ownership for a single guild.
#[derive(Debug, Default)]
pub struct GuildVoiceState {
    channels: HashMap<ChannelId, TransientChannel>,
    /// Owner to owned private channel; at most one entry per user.
    owners: HashMap<UserId, ChannelId>,
}

impl GuildVoiceState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts tracking a channel.
    ///
    /// A private channel whose owner already owns another tracked channel is tracked
    /// without an owner, so it is still cleaned up but can't be controlled.
    ///
    /// # Returns
    /// - `true` - Channel tracked with its owner recorded (always for public channels)
    /// - `false` - Ownership was refused
    pub fn track(&mut self, mut channel: TransientChannel) -> bool {
        let channel_id = channel.channel_id;
        let mut owned = true;

        if let Some(owner_id) = channel.owner_id {
            match self.owners.get(&owner_id) {
                Some(existing) if *existing != channel_id => {
                    channel.owner_id = None;
                    owned = false;
                }
                _ => {
                    self.owners.insert(owner_id, channel_id);
                }
            }
        }

        self.channels.insert(channel_id, channel);
        owned
    }

    /// Stops tracking a channel and releases its owner.
    pub fn untrack(&mut self, channel_id: ChannelId) -> Option<TransientChannel> {
        let channel = self.channels.remove(&channel_id)?;

        if let Some(owner_id) = channel.owner_id {
            if self.owners.get(&owner_id) == Some(&channel_id) {
                self.owners.remove(&owner_id);
            }
        }

        Some(channel)
    }

    /// Drops tracked channels of `kind` that are no longer present on the platform.
    ///
    /// # Returns
    /// - Ids of the dropped channels
    pub fn retain_kind(&mut self, kind: ChannelKind, present: &HashSet<ChannelId>) -> Vec<ChannelId> {
        let stale: Vec<ChannelId> = self
            .channels
            .values()
            .filter(|channel| channel.kind == kind && !present.contains(&channel.channel_id))
            .map(|channel| channel.channel_id)
            .collect();

        for channel_id in &stale {
            self.untrack(*channel_id);
        }

        stale
    }

    pub fn get(&self, channel_id: ChannelId) -> Option<&TransientChannel> {
        self.channels.get(&channel_id)
    }

    pub fn is_tracked(&self, channel_id: ChannelId) -> bool {
        self.channels.contains_key(&channel_id)
    }

    /// Private channel owned by `user_id`.
    pub fn owned_by(&self, user_id: UserId) -> Option<ChannelId> {
        self.owners.get(&user_id).copied()
    }

    /// Recorded owner of a private channel.
    pub fn owner_of(&self, channel_id: ChannelId) -> Option<UserId> {
        self.channels
            .get(&channel_id)
            .and_then(|channel| channel.owner_id)
    }

    pub fn len(&self) -> usize {
        self.channels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }
}

/// Voice bookkeeping for every guild, serialized per guild.
///
/// Cheap to clone; clones share the same state.
#[derive(Clone, Default)]
pub struct VoiceRegistry {
    guilds: Arc<Mutex<HashMap<GuildId, Arc<Mutex<GuildVoiceState>>>>>,
}

impl VoiceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Locks the state of a guild, creating it on first use.
    ///
    /// The guard is held for the whole handling of an event, including Discord API
    /// calls, so events of one guild are applied one after another. Other guilds are
    /// not blocked.
    pub async fn lock(&self, guild_id: GuildId) -> OwnedMutexGuard<GuildVoiceState> {
        let guild = {
            let mut guilds = self.guilds.lock().await;
            guilds.entry(guild_id).or_default().clone()
        };

        guild.lock_owned().await
    }
}
