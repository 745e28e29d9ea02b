//! Transient voice channel domain models.
//!
//! A transient channel is a voice channel the bot created on demand when a member
//! joined a lobby channel. It is deleted once its last occupant leaves. The display
//! number of a transient channel is never stored: it is read back from the channel
//! name through the kind's `NameFormat`, so manual renames and deletions can't make a
//! counter drift from what members actually see.

use chrono::{DateTime, Utc};
use serenity::all::{ChannelId, GuildId, UserId};

use crate::error::config::ConfigError;

/// Placeholder replaced by the channel number in name templates.
const NUMBER_PLACEHOLDER: &str = "{n}";

/// Which lobby a transient channel was created from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChannelKind {
    /// Shared channel, any number per member.
    Public,
    /// Owned channel, at most one per member, controlled through the private panel.
    Private,
}

impl ChannelKind {
    pub const ALL: [ChannelKind; 2] = [ChannelKind::Public, ChannelKind::Private];
}

/// Bookkeeping entry for a voice channel the bot created.
#[derive(Debug, Clone, PartialEq)]
pub struct TransientChannel {
    pub channel_id: ChannelId,
    pub kind: ChannelKind,
    /// Recorded owner, only set for private channels.
    pub owner_id: Option<UserId>,
    /// When the bot started tracking the channel.
    ///
    /// The sweep leaves young empty channels alone since the member being moved into
    /// a freshly created channel may not show up in the voice state cache yet.
    pub created_at: DateTime<Utc>,
}

impl TransientChannel {
    pub fn new(channel_id: ChannelId, kind: ChannelKind, owner_id: Option<UserId>) -> Self {
        Self {
            channel_id,
            kind,
            owner_id,
            created_at: Utc::now(),
        }
    }

    pub fn public(channel_id: ChannelId) -> Self {
        Self::new(channel_id, ChannelKind::Public, None)
    }

    pub fn private(channel_id: ChannelId, owner_id: UserId) -> Self {
        Self::new(channel_id, ChannelKind::Private, Some(owner_id))
    }
}

/// Live view of a voice channel as the platform currently reports it.
#[derive(Debug, Clone, PartialEq)]
pub struct VoiceChannelSnapshot {
    pub channel_id: ChannelId,
    pub name: String,
    /// Category the channel sits in.
    pub parent_id: Option<ChannelId>,
    /// Members currently connected.
    pub occupants: usize,
    /// Member holding the owner permission overwrite, if any.
    pub owner_id: Option<UserId>,
}

/// Parameters for creating a transient voice channel.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateVoiceChannelParam {
    pub name: String,
    pub category_id: ChannelId,
    /// Owner of a private channel. Private channels are closed to @everyone and grant
    /// the owner connect, manage and move permissions.
    pub owner_id: Option<UserId>,
}

/// A member's voice connection moving between channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VoiceStateChange {
    pub guild_id: GuildId,
    pub user_id: UserId,
    pub before: Option<ChannelId>,
    pub after: Option<ChannelId>,
}

impl VoiceStateChange {
    /// Channel the member left, ignoring mute/deafen updates that keep the channel.
    pub fn left_channel(&self) -> Option<ChannelId> {
        self.before.filter(|before| Some(*before) != self.after)
    }

    /// Channel the member joined, ignoring mute/deafen updates that keep the channel.
    pub fn joined_channel(&self) -> Option<ChannelId> {
        self.after.filter(|after| Some(*after) != self.before)
    }
}

/// Channel name template such as `🔊ㆍVC {n}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameFormat {
    prefix: String,
    suffix: String,
}

impl NameFormat {
    /// Parses a template containing exactly one `{n}` placeholder.
    ///
    /// # Returns
    /// - `Ok(NameFormat)` - Template split around the placeholder
    /// - `Err(ConfigError::InvalidNameFormat)` - Placeholder missing or repeated
    pub fn new(template: impl Into<String>) -> Result<Self, ConfigError> {
        let template = template.into();

        if template.matches(NUMBER_PLACEHOLDER).count() != 1 {
            return Err(ConfigError::InvalidNameFormat(template));
        }

        let (prefix, suffix) = template
            .split_once(NUMBER_PLACEHOLDER)
            .ok_or_else(|| ConfigError::InvalidNameFormat(template.clone()))?;

        Ok(Self {
            prefix: prefix.to_string(),
            suffix: suffix.to_string(),
        })
    }

    /// Renders the channel name for display number `n`.
    pub fn render(&self, n: u32) -> String {
        format!("{}{}{}", self.prefix, n, self.suffix)
    }

    /// Reads the display number back out of a channel name.
    ///
    /// # Returns
    /// - `Some(n)` - Name matches the template with a positive number
    /// - `None` - Name belongs to a channel outside this naming scheme
    pub fn parse(&self, name: &str) -> Option<u32> {
        let digits = name
            .strip_prefix(self.prefix.as_str())?
            .strip_suffix(self.suffix.as_str())?;

        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }

        digits.parse::<u32>().ok().filter(|n| *n > 0)
    }
}

/// Name templates for both kinds of transient channels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelNaming {
    pub public: NameFormat,
    pub private: NameFormat,
}

impl ChannelNaming {
    pub fn format_for(&self, kind: ChannelKind) -> &NameFormat {
        match kind {
            ChannelKind::Public => &self.public,
            ChannelKind::Private => &self.private,
        }
    }
}
