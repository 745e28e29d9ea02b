//! Voice and server activity log.
//!
//! Posts an embed to the guild's configured log channel whenever a member joins, leaves
//! or moves between voice channels, and when an owner uses the private panel. Members
//! joining, leaving or being banned and channels being created, deleted or renamed
//! go to the same channel.

use std::sync::Arc;

use sea_orm::DatabaseConnection;
use serenity::all::{
    ChannelId, CreateEmbed, CreateEmbedFooter, CreateMessage, GuildId, Mentionable, Timestamp,
    UserId,
};
use serenity::http::Http;

use crate::model::{voice::VoiceStateChange, voice_config::GuildVoiceConfig};
use crate::service::{voice::panel::PanelAction, voice_config::VoiceConfigService};

const JOIN_COLOUR: u32 = 0x2ecc71;
const LEAVE_COLOUR: u32 = 0xe74c3c;
const MOVE_COLOUR: u32 = 0x5865f2;
const PANEL_COLOUR: u32 = 0x3498db;
const BAN_COLOUR: u32 = 0x992d22;

/// Log embed content, kept apart from serenity's builder so it can be inspected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoiceLogEntry {
    pub title: String,
    pub description: String,
    pub colour: u32,
    /// Member or channel the entry is about, shown in the footer.
    pub subject_id: u64,
}

impl VoiceLogEntry {
    /// Entry describing a voice state change, `None` if the channel didn't change.
    pub fn voice_activity(change: &VoiceStateChange) -> Option<Self> {
        let user = change.user_id.mention();

        let (title, description, colour) = match (change.left_channel(), change.joined_channel()) {
            (None, Some(joined)) => (
                "Voice channel joined",
                format!("{} joined {}", user, joined.mention()),
                JOIN_COLOUR,
            ),
            (Some(left), None) => (
                "Voice channel left",
                format!("{} left {}", user, left.mention()),
                LEAVE_COLOUR,
            ),
            (Some(left), Some(joined)) => (
                "Voice channel switched",
                format!("{} moved from {} to {}", user, left.mention(), joined.mention()),
                MOVE_COLOUR,
            ),
            (None, None) => return None,
        };

        Some(Self {
            title: title.to_string(),
            description,
            colour,
            subject_id: change.user_id.get(),
        })
    }

    /// Entry describing an applied private panel action.
    pub fn panel_action(actor: UserId, channel_id: ChannelId, action: &PanelAction) -> Self {
        let user = actor.mention();
        let channel = channel_id.mention();

        let description = match action {
            PanelAction::Close => format!("{} closed {}", user, channel),
            PanelAction::Open => format!("{} opened {}", user, channel),
            PanelAction::SetLimit(limit) => {
                format!("{} set the user limit of {} to {}", user, channel, limit)
            }
            PanelAction::Rename(name) => format!("{} renamed {} to **{}**", user, channel, name),
            PanelAction::Delete => format!("{} deleted their private channel", user),
        };

        Self {
            title: "Private channel updated".to_string(),
            description,
            colour: PANEL_COLOUR,
            subject_id: actor.get(),
        }
    }

    pub fn member_joined(user_id: UserId, tag: &str) -> Self {
        Self::member(
            "Member joined",
            format!("{} ({}) joined the server", user_id.mention(), tag),
            JOIN_COLOUR,
            user_id,
        )
    }

    pub fn member_left(user_id: UserId, tag: &str) -> Self {
        Self::member(
            "Member left",
            format!("{} ({}) left the server", user_id.mention(), tag),
            LEAVE_COLOUR,
            user_id,
        )
    }

    pub fn member_banned(user_id: UserId, tag: &str) -> Self {
        Self::member(
            "Member banned",
            format!("{} ({}) was banned", user_id.mention(), tag),
            BAN_COLOUR,
            user_id,
        )
    }

    pub fn member_unbanned(user_id: UserId, tag: &str) -> Self {
        Self::member(
            "Member unbanned",
            format!("{} ({}) was unbanned", user_id.mention(), tag),
            JOIN_COLOUR,
            user_id,
        )
    }

    pub fn channel_created(channel_id: ChannelId, name: &str) -> Self {
        Self {
            title: "Channel created".to_string(),
            description: format!("{} ({}) was created", channel_id.mention(), name),
            colour: JOIN_COLOUR,
            subject_id: channel_id.get(),
        }
    }

    /// Names the channel only, a mention of a deleted channel no longer resolves.
    pub fn channel_deleted(channel_id: ChannelId, name: &str) -> Self {
        Self {
            title: "Channel deleted".to_string(),
            description: format!("**{}** was deleted", name),
            colour: LEAVE_COLOUR,
            subject_id: channel_id.get(),
        }
    }

    /// Entry for a channel rename, `None` if the name didn't change.
    pub fn channel_renamed(channel_id: ChannelId, before: &str, after: &str) -> Option<Self> {
        (before != after).then(|| Self {
            title: "Channel renamed".to_string(),
            description: format!(
                "{} was renamed from **{}** to **{}**",
                channel_id.mention(),
                before,
                after
            ),
            colour: MOVE_COLOUR,
            subject_id: channel_id.get(),
        })
    }

    fn member(title: &str, description: String, colour: u32, user_id: UserId) -> Self {
        Self {
            title: title.to_string(),
            description,
            colour,
            subject_id: user_id.get(),
        }
    }

    pub fn into_embed(self) -> CreateEmbed {
        CreateEmbed::new()
            .title(self.title)
            .description(self.description)
            .colour(self.colour)
            .footer(CreateEmbedFooter::new(format!("ID: {}", self.subject_id)))
            .timestamp(Timestamp::now())
    }
}

/// Posts voice log entries for guilds that configured a log channel.
pub struct VoiceLogService {
    http: Arc<Http>,
}

impl VoiceLogService {
    pub fn new(http: Arc<Http>) -> Self {
        Self { http }
    }

    /// Posts an entry to the guild's log channel, if any.
    ///
    /// Failures are logged and otherwise ignored.
    pub async fn post(&self, config: &GuildVoiceConfig, entry: VoiceLogEntry) {
        let Some(log_channel_id) = config.log_channel_id else {
            return;
        };

        let message = CreateMessage::new().embed(entry.into_embed());

        if let Err(e) = log_channel_id.send_message(&self.http, message).await {
            tracing::warn!(
                "Failed to post activity log to channel {} in guild {}: {}",
                log_channel_id,
                config.guild_id,
                e
            );
        }
    }

    /// Loads the guild's configuration and posts the entry to its log channel, if any.
    pub async fn post_to_guild(
        &self,
        db: &DatabaseConnection,
        guild_id: GuildId,
        entry: VoiceLogEntry,
    ) {
        match VoiceConfigService::new(db).find(guild_id).await {
            Ok(Some(config)) => self.post(&config, entry).await,
            Ok(None) => {}
            Err(e) => tracing::error!("Failed to load voice config of guild {}: {}", guild_id, e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn change(before: Option<u64>, after: Option<u64>) -> VoiceStateChange {
        VoiceStateChange {
            guild_id: GuildId::new(1),
            user_id: UserId::new(42),
            before: before.map(ChannelId::new),
            after: after.map(ChannelId::new),
        }
    }

    #[test]
    fn join_leave_and_move_entries() {
        let join = VoiceLogEntry::voice_activity(&change(None, Some(10))).unwrap();
        let leave = VoiceLogEntry::voice_activity(&change(Some(10), None)).unwrap();
        let moved = VoiceLogEntry::voice_activity(&change(Some(10), Some(11))).unwrap();

        assert_eq!(join.description, "<@42> joined <#10>");
        assert_eq!(join.colour, JOIN_COLOUR);
        assert_eq!(leave.description, "<@42> left <#10>");
        assert_eq!(leave.colour, LEAVE_COLOUR);
        assert_eq!(moved.description, "<@42> moved from <#10> to <#11>");
        assert_eq!(moved.colour, MOVE_COLOUR);
    }

    #[test]
    fn same_channel_updates_are_not_logged() {
        assert!(VoiceLogEntry::voice_activity(&change(Some(10), Some(10))).is_none());
        assert!(VoiceLogEntry::voice_activity(&change(None, None)).is_none());
    }

    #[test]
    fn panel_entry_names_the_action() {
        let entry = VoiceLogEntry::panel_action(
            UserId::new(42),
            ChannelId::new(10),
            &PanelAction::SetLimit(5),
        );

        assert_eq!(entry.description, "<@42> set the user limit of <#10> to 5");
        assert_eq!(entry.subject_id, 42);
    }

    #[test]
    fn member_entries_mention_and_tag_the_member() {
        let joined = VoiceLogEntry::member_joined(UserId::new(42), "alice");
        let banned = VoiceLogEntry::member_banned(UserId::new(42), "alice");

        assert_eq!(joined.description, "<@42> (alice) joined the server");
        assert_eq!(joined.colour, JOIN_COLOUR);
        assert_eq!(banned.description, "<@42> (alice) was banned");
        assert_eq!(banned.subject_id, 42);
    }

    #[test]
    fn channel_entries_are_keyed_by_channel() {
        let created = VoiceLogEntry::channel_created(ChannelId::new(10), "general");
        let deleted = VoiceLogEntry::channel_deleted(ChannelId::new(10), "general");

        assert_eq!(created.description, "<#10> (general) was created");
        assert_eq!(deleted.description, "**general** was deleted");
        assert_eq!(deleted.subject_id, 10);
    }

    #[test]
    fn rename_is_logged_only_when_the_name_changes() {
        let renamed = VoiceLogEntry::channel_renamed(ChannelId::new(10), "old", "new").unwrap();

        assert_eq!(renamed.description, "<#10> was renamed from **old** to **new**");
        assert!(VoiceLogEntry::channel_renamed(ChannelId::new(10), "same", "same").is_none());
    }
}
