//! Member event handlers feeding the guild's activity log.

use serenity::all::{Context, GuildId, Member, User};

use crate::service::voice_log::{VoiceLogEntry, VoiceLogService};
use crate::state::BotState;

/// Handles the guild_member_addition event when a member joins a guild.
pub async fn handle_guild_member_addition(state: &BotState, ctx: Context, new_member: Member) {
    let user = &new_member.user;
    let entry = VoiceLogEntry::member_joined(user.id, &user.tag());

    VoiceLogService::new(ctx.http.clone())
        .post_to_guild(&state.db, new_member.guild_id, entry)
        .await;
}

/// Handles the guild_member_removal event when a member leaves or is kicked from a guild.
pub async fn handle_guild_member_removal(
    state: &BotState,
    ctx: Context,
    guild_id: GuildId,
    user: User,
    _member_data_if_available: Option<Member>,
) {
    let entry = VoiceLogEntry::member_left(user.id, &user.tag());

    VoiceLogService::new(ctx.http.clone())
        .post_to_guild(&state.db, guild_id, entry)
        .await;
}

/// Handles the guild_ban_addition event.
pub async fn handle_guild_ban_addition(
    state: &BotState,
    ctx: Context,
    guild_id: GuildId,
    banned_user: User,
) {
    let entry = VoiceLogEntry::member_banned(banned_user.id, &banned_user.tag());

    VoiceLogService::new(ctx.http.clone())
        .post_to_guild(&state.db, guild_id, entry)
        .await;
}

/// Handles the guild_ban_removal event.
pub async fn handle_guild_ban_removal(
    state: &BotState,
    ctx: Context,
    guild_id: GuildId,
    unbanned_user: User,
) {
    let entry = VoiceLogEntry::member_unbanned(unbanned_user.id, &unbanned_user.tag());

    VoiceLogService::new(ctx.http.clone())
        .post_to_guild(&state.db, guild_id, entry)
        .await;
}
