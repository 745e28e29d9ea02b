//! Test factory for creating Serenity voice `GuildChannel` objects.

use serenity::all::GuildChannel;

/// `MANAGE_CHANNELS | CONNECT | MOVE_MEMBERS`, the overwrite granted to private channel owners.
const OWNER_ALLOW: u64 = (1 << 4) | (1 << 20) | (1 << 24);

/// Creates a test voice channel.
///
/// When `owner_id` is set, the channel carries a member permission overwrite for that
/// user granting the owner permissions, the same shape the bot creates for private
/// channels.
///
/// # Arguments
/// - `guild_id` - Guild the channel belongs to
/// - `channel_id` - Channel snowflake
/// - `name` - Channel display name
/// - `parent_id` - Category the channel sits in
/// - `owner_id` - Optional owner receiving a member overwrite
///
/// # Panics
/// - If the JSON cannot be deserialized into a GuildChannel (indicates invalid test data)
pub fn create_test_voice_channel(
    guild_id: u64,
    channel_id: u64,
    name: &str,
    parent_id: Option<u64>,
    owner_id: Option<u64>,
) -> GuildChannel {
    let overwrites = match owner_id {
        Some(owner_id) => serde_json::json!([{
            "id": owner_id.to_string(),
            "type": 1,
            "allow": OWNER_ALLOW.to_string(),
            "deny": "0",
        }]),
        None => serde_json::json!([]),
    };

    serde_json::from_value(serde_json::json!({
        "id": channel_id.to_string(),
        "guild_id": guild_id.to_string(),
        "type": 2,
        "name": name,
        "position": 0,
        "parent_id": parent_id.map(|id| id.to_string()),
        "permission_overwrites": overwrites,
        "bitrate": 64000,
        "user_limit": 0,
        "nsfw": false,
        "rate_limit_per_user": 0,
        "rtc_region": null,
    }))
    .expect("Failed to create test voice channel - invalid JSON structure")
}
