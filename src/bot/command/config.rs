//! Administrator commands for the guild voice configuration.

use serenity::all::{
    ChannelId, ChannelType, CommandInteraction, CommandOptionType, CreateCommand,
    CreateCommandOption, CreateInteractionResponseMessage, Mentionable, Permissions,
};

use crate::error::AppError;
use crate::model::voice_config::{GuildVoiceConfig, VoiceConfigField};
use crate::service::voice_config::VoiceConfigService;
use crate::state::BotState;

pub const SHOW_COMMAND: &str = "show_voice_config";

const CHANNEL_OPTION: &str = "channel";

/// Commands storing a single channel: name, description, field and accepted channel type.
const SET_COMMANDS: [(&str, &str, VoiceConfigField, ChannelType); 5] = [
    (
        "set_voice_lobby",
        "Set the voice channel that creates public voice channels",
        VoiceConfigField::Lobby,
        ChannelType::Voice,
    ),
    (
        "set_voice_category",
        "Set the category public voice channels are created in",
        VoiceConfigField::Category,
        ChannelType::Category,
    ),
    (
        "set_private_lobby",
        "Set the voice channel that creates private voice channels",
        VoiceConfigField::PrivateLobby,
        ChannelType::Voice,
    ),
    (
        "set_private_category",
        "Set the category private voice channels are created in",
        VoiceConfigField::PrivateCategory,
        ChannelType::Category,
    ),
    (
        "set_voice_log",
        "Set the text channel voice activity is logged to",
        VoiceConfigField::LogChannel,
        ChannelType::Text,
    ),
];

pub fn register() -> Vec<CreateCommand> {
    let mut commands: Vec<CreateCommand> = SET_COMMANDS
        .iter()
        .map(|(name, description, _, channel_type)| {
            admin_command(name, description).add_option(
                CreateCommandOption::new(CommandOptionType::Channel, CHANNEL_OPTION, "Channel to use")
                    .required(true)
                    .channel_types(vec![*channel_type]),
            )
        })
        .collect();

    commands.push(admin_command(
        SHOW_COMMAND,
        "Show the voice channel configuration of this server",
    ));

    commands
}

fn admin_command(name: &str, description: &str) -> CreateCommand {
    CreateCommand::new(name)
        .description(description)
        .default_member_permissions(Permissions::ADMINISTRATOR)
}

pub fn handles(name: &str) -> bool {
    name == SHOW_COMMAND || field_for(name).is_some()
}

fn field_for(name: &str) -> Option<VoiceConfigField> {
    SET_COMMANDS
        .iter()
        .find(|(command, ..)| *command == name)
        .map(|(_, _, field, _)| *field)
}

/// Runs a configuration command.
///
/// # Returns
/// - `Ok(CreateInteractionResponseMessage)` - Confirmation or the current configuration
/// - `Err(AppError::NotFound)` - Used outside a guild or without a channel
/// - `Err(AppError::DbErr)` - Database error
pub async fn run(
    state: &BotState,
    command: &CommandInteraction,
) -> Result<CreateInteractionResponseMessage, AppError> {
    let guild_id = command
        .guild_id
        .ok_or_else(|| AppError::NotFound("This command can only be used in a server.".to_string()))?;
    let service = VoiceConfigService::new(&state.db);
    let name = command.data.name.as_str();

    let Some(field) = field_for(name) else {
        let config = service.get(guild_id).await?;
        return Ok(CreateInteractionResponseMessage::new().content(describe(&config)));
    };

    let channel_id = command
        .data
        .options
        .iter()
        .find(|option| option.name == CHANNEL_OPTION)
        .and_then(|option| option.value.as_channel_id())
        .ok_or_else(|| AppError::NotFound("Please select a channel.".to_string()))?;

    service.set_channel(guild_id, field, channel_id).await?;

    Ok(CreateInteractionResponseMessage::new().content(format!(
        "The {} is now {}.",
        field.label(),
        channel_id.mention()
    )))
}

/// Lists every configured channel of a guild.
pub fn describe(config: &GuildVoiceConfig) -> String {
    let line = |field: VoiceConfigField, channel_id: Option<ChannelId>| {
        let value = channel_id
            .map(|id| id.mention().to_string())
            .unwrap_or_else(|| "not set".to_string());
        format!("**{}**: {}", capitalize(field.label()), value)
    };

    [
        line(VoiceConfigField::Lobby, config.lobby_channel_id),
        line(VoiceConfigField::Category, config.category_id),
        line(VoiceConfigField::PrivateLobby, config.private_lobby_channel_id),
        line(VoiceConfigField::PrivateCategory, config.private_category_id),
        line(VoiceConfigField::LogChannel, config.log_channel_id),
    ]
    .join("\n")
}

fn capitalize(label: &str) -> String {
    let mut chars = label.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
