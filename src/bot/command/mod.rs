//! Slash commands and interaction replies.
//!
//! Command handlers return the message to reply with; errors are turned into an
//! ephemeral reply through `AppError::user_message`, so members only ever see the
//! wording of rejections while everything else goes to the logs.

pub mod config;
pub mod panel;

use serenity::all::{
    CommandInteraction, Context, CreateCommand, CreateInteractionResponse,
    CreateInteractionResponseMessage,
};

use crate::error::AppError;
use crate::state::BotState;

/// Every slash command the bot registers.
pub fn all() -> Vec<CreateCommand> {
    let mut commands = config::register();
    commands.push(panel::register());
    commands
}

/// Runs a slash command and sends its reply.
pub async fn handle_command(state: &BotState, ctx: &Context, command: &CommandInteraction) {
    let name = command.data.name.as_str();

    let result = if config::handles(name) {
        config::run(state, command).await
    } else if name == panel::PANEL_COMMAND {
        panel::run_command(state, ctx, command).await
    } else {
        tracing::warn!("Received unknown slash command {}", name);
        return;
    };

    let reply = result.unwrap_or_else(error_reply);
    let response = CreateInteractionResponse::Message(reply.ephemeral(true));

    if let Err(e) = command.create_response(&ctx.http, response).await {
        tracing::error!("Failed to respond to /{}: {}", name, e);
    }
}

/// Ephemeral reply describing an error to the member.
pub fn error_reply(err: AppError) -> CreateInteractionResponseMessage {
    match &err {
        AppError::VoiceErr(rejection) => tracing::debug!("Rejected interaction: {}", rejection),
        AppError::NotFound(msg) => tracing::debug!("Interaction target not found: {}", msg),
        other => tracing::error!("Interaction failed: {}", other),
    }

    CreateInteractionResponseMessage::new()
        .content(err.user_message())
        .ephemeral(true)
}
