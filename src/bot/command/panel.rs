//! Private channel panel: the `/private_panel` command, its buttons and modals.

use serenity::all::{
    ActionRowComponent, ButtonStyle, ChannelId, CommandInteraction, ComponentInteraction, Context,
    CreateActionRow, CreateButton, CreateCommand, CreateInputText, CreateInteractionResponse,
    CreateInteractionResponseMessage, CreateModal, GuildId, InputTextStyle, Mentionable,
    ModalInteraction, UserId,
};

use crate::bot::command::error_reply;
use crate::error::{voice::VoiceError, AppError};
use crate::model::{voice::ChannelKind, voice_config::GuildVoiceConfig};
use crate::service::{
    voice::{
        panel::{
            PanelAction, PanelButton, PanelComponent,
            MAX_CHANNEL_NAME_LENGTH, MAX_USER_LIMIT, MIN_USER_LIMIT,
        },
        platform::SerenityVoicePlatform,
        registry::GuildVoiceState,
        VoiceChannelService,
    },
    voice_config::VoiceConfigService,
    voice_log::{VoiceLogEntry, VoiceLogService},
};
use crate::state::BotState;

pub const PANEL_COMMAND: &str = "private_panel";

const INPUT_ID: &str = "value";

pub fn register() -> CreateCommand {
    CreateCommand::new(PANEL_COMMAND).description("Open the control panel of your private voice channel")
}

/// Replies with the panel of the member's private channel.
///
/// # Returns
/// - `Err(VoiceError::NotConfigured)` - Guild has no private category
/// - `Err(VoiceError::NoPrivateChannel)` - Member owns no private channel
pub async fn run_command(
    state: &BotState,
    ctx: &Context,
    command: &CommandInteraction,
) -> Result<CreateInteractionResponseMessage, AppError> {
    let guild_id = require_guild(command.guild_id)?;

    let config = VoiceConfigService::new(&state.db).get(guild_id).await?;
    if config.category_for(ChannelKind::Private).is_none() {
        return Err(VoiceError::NotConfigured.into());
    }

    let platform = SerenityVoicePlatform::new(ctx.http.clone(), ctx.cache.clone());
    let service = VoiceChannelService::new(&platform, &state.naming);

    let guild_state = state.registry.lock(guild_id).await;
    let channel_id = service.owned_channel(&guild_state, command.user.id)?;

    Ok(panel_message(channel_id))
}

/// Handles a click on one of the panel buttons.
pub async fn handle_component(state: &BotState, ctx: &Context, component: &ComponentInteraction) {
    let response = match component_response(state, ctx, component).await {
        Ok(response) => response,
        Err(e) => CreateInteractionResponse::Message(error_reply(e)),
    };

    if let Err(e) = component.create_response(&ctx.http, response).await {
        tracing::error!("Failed to respond to panel button {}: {}", component.data.custom_id, e);
    }
}

/// Handles the submission of the limit or rename modal.
pub async fn handle_modal(state: &BotState, ctx: &Context, modal: &ModalInteraction) {
    let reply = modal_response(state, ctx, modal)
        .await
        .unwrap_or_else(error_reply);

    let response = CreateInteractionResponse::Message(reply.ephemeral(true));
    if let Err(e) = modal.create_response(&ctx.http, response).await {
        tracing::error!("Failed to respond to panel modal {}: {}", modal.data.custom_id, e);
    }
}

async fn component_response(
    state: &BotState,
    ctx: &Context,
    component: &ComponentInteraction,
) -> Result<CreateInteractionResponse, AppError> {
    let guild_id = require_guild(component.guild_id)?;
    let custom_id = component.data.custom_id.as_str();
    let PanelComponent::Button(button, channel_id) = PanelComponent::parse(custom_id)? else {
        return Err(VoiceError::UnknownComponent(custom_id.to_string()).into());
    };

    let platform = SerenityVoicePlatform::new(ctx.http.clone(), ctx.cache.clone());
    let service = VoiceChannelService::new(&platform, &state.naming);
    let mut guild_state = state.registry.lock(guild_id).await;

    service.ensure_owner(&guild_state, channel_id, component.user.id)?;

    let Some(action) = button.direct_action() else {
        return Ok(CreateInteractionResponse::Modal(panel_modal(button, channel_id)));
    };

    let reply = apply(
        state,
        ctx,
        &service,
        &mut guild_state,
        guild_id,
        channel_id,
        component.user.id,
        action,
    )
    .await?;

    Ok(CreateInteractionResponse::Message(reply))
}

async fn modal_response(
    state: &BotState,
    ctx: &Context,
    modal: &ModalInteraction,
) -> Result<CreateInteractionResponseMessage, AppError> {
    let guild_id = require_guild(modal.guild_id)?;
    let custom_id = modal.data.custom_id.as_str();
    let PanelComponent::Modal(button, channel_id) = PanelComponent::parse(custom_id)? else {
        return Err(VoiceError::UnknownComponent(custom_id.to_string()).into());
    };

    let value = input_value(modal).unwrap_or_default();
    let config = VoiceConfigService::new(&state.db).get(guild_id).await?;

    let platform = SerenityVoicePlatform::new(ctx.http.clone(), ctx.cache.clone());
    let service = VoiceChannelService::new(&platform, &state.naming);
    let mut guild_state = state.registry.lock(guild_id).await;

    let action = service
        .apply_panel_input(&mut guild_state, &config, channel_id, modal.user.id, button, &value)
        .await?;

    Ok(confirm(ctx, &config, channel_id, modal.user.id, &action).await)
}

/// Applies a panel action and logs it to the guild's voice log.
#[allow(clippy::too_many_arguments)]
async fn apply(
    state: &BotState,
    ctx: &Context,
    service: &VoiceChannelService<'_>,
    guild_state: &mut GuildVoiceState,
    guild_id: GuildId,
    channel_id: ChannelId,
    actor: UserId,
    action: PanelAction,
) -> Result<CreateInteractionResponseMessage, AppError> {
    let config = VoiceConfigService::new(&state.db).get(guild_id).await?;

    service
        .apply_panel_action(guild_state, &config, channel_id, actor, &action)
        .await?;

    Ok(confirm(ctx, &config, channel_id, actor, &action).await)
}

/// Logs an applied panel action to the guild's voice log and builds the reply.
async fn confirm(
    ctx: &Context,
    config: &GuildVoiceConfig,
    channel_id: ChannelId,
    actor: UserId,
    action: &PanelAction,
) -> CreateInteractionResponseMessage {
    VoiceLogService::new(ctx.http.clone())
        .post(config, VoiceLogEntry::panel_action(actor, channel_id, action))
        .await;

    CreateInteractionResponseMessage::new()
        .content(action.confirmation())
        .ephemeral(true)
}

fn require_guild(guild_id: Option<GuildId>) -> Result<GuildId, AppError> {
    guild_id.ok_or_else(|| AppError::NotFound("This can only be used in a server.".to_string()))
}

/// Panel message with one button per action, bound to `channel_id`.
pub fn panel_message(channel_id: ChannelId) -> CreateInteractionResponseMessage {
    let buttons: Vec<CreateButton> = PanelButton::ALL
        .into_iter()
        .map(|button| {
            let style = match button {
                PanelButton::Delete => ButtonStyle::Danger,
                PanelButton::Open => ButtonStyle::Success,
                _ => ButtonStyle::Secondary,
            };

            CreateButton::new(PanelComponent::Button(button, channel_id).custom_id())
                .label(button.label())
                .style(style)
        })
        .collect();

    CreateInteractionResponseMessage::new()
        .content(format!("Control panel for {}", channel_id.mention()))
        .components(vec![CreateActionRow::Buttons(buttons)])
}

/// Modal asking for the new user limit or name.
pub fn panel_modal(button: PanelButton, channel_id: ChannelId) -> CreateModal {
    let custom_id = PanelComponent::Modal(button, channel_id).custom_id();

    let (title, input) = match button {
        PanelButton::Limit => (
            "Set user limit",
            CreateInputText::new(InputTextStyle::Short, "User limit", INPUT_ID)
                .placeholder(format!("{}-{}", MIN_USER_LIMIT, MAX_USER_LIMIT))
                .min_length(1)
                .max_length(2),
        ),
        _ => (
            "Rename channel",
            CreateInputText::new(InputTextStyle::Short, "Channel name", INPUT_ID)
                .min_length(1)
                .max_length(MAX_CHANNEL_NAME_LENGTH as u16),
        ),
    };

    CreateModal::new(custom_id, title)
        .components(vec![CreateActionRow::InputText(input.required(true))])
}

/// Text typed into the modal's input.
fn input_value(modal: &ModalInteraction) -> Option<String> {
    modal
        .data
        .components
        .iter()
        .flat_map(|row| row.components.iter())
        .find_map(|component| match component {
            ActionRowComponent::InputText(input) if input.custom_id == INPUT_ID => {
                input.value.clone()
            }
            _ => None,
        })
}
