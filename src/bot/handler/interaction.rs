//! Interaction event handler.
//!
//! Routes slash commands to their command module and the private panel's buttons and
//! modals to the panel module.

use serenity::all::{Context, Interaction};

use crate::bot::command;
use crate::state::BotState;

/// Handles the interaction_create event.
///
/// # Arguments
/// - `state` - Shared bot state
/// - `ctx` - Discord context for responding
/// - `interaction` - Slash command, component click or modal submission
pub async fn handle_interaction_create(state: &BotState, ctx: Context, interaction: Interaction) {
    match interaction {
        Interaction::Command(command) => command::handle_command(state, &ctx, &command).await,
        Interaction::Component(component) => {
            command::panel::handle_component(state, &ctx, &component).await
        }
        Interaction::Modal(modal) => command::panel::handle_modal(state, &ctx, &modal).await,
        _ => {}
    }
}
