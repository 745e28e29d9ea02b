mod bot;
mod config;
mod data;
mod error;
mod model;
mod scheduler;
mod service;
mod startup;
mod state;

use tracing_subscriber::EnvFilter;

use crate::{
    bot::start::{init_bot, start_bot},
    config::Config,
    error::AppError,
    scheduler::voice_sweep,
    state::BotState,
};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env()?;

    let db = startup::connect_to_database(&config).await?;
    let state = BotState::new(db, config.naming.clone());

    let (bot_client, discord_http, discord_cache) = init_bot(&config, state.clone()).await?;

    voice_sweep::start_scheduler(
        state,
        discord_http,
        discord_cache,
        &config.voice_sweep_schedule,
    )
    .await?;

    start_bot(bot_client).await
}
