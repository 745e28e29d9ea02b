use chrono::Utc;
use serenity::all::Cache;
use serenity::http::Http;
use std::sync::Arc;
use tokio_cron_scheduler::{Job, JobScheduler};

use crate::{
    error::AppError,
    service::{
        voice::{platform::SerenityVoicePlatform, VoiceChannelService},
        voice_config::VoiceConfigService,
    },
    state::BotState,
};

/// Starts the voice channel sweep scheduler
///
/// Each run visits every guild with transient channels enabled and deletes tracked
/// channels that stayed empty, catching departures whose events were missed or whose
/// cleanup failed.
///
/// # Arguments
/// - `state`: Shared bot state
/// - `http`: Discord HTTP client
/// - `cache`: Gateway cache holding voice states
/// - `schedule`: Cron expression, every minute by default
pub async fn start_scheduler(
    state: BotState,
    http: Arc<Http>,
    cache: Arc<Cache>,
    schedule: &str,
) -> Result<(), AppError> {
    let scheduler = JobScheduler::new().await?;

    let job = Job::new_async(schedule, move |_uuid, _lock| {
        let state = state.clone();
        let http = http.clone();
        let cache = cache.clone();

        Box::pin(async move {
            if let Err(e) = sweep_voice_channels(&state, http, cache).await {
                tracing::error!("Error sweeping voice channels: {}", e);
            }
        })
    })?;

    scheduler.add(job).await?;
    scheduler.start().await?;

    tracing::info!("Voice channel sweep scheduler started");

    Ok(())
}

/// Sweeps every configured guild the bot currently sees.
async fn sweep_voice_channels(
    state: &BotState,
    http: Arc<Http>,
    cache: Arc<Cache>,
) -> Result<(), AppError> {
    let configs = VoiceConfigService::new(&state.db).get_all_managed().await?;
    let platform = SerenityVoicePlatform::new(http, cache.clone());
    let service = VoiceChannelService::new(&platform, &state.naming);
    let now = Utc::now();

    for config in configs {
        // Guilds the bot left keep their configuration but can't be swept.
        if cache.guild(config.guild_id).is_none() {
            continue;
        }

        let mut guild_state = state.registry.lock(config.guild_id).await;
        service.sweep(&mut guild_state, &config, now).await;
    }

    Ok(())
}
