//! Error types for the bot.
//!
//! `AppError` is the top-level error type that wraps domain-specific errors. Event
//! handlers never propagate it further than a log line; interaction handlers turn it
//! into an ephemeral reply through `AppError::user_message`.

pub mod config;
pub mod voice;

use thiserror::Error;

use crate::error::{config::ConfigError, voice::VoiceError};

/// Top-level application error type.
///
/// Most variants use `#[from]` for automatic error conversion with `?`.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration error during startup or environment variable loading.
    #[error(transparent)]
    ConfigErr(#[from] ConfigError),

    /// Database operation error from SeaORM.
    #[error(transparent)]
    DbErr(#[from] sea_orm::DbErr),

    /// Discord API error from Serenity.
    ///
    /// Boxed due to large size.
    #[error(transparent)]
    DiscordErr(#[from] Box<serenity::Error>),

    /// Cron scheduler error.
    #[error(transparent)]
    SchedulerErr(#[from] tokio_cron_scheduler::JobSchedulerError),

    /// A voice channel operation was rejected for the acting member.
    #[error(transparent)]
    VoiceErr(#[from] VoiceError),

    /// Resource not found error.
    #[error("{0}")]
    NotFound(String),
}

/// Manual conversion from serenity::Error to AppError.
///
/// Boxes the error to reduce the size of the AppError enum, as serenity::Error
/// is very large and would make all AppError variants larger if not boxed.
impl From<serenity::Error> for AppError {
    fn from(err: serenity::Error) -> Self {
        AppError::DiscordErr(Box::new(err))
    }
}

impl AppError {
    /// Message shown to the member whose interaction produced this error.
    ///
    /// Rejections carry their own wording; everything else is reported generically
    /// since the details are only useful in the logs.
    pub fn user_message(&self) -> String {
        match self {
            Self::VoiceErr(err) => err.user_message(),
            Self::NotFound(msg) => msg.clone(),
            _ => "Something went wrong, please try again later.".to_string(),
        }
    }
}
