use crate::error::{config::ConfigError, AppError};
use crate::model::voice::{ChannelNaming, NameFormat};

const DEFAULT_VOICE_CHANNEL_FORMAT: &str = "🔊ㆍVC {n}";
const DEFAULT_PRIVATE_CHANNEL_FORMAT: &str = "🔊ㆍPVC {n}";
/// Every minute, at second zero.
const DEFAULT_VOICE_SWEEP_SCHEDULE: &str = "0 * * * * *";

pub struct Config {
    pub database_url: String,

    pub discord_bot_token: String,

    /// Name templates for public and private transient channels.
    pub naming: ChannelNaming,

    /// Cron expression for the periodic empty-channel sweep.
    pub voice_sweep_schedule: String,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        let voice_format = optional_env("VOICE_CHANNEL_FORMAT", DEFAULT_VOICE_CHANNEL_FORMAT);
        let private_format =
            optional_env("PRIVATE_CHANNEL_FORMAT", DEFAULT_PRIVATE_CHANNEL_FORMAT);

        Ok(Self {
            database_url: std::env::var("DATABASE_URL")
                .map_err(|_| ConfigError::MissingEnvVar("DATABASE_URL".to_string()))?,
            discord_bot_token: std::env::var("DISCORD_BOT_TOKEN")
                .map_err(|_| ConfigError::MissingEnvVar("DISCORD_BOT_TOKEN".to_string()))?,
            naming: ChannelNaming {
                public: NameFormat::new(voice_format)?,
                private: NameFormat::new(private_format)?,
            },
            voice_sweep_schedule: optional_env(
                "VOICE_SWEEP_SCHEDULE",
                DEFAULT_VOICE_SWEEP_SCHEDULE,
            ),
        })
    }
}

fn optional_env(key: &str, default: &str) -> String {
    std::env::var(key)
        .ok()
        .filter(|value| !value.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}
