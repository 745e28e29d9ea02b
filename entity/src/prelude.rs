pub use super::guild_voice_config::Entity as GuildVoiceConfig;
