pub mod prelude;

pub mod guild_voice_config;
