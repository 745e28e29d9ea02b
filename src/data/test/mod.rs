mod voice_config;
