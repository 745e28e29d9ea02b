use crate::data::voice_config::GuildVoiceConfigRepository;
use crate::model::voice_config::VoiceConfigField;
use sea_orm::DbErr;
use serenity::all::ChannelId;
use test_utils::{builder::TestBuilder, factory};

mod find_by_guild_id;
mod get_all;
mod set_channel;
