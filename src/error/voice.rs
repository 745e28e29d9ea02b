use thiserror::Error;

use crate::service::voice::panel::{MAX_CHANNEL_NAME_LENGTH, MAX_USER_LIMIT, MIN_USER_LIMIT};

/// Rejections of voice channel operations requested by a member.
///
/// None of these are failures of the bot itself: they are answered with an ephemeral
/// message to the member and nothing is mutated.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum VoiceError {
    /// The acting member is not the recorded owner of the private channel.
    #[error("member is not the owner of the private channel")]
    NotOwner,

    /// The acting member does not own a private channel.
    #[error("member has no private channel")]
    NoPrivateChannel,

    /// User limit outside of the accepted range or not a number.
    #[error("invalid user limit '{0}'")]
    InvalidLimit(String),

    /// Channel name empty or too long.
    #[error("invalid channel name '{0}'")]
    InvalidName(String),

    /// Command used in a guild without the required channels configured.
    #[error("voice channels are not configured for this server")]
    NotConfigured,

    /// Component or modal custom id that does not belong to the private panel.
    #[error("unknown panel component '{0}'")]
    UnknownComponent(String),
}

impl VoiceError {
    /// Plain message sent back to the member.
    pub fn user_message(&self) -> String {
        match self {
            Self::NotOwner => "Only the owner can manage this channel!".to_string(),
            Self::NoPrivateChannel => {
                "You don't have a private channel. Join the private lobby to create one."
                    .to_string()
            }
            Self::InvalidLimit(_) => format!(
                "The limit must be a number from {} to {}.",
                MIN_USER_LIMIT, MAX_USER_LIMIT
            ),
            Self::InvalidName(_) => format!(
                "The name must be between 1 and {} characters.",
                MAX_CHANNEL_NAME_LENGTH
            ),
            Self::NotConfigured => {
                "Voice channels are not configured for this server yet.".to_string()
            }
            Self::UnknownComponent(_) => "This panel is no longer valid.".to_string(),
        }
    }
}
