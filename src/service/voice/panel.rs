//! Owner control panel for private channels.
//!
//! Panel buttons and modals carry the private channel id in their custom id, e.g.
//! `pvc:close:123` or `pvc_modal:limit:123`, so a panel stays usable across restarts
//! and the acting member can be checked against the recorded owner on every click.

use serenity::all::{ChannelId, UserId};

use crate::error::{voice::VoiceError, AppError};
use crate::model::voice_config::GuildVoiceConfig;
use crate::service::voice::{registry::GuildVoiceState, VoiceChannelService};

pub const MIN_USER_LIMIT: u32 = 1;
pub const MAX_USER_LIMIT: u32 = 99;
pub const MAX_CHANNEL_NAME_LENGTH: usize = 32;

const BUTTON_PREFIX: &str = "pvc";
const MODAL_PREFIX: &str = "pvc_modal";

/// Validated action requested through the panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PanelAction {
    Close,
    Open,
    SetLimit(u32),
    Rename(String),
    Delete,
}

impl PanelAction {
    /// Confirmation sent back to the owner once the action is applied.
    pub fn confirmation(&self) -> String {
        match self {
            Self::Close => "Channel closed. Only members you move in can join.".to_string(),
            Self::Open => "Channel opened for everyone.".to_string(),
            Self::SetLimit(limit) => format!("User limit set to {}.", limit),
            Self::Rename(name) => format!("Channel renamed to **{}**.", name),
            Self::Delete => "Channel deleted.".to_string(),
        }
    }
}

/// Buttons shown on the panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelButton {
    Close,
    Open,
    Limit,
    Rename,
    Delete,
}

impl PanelButton {
    pub const ALL: [PanelButton; 5] = [
        PanelButton::Close,
        PanelButton::Open,
        PanelButton::Limit,
        PanelButton::Rename,
        PanelButton::Delete,
    ];

    fn key(&self) -> &'static str {
        match self {
            Self::Close => "close",
            Self::Open => "open",
            Self::Limit => "limit",
            Self::Rename => "rename",
            Self::Delete => "delete",
        }
    }

    fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|button| button.key() == key)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Close => "Close",
            Self::Open => "Open",
            Self::Limit => "Limit",
            Self::Rename => "Rename",
            Self::Delete => "Delete",
        }
    }

    /// Whether the button opens a modal instead of acting directly.
    pub fn needs_input(&self) -> bool {
        matches!(self, Self::Limit | Self::Rename)
    }

    /// Action applied directly on click, `None` for buttons that need input first.
    pub fn direct_action(&self) -> Option<PanelAction> {
        match self {
            Self::Close => Some(PanelAction::Close),
            Self::Open => Some(PanelAction::Open),
            Self::Delete => Some(PanelAction::Delete),
            Self::Limit | Self::Rename => None,
        }
    }
}

/// Parsed panel custom id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelComponent {
    Button(PanelButton, ChannelId),
    /// Modal opened by the limit or rename button.
    Modal(PanelButton, ChannelId),
}

impl PanelComponent {
    pub fn custom_id(&self) -> String {
        match self {
            Self::Button(button, channel_id) => {
                format!("{}:{}:{}", BUTTON_PREFIX, button.key(), channel_id)
            }
            Self::Modal(button, channel_id) => {
                format!("{}:{}:{}", MODAL_PREFIX, button.key(), channel_id)
            }
        }
    }

    /// Parses a component or modal custom id.
    ///
    /// # Returns
    /// - `Ok(PanelComponent)` - Custom id of a panel button or modal
    /// - `Err(VoiceError::UnknownComponent)` - Anything else
    pub fn parse(custom_id: &str) -> Result<Self, VoiceError> {
        let unknown = || VoiceError::UnknownComponent(custom_id.to_string());

        let mut parts = custom_id.splitn(3, ':');
        let (Some(prefix), Some(key), Some(id)) = (parts.next(), parts.next(), parts.next())
        else {
            return Err(unknown());
        };

        let button = PanelButton::from_key(key).ok_or_else(unknown)?;
        let channel_id = id
            .parse::<u64>()
            .ok()
            .filter(|id| *id != 0)
            .map(ChannelId::new)
            .ok_or_else(unknown)?;

        match prefix {
            BUTTON_PREFIX => Ok(Self::Button(button, channel_id)),
            MODAL_PREFIX if button.needs_input() => Ok(Self::Modal(button, channel_id)),
            _ => Err(unknown()),
        }
    }
}

/// Parses the user limit typed into the limit modal.
pub fn parse_limit(raw: &str) -> Result<u32, VoiceError> {
    raw.trim()
        .parse::<u32>()
        .ok()
        .filter(|limit| (MIN_USER_LIMIT..=MAX_USER_LIMIT).contains(limit))
        .ok_or_else(|| VoiceError::InvalidLimit(raw.to_string()))
}

/// Trims and validates the name typed into the rename modal.
pub fn validate_name(raw: &str) -> Result<String, VoiceError> {
    let name = raw.trim();
    let length = name.chars().count();

    if length == 0 || length > MAX_CHANNEL_NAME_LENGTH {
        return Err(VoiceError::InvalidName(raw.to_string()));
    }

    Ok(name.to_string())
}

impl<'a> VoiceChannelService<'a> {
    /// Checks that `actor` is the recorded owner of a tracked private channel.
    pub fn ensure_owner(
        &self,
        state: &GuildVoiceState,
        channel_id: ChannelId,
        actor: UserId,
    ) -> Result<(), VoiceError> {
        match state.owner_of(channel_id) {
            Some(owner_id) if owner_id == actor => Ok(()),
            _ => Err(VoiceError::NotOwner),
        }
    }

    /// Private channel owned by `actor`, for opening the panel.
    pub fn owned_channel(
        &self,
        state: &GuildVoiceState,
        actor: UserId,
    ) -> Result<ChannelId, VoiceError> {
        state.owned_by(actor).ok_or(VoiceError::NoPrivateChannel)
    }

    /// Applies a validated panel action to a private channel.
    ///
    /// Ownership is checked first; a rejected actor causes no platform call.
    ///
    /// # Returns
    /// - `Ok(())` - Action applied
    /// - `Err(AppError::VoiceErr(VoiceError::NotOwner))` - Actor doesn't own the channel
    /// - `Err(AppError::DiscordErr)` - The platform call failed
    pub async fn apply_panel_action(
        &self,
        state: &mut GuildVoiceState,
        config: &GuildVoiceConfig,
        channel_id: ChannelId,
        actor: UserId,
        action: &PanelAction,
    ) -> Result<(), AppError> {
        self.ensure_owner(state, channel_id, actor)?;

        let guild_id = config.guild_id;

        match action {
            PanelAction::Close => {
                self.platform
                    .set_public_connect(guild_id, channel_id, false)
                    .await?
            }
            PanelAction::Open => {
                self.platform
                    .set_public_connect(guild_id, channel_id, true)
                    .await?
            }
            PanelAction::SetLimit(limit) => {
                self.platform.set_user_limit(channel_id, *limit).await?
            }
            PanelAction::Rename(name) => self.platform.rename_channel(channel_id, name).await?,
            PanelAction::Delete => {
                self.platform.delete_channel(channel_id).await?;
                state.untrack(channel_id);
                self.renumber(state, config).await;
            }
        }

        tracing::info!(
            "Applied private panel action {:?} to channel {} in guild {} for user {}",
            action,
            channel_id,
            guild_id,
            actor
        );

        Ok(())
    }

    /// Validates the value typed into a panel modal and applies the resulting action.
    ///
    /// Ownership is checked before the input, so a stranger is rejected as such whatever
    /// they typed.
    ///
    /// # Returns
    /// - `Ok(PanelAction)` - The applied action
    /// - `Err(AppError::VoiceErr(VoiceError::NotOwner))` - Actor doesn't own the channel
    /// - `Err(AppError::VoiceErr(_))` - Invalid limit or name, or a button without input
    pub async fn apply_panel_input(
        &self,
        state: &mut GuildVoiceState,
        config: &GuildVoiceConfig,
        channel_id: ChannelId,
        actor: UserId,
        button: PanelButton,
        raw: &str,
    ) -> Result<PanelAction, AppError> {
        self.ensure_owner(state, channel_id, actor)?;

        let action = match button {
            PanelButton::Limit => PanelAction::SetLimit(parse_limit(raw)?),
            PanelButton::Rename => PanelAction::Rename(validate_name(raw)?),
            _ => {
                let custom_id = PanelComponent::Modal(button, channel_id).custom_id();
                return Err(VoiceError::UnknownComponent(custom_id).into());
            }
        };

        self.apply_panel_action(state, config, channel_id, actor, &action)
            .await?;

        Ok(action)
    }
}
