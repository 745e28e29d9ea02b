//! State shared by the event handlers and the scheduler.

use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::model::voice::ChannelNaming;
use crate::service::voice::registry::VoiceRegistry;

/// Shared resources of the bot.
///
/// Cheap to clone: the database connection is a pool, the registry and naming are
/// reference counted.
#[derive(Clone)]
pub struct BotState {
    /// Connection pool for the guild voice configuration.
    pub db: DatabaseConnection,
    /// Transient channel bookkeeping of every guild.
    pub registry: VoiceRegistry,
    /// Name templates of transient channels.
    pub naming: Arc<ChannelNaming>,
}

impl BotState {
    pub fn new(db: DatabaseConnection, naming: ChannelNaming) -> Self {
        Self {
            db,
            registry: VoiceRegistry::new(),
            naming: Arc::new(naming),
        }
    }
}
