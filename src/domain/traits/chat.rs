use async_trait::async_trait;
use crate::domain::entities::{PresenceState, RichMessage};
use crate::application::errors::TransportError;

/// Chat service trait - abstraction for the remote messaging platform
///
/// Implementations perform the raw remote call. Ordering and serialization
/// are the job of [`OutboundGateway`](crate::application::services::OutboundGateway);
/// nothing else should call these methods directly once the agent is running.
#[async_trait]
pub trait ChatService: Send + Sync {
    /// Open the session with the remote service
    async fn start(&self) -> Result<(), TransportError>;

    /// Send a plain text message, returning the remote message id
    async fn send_message(&self, channel: &str, text: &str) -> Result<String, TransportError>;

    /// Send a structured message, returning the remote message id
    async fn send_rich_message(&self, channel: &str, message: &RichMessage) -> Result<String, TransportError>;

    /// Replace the agent's presence
    async fn update_presence(&self, presence: &PresenceState) -> Result<(), TransportError>;

    /// Get bot info
    fn bot_info(&self) -> BotInfo;
}

/// Bot information
#[derive(Debug, Clone)]
pub struct BotInfo {
    pub id: String,
    pub name: String,
    pub username: String,
}
