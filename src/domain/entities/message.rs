use super::Sender;
use chrono::{DateTime, Utc};

/// One chat message as delivered by the transport layer
#[derive(Debug, Clone)]
pub struct InboundMessageEvent {
    pub id: String,
    pub channel: String,
    pub sender: Sender,
    pub content: String,
    pub timestamp: DateTime<Utc>,
    pub platform: String,
}

impl InboundMessageEvent {
    pub fn new(channel: impl Into<String>, sender: Sender, content: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            channel: channel.into(),
            sender,
            content: content.into(),
            timestamp: Utc::now(),
            platform: "unknown".to_string(),
        }
    }

    pub fn with_platform(mut self, platform: impl Into<String>) -> Self {
        self.platform = platform.into();
        self
    }
}
