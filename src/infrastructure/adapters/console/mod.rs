//! Console adapter for development/testing

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use crate::domain::entities::{InboundMessageEvent, PresenceState, RichMessage, Sender};
use crate::domain::traits::{BotInfo, ChatService};
use crate::application::errors::TransportError;

pub const CONSOLE_CHANNEL: &str = "console";

/// Console bot adapter for local development
pub struct ConsoleAdapter {
    info: BotInfo,
    ready: AtomicBool,
}

impl ConsoleAdapter {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            info: BotInfo {
                id: "console".to_string(),
                name: name.into(),
                username: "console".to_string(),
            },
            ready: AtomicBool::new(false),
        }
    }

    /// Feed stdin lines into `inbound` until EOF or the receiver goes away
    pub fn spawn_reader(inbound: mpsc::Sender<InboundMessageEvent>) -> tokio::task::JoinHandle<()> {
        tokio::spawn(async move {
            let mut lines = BufReader::new(tokio::io::stdin()).lines();
            loop {
                match lines.next_line().await {
                    Ok(Some(line)) => {
                        let event = InboundMessageEvent::new(CONSOLE_CHANNEL, Sender::new("console-user"), line)
                            .with_platform("console");
                        if inbound.send(event).await.is_err() {
                            break;
                        }
                    }
                    Ok(None) => {
                        tracing::info!("Console input closed");
                        break;
                    }
                    Err(e) => {
                        tracing::error!("Failed to read console input: {}", e);
                        break;
                    }
                }
            }
        })
    }

    fn ensure_ready(&self) -> Result<(), TransportError> {
        if self.ready.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(TransportError::NotReady)
        }
    }
}

impl Default for ConsoleAdapter {
    fn default() -> Self {
        Self::new("zerobot")
    }
}

#[async_trait]
impl ChatService for ConsoleAdapter {
    async fn start(&self) -> Result<(), TransportError> {
        tracing::info!("Starting console bot (dev mode)");
        self.ready.store(true, Ordering::SeqCst);
        Ok(())
    }

    async fn send_message(&self, channel: &str, text: &str) -> Result<String, TransportError> {
        println!("[BOT -> {}] {}", channel, text);
        Ok(uuid::Uuid::new_v4().to_string())
    }

    async fn send_rich_message(&self, channel: &str, message: &RichMessage) -> Result<String, TransportError> {
        let rendered = serde_json::to_string_pretty(message)
            .map_err(|e| TransportError::Rejected(e.to_string()))?;
        println!("[BOT -> {}] {}", channel, rendered);
        Ok(uuid::Uuid::new_v4().to_string())
    }

    async fn update_presence(&self, presence: &PresenceState) -> Result<(), TransportError> {
        self.ensure_ready()?;
        println!("[PRESENCE] {}", presence);
        Ok(())
    }

    fn bot_info(&self) -> BotInfo {
        self.info.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn presence_needs_a_started_session() {
        let adapter = ConsoleAdapter::default();
        let presence = PresenceState::listening("Song A");

        assert_eq!(adapter.update_presence(&presence).await, Err(TransportError::NotReady));
        adapter.start().await.unwrap();
        assert_eq!(adapter.update_presence(&presence).await, Ok(()));
    }

    #[tokio::test]
    async fn rich_messages_render_as_json() {
        let adapter = ConsoleAdapter::default();
        let message = RichMessage::new().with_title("!np").with_field("Unknown Error", "ask", false);
        assert!(adapter.send_rich_message(CONSOLE_CHANNEL, &message).await.is_ok());
        assert_eq!(adapter.bot_info().name, "zerobot");
    }
}
