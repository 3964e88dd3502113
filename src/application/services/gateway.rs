//! Outbound gateway - single-flight path to the chat service
//!
//! Every remote call is queued on one channel and executed by one worker, so
//! calls are never issued concurrently no matter how many command handlers
//! or scheduled tasks submit at once. Each submitter waits for the result of
//! its own call.

use std::sync::Arc;
use tokio::sync::{mpsc, oneshot, watch};

use crate::application::errors::TransportError;
use crate::domain::entities::{PresenceState, RichMessage};
use crate::domain::traits::ChatService;

const QUEUE_CAPACITY: usize = 64;

type Reply<T> = oneshot::Sender<Result<T, TransportError>>;

/// A unit of work waiting for the gateway worker
enum OutboundRequest {
    SendMessage {
        channel: String,
        text: String,
        reply: Reply<String>,
    },
    SendRichMessage {
        channel: String,
        message: RichMessage,
        reply: Reply<String>,
    },
    UpdatePresence {
        presence: PresenceState,
        reply: Reply<()>,
    },
}

/// Cloneable handle to the gateway worker
#[derive(Clone)]
pub struct OutboundGateway {
    queue: mpsc::Sender<OutboundRequest>,
    presence: watch::Receiver<Option<PresenceState>>,
}

impl OutboundGateway {
    /// Spawn the worker on the current runtime. It stops once every handle is dropped.
    pub fn spawn(chat: Arc<dyn ChatService>) -> Self {
        let (queue, requests) = mpsc::channel(QUEUE_CAPACITY);
        let (presence_tx, presence) = watch::channel(None);
        tokio::spawn(run_worker(chat, requests, presence_tx));
        Self { queue, presence }
    }

    pub async fn send_message(&self, channel: &str, text: &str) -> Result<String, TransportError> {
        let (reply, result) = oneshot::channel();
        self.submit(
            OutboundRequest::SendMessage {
                channel: channel.to_string(),
                text: text.to_string(),
                reply,
            },
            result,
        )
        .await
    }

    pub async fn send_rich_message(&self, channel: &str, message: RichMessage) -> Result<String, TransportError> {
        let (reply, result) = oneshot::channel();
        self.submit(
            OutboundRequest::SendRichMessage {
                channel: channel.to_string(),
                message,
                reply,
            },
            result,
        )
        .await
    }

    pub async fn update_presence(&self, presence: PresenceState) -> Result<(), TransportError> {
        let (reply, result) = oneshot::channel();
        self.submit(OutboundRequest::UpdatePresence { presence, reply }, result)
            .await
    }

    /// Last presence the chat service accepted
    pub fn presence(&self) -> Option<PresenceState> {
        self.presence.borrow().clone()
    }

    async fn submit<T>(
        &self,
        request: OutboundRequest,
        result: oneshot::Receiver<Result<T, TransportError>>,
    ) -> Result<T, TransportError> {
        self.queue
            .send(request)
            .await
            .map_err(|_| TransportError::Closed)?;
        result.await.map_err(|_| TransportError::Closed)?
    }
}

async fn run_worker(
    chat: Arc<dyn ChatService>,
    mut requests: mpsc::Receiver<OutboundRequest>,
    presence: watch::Sender<Option<PresenceState>>,
) {
    tracing::debug!("Outbound gateway started");

    while let Some(request) = requests.recv().await {
        match request {
            OutboundRequest::SendMessage { channel, text, reply } => {
                tracing::debug!("Sending message '{}' to channel '{}'", text, channel);
                let result = chat.send_message(&channel, &text).await;
                if let Err(e) = &result {
                    tracing::error!("Failed to send message '{}' to channel '{}': {}", text, channel, e);
                }
                let _ = reply.send(result);
            }
            OutboundRequest::SendRichMessage { channel, message, reply } => {
                tracing::debug!("Sending rich message {:?} to channel '{}'", message, channel);
                let result = chat.send_rich_message(&channel, &message).await;
                if let Err(e) = &result {
                    tracing::error!("Failed to send rich message {:?} to channel '{}': {}", message, channel, e);
                }
                let _ = reply.send(result);
            }
            OutboundRequest::UpdatePresence { presence: next, reply } => {
                tracing::debug!(
                    "Updating presence to status '{:?}', activity '{}', text '{}'",
                    next.status,
                    next.activity.as_str(),
                    next.label
                );
                let result = chat.update_presence(&next).await;
                match &result {
                    Ok(()) => {
                        presence.send_replace(Some(next));
                    }
                    Err(e) => {
                        tracing::error!("Failed to update presence to {}: {}", next, e);
                    }
                }
                let _ = reply.send(result);
            }
        }
    }

    tracing::debug!("Outbound gateway stopped");
}
