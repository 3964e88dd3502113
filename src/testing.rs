//! Test doubles shared by unit tests

use async_trait::async_trait;
use std::collections::VecDeque;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::application::errors::{CommandError, SourceError, TransportError};
use crate::domain::entities::{InboundMessageEvent, PresenceState, RichMessage};
use crate::domain::traits::{BotInfo, ChatService, CommandHandler, Invocation, NowPlayingSource};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Message { channel: String, text: String },
    Rich { channel: String, message: RichMessage },
    Presence(PresenceState),
}

/// Chat service that records every call and can be told to fail
#[derive(Default)]
pub struct RecordingChat {
    calls: Mutex<Vec<Call>>,
    failure: Mutex<Option<TransportError>>,
    delay: Option<Duration>,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl RecordingChat {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn fail_with(&self, error: TransportError) {
        *self.failure.lock().unwrap() = Some(error);
    }

    pub fn recover(&self) {
        *self.failure.lock().unwrap() = None;
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn presence_calls(&self) -> Vec<PresenceState> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::Presence(p) => Some(p),
                _ => None,
            })
            .collect()
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    async fn record(&self, call: Call) -> Result<(), TransportError> {
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.calls.lock().unwrap().push(call);
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        match self.failure.lock().unwrap().clone() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl ChatService for RecordingChat {
    async fn start(&self) -> Result<(), TransportError> {
        Ok(())
    }

    async fn send_message(&self, channel: &str, text: &str) -> Result<String, TransportError> {
        self.record(Call::Message {
            channel: channel.to_string(),
            text: text.to_string(),
        })
        .await?;
        Ok("msg".to_string())
    }

    async fn send_rich_message(&self, channel: &str, message: &RichMessage) -> Result<String, TransportError> {
        self.record(Call::Rich {
            channel: channel.to_string(),
            message: message.clone(),
        })
        .await?;
        Ok("msg".to_string())
    }

    async fn update_presence(&self, presence: &PresenceState) -> Result<(), TransportError> {
        self.record(Call::Presence(presence.clone())).await
    }

    fn bot_info(&self) -> BotInfo {
        BotInfo {
            id: "test".to_string(),
            name: "zerobot".to_string(),
            username: "zerobot".to_string(),
        }
    }
}

pub struct NoopHandler;

#[async_trait]
impl CommandHandler for NoopHandler {
    async fn execute(&self, _: &InboundMessageEvent, _: &[String], _: Invocation) -> Result<(), CommandError> {
        Ok(())
    }
}

/// Records the arguments of every invocation
#[derive(Clone, Default)]
pub struct RecordingHandler {
    seen: Arc<Mutex<Vec<(Vec<String>, Invocation)>>>,
}

impl RecordingHandler {
    pub fn seen(&self) -> Vec<(Vec<String>, Invocation)> {
        self.seen.lock().unwrap().clone()
    }
}

#[async_trait]
impl CommandHandler for RecordingHandler {
    async fn execute(&self, _: &InboundMessageEvent, args: &[String], invocation: Invocation) -> Result<(), CommandError> {
        self.seen.lock().unwrap().push((args.to_vec(), invocation));
        Ok(())
    }
}

pub struct FailingHandler;

#[async_trait]
impl CommandHandler for FailingHandler {
    async fn execute(&self, _: &InboundMessageEvent, _: &[String], _: Invocation) -> Result<(), CommandError> {
        Err(CommandError::InvalidArgs("expected @user".to_string()))
    }
}

pub struct PanickingHandler;

#[async_trait]
impl CommandHandler for PanickingHandler {
    async fn execute(&self, _: &InboundMessageEvent, _: &[String], _: Invocation) -> Result<(), CommandError> {
        panic!("handler bug")
    }
}

/// Now-playing source that replays a script of results
#[derive(Clone, Default)]
pub struct ScriptedSource {
    script: Arc<Mutex<VecDeque<Result<String, SourceError>>>>,
}

impl ScriptedSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_title(&self, title: &str) {
        self.script.lock().unwrap().push_back(Ok(title.to_string()));
    }

    pub fn push_missing(&self) {
        self.script.lock().unwrap().push_back(Err(SourceError::Io {
            path: PathBuf::from("missing.log"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "no such file"),
        }));
    }

    pub fn push_no_entry(&self) {
        self.script
            .lock()
            .unwrap()
            .push_back(Err(SourceError::NoEntry(PathBuf::from("empty.log"))));
    }
}

#[async_trait]
impl NowPlayingSource for ScriptedSource {
    async fn latest_title(&self) -> Result<String, SourceError> {
        self.script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(SourceError::NoEntry(PathBuf::from("scripted.log"))))
    }
}
