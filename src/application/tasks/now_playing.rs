//! Now-playing presence - mirrors the current media title into the bot's presence

use async_trait::async_trait;

use crate::application::errors::TaskError;
use crate::application::services::OutboundGateway;
use crate::domain::entities::PresenceState;
use crate::domain::traits::{NowPlayingSource, Schedule, ScheduledTask};

pub const TASK_NAME: &str = "cytubeNp";

pub struct NowPlayingPresence<S> {
    source: S,
    gateway: OutboundGateway,
    schedule: Schedule,
    latest: String,
    retry_failed_update: bool,
    update_pending: bool,
}

impl<S: NowPlayingSource> NowPlayingPresence<S> {
    pub fn new(source: S, gateway: OutboundGateway, schedule: Schedule) -> Self {
        Self {
            source,
            gateway,
            schedule,
            latest: String::new(),
            retry_failed_update: false,
            update_pending: false,
        }
    }

    /// Re-send a failed update on later ticks even if the title has not changed
    pub fn with_retry_failed_update(mut self, retry: bool) -> Self {
        self.retry_failed_update = retry;
        self
    }

    async fn push_presence(&mut self) {
        let presence = PresenceState::listening(self.latest.clone());
        match self.gateway.update_presence(presence).await {
            Ok(()) => self.update_pending = false,
            Err(e) => {
                tracing::warn!(
                    "Could not update now-playing presence, probably not logged in and ready? {}",
                    e
                );
                self.update_pending = self.retry_failed_update;
            }
        }
    }
}

#[async_trait]
impl<S: NowPlayingSource + 'static> ScheduledTask for NowPlayingPresence<S> {
    fn name(&self) -> &str {
        TASK_NAME
    }

    fn schedule(&self) -> Schedule {
        self.schedule
    }

    async fn run(&mut self) -> Result<(), TaskError> {
        // Unreadable or empty log: skip this tick, state untouched
        let title = self.source.latest_title().await?;

        if title != self.latest {
            tracing::debug!("Now playing: {}", title);
            self.latest = title;
            self.push_presence().await;
        } else if self.update_pending {
            tracing::debug!("Retrying presence update for '{}'", self.latest);
            self.push_presence().await;
        }

        Ok(())
    }
}
