use async_trait::async_trait;
use std::time::Duration;
use crate::application::errors::{SourceError, TaskError};

/// Fixed-rate schedule: first tick after `initial_delay`, then every `period`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Schedule {
    pub initial_delay: Duration,
    pub period: Duration,
}

impl Schedule {
    pub fn new(initial_delay: Duration, period: Duration) -> Self {
        Self { initial_delay, period }
    }
}

/// A recurring background job. State held in `self` belongs to this task alone.
#[async_trait]
pub trait ScheduledTask: Send {
    fn name(&self) -> &str;

    fn schedule(&self) -> Schedule;

    /// Run one tick
    async fn run(&mut self) -> Result<(), TaskError>;
}

/// Where the polling presence task reads the current title from
#[async_trait]
pub trait NowPlayingSource: Send + Sync {
    async fn latest_title(&self) -> Result<String, SourceError>;
}
