//! CyTube channel log reader
//!
//! CyTube appends a line such as
//! `[Sat Mar 24 2018 21:04:11] [playlist] Now playing: Some Title (yt:dQw4w9WgXcQ)`
//! every time the playlist advances. The newest such line is what is playing.

use async_trait::async_trait;
use regex_lite::Regex;
use std::path::{Path, PathBuf};

use crate::application::errors::{BotError, SourceError};
use crate::domain::traits::NowPlayingSource;

const NOW_PLAYING_PATTERN: &str = r"\[playlist\] Now playing: (?P<title>.+) \((?P<media>[^()]*)\)\s*$";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CyTubeMedia {
    pub title: String,
    pub media: String,
}

pub struct CyTubeLog {
    path: PathBuf,
    pattern: Regex,
}

impl CyTubeLog {
    pub fn new(path: impl Into<PathBuf>) -> Result<Self, BotError> {
        let pattern = Regex::new(NOW_PLAYING_PATTERN)
            .map_err(|e| BotError::Internal(format!("Bad now-playing pattern: {}", e)))?;
        Ok(Self {
            path: path.into(),
            pattern,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Most recent now-playing entry in the log
    pub async fn latest(&self) -> Result<CyTubeMedia, SourceError> {
        let bytes = tokio::fs::read(&self.path)
            .await
            .map_err(|source| SourceError::Io {
                path: self.path.clone(),
                source,
            })?;

        // Chat lines are not guaranteed to be valid UTF-8
        let content = String::from_utf8_lossy(&bytes);
        self.find_latest(&content)
            .ok_or_else(|| SourceError::NoEntry(self.path.clone()))
    }

    fn find_latest(&self, content: &str) -> Option<CyTubeMedia> {
        content.lines().rev().find_map(|line| {
            let caps = self.pattern.captures(line)?;
            Some(CyTubeMedia {
                title: caps["title"].trim().to_string(),
                media: caps["media"].to_string(),
            })
        })
    }
}

#[async_trait]
impl NowPlayingSource for CyTubeLog {
    async fn latest_title(&self) -> Result<String, SourceError> {
        Ok(self.latest().await?.title)
    }
}
