//! Configuration management

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use crate::application::errors::ConfigError;

/// Bot configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct Config {
    pub bot: BotConfig,
    #[serde(default)]
    pub tasks: TasksConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct BotConfig {
    pub name: String,
    pub prefix: String,
    #[serde(default = "default_true")]
    pub send_error_messages: bool,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct TasksConfig {
    #[serde(default)]
    pub now_playing: NowPlayingConfig,
}

/// Settings for the presence task that follows the CyTube channel log
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct NowPlayingConfig {
    pub enabled: bool,
    pub log_path: PathBuf,
    pub initial_delay_secs: u64,
    pub period_secs: u64,
    pub retry_failed_update: bool,
}

fn default_true() -> bool {
    true
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            name: "zerobot".to_string(),
            prefix: "!".to_string(),
            send_error_messages: true,
        }
    }
}

impl Default for NowPlayingConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            log_path: PathBuf::from("chanlogs/channel.log"),
            initial_delay_secs: 5,
            period_secs: 2,
            retry_failed_update: false,
        }
    }
}

impl NowPlayingConfig {
    pub fn initial_delay(&self) -> Duration {
        Duration::from_secs(self.initial_delay_secs)
    }

    pub fn period(&self) -> Duration {
        Duration::from_secs(self.period_secs)
    }
}

impl Config {
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let path = path.into();
        let content = std::fs::read_to_string(&path)
            .map_err(|e| ConfigError::Read(format!("{}: {}", path.display(), e)))?;

        Self::parse(&content)
    }

    /// Parse without validating; call `validate` once overrides are applied.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        serde_yaml::from_str(content)
            .map_err(|e| ConfigError::Parse(format!("Failed to parse config: {}", e)))
    }

    /// Defaults, overridden by environment variables
    pub fn load_env() -> Self {
        let mut config = Config::default();
        config.apply_env();
        config
    }

    pub fn apply_env(&mut self) {
        if let Ok(prefix) = std::env::var("BOT_PREFIX") {
            self.bot.prefix = prefix;
        }

        if let Ok(path) = std::env::var("BOT_NOW_PLAYING_LOG") {
            self.tasks.now_playing.log_path = PathBuf::from(path);
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.bot.prefix.trim().is_empty() {
            return Err(ConfigError::InvalidValue("bot.prefix must not be empty".to_string()));
        }
        if self.bot.prefix.chars().any(char::is_whitespace) {
            return Err(ConfigError::InvalidValue("bot.prefix must not contain whitespace".to_string()));
        }
        if self.tasks.now_playing.enabled && self.tasks.now_playing.period_secs == 0 {
            return Err(ConfigError::InvalidValue(
                "tasks.now-playing.period-secs must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}
