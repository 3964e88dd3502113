//! Built-in commands

use async_trait::async_trait;

use crate::application::errors::CommandError;
use crate::application::services::OutboundGateway;
use crate::domain::entities::{ActivityKind, InboundMessageEvent};
use crate::domain::traits::{CommandHandler, Invocation};

/// `version` - bot name and crate version
pub struct VersionCommand {
    gateway: OutboundGateway,
    name: String,
}

impl VersionCommand {
    pub fn new(gateway: OutboundGateway, name: impl Into<String>) -> Self {
        Self {
            gateway,
            name: name.into(),
        }
    }
}

#[async_trait]
impl CommandHandler for VersionCommand {
    async fn execute(&self, event: &InboundMessageEvent, _args: &[String], _: Invocation) -> Result<(), CommandError> {
        let text = format!("{} v{}", self.name, env!("CARGO_PKG_VERSION"));
        self.gateway.send_message(&event.channel, &text).await?;
        Ok(())
    }
}

/// `ping`
pub struct PingCommand {
    gateway: OutboundGateway,
}

impl PingCommand {
    pub fn new(gateway: OutboundGateway) -> Self {
        Self { gateway }
    }
}

#[async_trait]
impl CommandHandler for PingCommand {
    async fn execute(&self, event: &InboundMessageEvent, _args: &[String], _: Invocation) -> Result<(), CommandError> {
        self.gateway.send_message(&event.channel, "Pong!").await?;
        Ok(())
    }
}

/// `np` - what the bot is currently listening to
pub struct NowPlayingCommand {
    gateway: OutboundGateway,
}

impl NowPlayingCommand {
    pub fn new(gateway: OutboundGateway) -> Self {
        Self { gateway }
    }

    fn describe(&self) -> String {
        match self.gateway.presence() {
            Some(presence) if presence.activity == ActivityKind::Listening && !presence.label.is_empty() => {
                format!("Now playing: {}", presence.label)
            }
            _ => "Nothing is playing right now.".to_string(),
        }
    }
}

#[async_trait]
impl CommandHandler for NowPlayingCommand {
    async fn execute(&self, event: &InboundMessageEvent, _args: &[String], invocation: Invocation) -> Result<(), CommandError> {
        let text = self.describe();
        if !invocation.is_user() {
            tracing::info!("{}", text);
            return Ok(());
        }
        self.gateway.send_message(&event.channel, &text).await?;
        Ok(())
    }
}

/// `help` - lists every keyword known when the registry was built
pub struct HelpCommand {
    gateway: OutboundGateway,
    prefix: String,
    keywords: Vec<String>,
}

impl HelpCommand {
    pub fn new(gateway: OutboundGateway, prefix: impl Into<String>, mut keywords: Vec<String>) -> Self {
        keywords.sort();
        keywords.dedup();
        Self {
            gateway,
            prefix: prefix.into(),
            keywords,
        }
    }
}

#[async_trait]
impl CommandHandler for HelpCommand {
    async fn execute(&self, event: &InboundMessageEvent, args: &[String], _: Invocation) -> Result<(), CommandError> {
        if args.len() > 1 {
            return Err(CommandError::InvalidArgs(format!("expected at most one argument, got {}", args.len())));
        }

        let text = match args.first() {
            Some(keyword) if self.keywords.contains(keyword) => format!("{}{} is available.", self.prefix, keyword),
            Some(keyword) => format!("Unknown command {}{}", self.prefix, keyword),
            None => {
                let listed: Vec<String> = self
                    .keywords
                    .iter()
                    .map(|k| format!("{}{}", self.prefix, k))
                    .collect();
                format!("Available commands: {}", listed.join(", "))
            }
        };

        self.gateway.send_message(&event.channel, &text).await?;
        Ok(())
    }
}
