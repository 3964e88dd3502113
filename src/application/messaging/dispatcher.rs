//! Message dispatcher - Routes inbound messages to command handlers

use std::sync::Arc;

use super::error_reporter::ErrorReporter;
use super::parser::CommandParser;
use crate::domain::entities::{CommandRegistry, InboundMessageEvent};
use crate::domain::traits::Invocation;

/// What happened to one inbound message
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// Not addressed to the bot
    Ignored,
    /// Prefixed, but no such command
    Unknown(String),
    /// Handler ran to completion
    Completed(String),
    /// Handler failed or panicked; the channel was notified
    Failed(String),
}

/// Turns one inbound message into at most one handler invocation
pub struct Dispatcher {
    parser: CommandParser,
    registry: Arc<CommandRegistry>,
    reporter: ErrorReporter,
}

impl Dispatcher {
    pub fn new(parser: CommandParser, registry: Arc<CommandRegistry>, reporter: ErrorReporter) -> Self {
        Self {
            parser,
            registry,
            reporter,
        }
    }

    /// Dispatch a message. Handler failures are contained here and never returned.
    pub async fn dispatch(&self, event: &InboundMessageEvent) -> DispatchOutcome {
        let Some(parsed) = self.parser.parse(&event.content) else {
            return DispatchOutcome::Ignored;
        };

        let Some(command) = self.registry.resolve(&parsed.keyword) else {
            tracing::info!("Received unknown command '{}'", parsed.keyword);
            return DispatchOutcome::Unknown(parsed.keyword);
        };

        tracing::debug!("Received command, running '{}'", parsed.keyword);

        // Run on its own task so a panicking handler surfaces as a JoinError
        let handler = command.handler.clone();
        let owned_event = event.clone();
        let args = parsed.args;
        let run = tokio::spawn(async move {
            handler.execute(&owned_event, &args, Invocation::User).await
        });

        match run.await {
            Ok(Ok(())) => return DispatchOutcome::Completed(parsed.keyword),
            Ok(Err(e)) => {
                tracing::error!(
                    "Error when executing command '{}' in channel '{}', TROUBLESHOOT THIS: {}",
                    parsed.keyword,
                    event.channel,
                    e
                );
            }
            Err(e) => {
                tracing::error!(
                    "Command '{}' in channel '{}' aborted, TROUBLESHOOT THIS: {}",
                    parsed.keyword,
                    event.channel,
                    e
                );
            }
        }

        // Users only ever see a generic notice; details stay in the log
        self.reporter
            .report(&event.channel, Some(&parsed.keyword), None)
            .await;
        DispatchOutcome::Failed(parsed.keyword)
    }
}
