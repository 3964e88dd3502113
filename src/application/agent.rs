//! Agent - owns the registry, gateway, dispatcher and scheduler
//!
//! Everything is built once here and handed down explicitly; nothing is
//! reachable through globals.

use std::future::Future;
use std::sync::Arc;
use tokio::sync::mpsc;

use crate::application::errors::{BotError, RegistryError};
use crate::application::messaging::{CommandParser, Dispatcher, ErrorReporter};
use crate::application::services::{
    HelpCommand, NowPlayingCommand, OutboundGateway, PingCommand, TaskScheduler, VersionCommand,
};
use crate::application::tasks::NowPlayingPresence;
use crate::domain::entities::{Command, CommandRegistry, InboundMessageEvent};
use crate::domain::traits::{ChatService, Schedule, ScheduledTask};
use crate::infrastructure::config::Config;
use crate::infrastructure::cytube::CyTubeLog;

/// Collects commands and tasks before the agent is frozen
pub struct AgentBuilder {
    config: Config,
    chat: Arc<dyn ChatService>,
    gateway: OutboundGateway,
    registry: CommandRegistry,
    scheduler: TaskScheduler,
}

impl AgentBuilder {
    /// Must be called inside a tokio runtime; the gateway worker starts here.
    pub fn new(config: Config, chat: Arc<dyn ChatService>) -> Self {
        let gateway = OutboundGateway::spawn(chat.clone());
        Self {
            config,
            chat,
            gateway,
            registry: CommandRegistry::new(),
            scheduler: TaskScheduler::new(),
        }
    }

    /// Handle for constructing command handlers and tasks
    pub fn gateway(&self) -> OutboundGateway {
        self.gateway.clone()
    }

    pub fn command(mut self, command: Command) -> Result<Self, RegistryError> {
        self.registry.register(command)?;
        Ok(self)
    }

    pub fn builtin_commands(self) -> Result<Self, RegistryError> {
        let gateway = self.gateway();
        let name = self.config.bot.name.clone();
        self.command(
            Command::new("version", VersionCommand::new(gateway.clone(), name)).with_description("Show bot version"),
        )?
        .command(Command::new("ping", PingCommand::new(gateway.clone())).with_description("Check the bot is alive"))?
        .command(Command::new("np", NowPlayingCommand::new(gateway)).with_description("Show what is playing"))
    }

    pub fn task<T: ScheduledTask + 'static>(mut self, task: T) -> Self {
        self.scheduler.add(task);
        self
    }

    /// Add the CyTube now-playing presence task if it is enabled
    pub fn now_playing_task(self) -> Result<Self, BotError> {
        let settings = self.config.tasks.now_playing.clone();
        if !settings.enabled {
            tracing::info!("Now-playing presence task disabled");
            return Ok(self);
        }

        let source = CyTubeLog::new(&settings.log_path)?;
        tracing::info!("Following CyTube log '{}'", source.path().display());
        let task = NowPlayingPresence::new(
            source,
            self.gateway(),
            Schedule::new(settings.initial_delay(), settings.period()),
        )
        .with_retry_failed_update(settings.retry_failed_update);
        Ok(self.task(task))
    }

    /// Freeze the registry. `help` is added last so it can list everything else.
    pub fn build(mut self) -> Result<Agent, BotError> {
        self.config.validate()?;

        let mut keywords = self.registry.keywords();
        keywords.push("help".to_string());
        let help = HelpCommand::new(self.gateway(), self.config.bot.prefix.clone(), keywords);
        self.registry
            .register(Command::new("help", help).with_description("List commands"))?;

        tracing::info!(
            "Registered {} command(s) and {} scheduled task(s)",
            self.registry.len(),
            self.scheduler.len()
        );

        let reporter = ErrorReporter::new(
            self.gateway(),
            self.config.bot.prefix.clone(),
            self.config.bot.send_error_messages,
        );
        let dispatcher = Dispatcher::new(
            CommandParser::new(self.config.bot.prefix.clone()),
            Arc::new(self.registry),
            reporter,
        );

        Ok(Agent {
            chat: self.chat,
            dispatcher,
            scheduler: self.scheduler,
        })
    }
}

pub struct Agent {
    chat: Arc<dyn ChatService>,
    dispatcher: Dispatcher,
    scheduler: TaskScheduler,
}

impl Agent {
    /// Agent with the built-in commands and the configured tasks
    pub fn from_config(config: Config, chat: Arc<dyn ChatService>) -> Result<Self, BotError> {
        AgentBuilder::new(config, chat)
            .builtin_commands()?
            .now_playing_task()?
            .build()
    }

    /// Run until the inbound channel closes or Ctrl-C is received.
    pub async fn run(self, inbound: mpsc::Receiver<InboundMessageEvent>) -> Result<(), BotError> {
        let interrupted = async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!("Unable to listen for Ctrl-C: {}", e);
                std::future::pending::<()>().await;
            }
            tracing::info!("Interrupted, shutting down");
        };
        self.run_until(inbound, interrupted).await
    }

    /// Start the session and the scheduler, then process inbound messages one
    /// at a time until the channel closes or `shutdown` completes. A message
    /// already being handled is finished first.
    pub async fn run_until<F>(
        self,
        mut inbound: mpsc::Receiver<InboundMessageEvent>,
        shutdown: F,
    ) -> Result<(), BotError>
    where
        F: Future<Output = ()>,
    {
        let Agent {
            chat,
            dispatcher,
            scheduler,
        } = self;

        chat.start().await?;

        let info = chat.bot_info();
        tracing::info!("Bot started: @{}", info.username);

        // Tasks move onto the driver; only Send is needed from here on.
        let scheduler = (!scheduler.is_empty()).then(|| scheduler.start());

        tokio::pin!(shutdown);
        loop {
            tokio::select! {
                biased;
                _ = &mut shutdown => break,
                event = inbound.recv() => {
                    let Some(event) = event else {
                        tracing::info!("Inbound stream closed");
                        break;
                    };
                    dispatcher.dispatch(&event).await;
                }
            }
        }

        if let Some(scheduler) = scheduler {
            scheduler.shutdown().await;
        }
        Ok(())
    }
}
