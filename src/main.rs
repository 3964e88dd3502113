use clap::{Parser, Subcommand};
use std::process::ExitCode;
use std::sync::Arc;
use tokio::sync::mpsc;

mod domain;
mod application;
mod infrastructure;
#[cfg(test)]
mod testing;

use application::agent::Agent;
use application::errors::BotError;
use infrastructure::adapters::console::ConsoleAdapter;
use infrastructure::config::Config;

#[derive(Parser)]
#[command(name = "zerobot")]
#[command(about = "A chat bot with prefixed commands and a now-playing presence", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file path
    #[arg(short, long, default_value = "config.yaml")]
    config: String,

    /// Command prefix (overrides config)
    #[arg(short, long)]
    prefix: Option<String>,

    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the bot
    Run,
    /// Show version
    Version,
    /// Generate default config
    InitConfig,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize logging
    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter(
            tracing_subscriber::EnvFilter::builder()
                .with_default_directive(level.into())
                .from_env_lossy(),
        )
        .init();

    let result = match cli.command {
        Commands::Run => run_bot(&cli.config, cli.prefix),
        Commands::Version => {
            println!("zerobot v{}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        Commands::InitConfig => init_config(),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn load_config(config_path: &str, prefix_override: Option<String>) -> Result<Config, BotError> {
    let mut config = if std::path::Path::new(config_path).exists() {
        let mut config = Config::load(config_path)?;
        config.apply_env();
        config
    } else {
        tracing::warn!("Config file '{}' not found, using defaults", config_path);
        Config::load_env()
    };

    if let Some(prefix) = prefix_override {
        config.bot.prefix = prefix;
    }
    config.validate()?;
    Ok(config)
}

fn run_bot(config_path: &str, prefix_override: Option<String>) -> Result<(), BotError> {
    let config = load_config(config_path, prefix_override)?;
    tracing::info!("Starting {} with prefix '{}'", config.bot.name, config.bot.prefix);

    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(async {
        let chat = Arc::new(ConsoleAdapter::new(config.bot.name.clone()));
        let agent = Agent::from_config(config, chat)?;

        let (inbound, events) = mpsc::channel(32);
        let _reader = ConsoleAdapter::spawn_reader(inbound);

        agent.run(events).await
    })
}

fn init_config() -> Result<(), BotError> {
    let yaml = serde_yaml::to_string(&Config::default())
        .map_err(|e| BotError::Internal(format!("Failed to render config: {}", e)))?;
    println!("{}", yaml);
    println!("\nSave this to config.yaml and adjust as needed.");
    Ok(())
}
