//! Application services - Outbound gateway, scheduler and built-in commands

pub mod commands;
pub mod gateway;
pub mod scheduler;

pub use commands::{HelpCommand, NowPlayingCommand, PingCommand, VersionCommand};
pub use gateway::OutboundGateway;
pub use scheduler::TaskScheduler;
