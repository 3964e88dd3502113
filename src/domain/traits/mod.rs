//! Domain traits - Abstractions for infrastructure implementations

pub mod chat;
pub mod handler;
pub mod task;

pub use chat::{BotInfo, ChatService};
pub use handler::{CommandHandler, Invocation};
pub use task::{NowPlayingSource, Schedule, ScheduledTask};
