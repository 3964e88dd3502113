//! Domain entities - Core business objects

pub mod user;
pub mod message;
pub mod command;
pub mod presence;
pub mod embed;

pub use user::Sender;
pub use message::InboundMessageEvent;
pub use command::{Command, CommandRegistry, ParsedCommand};
pub use presence::{ActivityKind, PresenceState};
pub use embed::RichMessage;
