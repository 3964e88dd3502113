//! Domain layer - Core business objects and seams
//!
//! This layer contains:
//! - Entities: Commands, inbound events, presence, rich messages
//! - Traits: Abstractions for the chat service, handlers and scheduled tasks

pub mod entities;
pub mod traits;
