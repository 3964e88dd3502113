//! Application layer - Use cases and orchestration
//!
//! This layer contains:
//! - Errors: Typed failures for every boundary
//! - Messaging: Command parsing, dispatch and failure reporting
//! - Services: Outbound gateway, task scheduler, built-in commands
//! - Tasks: Scheduled background jobs
//! - Agent: Owns and wires everything above

pub mod agent;
pub mod errors;
pub mod messaging;
pub mod services;
pub mod tasks;
