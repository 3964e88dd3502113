//! Infrastructure layer - External concerns
//!
//! This layer contains:
//! - Config: Configuration loading
//! - Adapters: Chat platform integrations
//! - CyTube: Channel log reader feeding the now-playing task

pub mod adapters;
pub mod config;
pub mod cytube;
