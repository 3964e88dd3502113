//! Chat platform adapters

pub mod console;
