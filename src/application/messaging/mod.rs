//! Message handling - Parsing, dispatch and failure reporting

pub mod dispatcher;
pub mod error_reporter;
pub mod parser;

pub use dispatcher::{DispatchOutcome, Dispatcher};
pub use error_reporter::ErrorReporter;
pub use parser::CommandParser;
