use std::collections::HashMap;
use std::sync::Arc;

use crate::application::errors::RegistryError;
use crate::domain::traits::CommandHandler;

/// Represents a bot command bound to its handler
#[derive(Clone)]
pub struct Command {
    pub keyword: String,
    pub description: Option<String>,
    pub handler: Arc<dyn CommandHandler>,
}

impl Command {
    pub fn new<H>(keyword: impl Into<String>, handler: H) -> Self
    where
        H: CommandHandler + 'static,
    {
        Self {
            keyword: keyword.into(),
            description: None,
            handler: Arc::new(handler),
        }
    }

    pub fn with_description(mut self, desc: impl Into<String>) -> Self {
        self.description = Some(desc.into());
        self
    }
}

impl std::fmt::Debug for Command {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Command")
            .field("keyword", &self.keyword)
            .field("description", &self.description)
            .finish_non_exhaustive()
    }
}

/// Keyword and arguments of one command invocation, prefix already stripped
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedCommand {
    pub keyword: String,
    pub args: Vec<String>,
}

/// Fixed keyword -> command table, filled once at startup
#[derive(Default)]
pub struct CommandRegistry {
    commands: HashMap<String, Command>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a command. Keywords are case-sensitive and must be unique.
    pub fn register(&mut self, command: Command) -> Result<(), RegistryError> {
        if self.commands.contains_key(&command.keyword) {
            return Err(RegistryError::Duplicate(command.keyword));
        }
        tracing::debug!("Registering command '{}'", command.keyword);
        self.commands.insert(command.keyword.clone(), command);
        Ok(())
    }

    /// Exact lookup; no aliases, no case folding
    pub fn resolve(&self, keyword: &str) -> Option<&Command> {
        self.commands.get(keyword)
    }

    pub fn keywords(&self) -> Vec<String> {
        let mut keywords: Vec<String> = self.commands.keys().cloned().collect();
        keywords.sort();
        keywords
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }
}
