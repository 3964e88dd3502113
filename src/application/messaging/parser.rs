//! Command parser - Splits raw message text into keyword and arguments

use crate::domain::entities::ParsedCommand;

/// Recognises messages addressed to the bot by their prefix
pub struct CommandParser {
    command_prefix: String,
}

impl CommandParser {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            command_prefix: prefix.into(),
        }
    }

    /// Parse message text. `None` means the message is not a command.
    pub fn parse(&self, text: &str) -> Option<ParsedCommand> {
        let mut tokens = text.split_whitespace();
        let first = tokens.next()?;
        let keyword = first.strip_prefix(self.command_prefix.as_str())?;

        Some(ParsedCommand {
            keyword: keyword.to_string(),
            args: tokens.map(str::to_string).collect(),
        })
    }
}
