use async_trait::async_trait;
use crate::domain::entities::InboundMessageEvent;
use crate::application::errors::CommandError;

/// How a handler was reached
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Invocation {
    /// Typed by a user in a channel
    User,
    /// Called from inside the agent; handlers should not post to the channel
    Internal,
}

impl Invocation {
    pub fn is_user(&self) -> bool {
        matches!(self, Invocation::User)
    }
}

/// Logic bound to one command keyword
#[async_trait]
pub trait CommandHandler: Send + Sync {
    async fn execute(
        &self,
        event: &InboundMessageEvent,
        args: &[String],
        invocation: Invocation,
    ) -> Result<(), CommandError>;
}
