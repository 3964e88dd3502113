//! Error reporter - posts a failure notice to the channel a command came from

use crate::application::services::OutboundGateway;
use crate::domain::entities::RichMessage;

const ERROR_COLOR: (u8, u8, u8) = (255, 7, 59);
const CONTACT_OPERATOR: &str = "Please let your friendly local bot handler know about this!";

pub struct ErrorReporter {
    gateway: OutboundGateway,
    prefix: String,
    enabled: bool,
}

impl ErrorReporter {
    pub fn new(gateway: OutboundGateway, prefix: impl Into<String>, enabled: bool) -> Self {
        Self {
            gateway,
            prefix: prefix.into(),
            enabled,
        }
    }

    /// Build the notice without sending it
    pub fn build(&self, command: Option<&str>, code: Option<u32>) -> RichMessage {
        let (r, g, b) = ERROR_COLOR;
        let mut notice = RichMessage::new().with_color(r, g, b);

        if let Some(command) = command {
            notice = notice.with_title(format!("{}{}", self.prefix, command));
        }

        let error = match code {
            Some(code) => format!("Error {}", code),
            None => "Unknown Error".to_string(),
        };

        notice.with_field(error, CONTACT_OPERATOR, false)
    }

    /// Send a failure notice. Never fails; send errors are only logged.
    pub async fn report(&self, channel: &str, command: Option<&str>, code: Option<u32>) {
        if !self.enabled {
            tracing::debug!("Error messages disabled, not reporting failure to '{}'", channel);
            return;
        }

        let notice = self.build(command, code);
        if let Err(e) = self.gateway.send_rich_message(channel, notice).await {
            tracing::error!("Failed to post error message to channel '{}': {}", channel, e);
        }
    }
}
