use serde::Serialize;
use std::fmt;

/// Online status reported to the chat service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Online,
}

/// Kind of activity shown next to the status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityKind {
    Listening,
}

impl ActivityKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityKind::Listening => "listening",
        }
    }
}

/// The full presence triple. Always replaced as a whole.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PresenceState {
    pub status: Status,
    pub activity: ActivityKind,
    pub label: String,
}

impl PresenceState {
    pub fn new(status: Status, activity: ActivityKind, label: impl Into<String>) -> Self {
        Self {
            status,
            activity,
            label: label.into(),
        }
    }

    pub fn listening(label: impl Into<String>) -> Self {
        Self::new(Status::Online, ActivityKind::Listening, label)
    }
}

impl fmt::Display for PresenceState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} / {} '{}'", self.status, self.activity.as_str(), self.label)
    }
}
