use std::fmt;

/// Author of an inbound message
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Sender {
    pub id: String,
    pub username: Option<String>,
    pub is_bot: bool,
}

impl Sender {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            username: None,
            is_bot: false,
        }
    }

    pub fn display_name(&self) -> &str {
        self.username.as_deref().unwrap_or(&self.id)
    }
}

impl fmt::Display for Sender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}
