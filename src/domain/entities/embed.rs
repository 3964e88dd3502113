use serde::Serialize;

/// A structured message with a title, colour bar and named fields
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RichMessage {
    pub title: Option<String>,
    pub color: (u8, u8, u8),
    pub fields: Vec<RichField>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RichField {
    pub name: String,
    pub value: String,
    pub inline: bool,
}

impl RichMessage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_color(mut self, r: u8, g: u8, b: u8) -> Self {
        self.color = (r, g, b);
        self
    }

    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<String>, inline: bool) -> Self {
        self.fields.push(RichField {
            name: name.into(),
            value: value.into(),
            inline,
        });
        self
    }
}
