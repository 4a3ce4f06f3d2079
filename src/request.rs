//! Notification content resolved from the command line

use crate::error::{Error, Result, TextField};

pub const MESSAGE_LIMIT: usize = 255;
pub const TITLE_LIMIT: usize = 63;

pub const DEFAULT_MESSAGE: &str = "You've been bugged!";
pub const DEFAULT_TITLE: &str = "Bugme!";
/// Hover text of the status-area icon
pub const TOOLTIP: &str = "Bugme!";

/// Text holding between 1 and `MAX` characters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundedText<const MAX: usize>(String);

impl<const MAX: usize> BoundedText<MAX> {
    /// Length-checked assignment; never truncates
    pub fn new(field: TextField, text: impl Into<String>) -> Result<Self> {
        let text = text.into();
        let len = text.chars().count();
        if len > MAX {
            return Err(Error::ArgumentTooLong {
                field,
                limit: MAX,
                len,
            });
        }
        Ok(Self(text))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

pub type Message = BoundedText<MESSAGE_LIMIT>;
pub type Title = BoundedText<TITLE_LIMIT>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationRequest {
    pub message: Message,
    pub title: Title,
}

impl NotificationRequest {
    /// Build a request, falling back to the defaults for missing or empty text
    pub fn new(message: Option<String>, title: Option<String>) -> Result<Self> {
        let message = message
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| DEFAULT_MESSAGE.to_string());
        let title = title
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| DEFAULT_TITLE.to_string());

        Ok(Self {
            message: Message::new(TextField::Message, message)?,
            title: Title::new(TextField::Title, title)?,
        })
    }
}

impl Default for NotificationRequest {
    fn default() -> Self {
        Self {
            message: BoundedText(DEFAULT_MESSAGE.to_string()),
            title: BoundedText(DEFAULT_TITLE.to_string()),
        }
    }
}
