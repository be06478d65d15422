//! Chat transport: the outbound seam between the bot and the platform.
//!
//! The bot only talks to [`ChatTransport`]; production uses the Telegram
//! client in [`telegram`], tests use a recording double.

pub mod telegram;
pub mod types;

use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Button {
    pub text: String,
    pub data: String,
}

impl Button {
    pub fn new(text: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            data: data.into(),
        }
    }
}

/// Inline keyboard: rows of callback buttons.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Keyboard {
    pub rows: Vec<Vec<Button>>,
}

impl Keyboard {
    /// Every button, row-major.
    pub fn buttons(&self) -> impl Iterator<Item = &Button> {
        self.rows.iter().flatten()
    }
}

/// Address of a message that was sent, used for later edits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SentMessage {
    pub chat_id: i64,
    pub message_id: i64,
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TransportError {
    #[error("http error: {0}")]
    Http(String),
    #[error("api error {code}: {description}")]
    Api { code: i64, description: String },
    #[error("decode error: {0}")]
    Decode(String),
}

#[async_trait]
pub trait ChatTransport: Send + Sync {
    async fn send_message(
        &self,
        chat_id: i64,
        text: &str,
        keyboard: Option<&Keyboard>,
    ) -> Result<SentMessage, TransportError>;

    /// Replace text (and keyboard) of an existing message. `None` removes
    /// the keyboard.
    async fn edit_message(
        &self,
        target: SentMessage,
        text: &str,
        keyboard: Option<&Keyboard>,
    ) -> Result<(), TransportError>;

    /// Acknowledge a button press with an optional toast or alert.
    async fn answer_callback(
        &self,
        callback_id: &str,
        text: Option<&str>,
        show_alert: bool,
    ) -> Result<(), TransportError>;
}
