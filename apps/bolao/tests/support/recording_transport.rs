//! In-memory `ChatTransport` that records every outbound call.

use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use bolao::transport::{ChatTransport, Keyboard, SentMessage, TransportError};
use parking_lot::Mutex;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outbound {
    Sent {
        chat_id: i64,
        message_id: i64,
        text: String,
        keyboard: Option<Keyboard>,
    },
    Edited {
        chat_id: i64,
        message_id: i64,
        text: String,
        keyboard: Option<Keyboard>,
    },
    Answered {
        callback_id: String,
        text: Option<String>,
        alert: bool,
    },
}

#[derive(Debug, Default)]
pub struct RecordingTransport {
    next_message_id: AtomicI64,
    log: Mutex<Vec<Outbound>>,
    fail_edits: AtomicBool,
    unreachable_chats: Mutex<HashSet<i64>>,
}

impl RecordingTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            next_message_id: AtomicI64::new(500),
            ..Self::default()
        })
    }

    /// Make every `edit_message` fail.
    pub fn fail_edits(&self, fail: bool) {
        self.fail_edits.store(fail, Ordering::SeqCst);
    }

    /// Make `send_message` to `chat_id` fail (e.g. user never started the bot).
    pub fn block_chat(&self, chat_id: i64) {
        self.unreachable_chats.lock().insert(chat_id);
    }

    pub fn outbound(&self) -> Vec<Outbound> {
        self.log.lock().clone()
    }

    pub fn clear(&self) {
        self.log.lock().clear();
    }

    /// Texts sent to `chat_id`, oldest first.
    pub fn sent_to(&self, chat_id: i64) -> Vec<String> {
        self.outbound()
            .into_iter()
            .filter_map(|o| match o {
                Outbound::Sent { chat_id: c, text, .. } if c == chat_id => Some(text),
                _ => None,
            })
            .collect()
    }

    pub fn last_sent_to(&self, chat_id: i64) -> Option<String> {
        self.sent_to(chat_id).pop()
    }

    /// (message id, text, keyboard) of every edit, oldest first.
    pub fn edits(&self) -> Vec<(i64, String, Option<Keyboard>)> {
        self.outbound()
            .into_iter()
            .filter_map(|o| match o {
                Outbound::Edited {
                    message_id,
                    text,
                    keyboard,
                    ..
                } => Some((message_id, text, keyboard)),
                _ => None,
            })
            .collect()
    }

    /// (callback id, text, alert) of every answer, oldest first.
    pub fn answers(&self) -> Vec<(String, Option<String>, bool)> {
        self.outbound()
            .into_iter()
            .filter_map(|o| match o {
                Outbound::Answered {
                    callback_id,
                    text,
                    alert,
                } => Some((callback_id, text, alert)),
                _ => None,
            })
            .collect()
    }

    pub fn answers_for(&self, callback_id: &str) -> Vec<(Option<String>, bool)> {
        self.answers()
            .into_iter()
            .filter(|(id, _, _)| id == callback_id)
            .map(|(_, text, alert)| (text, alert))
            .collect()
    }
}

#[async_trait]
impl ChatTransport for RecordingTransport {
    async fn send_message(
        &self,
        chat_id: i64,
        text: &str,
        keyboard: Option<&Keyboard>,
    ) -> Result<SentMessage, TransportError> {
        if self.unreachable_chats.lock().contains(&chat_id) {
            return Err(TransportError::Api {
                code: 403,
                description: "Forbidden: bot can't initiate conversation with a user".into(),
            });
        }
        let message_id = self.next_message_id.fetch_add(1, Ordering::SeqCst);
        self.log.lock().push(Outbound::Sent {
            chat_id,
            message_id,
            text: text.to_string(),
            keyboard: keyboard.cloned(),
        });
        Ok(SentMessage {
            chat_id,
            message_id,
        })
    }

    async fn edit_message(
        &self,
        target: SentMessage,
        text: &str,
        keyboard: Option<&Keyboard>,
    ) -> Result<(), TransportError> {
        if self.fail_edits.load(Ordering::SeqCst) {
            return Err(TransportError::Api {
                code: 400,
                description: "Bad Request: message to edit not found".into(),
            });
        }
        self.log.lock().push(Outbound::Edited {
            chat_id: target.chat_id,
            message_id: target.message_id,
            text: text.to_string(),
            keyboard: keyboard.cloned(),
        });
        Ok(())
    }

    async fn answer_callback(
        &self,
        callback_id: &str,
        text: Option<&str>,
        show_alert: bool,
    ) -> Result<(), TransportError> {
        self.log.lock().push(Outbound::Answered {
            callback_id: callback_id.to_string(),
            text: text.map(str::to_string),
            alert: show_alert,
        });
        Ok(())
    }
}
