//! Telegram Bot API client over HTTPS (`reqwest`).

use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::types::Update;
use super::{ChatTransport, Keyboard, SentMessage, TransportError};
use crate::logging::pii::Redacted;

/// Seconds `getUpdates` may hold the connection open.
pub const LONG_POLL_SECS: u32 = 30;

#[derive(Debug, Serialize, PartialEq, Eq)]
struct InlineKeyboardButton {
    text: String,
    callback_data: String,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
struct InlineKeyboardMarkup {
    inline_keyboard: Vec<Vec<InlineKeyboardButton>>,
}

impl From<&Keyboard> for InlineKeyboardMarkup {
    fn from(kb: &Keyboard) -> Self {
        Self {
            inline_keyboard: kb
                .rows
                .iter()
                .map(|row| {
                    row.iter()
                        .map(|b| InlineKeyboardButton {
                            text: b.text.clone(),
                            callback_data: b.data.clone(),
                        })
                        .collect()
                })
                .collect(),
        }
    }
}

#[derive(Debug, Serialize)]
struct SendMessage<'a> {
    chat_id: i64,
    text: &'a str,
    parse_mode: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    reply_markup: Option<InlineKeyboardMarkup>,
}

#[derive(Debug, Serialize)]
struct EditMessageText<'a> {
    chat_id: i64,
    message_id: i64,
    text: &'a str,
    parse_mode: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    reply_markup: Option<InlineKeyboardMarkup>,
}

#[derive(Debug, Serialize)]
struct AnswerCallbackQuery<'a> {
    callback_query_id: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<&'a str>,
    show_alert: bool,
}

#[derive(Debug, Serialize)]
struct GetUpdates {
    #[serde(skip_serializing_if = "Option::is_none")]
    offset: Option<i64>,
    timeout: u32,
    allowed_updates: [&'static str; 2],
}

#[derive(Debug, Deserialize)]
struct ApiResponse<R> {
    ok: bool,
    result: Option<R>,
    #[serde(default)]
    error_code: Option<i64>,
    #[serde(default)]
    description: Option<String>,
}

/// Only the ids are needed from a sent `Message`.
#[derive(Debug, Deserialize)]
struct SentMessageResult {
    message_id: i64,
    chat: SentChat,
}

#[derive(Debug, Deserialize)]
struct SentChat {
    id: i64,
}

fn interpret<R>(resp: ApiResponse<R>) -> Result<R, TransportError> {
    if resp.ok {
        return resp
            .result
            .ok_or_else(|| TransportError::Decode("response without result".into()));
    }
    Err(TransportError::Api {
        code: resp.error_code.unwrap_or_default(),
        description: resp.description.unwrap_or_default(),
    })
}

/// Editing a message to identical content is reported as an error by the
/// API; it is a no-op for us.
fn is_not_modified(err: &TransportError) -> bool {
    matches!(err, TransportError::Api { description, .. } if description.contains("message is not modified"))
}

#[derive(Clone)]
pub struct TelegramClient {
    http: reqwest::Client,
    /// `{api_base}/bot{token}`; never logged.
    endpoint: String,
}

impl std::fmt::Debug for TelegramClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TelegramClient").finish_non_exhaustive()
    }
}

impl TelegramClient {
    pub fn new(api_base: &str, token: &str) -> Result<Self, TransportError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(u64::from(LONG_POLL_SECS) + 15))
            .connect_timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| TransportError::Http(e.to_string()))?;
        Ok(Self {
            http,
            endpoint: format!("{}/bot{token}", api_base.trim_end_matches('/')),
        })
    }

    async fn call<P, R>(&self, method: &str, payload: &P) -> Result<R, TransportError>
    where
        P: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let resp = self
            .http
            .post(format!("{}/{method}", self.endpoint))
            .json(payload)
            .send()
            .await
            .map_err(|e| TransportError::Http(e.without_url().to_string()))?;
        let status = resp.status();
        let body: ApiResponse<R> = resp
            .json()
            .await
            .map_err(|e| TransportError::Decode(e.without_url().to_string()))?;

        let result = interpret(body);
        if let Err(e) = &result {
            debug!(method, status = status.as_u16(), error = %Redacted(&e.to_string()), "telegram call failed");
        }
        result
    }

    /// Long-poll for updates after `offset`.
    pub async fn get_updates(&self, offset: Option<i64>) -> Result<Vec<Update>, TransportError> {
        let payload = GetUpdates {
            offset,
            timeout: LONG_POLL_SECS,
            allowed_updates: ["message", "callback_query"],
        };
        self.call("getUpdates", &payload).await
    }
}

#[async_trait]
impl ChatTransport for TelegramClient {
    async fn send_message(
        &self,
        chat_id: i64,
        text: &str,
        keyboard: Option<&Keyboard>,
    ) -> Result<SentMessage, TransportError> {
        let payload = SendMessage {
            chat_id,
            text,
            parse_mode: "Markdown",
            reply_markup: keyboard.map(InlineKeyboardMarkup::from),
        };
        let sent: SentMessageResult = self.call("sendMessage", &payload).await?;
        Ok(SentMessage {
            chat_id: sent.chat.id,
            message_id: sent.message_id,
        })
    }

    async fn edit_message(
        &self,
        target: SentMessage,
        text: &str,
        keyboard: Option<&Keyboard>,
    ) -> Result<(), TransportError> {
        let payload = EditMessageText {
            chat_id: target.chat_id,
            message_id: target.message_id,
            text,
            parse_mode: "Markdown",
            reply_markup: keyboard.map(InlineKeyboardMarkup::from),
        };
        match self.call::<_, serde_json::Value>("editMessageText", &payload).await {
            Ok(_) => Ok(()),
            Err(e) if is_not_modified(&e) => {
                warn!(message_id = target.message_id, "edit skipped: content unchanged");
                Ok(())
            }
            Err(e) => Err(e),
        }
    }

    async fn answer_callback(
        &self,
        callback_id: &str,
        text: Option<&str>,
        show_alert: bool,
    ) -> Result<(), TransportError> {
        let payload = AnswerCallbackQuery {
            callback_query_id: callback_id,
            text,
            show_alert,
        };
        let _: bool = self.call("answerCallbackQuery", &payload).await?;
        Ok(())
    }
}
