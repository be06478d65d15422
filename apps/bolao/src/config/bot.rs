use std::fmt;

use super::{must_var, Lookup};
use crate::error::AppError;

pub const DEFAULT_API_BASE: &str = "https://api.telegram.org";

/// How inbound updates reach the bot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryMode {
    /// Long-poll `getUpdates`.
    Polling,
    /// Telegram pushes updates to `POST /telegram/webhook`.
    Webhook,
}

#[derive(Clone, PartialEq, Eq)]
pub struct BotConfig {
    pub token: String,
    pub admin_id: i64,
    pub group_chat_id: i64,
    pub mode: DeliveryMode,
    pub webhook_secret: Option<String>,
    pub bind_host: String,
    pub bind_port: u16,
    pub api_base: String,
}

impl fmt::Debug for BotConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BotConfig")
            .field("token", &"<redacted>")
            .field("admin_id", &self.admin_id)
            .field("group_chat_id", &self.group_chat_id)
            .field("mode", &self.mode)
            .field("webhook_secret", &self.webhook_secret.as_ref().map(|_| "<redacted>"))
            .field("bind_host", &self.bind_host)
            .field("bind_port", &self.bind_port)
            .field("api_base", &self.api_base)
            .finish()
    }
}

impl BotConfig {
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(&super::env_lookup)
    }

    pub fn from_lookup(lookup: &impl Lookup) -> Result<Self, AppError> {
        let token = must_var(lookup, "BOT_TOKEN")?;

        let admin_raw = must_var(lookup, "ADMIN_ID")?;
        let admin_id = parse_chat_id(&admin_raw)
            .ok_or_else(|| AppError::config(format!("ADMIN_ID is not an integer: '{admin_raw}'")))?;

        let group_raw = lookup("GROUP_ID")
            .or_else(|| lookup("GRUPO_ID"))
            .ok_or_else(|| {
                AppError::config("Required environment variable 'GROUP_ID' is not set")
            })?;
        let group_chat_id = parse_chat_id(&group_raw)
            .ok_or_else(|| AppError::config(format!("GROUP_ID is not an integer: '{group_raw}'")))?;

        let mode = match lookup("BOT_MODE").as_deref().map(str::trim) {
            None | Some("polling") => DeliveryMode::Polling,
            Some("webhook") => DeliveryMode::Webhook,
            Some(other) => {
                return Err(AppError::config(format!(
                    "Unknown BOT_MODE '{other}'. Use: polling | webhook"
                )))
            }
        };

        let bind_port = match lookup("BACKEND_PORT") {
            None => 3001,
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|_| AppError::config(format!("BACKEND_PORT is not a port: '{raw}'")))?,
        };

        Ok(Self {
            token,
            admin_id,
            group_chat_id,
            mode,
            webhook_secret: lookup("WEBHOOK_SECRET"),
            bind_host: lookup("BACKEND_HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            bind_port,
            api_base: lookup("TELEGRAM_API_BASE")
                .map(|b| b.trim_end_matches('/').to_string())
                .unwrap_or_else(|| DEFAULT_API_BASE.to_string()),
        })
    }

    pub fn is_admin(&self, user_id: i64) -> bool {
        self.admin_id == user_id
    }
}

/// Parses a chat or user id, tolerating surrounding whitespace and quotes
/// left over from `.env` files (`"-100123"`, `'-100123'`).
pub fn parse_chat_id(raw: &str) -> Option<i64> {
    raw.trim()
        .trim_matches(|c| c == '"' || c == '\'')
        .trim()
        .parse()
        .ok()
}
