//! Long-polling delivery loop.

use std::time::Duration;

use async_trait::async_trait;
use tracing::{info, warn};

use super::Bot;
use crate::transport::telegram::TelegramClient;
use crate::transport::types::Update;
use crate::transport::TransportError;

const INITIAL_BACKOFF: Duration = Duration::from_secs(1);
const MAX_BACKOFF: Duration = Duration::from_secs(30);

/// Where polled updates come from.
#[async_trait]
pub trait UpdateSource: Send + Sync {
    async fn fetch(&self, offset: Option<i64>) -> Result<Vec<Update>, TransportError>;
}

#[async_trait]
impl UpdateSource for TelegramClient {
    async fn fetch(&self, offset: Option<i64>) -> Result<Vec<Update>, TransportError> {
        self.get_updates(offset).await
    }
}

/// Fetch one batch and handle its updates in delivery order. Returns the
/// offset acknowledging the batch.
pub async fn poll_once<S: UpdateSource + ?Sized>(
    bot: &Bot,
    source: &S,
    offset: Option<i64>,
) -> Result<Option<i64>, TransportError> {
    let updates = source.fetch(offset).await?;
    let mut next = offset;

    for update in updates {
        next = Some(next.map_or(update.update_id + 1, |o| o.max(update.update_id + 1)));
        bot.handle_update(update).await;
    }
    Ok(next)
}

/// Poll forever. Fetch errors back off exponentially up to 30s.
pub async fn run<S: UpdateSource + ?Sized>(bot: Bot, source: &S) {
    info!("polling for updates");
    let mut offset = None;
    let mut backoff = INITIAL_BACKOFF;

    loop {
        match poll_once(&bot, source, offset).await {
            Ok(next) => {
                offset = next;
                backoff = INITIAL_BACKOFF;
            }
            Err(e) => {
                warn!(error = %e, retry_in_secs = backoff.as_secs(), "getUpdates failed");
                tokio::time::sleep(backoff).await;
                backoff = (backoff * 2).min(MAX_BACKOFF);
            }
        }
    }
}
