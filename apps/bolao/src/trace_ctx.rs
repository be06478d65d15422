//! Task-local trace id for inbound updates.
//!
//! Every Telegram update (polled or delivered by webhook) is handled inside a
//! [`with_trace_id`] scope so DB error logs and problem+json bodies can be
//! correlated with the update that caused them.

use std::cell::RefCell;
use std::future::Future;

use tokio::task_local;

task_local! {
    static TRACE_ID: RefCell<Option<String>>;
}

/// Trace id of the current task, or "unknown" outside of a scope.
pub fn trace_id() -> String {
    TRACE_ID
        .try_with(|cell| cell.borrow().clone())
        .ok()
        .flatten()
        .unwrap_or_else(|| "unknown".to_string())
}

/// Fresh trace id for a Telegram update, prefixed with the update id.
pub fn for_update(update_id: i64) -> String {
    format!("upd-{update_id}-{}", uuid::Uuid::new_v4().simple())
}

pub async fn with_trace_id<F, R>(trace_id: String, future: F) -> R
where
    F: Future<Output = R>,
{
    TRACE_ID.scope(RefCell::new(Some(trace_id)), future).await
}
