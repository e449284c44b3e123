//! Task-local trace id for the request currently being served.
//!
//! `TraceSpan` scopes every request future with the id generated by
//! `RequestTrace`; error responses and log lines read it back from here.

use std::cell::RefCell;

use tokio::task_local;

task_local! {
    static TRACE_ID: RefCell<Option<String>>;
}

/// Trace id of the current task, or "unknown" outside a request scope.
pub fn trace_id() -> String {
    current().unwrap_or_else(|| "unknown".to_string())
}

/// Trace id of the current task, if one is in scope.
pub fn current() -> Option<String> {
    TRACE_ID
        .try_with(|cell| cell.borrow().clone())
        .ok()
        .flatten()
}

/// Run a future with `trace_id` installed as the task-local trace id.
pub async fn with_trace_id<F, R>(trace_id: String, future: F) -> R
where
    F: std::future::Future<Output = R>,
{
    TRACE_ID.scope(RefCell::new(Some(trace_id)), future).await
}
