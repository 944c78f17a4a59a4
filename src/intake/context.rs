//! Per-request context.
//!
//! Tags every log line of one intake operation with a short correlation
//! id so interleaved requests can be told apart.

use uuid::Uuid;

use crate::logging::LogContext;

#[derive(Debug, Clone)]
pub struct RequestContext {
    pub request_id: String,
}

impl RequestContext {
    pub fn new() -> Self {
        Self {
            request_id: format!("req-{}", &Uuid::new_v4().to_string()[..8]),
        }
    }

    pub fn log_context(&self) -> LogContext {
        LogContext::new(&self.request_id)
    }
}

impl Default for RequestContext {
    fn default() -> Self {
        Self::new()
    }
}
