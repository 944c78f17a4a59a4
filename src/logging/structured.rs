//! Request-scoped log tags.
//!
//! Every operational message is prefixed with the correlation id of the
//! request that caused it, and with the protocol id once one has been
//! assigned, so a single complaint can be followed from submission to
//! durable append in interleaved logs.

use std::fmt;

/// Prefix tag for the log lines of one intake operation.
#[derive(Debug, Clone)]
pub struct LogContext {
    pub request_id: String,
    pub protocol: Option<String>,
}

impl LogContext {
    pub fn new(request_id: &str) -> Self {
        Self {
            request_id: request_id.to_string(),
            protocol: None,
        }
    }

    /// Tag with the protocol id assigned to this request's record.
    pub fn with_protocol(&self, protocol: &str) -> Self {
        Self {
            request_id: self.request_id.clone(),
            protocol: Some(protocol.to_string()),
        }
    }
}

impl fmt::Display for LogContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}", self.request_id)?;
        if let Some(proto) = &self.protocol {
            write!(f, " {}", proto)?;
        }
        write!(f, "]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_without_protocol() {
        let ctx = LogContext::new("req-a1b2c3d4");
        assert_eq!(ctx.to_string(), "[req-a1b2c3d4]");
    }

    #[test]
    fn test_tag_gains_protocol_once_assigned() {
        let ctx = LogContext::new("req-a1b2c3d4").with_protocol("PROTO-20240101120000");
        assert_eq!(ctx.to_string(), "[req-a1b2c3d4 PROTO-20240101120000]");
    }
}
