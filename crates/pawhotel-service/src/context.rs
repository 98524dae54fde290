//! Request context carrying the acting operator.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Context for the current operation.
///
/// Passed into service methods so that every write knows *who* is acting;
/// the operator name is attached to logs and domain events, and
/// `request_time` is the timestamp recorded on the rows the request writes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestContext {
    /// Operator name or login.
    pub operator: String,
    /// When the request was received.
    pub request_time: DateTime<Utc>,
}

impl RequestContext {
    /// Creates a new request context.
    pub fn new(operator: impl Into<String>) -> Self {
        Self {
            operator: operator.into(),
            request_time: Utc::now(),
        }
    }

    /// Context for unattended operations.
    pub fn system() -> Self {
        Self::new("system")
    }
}
