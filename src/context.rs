//! Per-call request context.
//!
//! Every client operation takes a [`RequestContext`]. It carries the request id
//! used in log lines, a cancellation token the caller can trip from another
//! task, and an optional deadline bounding each round trip.

use std::time::Duration;
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

/// Request context for Grist operations.
#[derive(Debug, Clone)]
pub struct RequestContext {
    /// Unique identifier for this request, used for log correlation
    pub request_id: String,
    /// Tripping this token aborts the in-flight round trip
    pub cancellation: CancellationToken,
    /// Upper bound on each network round trip issued under this context
    pub deadline: Option<Duration>,
}

impl RequestContext {
    /// Create a new request context with a specific request ID.
    pub fn new(request_id: impl Into<String>) -> Self {
        Self {
            request_id: request_id.into(),
            cancellation: CancellationToken::new(),
            deadline: None,
        }
    }

    /// Create a new request context with a generated request ID.
    pub fn with_generated_id() -> Self {
        Self::new(Uuid::new_v4().to_string())
    }

    /// Bound every round trip issued under this context.
    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Share an existing cancellation token, e.g. one owned by a UI action.
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = token;
        self
    }

    /// Cancel all work issued under this context.
    pub fn cancel(&self) {
        self.cancellation.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancellation.is_cancelled()
    }
}

impl Default for RequestContext {
    fn default() -> Self {
        Self::with_generated_id()
    }
}
