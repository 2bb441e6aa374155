use serde::{Deserialize, Serialize};

/// Standard error body for API responses.
///
/// The contract fixes the wire shape to `{"error": "<message>"}` — the
/// machine-readable `ErrorCode` never leaves the process.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

pub fn error_body(message: impl Into<String>) -> ErrorBody {
    ErrorBody {
        error: message.into(),
    }
}
