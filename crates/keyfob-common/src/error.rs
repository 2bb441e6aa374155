use serde::{Deserialize, Serialize};

/// Machine-readable error codes for the HTTP surface.
///
/// The wire body carries only the human-readable message (the contract
/// fixes its exact shape); these codes drive the status mapping and keep
/// "not yet configured" distinct from "crypto failure" internally.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// Required `code` field absent or empty.
    MissingCode,
    /// No seed has been decrypted and persisted yet.
    SeedNotSet,
    /// Base64 decode, RSA-OAEP decrypt, seed validation, or persistence failed.
    DecryptionFailed,
}

impl ErrorCode {
    /// Suggested HTTP status code for this error.
    /// Transport-agnostic (returns u16, not an axum type).
    pub fn http_status(&self) -> u16 {
        match self {
            Self::MissingCode => 400,
            Self::SeedNotSet | Self::DecryptionFailed => 500,
        }
    }
}
