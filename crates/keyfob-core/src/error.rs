//! Service domain error types.
//!
//! `Display` strings are the exact wire messages — handlers send them
//! verbatim in the JSON error body.

use keyfob_common::error::ErrorCode;

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum ServiceError {
    #[error("Decryption failed")]
    DecryptionFailed,

    #[error("Seed not decrypted yet")]
    SeedNotSet,

    #[error("Missing code")]
    MissingCode,
}

impl From<&ServiceError> for ErrorCode {
    fn from(e: &ServiceError) -> Self {
        match e {
            ServiceError::DecryptionFailed => ErrorCode::DecryptionFailed,
            ServiceError::SeedNotSet => ErrorCode::SeedNotSet,
            ServiceError::MissingCode => ErrorCode::MissingCode,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_matches_wire_messages() {
        assert_eq!(ServiceError::DecryptionFailed.to_string(), "Decryption failed");
        assert_eq!(ServiceError::SeedNotSet.to_string(), "Seed not decrypted yet");
        assert_eq!(ServiceError::MissingCode.to_string(), "Missing code");
    }

    #[test]
    fn error_code_mapping() {
        assert_eq!(
            ErrorCode::from(&ServiceError::MissingCode).http_status(),
            400
        );
        assert_eq!(ErrorCode::from(&ServiceError::SeedNotSet).http_status(), 500);
        assert_eq!(
            ErrorCode::from(&ServiceError::DecryptionFailed).http_status(),
            500
        );
    }
}
