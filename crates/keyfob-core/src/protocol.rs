//! Wire types for the HTTP surface.

use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct DecryptSeedRequest {
    /// Base64-encoded RSA-OAEP ciphertext of the hex seed.
    pub encrypted_seed: String,
}

/// `code` is optional at the serde level so an empty body `{}` still
/// parses — the handler turns its absence into the 400 "Missing code"
/// response instead of a framework rejection.
#[derive(Debug, Deserialize)]
pub struct VerifyCodeRequest {
    #[serde(default)]
    pub code: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct GenerateCodeResponse {
    pub code: String,
    /// Seconds until the code rolls over, in [1, 30].
    pub valid_for: u64,
}

#[derive(Debug, Serialize)]
pub struct VerifyCodeResponse {
    pub valid: bool,
}
