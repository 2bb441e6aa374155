//! Keyfob Core — the 2FA seed service domain.
//!
//! Owns the seed store, the HTTP routes, and the scheduled-logger
//! operation. The binary crate mounts `KeyfobCore::routes()` and wires
//! the scheduled logger binary to `cronlog`.

pub mod cronlog;
pub mod error;
pub mod http;
pub mod protocol;
pub mod seed;

use std::path::Path;
use std::sync::Arc;

use axum::Router;

use keyfob_crypto::keys::KeyStore;
use keyfob_crypto::totp;

pub use error::ServiceError;
use seed::{Seed, SeedStore};

/// Internal shared state for the facade and HTTP handlers.
/// Not exposed outside this crate — all access goes through KeyfobCore
/// methods or the routes.
pub(crate) struct ServiceState {
    pub(crate) keys: KeyStore,
    pub(crate) seed: SeedStore,
}

impl ServiceState {
    /// Decrypt an encrypted seed and make it the active, persisted seed.
    ///
    /// Every failure mode — base64, RSA, seed validation, disk — collapses
    /// to `DecryptionFailed` on the wire; the detail goes to the log only.
    pub(crate) async fn decrypt_and_store(&self, encrypted_b64: &str) -> Result<(), ServiceError> {
        let hex_seed = self.keys.decrypt_seed(encrypted_b64).map_err(|e| {
            tracing::warn!(error = %e, "Seed decryption failed");
            ServiceError::DecryptionFailed
        })?;

        self.seed.set(Seed::new(hex_seed)).await.map_err(|e| {
            tracing::error!(error = %e, "Seed persistence failed");
            ServiceError::DecryptionFailed
        })?;

        tracing::info!("Seed decrypted and persisted");
        Ok(())
    }

    /// Generate the current code and its remaining validity.
    pub(crate) async fn generate(&self) -> Result<(String, u64), ServiceError> {
        let seed = self.seed.get().await.ok_or(ServiceError::SeedNotSet)?;

        let now = totp::unix_now();
        let code = totp::generate_code(seed.as_hex(), now).map_err(|e| {
            tracing::warn!(error = %e, "Persisted seed did not yield a code");
            ServiceError::SeedNotSet
        })?;

        Ok((code, totp::remaining_validity(now)))
    }

    /// Verify a submitted code against the active seed, ±1 time step.
    pub(crate) async fn verify(&self, code: Option<&str>) -> Result<bool, ServiceError> {
        let code = match code {
            Some(c) if !c.is_empty() => c,
            _ => return Err(ServiceError::MissingCode),
        };

        let seed = self.seed.get().await.ok_or(ServiceError::SeedNotSet)?;
        Ok(totp::verify_code(seed.as_hex(), code, totp::unix_now()))
    }
}

/// KeyfobCore — the domain facade.
///
/// Wraps the shared state and exposes the HTTP routes to the binary crate.
pub struct KeyfobCore {
    state: Arc<ServiceState>,
}

impl KeyfobCore {
    pub fn new(keys: KeyStore, seed: SeedStore) -> Self {
        Self {
            state: Arc::new(ServiceState { keys, seed }),
        }
    }

    /// Build the HTTP router. The binary crate mounts this at `/`.
    pub fn routes(&self) -> Router {
        http::routes(Arc::clone(&self.state))
    }

    /// Whether a private key was loaded (startup diagnostics).
    pub fn has_private_key(&self) -> bool {
        self.state.keys.has_private_key()
    }

    /// Path of the seed backing file (startup diagnostics).
    pub fn seed_path(&self) -> &Path {
        self.state.seed.path()
    }
}
