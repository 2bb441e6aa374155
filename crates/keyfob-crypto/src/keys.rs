//! RSA key loading and asymmetric operations.
//!
//! The service key is a PKCS#8 PEM private key; the counterpart party's
//! public key is SPKI PEM. Seed ciphertexts are RSA-OAEP with SHA-256 for
//! both the digest and the mask generation function; signatures are
//! RSA-PSS with SHA-256 and maximum salt length.

use std::path::Path;

use base64::engine::general_purpose::STANDARD as B64;
use base64::Engine as _;
use rand::rngs::OsRng;
use rsa::pkcs8::{DecodePrivateKey, DecodePublicKey};
use rsa::traits::PublicKeyParts;
use rsa::{Oaep, Pss, RsaPrivateKey, RsaPublicKey};
use sha2::{Digest, Sha256};

/// Expected length of the decrypted seed: 32 bytes as lowercase/uppercase hex text.
const SEED_HEX_LEN: usize = 64;

/// Loaded key material. Read-only after startup.
///
/// Either slot may be empty — a missing key file downgrades the
/// operations that need it to errors instead of failing boot.
pub struct KeyStore {
    private: Option<RsaPrivateKey>,
    peer_public: Option<RsaPublicKey>,
}

impl KeyStore {
    /// Load keys from PEM files, best-effort. A missing or malformed file
    /// logs a warning and leaves the slot empty.
    pub fn load(private_path: &Path, peer_public_path: &Path) -> Self {
        let private = match load_private_key_pem(private_path) {
            Ok(key) => Some(key),
            Err(e) => {
                tracing::warn!(
                    path = %private_path.display(),
                    error = %e,
                    "Could not load private key; decrypt requests will fail"
                );
                None
            }
        };

        let peer_public = match load_public_key_pem(peer_public_path) {
            Ok(key) => Some(key),
            Err(e) => {
                tracing::debug!(
                    path = %peer_public_path.display(),
                    error = %e,
                    "No peer public key loaded"
                );
                None
            }
        };

        Self {
            private,
            peer_public,
        }
    }

    /// Build a KeyStore from already-parsed keys.
    pub fn from_parts(private: Option<RsaPrivateKey>, peer_public: Option<RsaPublicKey>) -> Self {
        Self {
            private,
            peer_public,
        }
    }

    pub fn has_private_key(&self) -> bool {
        self.private.is_some()
    }

    /// Decrypt a base64-encoded seed ciphertext and validate the plaintext.
    ///
    /// The plaintext must be a 64-character hex string (UTF-8 text, not raw
    /// bytes) — that is what the counterpart party encrypts.
    pub fn decrypt_seed(&self, encrypted_b64: &str) -> Result<String, CryptoError> {
        let key = self.private.as_ref().ok_or(CryptoError::KeyUnavailable)?;

        let ciphertext = B64
            .decode(encrypted_b64.trim())
            .map_err(|e| CryptoError::Decryption(format!("base64: {e}")))?;

        let plaintext = key
            .decrypt(Oaep::new::<Sha256>(), &ciphertext)
            .map_err(|e| CryptoError::Decryption(e.to_string()))?;

        let hex_seed = String::from_utf8(plaintext)
            .map_err(|_| CryptoError::InvalidSeed("plaintext is not UTF-8".into()))?;

        if hex_seed.len() != SEED_HEX_LEN {
            return Err(CryptoError::InvalidSeed(format!(
                "expected {SEED_HEX_LEN} hex characters, got {}",
                hex_seed.len()
            )));
        }
        if !hex_seed.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(CryptoError::InvalidSeed(
                "seed contains non-hexadecimal characters".into(),
            ));
        }

        Ok(hex_seed)
    }

    /// Sign a message with RSA-PSS, SHA-256, maximum salt length.
    pub fn sign(&self, message: &[u8]) -> Result<Vec<u8>, CryptoError> {
        let key = self.private.as_ref().ok_or(CryptoError::KeyUnavailable)?;

        let digest = Sha256::digest(message);
        key.sign_with_rng(&mut OsRng, max_salt_pss(key.size()), &digest)
            .map_err(|e| CryptoError::Signing(e.to_string()))
    }

    /// Verify an RSA-PSS signature against the public half of the service
    /// key. Returns `false` on any malformed input.
    pub fn verify(&self, message: &[u8], signature: &[u8]) -> bool {
        let Some(key) = self.private.as_ref() else {
            return false;
        };

        let public = RsaPublicKey::from(key);
        let digest = Sha256::digest(message);
        public
            .verify(max_salt_pss(key.size()), &digest, signature)
            .is_ok()
    }

    /// Encrypt data under the counterpart party's public key (RSA-OAEP,
    /// SHA-256).
    pub fn encrypt_for_peer(&self, data: &[u8]) -> Result<Vec<u8>, CryptoError> {
        let key = self
            .peer_public
            .as_ref()
            .ok_or(CryptoError::KeyUnavailable)?;

        key.encrypt(&mut OsRng, Oaep::new::<Sha256>(), data)
            .map_err(|e| CryptoError::Encryption(e.to_string()))
    }
}

/// PSS padding with the maximum salt length the modulus allows
/// (modulus bytes − 2 − digest bytes).
fn max_salt_pss(modulus_len: usize) -> Pss {
    let salt_len = modulus_len - 2 - Sha256::output_size();
    Pss::new_with_salt::<Sha256>(salt_len)
}

/// Load a PKCS#8 PEM private key from a file.
pub fn load_private_key_pem(path: &Path) -> Result<RsaPrivateKey, CryptoError> {
    let pem = std::fs::read_to_string(path)?;
    RsaPrivateKey::from_pkcs8_pem(&pem).map_err(|e| CryptoError::KeyEncoding(e.to_string()))
}

/// Load an SPKI PEM public key from a file.
pub fn load_public_key_pem(path: &Path) -> Result<RsaPublicKey, CryptoError> {
    let pem = std::fs::read_to_string(path)?;
    RsaPublicKey::from_public_key_pem(&pem).map_err(|e| CryptoError::KeyEncoding(e.to_string()))
}

#[derive(Debug, thiserror::Error)]
pub enum CryptoError {
    #[error("key not loaded")]
    KeyUnavailable,
    #[error("key encoding: {0}")]
    KeyEncoding(String),
    #[error("encryption: {0}")]
    Encryption(String),
    #[error("decryption: {0}")]
    Decryption(String),
    #[error("signing: {0}")]
    Signing(String),
    #[error("invalid seed: {0}")]
    InvalidSeed(String),
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}
