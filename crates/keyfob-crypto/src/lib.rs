//! Keyfob Crypto — cryptographic utilities for the 2FA service.
//!
//! Provides RSA key loading with OAEP decryption and PSS signing, and
//! RFC 6238 TOTP code generation/verification.

pub mod keys;
pub mod totp;
