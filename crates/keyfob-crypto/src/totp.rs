//! TOTP generation and verification.
//!
//! RFC 6238 TOTP with SHA-1 (industry standard for authenticator apps),
//! 6-digit codes, 30-second time steps. Verification allows ±1 step and
//! uses constant-time comparison via the `subtle` crate.
//!
//! The seed arrives as hex text (the decrypted plaintext); it is decoded
//! to raw bytes before keying the HMAC.

use std::time::{SystemTime, UNIX_EPOCH};

use subtle::ConstantTimeEq;
use totp_rs::{Algorithm, TOTP};

/// Code length in digits.
const DIGITS: usize = 6;

/// Time step length in seconds.
pub const PERIOD: u64 = 30;

#[derive(Debug, thiserror::Error)]
pub enum TotpError {
    #[error("seed is not valid hex: {0}")]
    InvalidSeed(String),
    #[error("totp setup: {0}")]
    Secret(String),
}

/// Current unix time in seconds.
pub fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}

/// Generate the 6-digit code for the time step containing `at_time`.
///
/// Deterministic: identical seed and time step produce identical codes.
pub fn generate_code(hex_seed: &str, at_time: u64) -> Result<String, TotpError> {
    let totp = build_totp(hex_seed)?;
    Ok(totp.generate(at_time))
}

/// Seconds until the current code rolls over: `30 − (at_time mod 30)`,
/// always in [1, 30].
pub fn remaining_validity(at_time: u64) -> u64 {
    PERIOD - (at_time % PERIOD)
}

/// Verify a submitted code against the seed with ±1 time step tolerance.
///
/// Exact digit-string match, compared in constant time. Returns `false`
/// for an undecodable seed rather than erroring — a bad seed can never
/// validate a code.
pub fn verify_code(hex_seed: &str, submitted: &str, at_time: u64) -> bool {
    let Ok(totp) = build_totp(hex_seed) else {
        return false;
    };

    for offset in [0i64, -1, 1] {
        let time = at_time as i64 + offset * PERIOD as i64;
        if time < 0 {
            continue;
        }
        let expected = totp.generate(time as u64);
        let submitted_bytes = submitted.as_bytes();
        let expected_bytes = expected.as_bytes();

        if submitted_bytes.len() == expected_bytes.len()
            && submitted_bytes.ct_eq(expected_bytes).into()
        {
            return true;
        }
    }
    false
}

/// Build a totp-rs TOTP instance keyed by the decoded seed bytes.
fn build_totp(hex_seed: &str) -> Result<TOTP, TotpError> {
    let secret =
        hex::decode(hex_seed.trim()).map_err(|e| TotpError::InvalidSeed(e.to_string()))?;

    TOTP::new(Algorithm::SHA1, DIGITS, 1, PERIOD, secret)
        .map_err(|e| TotpError::Secret(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SEED: &str = "0123456789abcdef0123456789abcdef0123456789abcdef0123456789abcdef";

    /// RFC 6238 appendix B secret: ASCII "12345678901234567890" as hex.
    const RFC_SEED: &str = "3132333435363738393031323334353637383930";

    #[test]
    fn rfc6238_sha1_vectors() {
        // 6-digit truncations of the appendix B reference values.
        assert_eq!(generate_code(RFC_SEED, 59).unwrap(), "287082");
        assert_eq!(generate_code(RFC_SEED, 1111111109).unwrap(), "081804");
        assert_eq!(generate_code(RFC_SEED, 1111111111).unwrap(), "050471");
        assert_eq!(generate_code(RFC_SEED, 1234567890).unwrap(), "005924");
        assert_eq!(generate_code(RFC_SEED, 2000000000).unwrap(), "279037");
    }

    #[test]
    fn code_is_deterministic_within_a_step() {
        let a = generate_code(SEED, 1_000_000_000).unwrap();
        let b = generate_code(SEED, 1_000_000_014).unwrap(); // same step
        assert_eq!(a, b);
        assert_eq!(a.len(), 6);
        assert!(a.chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn verify_accepts_current_code() {
        let t = 1_000_000_005;
        let code = generate_code(SEED, t).unwrap();
        assert!(verify_code(SEED, &code, t));
    }

    #[test]
    fn verify_accepts_adjacent_steps() {
        let t = 1_000_000_005;
        let previous = generate_code(SEED, t - 30).unwrap();
        let next = generate_code(SEED, t + 30).unwrap();
        assert!(verify_code(SEED, &previous, t));
        assert!(verify_code(SEED, &next, t));
    }

    #[test]
    fn verify_rejects_outside_window() {
        let t = 1_000_000_005;
        let stale = generate_code(SEED, t - 61).unwrap();
        let future = generate_code(SEED, t + 61).unwrap();
        assert!(!verify_code(SEED, &stale, t));
        assert!(!verify_code(SEED, &future, t));
    }

    #[test]
    fn verify_rejects_wrong_code() {
        assert!(!verify_code(SEED, "000000", 1_000_000_005));
    }

    #[test]
    fn verify_rejects_wrong_length() {
        let t = 1_000_000_005;
        let code = generate_code(SEED, t).unwrap();
        assert!(!verify_code(SEED, &code[..5], t));
    }

    #[test]
    fn verify_with_undecodable_seed_is_false() {
        assert!(!verify_code("not hex", "123456", 1_000_000_005));
    }

    #[test]
    fn generate_with_undecodable_seed_errors() {
        assert!(matches!(
            generate_code("xyz", 0),
            Err(TotpError::InvalidSeed(_))
        ));
    }

    #[test]
    fn too_short_secret_errors() {
        // 4 bytes is below the RFC 4226 minimum of 128 bits.
        assert!(matches!(
            generate_code("deadbeef", 0),
            Err(TotpError::Secret(_))
        ));
    }

    #[test]
    fn remaining_validity_stays_in_range() {
        for t in 0..120 {
            let remaining = remaining_validity(t);
            assert!((1..=30).contains(&remaining), "t={t} gave {remaining}");
        }
    }

    #[test]
    fn remaining_validity_decreases_then_wraps() {
        assert_eq!(remaining_validity(30), 30);
        assert_eq!(remaining_validity(31), 29);
        assert_eq!(remaining_validity(59), 1);
        assert_eq!(remaining_validity(60), 30);
    }
}
