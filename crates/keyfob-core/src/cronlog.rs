//! Scheduled code logging.
//!
//! The logger runs as a separate process on a one-minute cadence (cron or
//! equivalent) and shares only the persisted seed file with the HTTP
//! service. It appends one line per run and skips silently when no seed
//! has been decrypted yet — it is an observability side channel, not a
//! critical path.

use std::io;
use std::path::Path;

use chrono::{DateTime, Utc};

use keyfob_common::persist;
use keyfob_crypto::totp;

/// Generate the current code from the persisted seed and append
/// `"<UTC timestamp> - 2FA Code: <code>"` to the output file.
///
/// Returns `Ok(true)` if a line was written, `Ok(false)` if the seed file
/// is absent (nothing to log).
pub fn append_current_code(seed_path: &Path, output_path: &Path) -> Result<bool, io::Error> {
    append_code_at(seed_path, output_path, Utc::now())
}

/// Same as [`append_current_code`] with an explicit timestamp (for testing).
pub fn append_code_at(
    seed_path: &Path,
    output_path: &Path,
    at: DateTime<Utc>,
) -> Result<bool, io::Error> {
    let Some(hex_seed) = persist::read_trimmed_if_exists(seed_path)? else {
        return Ok(false);
    };

    let unix = at.timestamp().max(0) as u64;
    let code = totp::generate_code(&hex_seed, unix)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

    let line = format!("{} - 2FA Code: {code}", at.format("%Y-%m-%d %H:%M:%S"));
    persist::append_line(output_path, &line)?;

    tracing::debug!(path = %output_path.display(), "2FA code logged");
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use std::time::{SystemTime, UNIX_EPOCH};

    const SEED: &str = "0123456789abcdef0123456789abcdef0123456789abcdef0123456789abcdef";

    fn temp_dir(name: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos();
        let dir = std::env::temp_dir().join(format!("keyfob-cronlog-{name}-{nanos}"));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn fixed_time() -> DateTime<Utc> {
        DateTime::from_timestamp(1_700_000_000, 0).unwrap()
    }

    #[test]
    fn absent_seed_skips_silently() {
        let dir = temp_dir("absent");
        let out = dir.join("codes.log");

        let wrote = append_code_at(&dir.join("seed.txt"), &out, fixed_time()).unwrap();
        assert!(!wrote);
        assert!(!out.exists());
    }

    #[test]
    fn present_seed_appends_formatted_line() {
        let dir = temp_dir("present");
        let seed_path = dir.join("seed.txt");
        let out = dir.join("codes.log");
        std::fs::write(&seed_path, SEED).unwrap();

        let wrote = append_code_at(&seed_path, &out, fixed_time()).unwrap();
        assert!(wrote);

        let expected_code = totp::generate_code(SEED, 1_700_000_000).unwrap();
        let content = std::fs::read_to_string(&out).unwrap();
        assert_eq!(
            content,
            format!("2023-11-14 22:13:20 - 2FA Code: {expected_code}\n")
        );
    }

    #[test]
    fn repeated_runs_accumulate_lines() {
        let dir = temp_dir("accumulate");
        let seed_path = dir.join("seed.txt");
        let out = dir.join("codes.log");
        std::fs::write(&seed_path, SEED).unwrap();

        append_code_at(&seed_path, &out, fixed_time()).unwrap();
        append_code_at(&seed_path, &out, fixed_time()).unwrap();

        let content = std::fs::read_to_string(&out).unwrap();
        assert_eq!(content.lines().count(), 2);
    }

    #[test]
    fn undecodable_seed_is_an_error() {
        let dir = temp_dir("badseed");
        let seed_path = dir.join("seed.txt");
        std::fs::write(&seed_path, "definitely not hex").unwrap();

        let result = append_code_at(&seed_path, &dir.join("codes.log"), fixed_time());
        assert_eq!(result.unwrap_err().kind(), io::ErrorKind::InvalidData);
    }
}
