//! Scheduled 2FA code logger.
//!
//! Invoked out-of-band by cron (or an equivalent scheduler) once a
//! minute. Shares only the persisted seed file with the HTTP daemon.
//! Never raises to the scheduler: every failure is logged to stderr and
//! the process exits 0.

use std::path::PathBuf;

use clap::Parser;

use keyfob_common::paths;
use keyfob_core::cronlog;

/// Append the current 2FA code to the code log.
#[derive(Parser, Debug)]
#[command(name = "keyfob-logcode", version)]
struct Args {
    /// Path of the persisted seed file.
    #[arg(long)]
    seed_file: Option<PathBuf>,

    /// Path of the code log to append to.
    #[arg(long)]
    output: Option<PathBuf>,
}

fn main() {
    let args = Args::parse();

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let seed_path = args.seed_file.unwrap_or_else(paths::default_seed_path);
    let output = args.output.unwrap_or_else(paths::default_code_log_path);

    match cronlog::append_current_code(&seed_path, &output) {
        Ok(true) => tracing::debug!(path = %output.display(), "2FA code logged"),
        Ok(false) => tracing::debug!("No seed decrypted yet; nothing to log"),
        Err(e) => tracing::warn!(error = %e, "Could not log 2FA code"),
    }
}
