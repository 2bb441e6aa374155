use std::path::PathBuf;

use clap::Parser;

use keyfob_common::paths;

/// Sealed-seed 2FA microservice.
#[derive(Parser, Debug)]
#[command(name = "keyfob", version)]
pub struct Cli {
    /// Port for the HTTP listener.
    #[arg(long, default_value_t = 8080)]
    pub port: u16,

    /// Path to the service RSA private key (PKCS#8 PEM).
    #[arg(long)]
    pub private_key: Option<PathBuf>,

    /// Path to the counterpart party's RSA public key (SPKI PEM).
    #[arg(long)]
    pub peer_public_key: Option<PathBuf>,

    /// Path of the persisted seed file.
    #[arg(long)]
    pub seed_file: Option<PathBuf>,

    /// Log level: trace, debug, info, warn, error.
    #[arg(long, default_value = "info")]
    pub log_level: String,

    /// Increase verbosity (-v = debug, -vv = trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Also write logs to this file.
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    pub fn private_key_path(&self) -> PathBuf {
        self.private_key
            .clone()
            .unwrap_or_else(paths::default_private_key_path)
    }

    pub fn peer_public_key_path(&self) -> PathBuf {
        self.peer_public_key
            .clone()
            .unwrap_or_else(paths::default_peer_public_key_path)
    }

    pub fn seed_file_path(&self) -> PathBuf {
        self.seed_file.clone().unwrap_or_else(paths::default_seed_path)
    }
}
