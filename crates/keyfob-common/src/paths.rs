use std::path::PathBuf;

/// Root data directory for keyfob.
///
/// Holds the key material, the persisted seed, and the code log. The
/// `KEYFOB_DATA_DIR` environment variable overrides the platform default
/// (tests and containers point it at a scratch directory).
///
/// - Linux: `~/.keyfob/`
/// - macOS: `~/Library/Application Support/keyfob/`
/// - Windows: `%LOCALAPPDATA%\keyfob\`
pub fn data_dir() -> PathBuf {
    if let Some(dir) = std::env::var_os("KEYFOB_DATA_DIR") {
        return PathBuf::from(dir);
    }

    #[cfg(target_os = "macos")]
    {
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home)
                .join("Library")
                .join("Application Support")
                .join("keyfob");
        }
    }

    #[cfg(windows)]
    {
        if let Some(local) = std::env::var_os("LOCALAPPDATA") {
            return PathBuf::from(local).join("keyfob");
        }
    }

    #[cfg(not(any(target_os = "macos", windows)))]
    {
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home).join(".keyfob");
        }
    }

    // Fallback
    PathBuf::from(".keyfob")
}

/// Key material directory.
pub fn keys_dir() -> PathBuf {
    data_dir().join("keys")
}

/// Runtime state directory.
pub fn state_dir() -> PathBuf {
    data_dir().join("state")
}

/// Log directory.
pub fn log_dir() -> PathBuf {
    data_dir().join("logs")
}

/// Default path of the service's RSA private key (PKCS#8 PEM).
pub fn default_private_key_path() -> PathBuf {
    keys_dir().join("service_private.pem")
}

/// Default path of the counterpart party's RSA public key (SPKI PEM).
pub fn default_peer_public_key_path() -> PathBuf {
    keys_dir().join("peer_public.pem")
}

/// Default path of the persisted hex seed.
pub fn default_seed_path() -> PathBuf {
    state_dir().join("seed.txt")
}

/// Default path of the scheduled logger's output file.
pub fn default_code_log_path() -> PathBuf {
    log_dir().join("2fa-codes.log")
}
