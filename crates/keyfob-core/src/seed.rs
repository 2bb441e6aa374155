//! The seed store: one mutable secret, file-backed.
//!
//! Exactly one seed value at a time; absent until the first successful
//! decrypt. Persistence is atomic (temp file + rename) so a concurrent
//! reader — including the out-of-process scheduled logger — never sees a
//! torn value, and a failed write leaves the previously-persisted seed
//! intact.

use std::io;
use std::path::{Path, PathBuf};

use tokio::sync::Mutex;
use zeroize::Zeroize;

use keyfob_common::persist;

/// Decrypted seed material (hex text) with zeroize-on-drop.
#[derive(Clone)]
pub struct Seed(String);

impl Seed {
    pub fn new(hex: String) -> Self {
        Self(hex)
    }

    pub fn as_hex(&self) -> &str {
        &self.0
    }
}

impl Drop for Seed {
    fn drop(&mut self) {
        self.0.zeroize();
    }
}

/// Mutex-guarded in-memory seed with a file backing it across restarts.
pub struct SeedStore {
    path: PathBuf,
    current: Mutex<Option<Seed>>,
}

impl SeedStore {
    /// Open the store, loading the backing file if it exists. A corrupt or
    /// unreadable file leaves the seed absent rather than failing startup.
    pub fn open(path: PathBuf) -> Self {
        let current = match persist::read_trimmed_if_exists(&path) {
            Ok(Some(hex)) => {
                tracing::info!(path = %path.display(), "Persisted seed loaded");
                Some(Seed::new(hex))
            }
            Ok(None) => None,
            Err(e) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %e,
                    "Could not read persisted seed; starting without one"
                );
                None
            }
        };

        Self {
            path,
            current: Mutex::new(current),
        }
    }

    /// Store a new active seed: persist first, then swap the in-memory
    /// value. Both happen under one lock acquisition, so readers see
    /// either the old seed or the new one in full.
    pub async fn set(&self, seed: Seed) -> Result<(), io::Error> {
        let mut guard = self.current.lock().await;
        persist::write_text_atomic(&self.path, seed.as_hex())?;
        *guard = Some(seed);
        Ok(())
    }

    /// The current seed, or `None` if it was never set.
    pub async fn get(&self) -> Option<Seed> {
        self.current.lock().await.clone()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
