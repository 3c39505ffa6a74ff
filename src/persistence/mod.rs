//! High score persistence
//!
//! Features:
//! - Versioned JSON envelope (`envelope`)
//! - LocalStorage on web, a plain file on native, memory for tests
//! - Failures never propagate: loads fall back to 0, saves are logged and dropped

pub mod envelope;

pub use envelope::HighScoreRecord;

/// Durable home of the single high score
pub trait HighScoreStore {
    /// Stored high score, 0 if absent or unreadable
    fn load(&mut self) -> u32;
    /// Fire-and-forget write
    fn save(&mut self, high_score: u32);
}

/// In-memory store
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    value: Option<u32>,
    /// Number of saves performed
    pub writes: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(high_score: u32) -> Self {
        Self {
            value: Some(high_score),
            writes: 0,
        }
    }
}

impl HighScoreStore for MemoryStore {
    fn load(&mut self) -> u32 {
        self.value.unwrap_or(0)
    }

    fn save(&mut self, high_score: u32) {
        self.value = Some(high_score);
        self.writes += 1;
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub use native::FileStore;

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::fs;
    use std::io;
    use std::path::PathBuf;

    use super::{HighScoreRecord, HighScoreStore};

    /// Envelope stored in a file
    #[derive(Debug, Clone)]
    pub struct FileStore {
        path: PathBuf,
    }

    impl FileStore {
        pub fn new(path: impl Into<PathBuf>) -> Self {
            Self { path: path.into() }
        }

        fn read(&self) -> io::Result<Option<u32>> {
            let json = match fs::read_to_string(&self.path) {
                Ok(json) => json,
                Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
                Err(e) => return Err(e),
            };
            Ok(HighScoreRecord::decode(&json).map(|r| r.high_score))
        }

        fn write(&self, high_score: u32) -> io::Result<()> {
            let json = HighScoreRecord::new(high_score).encode()?;
            if let Some(parent) = self.path.parent() {
                fs::create_dir_all(parent)?;
            }
            // Temp file + rename: readers see the old envelope or the new one
            let tmp = self.path.with_extension("tmp");
            fs::write(&tmp, json)?;
            fs::rename(&tmp, &self.path)
        }
    }

    impl HighScoreStore for FileStore {
        fn load(&mut self) -> u32 {
            match self.read() {
                Ok(Some(high_score)) => {
                    log::info!("Loaded high score {} from {}", high_score, self.path.display());
                    high_score
                }
                Ok(None) => {
                    log::info!("No high score found, starting fresh");
                    0
                }
                Err(e) => {
                    log::warn!("Failed to read {}: {}", self.path.display(), e);
                    0
                }
            }
        }

        fn save(&mut self, high_score: u32) {
            match self.write(high_score) {
                Ok(()) => log::info!("High score {} saved", high_score),
                Err(e) => log::warn!("Failed to save high score: {}", e),
            }
        }
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::LocalStorageStore;

#[cfg(target_arch = "wasm32")]
mod web {
    use super::{HighScoreRecord, HighScoreStore};

    /// Envelope stored under a LocalStorage key
    #[derive(Debug, Clone, Copy, Default)]
    pub struct LocalStorageStore;

    impl LocalStorageStore {
        const STORAGE_KEY: &'static str = "gapwing_high_score";

        fn storage() -> Option<web_sys::Storage> {
            web_sys::window()
                .and_then(|w| w.local_storage().ok())
                .flatten()
        }
    }

    impl HighScoreStore for LocalStorageStore {
        fn load(&mut self) -> u32 {
            if let Some(storage) = Self::storage() {
                if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                    if let Some(record) = HighScoreRecord::decode(&json) {
                        log::info!("Loaded high score {}", record.high_score);
                        return record.high_score;
                    }
                }
            }

            log::info!("No high score found, starting fresh");
            0
        }

        fn save(&mut self, high_score: u32) {
            let Some(storage) = Self::storage() else {
                log::warn!("LocalStorage unavailable, high score not saved");
                return;
            };

            match HighScoreRecord::new(high_score).encode() {
                Ok(json) => {
                    if storage.set_item(Self::STORAGE_KEY, &json).is_err() {
                        log::warn!("LocalStorage write failed");
                    } else {
                        log::info!("High score {} saved", high_score);
                    }
                }
                Err(e) => log::warn!("Failed to encode high score: {}", e),
            }
        }
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> std::path::PathBuf {
        std::env::temp_dir()
            .join(format!("gapwing-test-{}", std::process::id()))
            .join(name)
    }

    #[test]
    fn test_memory_store_defaults_to_zero() {
        let mut store = MemoryStore::new();
        assert_eq!(store.load(), 0);
        store.save(8);
        assert_eq!(store.load(), 8);
        assert_eq!(store.writes, 1);
    }

    #[test]
    fn test_file_store_round_trip() {
        let path = temp_path("round_trip.json");
        let mut store = FileStore::new(&path);
        store.save(23);
        assert_eq!(FileStore::new(&path).load(), 23);
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_file_store_missing_or_corrupt_is_zero() {
        assert_eq!(FileStore::new(temp_path("missing.json")).load(), 0);

        let path = temp_path("corrupt.json");
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "{ nope").unwrap();
        assert_eq!(FileStore::new(&path).load(), 0);
        let _ = std::fs::remove_file(&path);
    }
}
