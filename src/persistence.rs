//! Key/value persistence for scores and settings
//!
//! The core hands a [`ScoreStore`] an opaque string per key and reads it
//! back later; what sits behind the store (browser storage, a file, a test
//! map) is the host's business. Store failures are logged and swallowed —
//! losing a leaderboard write never takes the game down.

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

/// Raw string load/save keyed by name.
pub trait ScoreStore {
    fn load(&self, key: &str) -> Option<String>;
    fn save(&mut self, key: &str, value: &str);
}

/// In-memory store. For tests and throwaway sessions.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl ScoreStore for MemoryStore {
    fn load(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn save(&mut self, key: &str, value: &str) {
        self.entries.insert(key.to_owned(), value.to_owned());
    }
}

/// One file per key under a base directory.
#[derive(Debug)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl ScoreStore for FileStore {
    fn load(&self, key: &str) -> Option<String> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(value) => Some(value),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => None,
            Err(err) => {
                log::warn!("failed to read {key}: {err}");
                None
            }
        }
    }

    fn save(&mut self, key: &str, value: &str) {
        if let Err(err) = fs::create_dir_all(&self.dir) {
            log::warn!("failed to create store dir: {err}");
            return;
        }
        if let Err(err) = fs::write(self.path_for(key), value) {
            log::warn!("failed to write {key}: {err}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_round_trip() {
        let mut store = MemoryStore::default();
        assert_eq!(store.load("scores"), None);
        store.save("scores", "[1,2,3]");
        assert_eq!(store.load("scores"), Some("[1,2,3]".to_owned()));
        store.save("scores", "[]");
        assert_eq!(store.load("scores"), Some("[]".to_owned()));
    }

    #[test]
    fn test_file_store_round_trip() {
        let dir = std::env::temp_dir().join(format!("swarm-strike-test-{}", std::process::id()));
        let mut store = FileStore::new(&dir);
        assert_eq!(store.load("scores"), None);
        store.save("scores", "{\"a\":1}");
        assert_eq!(store.load("scores"), Some("{\"a\":1}".to_owned()));
        let _ = fs::remove_dir_all(&dir);
    }
}
