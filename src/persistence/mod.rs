//! Best-score storage backends
//!
//! Features:
//! - One integer slot per game, keyed by `GameId::storage_key()`
//! - In-memory store (tests, headless runs without a disk)
//! - JSON file store with atomic replace (tmp → save) on native
//! - LocalStorage store on wasm32

pub mod memory;

#[cfg(not(target_arch = "wasm32"))]
pub mod file;

#[cfg(target_arch = "wasm32")]
pub mod local_storage;

use std::fmt;

use crate::sim::GameId;

pub use memory::MemoryStore;

#[cfg(not(target_arch = "wasm32"))]
pub use file::JsonFileStore;

#[cfg(target_arch = "wasm32")]
pub use local_storage::LocalStorageStore;

#[derive(Debug)]
pub enum StoreError {
    Io(std::io::Error),
    Format(serde_json::Error),
    /// Backend missing or refused the operation
    Unavailable(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(err) => write!(f, "score store I/O failed: {err}"),
            Self::Format(err) => write!(f, "score store data is malformed: {err}"),
            Self::Unavailable(reason) => write!(f, "score store unavailable: {reason}"),
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Format(err) => Some(err),
            Self::Unavailable(_) => None,
        }
    }
}

impl From<std::io::Error> for StoreError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        Self::Format(err)
    }
}

/// Typed key-value store holding one best score per game
pub trait ScoreStore {
    /// Stored value, `None` when the game has no entry yet
    fn get(&self, game: GameId) -> Result<Option<u64>, StoreError>;

    fn put(&mut self, game: GameId, score: u64) -> Result<(), StoreError>;
}

/// Read a score kept as a decimal string. Anything else counts as absent.
#[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
pub(crate) fn parse_stored_score(value: &str) -> Option<u64> {
    value.trim().parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_stored_score() {
        assert_eq!(parse_stored_score("120"), Some(120));
        assert_eq!(parse_stored_score(" 7\n"), Some(7));
        assert_eq!(parse_stored_score(""), None);
        assert_eq!(parse_stored_score("-5"), None);
        assert_eq!(parse_stored_score("12.5"), None);
        assert_eq!(parse_stored_score("lots"), None);
    }

    #[test]
    fn test_error_messages() {
        let err = StoreError::Unavailable("no LocalStorage".to_string());
        assert_eq!(err.to_string(), "score store unavailable: no LocalStorage");
        assert!(std::error::Error::source(&err).is_none());

        let err: StoreError = std::io::Error::other("denied").into();
        assert!(matches!(err, StoreError::Io(_)));
        assert!(std::error::Error::source(&err).is_some());
    }
}
