//! Browser LocalStorage store (wasm32 only)
//!
//! Values are decimal strings under `best_score_<game>`.

use super::{ScoreStore, StoreError, parse_stored_score};
use crate::sim::GameId;

#[derive(Debug, Clone, Default)]
pub struct LocalStorageStore;

impl LocalStorageStore {
    pub fn new() -> Self {
        Self
    }

    fn storage() -> Result<web_sys::Storage, StoreError> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
            .ok_or_else(|| StoreError::Unavailable("no LocalStorage".to_string()))
    }
}

impl ScoreStore for LocalStorageStore {
    fn get(&self, game: GameId) -> Result<Option<u64>, StoreError> {
        let storage = Self::storage()?;
        let value = storage
            .get_item(&game.storage_key())
            .map_err(|_| StoreError::Unavailable("LocalStorage read refused".to_string()))?;
        Ok(value.as_deref().and_then(parse_stored_score))
    }

    fn put(&mut self, game: GameId, score: u64) -> Result<(), StoreError> {
        let storage = Self::storage()?;
        storage
            .set_item(&game.storage_key(), &score.to_string())
            .map_err(|_| StoreError::Unavailable("LocalStorage write refused".to_string()))?;
        log::info!("Saved {game} best score {score}");
        Ok(())
    }
}
