//! JSON file store
//!
//! The whole file is one object mapping storage keys to integers:
//! `{"best_score_snake": 120, "best_score_puzzle": 400}`. Writes go to a
//! sibling `.tmp` file which is then renamed over the previous file.

use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::{ScoreStore, StoreError};
use crate::sim::GameId;

#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<BTreeMap<String, u64>, StoreError> {
        match fs::read_to_string(&self.path) {
            Ok(json) => Ok(serde_json::from_str(&json)?),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(err) => Err(err.into()),
        }
    }

    fn write_all(&self, scores: &BTreeMap<String, u64>) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(scores)?;
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl ScoreStore for JsonFileStore {
    fn get(&self, game: GameId) -> Result<Option<u64>, StoreError> {
        Ok(self.read_all()?.get(&game.storage_key()).copied())
    }

    fn put(&mut self, game: GameId, score: u64) -> Result<(), StoreError> {
        // A corrupt file is replaced rather than blocking every future save
        let mut scores = self.read_all().unwrap_or_else(|err| {
            log::warn!("Discarding unreadable score file {}: {err}", self.path.display());
            BTreeMap::new()
        });
        scores.insert(game.storage_key(), score);
        self.write_all(&scores)?;
        log::info!("Saved {game} best score {score} to {}", self.path.display());
        Ok(())
    }
}
