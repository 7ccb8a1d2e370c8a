use std::collections::HashMap;

use super::{ScoreStore, StoreError};
use crate::sim::GameId;

/// Volatile store; forgets everything when dropped
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    scores: HashMap<GameId, u64>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_score(mut self, game: GameId, score: u64) -> Self {
        self.scores.insert(game, score);
        self
    }
}

impl ScoreStore for MemoryStore {
    fn get(&self, game: GameId) -> Result<Option<u64>, StoreError> {
        Ok(self.scores.get(&game).copied())
    }

    fn put(&mut self, game: GameId, score: u64) -> Result<(), StoreError> {
        self.scores.insert(game, score);
        Ok(())
    }
}
