//! Best score bridge
//!
//! One ratcheting best score per game. The in-memory value is authoritative
//! for the running session; storage failures are logged and never reach
//! gameplay.

use serde::Serialize;

use crate::persistence::ScoreStore;
use crate::sim::GameId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BestScore {
    pub game: GameId,
    best: u64,
}

impl BestScore {
    /// Start with no best score (0)
    pub fn new(game: GameId) -> Self {
        Self { game, best: 0 }
    }

    /// Read the stored best, defaulting to 0 when absent or unreadable
    pub fn load(game: GameId, store: &dyn ScoreStore) -> Self {
        let best = match store.get(game) {
            Ok(Some(best)) => {
                log::info!("Loaded {game} best score {best}");
                best
            }
            Ok(None) => {
                log::info!("No {game} best score found, starting fresh");
                0
            }
            Err(err) => {
                log::warn!("Could not load {game} best score: {err}");
                0
            }
        };
        Self { game, best }
    }

    pub fn get(&self) -> u64 {
        self.best
    }

    /// Check if a finished round's score beats the current best
    pub fn qualifies(&self, score: u64) -> bool {
        score > self.best
    }

    /// Offer a finalized score. Only a strictly higher score is kept and
    /// written; returns whether the best improved.
    pub fn offer(&mut self, score: u64, store: &mut dyn ScoreStore) -> bool {
        if !self.qualifies(score) {
            return false;
        }

        self.best = score;
        log::info!("New {} best score: {score}", self.game);
        if let Err(err) = store.put(self.game, score) {
            log::error!("Failed to persist {} best score {score}: {err}", self.game);
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::{MemoryStore, StoreError};

    struct BrokenStore;

    impl ScoreStore for BrokenStore {
        fn get(&self, _game: GameId) -> Result<Option<u64>, StoreError> {
            Err(StoreError::Unavailable("offline".to_string()))
        }

        fn put(&mut self, _game: GameId, _score: u64) -> Result<(), StoreError> {
            Err(StoreError::Unavailable("offline".to_string()))
        }
    }

    #[test]
    fn test_ratchet_keeps_higher() {
        let mut store = MemoryStore::new();
        let mut best = BestScore::load(GameId::Snake, &store);
        assert_eq!(best.get(), 0);

        assert!(best.offer(5, &mut store));
        assert!(!best.offer(3, &mut store));
        assert_eq!(best.get(), 5);
        assert_eq!(store.get(GameId::Snake).ok().flatten(), Some(5));

        assert!(best.offer(9, &mut store));
        assert_eq!(best.get(), 9);
        assert_eq!(store.get(GameId::Snake).ok().flatten(), Some(9));
    }

    #[test]
    fn test_equal_score_is_not_written() {
        let mut store = MemoryStore::new().with_score(GameId::Bounce, 50);
        let mut best = BestScore::load(GameId::Bounce, &store);
        assert_eq!(best.get(), 50);
        assert!(!best.offer(50, &mut store));
        assert!(!best.qualifies(0));
    }

    #[test]
    fn test_games_are_independent() {
        let mut store = MemoryStore::new();
        let mut snake = BestScore::load(GameId::Snake, &store);
        snake.offer(70, &mut store);
        let puzzle = BestScore::load(GameId::Puzzle, &store);
        assert_eq!(puzzle.get(), 0);
    }

    #[test]
    fn test_broken_store_degrades_to_memory() {
        let mut store = BrokenStore;
        let mut best = BestScore::load(GameId::Shooter, &store);
        assert_eq!(best.get(), 0);
        assert!(best.offer(400, &mut store));
        assert_eq!(best.get(), 400);
        assert!(!best.offer(300, &mut store));
    }
}
