//! All four games behind one name-addressed surface
//!
//! Hosts that only speak strings (the browser bindings) pick a game by
//! `GameId` and send commands by their lowercase names. Each game keeps its
//! own cabinet, clock and best score; only the game being advanced runs.

use std::time::Duration;

use crate::persistence::ScoreStore;
use crate::settings::Settings;
use crate::sim::{
    BounceGame, Cabinet, GameId, GamePhase, Input, ParseNameError, PuzzleGame, ShooterGame,
    SnakeGame,
};

pub struct Arcade {
    snake: Cabinet<SnakeGame>,
    shooter: Cabinet<ShooterGame>,
    bounce: Cabinet<BounceGame>,
    puzzle: Cabinet<PuzzleGame>,
}

/// Run `$body` with `$cabinet` bound to the cabinet for `$game`
macro_rules! with_cabinet {
    ([$($arcade:tt)*], $game:expr, $cabinet:ident => $body:expr) => {
        match $game {
            GameId::Snake => {
                let $cabinet = $($arcade)*.snake;
                $body
            }
            GameId::Shooter => {
                let $cabinet = $($arcade)*.shooter;
                $body
            }
            GameId::Bounce => {
                let $cabinet = $($arcade)*.bounce;
                $body
            }
            GameId::Puzzle => {
                let $cabinet = $($arcade)*.puzzle;
                $body
            }
        }
    };
}

impl Arcade {
    /// Build every cabinet, opening one store per game
    pub fn new(
        settings: &Settings,
        mut open_store: impl FnMut(GameId) -> Box<dyn ScoreStore>,
    ) -> Self {
        let catch_up = settings.max_catch_up_ticks;
        Self {
            snake: Cabinet::with_catch_up(
                SnakeGame::new(settings.resolve_seed()),
                open_store(GameId::Snake),
                catch_up,
            ),
            shooter: Cabinet::with_catch_up(
                ShooterGame::new(settings.resolve_seed()),
                open_store(GameId::Shooter),
                catch_up,
            ),
            bounce: Cabinet::with_catch_up(BounceGame::new(), open_store(GameId::Bounce), catch_up),
            puzzle: Cabinet::with_catch_up(
                PuzzleGame::new(settings.resolve_seed()),
                open_store(GameId::Puzzle),
                catch_up,
            ),
        }
    }

    pub fn toggle_play(&mut self, game: GameId) {
        with_cabinet!([&mut self], game, cabinet => cabinet.handle(Input::TogglePlay))
    }

    pub fn reset(&mut self, game: GameId) {
        with_cabinet!([&mut self], game, cabinet => cabinet.handle(Input::Reset))
    }

    /// Send a command by name (`up`, `left`, `shoot`, `rotate`, `drop`, ...)
    pub fn command(&mut self, game: GameId, name: &str) -> Result<(), ParseNameError> {
        with_cabinet!([&mut self], game, cabinet => {
            cabinet.handle(Input::Command(name.parse()?));
            Ok(())
        })
    }

    pub fn advance(&mut self, game: GameId, elapsed: Duration) {
        with_cabinet!([&mut self], game, cabinet => cabinet.advance(elapsed))
    }

    pub fn phase(&self, game: GameId) -> GamePhase {
        with_cabinet!([&self], game, cabinet => cabinet.phase())
    }

    pub fn score(&self, game: GameId) -> u64 {
        with_cabinet!([&self], game, cabinet => cabinet.score())
    }

    pub fn best_score(&self, game: GameId) -> u64 {
        with_cabinet!([&self], game, cabinet => cabinet.best_score())
    }

    /// Render state of one game as JSON
    pub fn snapshot_json(&self, game: GameId) -> Result<String, serde_json::Error> {
        with_cabinet!([&self], game, cabinet => cabinet.snapshot_json())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStore;

    fn arcade() -> Arcade {
        let settings = Settings {
            seed: Some(4),
            ..Settings::default()
        };
        Arcade::new(&settings, |game| Box::new(MemoryStore::new().with_score(game, 5)))
    }

    #[test]
    fn test_stores_opened_per_game() {
        let arcade = arcade();
        for game in GameId::ALL {
            assert_eq!(arcade.best_score(game), 5);
            assert_eq!(arcade.phase(game), GamePhase::Idle);
        }
    }

    #[test]
    fn test_games_run_independently() {
        let mut arcade = arcade();
        arcade.toggle_play(GameId::Snake);
        assert_eq!(arcade.phase(GameId::Snake), GamePhase::Playing);
        assert_eq!(arcade.phase(GameId::Puzzle), GamePhase::Idle);

        arcade.command(GameId::Snake, "down").ok();
        arcade.advance(GameId::Snake, Duration::from_millis(300));
        let snapshot = arcade.snapshot_json(GameId::Snake).unwrap_or_default();
        assert!(snapshot.contains("\"direction\":\"Down\""));
        assert!(snapshot.contains("\"body\":[[10,12]]"));

        // Advancing an idle game does nothing
        arcade.advance(GameId::Bounce, Duration::from_secs(1));
        assert_eq!(arcade.phase(GameId::Bounce), GamePhase::Idle);
    }

    #[test]
    fn test_unknown_command_is_rejected() {
        let mut arcade = arcade();
        arcade.toggle_play(GameId::Shooter);
        let err = arcade.command(GameId::Shooter, "rotate").unwrap_err();
        assert_eq!(err.name, "rotate");
        assert!(arcade.command(GameId::Shooter, "shoot").is_ok());
        let snapshot = arcade.snapshot_json(GameId::Shooter).unwrap_or_default();
        assert!(snapshot.contains("\"bullets\":[{\"id\":0"));
    }

    #[test]
    fn test_puzzle_drop_and_reset() {
        let mut arcade = arcade();
        arcade.toggle_play(GameId::Puzzle);
        for _ in 0..3 {
            assert!(arcade.command(GameId::Puzzle, "drop").is_ok());
        }
        assert_eq!(arcade.phase(GameId::Puzzle), GamePhase::Playing);

        arcade.reset(GameId::Puzzle);
        assert_eq!(arcade.phase(GameId::Puzzle), GamePhase::Idle);
        assert_eq!(arcade.score(GameId::Puzzle), 0);
    }
}
