//! Retro Arcade headless runner
//!
//! Plays each game on autopilot against a simulated clock and records best
//! scores.

#[cfg(not(target_arch = "wasm32"))]
mod demo {
    use std::path::PathBuf;
    use std::time::Duration;

    use clap::Parser;
    use retro_arcade::persistence::JsonFileStore;
    use retro_arcade::sim::{
        BounceGame, Cabinet, GameId, GamePhase, Input, PuzzleGame, ShooterGame, SnakeGame,
    };
    use retro_arcade::{Autopilot, Settings};

    /// Simulated frame length
    const FRAME: Duration = Duration::from_millis(16);

    #[derive(Debug, Parser)]
    #[command(name = "retro-arcade")]
    #[command(about = "Play every arcade game on autopilot and record best scores")]
    pub struct Args {
        /// Settings file (JSON); missing fields take their defaults
        #[arg(default_value = "arcade.json")]
        pub settings: PathBuf,

        /// Fixed RNG seed, overriding the settings file
        #[arg(long)]
        pub seed: Option<u64>,

        /// Simulated seconds per game, overriding the settings file
        #[arg(long)]
        pub seconds: Option<u32>,
    }

    impl Args {
        /// Settings from the file with command line overrides applied
        pub fn resolve(&self) -> Settings {
            let mut settings = Settings::load_from(&self.settings);
            if let Some(seed) = self.seed {
                settings.seed = Some(seed);
            }
            if let Some(seconds) = self.seconds {
                settings.demo_seconds = seconds;
            }
            settings
        }
    }

    pub struct RoundSummary {
        pub game: GameId,
        pub phase: GamePhase,
        pub score: u64,
        pub best: u64,
    }

    /// Run one round until it ends or the demo time runs out
    fn play<S: Autopilot>(sim: S, settings: &Settings) -> RoundSummary {
        let store = JsonFileStore::new(&settings.scores_path);
        let mut cabinet = Cabinet::with_catch_up(sim, Box::new(store), settings.max_catch_up_ticks);
        cabinet.handle(Input::TogglePlay);

        let frames = u64::from(settings.demo_seconds) * 1000 / FRAME.as_millis() as u64;
        for _ in 0..frames {
            if let Some(command) = cabinet.state().autopilot() {
                cabinet.handle(Input::Command(command));
            }
            cabinet.advance(FRAME);
            if cabinet.phase().is_ended() {
                break;
            }
        }

        RoundSummary {
            game: S::GAME,
            phase: cabinet.phase(),
            score: cabinet.score(),
            best: cabinet.best_score(),
        }
    }

    pub fn run() {
        retro_arcade::init_logging();

        let args = Args::parse();
        let settings = args.resolve();
        log::info!(
            "Retro Arcade demo: {}s per game, scores in {}",
            settings.demo_seconds,
            settings.scores_path.display()
        );

        let summaries = [
            play(SnakeGame::new(settings.resolve_seed()), &settings),
            play(ShooterGame::new(settings.resolve_seed()), &settings),
            play(BounceGame::new(), &settings),
            play(PuzzleGame::new(settings.resolve_seed()), &settings),
        ];

        println!();
        println!("{:<8} {:<16} {:>8} {:>8}", "game", "result", "score", "best");
        for round in &summaries {
            let result = match round.phase {
                GamePhase::Ended(outcome) => format!("{outcome:?}"),
                phase => format!("{phase:?} (time up)"),
            };
            println!(
                "{:<8} {:<16} {:>8} {:>8}",
                round.game.as_str(),
                result,
                round.score,
                round.best
            );
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_args_defaults() {
            let args = Args::try_parse_from(["retro-arcade"]).unwrap();
            assert_eq!(args.settings, PathBuf::from("arcade.json"));
            assert_eq!(args.seed, None);
            assert_eq!(args.seconds, None);
        }

        #[test]
        fn test_args_override_settings() {
            let args = Args::try_parse_from([
                "retro-arcade",
                "does-not-exist.json",
                "--seed",
                "77",
                "--seconds",
                "3",
            ])
            .unwrap();
            let settings = args.resolve();
            assert_eq!(settings.seed, Some(77));
            assert_eq!(settings.demo_seconds, 3);
            assert_eq!(settings.scores_path, Settings::default().scores_path);
        }

        #[test]
        fn test_args_reject_bad_seed() {
            assert!(Args::try_parse_from(["retro-arcade", "--seed", "abc"]).is_err());
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    demo::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // Browser hosts load the library through `retro_arcade::web`
}
