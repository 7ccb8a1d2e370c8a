//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed-period ticks only
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)
//! - No rendering, platform or storage dependencies (the cabinet bridges those)

pub mod bounce;
pub mod cabinet;
pub mod collision;
pub mod puzzle;
pub mod shooter;
pub mod snake;

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

pub use bounce::BounceGame;
pub use cabinet::{Cabinet, Input};
pub use collision::{Rect, overlaps};
pub use puzzle::PuzzleGame;
pub use shooter::ShooterGame;
pub use snake::SnakeGame;

/// Identifies one of the four games (and its best-score slot)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameId {
    Snake,
    Shooter,
    Bounce,
    Puzzle,
}

impl GameId {
    pub const ALL: [GameId; 4] = [
        GameId::Snake,
        GameId::Shooter,
        GameId::Bounce,
        GameId::Puzzle,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            GameId::Snake => "snake",
            GameId::Shooter => "shooter",
            GameId::Bounce => "bounce",
            GameId::Puzzle => "puzzle",
        }
    }

    /// Key under which the best score is persisted
    pub fn storage_key(&self) -> String {
        format!("best_score_{}", self.as_str())
    }
}

impl fmt::Display for GameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GameId {
    type Err = ParseNameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "snake" => Ok(GameId::Snake),
            "shooter" => Ok(GameId::Shooter),
            "bounce" => Ok(GameId::Bounce),
            "puzzle" => Ok(GameId::Puzzle),
            _ => Err(ParseNameError::new("game", s)),
        }
    }
}

/// A game or command name that does not match anything known
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseNameError {
    pub kind: &'static str,
    pub name: String,
}

impl ParseNameError {
    pub(crate) fn new(kind: &'static str, name: &str) -> Self {
        Self {
            kind,
            name: name.to_string(),
        }
    }
}

impl fmt::Display for ParseNameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown {}: {:?}", self.kind, self.name)
    }
}

impl std::error::Error for ParseNameError {}

/// How a round finished
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Won,
    Lost,
}

/// Lifecycle of a game instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Fresh or reset, waiting for start
    #[default]
    Idle,
    /// Ticks and commands are live
    Playing,
    /// Stopped mid-round by the start/pause toggle
    Paused,
    /// Round finished; only reset leaves this phase
    Ended(Outcome),
}

impl GamePhase {
    pub fn is_playing(&self) -> bool {
        matches!(self, GamePhase::Playing)
    }

    pub fn is_ended(&self) -> bool {
        matches!(self, GamePhase::Ended(_))
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GamePhase::Idle => "idle",
            GamePhase::Playing => "playing",
            GamePhase::Paused => "paused",
            GamePhase::Ended(Outcome::Won) => "won",
            GamePhase::Ended(Outcome::Lost) => "lost",
        }
    }

    /// Phase after the start/pause toggle. `None` means the game must be reset.
    pub fn toggled(self) -> Option<GamePhase> {
        match self {
            GamePhase::Idle | GamePhase::Paused => Some(GamePhase::Playing),
            GamePhase::Playing => Some(GamePhase::Paused),
            GamePhase::Ended(_) => None,
        }
    }
}

/// Independent periodic events a game can schedule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimerKind {
    /// Main simulation step
    Step,
    /// Shooter enemy spawner
    SpawnEnemy,
    /// Puzzle automatic descent
    Gravity,
}

/// A fixed-period timer declaration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timer {
    pub kind: TimerKind,
    pub period: Duration,
}

impl Timer {
    pub const fn every_ms(kind: TimerKind, millis: u64) -> Self {
        Self {
            kind,
            period: Duration::from_millis(millis),
        }
    }
}

/// A single game's state machine, driven by timers and discrete commands.
///
/// Timer events and commands are no-ops unless the game is `Playing`;
/// `toggle_play` and `reset` are valid in every phase.
pub trait Simulation {
    /// Game-specific player action, also parsed from its lowercase name
    type Command: Copy + fmt::Debug + FromStr<Err = ParseNameError>;

    const GAME: GameId;
    const TIMERS: &'static [Timer];

    fn phase(&self) -> GamePhase;

    /// Current (or finalized, once ended) score
    fn score(&self) -> u64;

    fn toggle_play(&mut self);

    /// Reinitialize everything to start values and return to `Idle`
    fn reset(&mut self);

    fn on_timer(&mut self, timer: TimerKind);

    fn command(&mut self, command: Self::Command);
}

/// Horizontal nudge for the shooter ship and the bounce paddle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Horizontal {
    Left,
    Right,
}

impl Horizontal {
    pub fn sign(&self) -> f32 {
        match self {
            Horizontal::Left => -1.0,
            Horizontal::Right => 1.0,
        }
    }
}

impl FromStr for Horizontal {
    type Err = ParseNameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "left" => Ok(Horizontal::Left),
            "right" => Ok(Horizontal::Right),
            _ => Err(ParseNameError::new("command", s)),
        }
    }
}

/// Log a lifecycle transition in a consistent format
pub(crate) fn log_transition(game: GameId, from: GamePhase, to: GamePhase, score: u64) {
    if from == to {
        return;
    }
    match to {
        GamePhase::Ended(outcome) => {
            log::info!("{game}: round ended ({outcome:?}) with score {score}")
        }
        _ => log::info!("{game}: {from:?} -> {to:?}"),
    }
}
