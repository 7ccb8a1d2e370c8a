//! Falling-block puzzle
//!
//! Player moves and automatic descent share one path: every `Down` that
//! cannot be applied locks the piece, clears complete rows, scores them and
//! spawns the next piece.

pub mod board;
pub mod piece;

use std::str::FromStr;

use glam::IVec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

pub use board::{BOARD_HEIGHT, BOARD_WIDTH, Board, Cell, Row};
pub use piece::{Piece, PieceKind, Shape};

use super::{
    GameId, GamePhase, Outcome, ParseNameError, Simulation, Timer, TimerKind, log_transition,
};

/// Points per completed row (no combo multiplier)
pub const LINE_REWARD: u64 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PuzzleMove {
    Left,
    Right,
    Down,
    Rotate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PuzzleCommand {
    Move(PuzzleMove),
    /// Keep moving down until the piece locks
    HardDrop,
}

impl FromStr for PuzzleCommand {
    type Err = ParseNameError;

    /// `left`, `right`, `down`, `rotate` or `drop`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let command = match s.to_lowercase().as_str() {
            "left" => PuzzleCommand::Move(PuzzleMove::Left),
            "right" => PuzzleCommand::Move(PuzzleMove::Right),
            "down" => PuzzleCommand::Move(PuzzleMove::Down),
            "rotate" => PuzzleCommand::Move(PuzzleMove::Rotate),
            "drop" => PuzzleCommand::HardDrop,
            _ => return Err(ParseNameError::new("command", s)),
        };
        Ok(command)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PuzzleGame {
    pub board: Board,
    /// Falling piece; `None` before the first start and after the round ends
    pub current: Option<Piece>,
    pub score: u64,
    pub lines_cleared: u32,
    phase: GamePhase,
    seed: u64,
    #[serde(skip)]
    rng: Pcg32,
}

impl PuzzleGame {
    pub fn new(seed: u64) -> Self {
        Self {
            board: Board::new(),
            current: None,
            score: 0,
            lines_cleared: 0,
            phase: GamePhase::Idle,
            seed,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    pub fn is_valid(&self, piece: &Piece) -> bool {
        self.board.fits(piece)
    }

    /// Apply a move to the falling piece. Returns whether the piece moved.
    ///
    /// Blocked left/right/rotate moves are ignored (no wall kicks); a blocked
    /// `Down` locks the piece.
    pub fn move_piece(&mut self, mv: PuzzleMove) -> bool {
        if !self.phase.is_playing() {
            return false;
        }
        let Some(current) = self.current else {
            return false;
        };

        let candidate = match mv {
            PuzzleMove::Left => current.shifted(IVec2::new(-1, 0)),
            PuzzleMove::Right => current.shifted(IVec2::new(1, 0)),
            PuzzleMove::Down => current.shifted(IVec2::new(0, 1)),
            PuzzleMove::Rotate => current.rotated(),
        };

        if self.is_valid(&candidate) {
            self.current = Some(candidate);
            return true;
        }
        if mv == PuzzleMove::Down {
            self.lock_current();
        }
        false
    }

    pub fn hard_drop(&mut self) {
        while self.move_piece(PuzzleMove::Down) {}
    }

    /// Board with the falling piece drawn in, for rendering
    pub fn composite(&self) -> Vec<Row> {
        match &self.current {
            Some(piece) => self.board.with_piece(piece),
            None => self.board.rows().to_vec(),
        }
    }

    fn lock_current(&mut self) {
        let Some(piece) = self.current.take() else {
            return;
        };

        let hidden = self.board.lock(&piece);
        if hidden > 0 {
            // Stack reached the top: the piece never fully entered the board
            log::debug!("puzzle: {:?} locked with {hidden} cells above the board", piece.kind);
            self.end(Outcome::Lost);
            return;
        }

        let cleared = self.board.clear_full_rows();
        if !cleared.is_empty() {
            log::debug!("puzzle: cleared rows {cleared:?}");
            self.lines_cleared += cleared.len() as u32;
            self.score += LINE_REWARD * cleared.len() as u64;
        }

        self.spawn();
    }

    fn spawn(&mut self) {
        let kind = PieceKind::ALL[self.rng.random_range(0..PieceKind::ALL.len())];
        let piece = Piece::spawn(kind, BOARD_WIDTH);
        if self.is_valid(&piece) {
            self.current = Some(piece);
        } else {
            log::debug!("puzzle: no room to spawn {kind:?}");
            self.end(Outcome::Lost);
        }
    }

    fn end(&mut self, outcome: Outcome) {
        let to = GamePhase::Ended(outcome);
        log_transition(Self::GAME, self.phase, to, self.score);
        self.phase = to;
    }
}

impl Simulation for PuzzleGame {
    type Command = PuzzleCommand;

    const GAME: GameId = GameId::Puzzle;
    const TIMERS: &'static [Timer] = &[Timer::every_ms(TimerKind::Gravity, 1000)];

    fn phase(&self) -> GamePhase {
        self.phase
    }

    fn score(&self) -> u64 {
        self.score
    }

    fn toggle_play(&mut self) {
        match self.phase.toggled() {
            Some(next) => {
                log_transition(Self::GAME, self.phase, next, self.score);
                self.phase = next;
                if next.is_playing() && self.current.is_none() {
                    self.spawn();
                }
            }
            None => self.reset(),
        }
    }

    fn reset(&mut self) {
        *self = Self::new(self.seed);
    }

    fn on_timer(&mut self, timer: TimerKind) {
        if timer == TimerKind::Gravity {
            self.move_piece(PuzzleMove::Down);
        }
    }

    fn command(&mut self, command: PuzzleCommand) {
        match command {
            PuzzleCommand::Move(mv) => {
                self.move_piece(mv);
            }
            PuzzleCommand::HardDrop => self.hard_drop(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn playing() -> PuzzleGame {
        let mut game = PuzzleGame::new(3);
        game.toggle_play();
        game
    }

    fn fill_row_except(game: &mut PuzzleGame, y: i32, skip: &[i32]) {
        for x in (0..BOARD_WIDTH).filter(|x| !skip.contains(x)) {
            game.board.set(IVec2::new(x, y), Some(PieceKind::O));
        }
    }

    #[test]
    fn test_start_spawns_centered_piece() {
        let game = playing();
        let piece = game.current.expect("piece spawned on start");
        assert_eq!(piece.pos.y, 0);
        assert_eq!(piece.rotation, 0);
        assert_eq!(piece, Piece::spawn(piece.kind, BOARD_WIDTH));
    }

    #[test]
    fn test_moves_ignored_unless_playing() {
        let mut game = PuzzleGame::new(3);
        assert!(!game.move_piece(PuzzleMove::Down));
        game.toggle_play();
        game.toggle_play();
        assert_eq!(game.phase(), GamePhase::Paused);
        let before = game.current;
        game.on_timer(TimerKind::Gravity);
        assert_eq!(game.current, before);
    }

    #[test]
    fn test_blocked_side_move_is_ignored() {
        let mut game = playing();
        game.current = Some(Piece::new(PieceKind::O, IVec2::new(0, 5)));
        assert!(!game.move_piece(PuzzleMove::Left));
        assert_eq!(game.current.map(|p| p.pos), Some(IVec2::new(0, 5)));
        assert!(game.move_piece(PuzzleMove::Right));
        assert_eq!(game.current.map(|p| p.pos), Some(IVec2::new(1, 5)));
        assert_eq!(game.board.filled_cells(), 0);
    }

    #[test]
    fn test_rotation_rejected_at_wall() {
        let mut game = playing();
        let upright = Piece {
            kind: PieceKind::T,
            rotation: 1,
            pos: IVec2::new(8, 5),
        };
        game.current = Some(upright);
        assert!(!game.move_piece(PuzzleMove::Rotate));
        assert_eq!(game.current, Some(upright));

        game.current = Some(upright.shifted(IVec2::new(-1, 0)));
        assert!(game.move_piece(PuzzleMove::Rotate));
        assert_eq!(game.current.map(|p| p.rotation), Some(2));
    }

    #[test]
    fn test_down_on_floor_locks_and_spawns() {
        let mut game = playing();
        game.current = Some(Piece::new(PieceKind::O, IVec2::new(0, 18)));
        assert!(!game.move_piece(PuzzleMove::Down));
        assert!(game.board.is_occupied(IVec2::new(0, 19)));
        assert!(game.board.is_occupied(IVec2::new(1, 18)));
        assert_eq!(game.board.filled_cells(), 4);
        let next = game.current.expect("next piece");
        assert_eq!(next.pos.y, 0);
        assert_eq!(game.phase(), GamePhase::Playing);
    }

    #[test]
    fn test_gravity_uses_the_down_path() {
        let mut game = playing();
        game.current = Some(Piece::new(PieceKind::O, IVec2::new(4, 17)));
        game.on_timer(TimerKind::Gravity);
        assert_eq!(game.current.map(|p| p.pos), Some(IVec2::new(4, 18)));
        game.on_timer(TimerKind::Gravity);
        assert!(game.board.is_occupied(IVec2::new(4, 19)));
    }

    #[test]
    fn test_clearing_rows_three_and_seven_scores_200() {
        let mut game = playing();
        fill_row_except(&mut game, 3, &[]);
        fill_row_except(&mut game, 7, &[0]);
        game.board.set(IVec2::new(0, 8), Some(PieceKind::S));
        game.board.set(IVec2::new(5, 2), Some(PieceKind::Z));
        // Upright I at the left wall covering rows 4..=7, resting on (0, 8)
        game.current = Some(Piece {
            kind: PieceKind::I,
            rotation: 1,
            pos: IVec2::new(0, 4),
        });

        let score = game.score;
        game.move_piece(PuzzleMove::Down);

        assert_eq!(game.score, score + 200);
        assert_eq!(game.lines_cleared, 2);
        assert_eq!(game.board.height(), 20);
        assert_eq!(game.board.rows()[0], board::EMPTY_ROW);
        assert_eq!(game.board.rows()[1], board::EMPTY_ROW);
        // Row 2 moved down past both cleared rows, rows 4..=6 past one
        assert!(game.board.is_occupied(IVec2::new(5, 4)));
        for y in 5..=7 {
            assert!(game.board.is_occupied(IVec2::new(0, y)));
        }
        assert!(game.board.is_occupied(IVec2::new(0, 8)));
        assert_eq!(game.board.filled_cells(), 5);
    }

    #[test]
    fn test_four_rows_score_400_at_once() {
        let mut game = playing();
        for y in 16..20 {
            fill_row_except(&mut game, y, &[9]);
        }
        game.current = Some(Piece {
            kind: PieceKind::I,
            rotation: 1,
            pos: IVec2::new(9, 0),
        });
        game.hard_drop();
        assert_eq!(game.score, 4 * LINE_REWARD);
        assert_eq!(game.lines_cleared, 4);
        assert_eq!(game.board.filled_cells(), 0);
    }

    #[test]
    fn test_blocked_spawn_loses_without_touching_board() {
        let mut game = playing();
        game.board.set(IVec2::new(4, 0), Some(PieceKind::T));
        game.board.set(IVec2::new(5, 0), Some(PieceKind::T));
        game.current = Some(Piece::new(PieceKind::O, IVec2::new(0, 18)));

        game.move_piece(PuzzleMove::Down);
        let board = game.board.clone();

        assert_eq!(game.phase(), GamePhase::Ended(Outcome::Lost));
        assert_eq!(game.current, None);
        assert_eq!(board.filled_cells(), 6);
        // Nothing more happens once ended
        game.move_piece(PuzzleMove::Down);
        assert_eq!(game.board, board);
    }

    #[test]
    fn test_lock_above_board_loses() {
        let mut game = playing();
        game.board.set(IVec2::new(0, 2), Some(PieceKind::S));
        game.current = Some(Piece {
            kind: PieceKind::I,
            rotation: 1,
            pos: IVec2::new(0, -2),
        });
        game.move_piece(PuzzleMove::Down);
        assert_eq!(game.phase(), GamePhase::Ended(Outcome::Lost));
        assert!(game.board.is_occupied(IVec2::new(0, 0)));
        assert!(game.board.is_occupied(IVec2::new(0, 1)));
        assert_eq!(game.current, None);
    }

    #[test]
    fn test_composite_overlays_piece() {
        let mut game = playing();
        game.current = Some(Piece::new(PieceKind::O, IVec2::new(0, 0)));
        let rows = game.composite();
        assert_eq!(rows[0][0], Some(PieceKind::O));
        assert_eq!(rows[1][1], Some(PieceKind::O));
        assert_eq!(game.board.filled_cells(), 0);
    }

    #[test]
    fn test_reset_idempotent() {
        let mut game = playing();
        game.hard_drop();
        game.hard_drop();
        let mut once = game.clone();
        once.reset();
        game.reset();
        game.reset();
        assert_eq!(game, once);
        assert_eq!(game.current, None);
        assert_eq!(game.phase(), GamePhase::Idle);
    }

    #[test]
    fn test_toggle_after_end_resets() {
        let mut game = playing();
        game.hard_drop();
        game.end(Outcome::Lost);
        game.move_piece(PuzzleMove::Left);
        game.toggle_play();
        assert_eq!(game.phase(), GamePhase::Idle);
        assert_eq!(game, PuzzleGame::new(3));
    }

    #[test]
    fn test_command_names() {
        assert_eq!("drop".parse::<PuzzleCommand>(), Ok(PuzzleCommand::HardDrop));
        assert_eq!("Rotate".parse::<PuzzleCommand>(), Ok(PuzzleCommand::Move(PuzzleMove::Rotate)));
        assert_eq!("down".parse::<PuzzleCommand>(), Ok(PuzzleCommand::Move(PuzzleMove::Down)));
        assert!("shoot".parse::<PuzzleCommand>().is_err());
    }

    proptest! {
        #[test]
        fn random_play_keeps_board_consistent(moves in proptest::collection::vec(0u8..5, 0..300), seed in any::<u64>()) {
            let mut game = PuzzleGame::new(seed);
            game.toggle_play();
            for m in moves {
                let command = match m {
                    0 => PuzzleCommand::Move(PuzzleMove::Left),
                    1 => PuzzleCommand::Move(PuzzleMove::Right),
                    2 => PuzzleCommand::Move(PuzzleMove::Down),
                    3 => PuzzleCommand::Move(PuzzleMove::Rotate),
                    _ => PuzzleCommand::HardDrop,
                };
                let score = game.score;
                game.command(command);
                prop_assert!(game.score >= score);
                prop_assert_eq!(game.score, game.lines_cleared as u64 * LINE_REWARD);
                prop_assert_eq!(game.board.height(), BOARD_HEIGHT as usize);
                if let Some(piece) = game.current {
                    prop_assert!(game.is_valid(&piece));
                    prop_assert_eq!(piece.cells().count(), 4);
                }
            }
        }
    }
}
