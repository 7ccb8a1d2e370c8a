//! Demo-mode players
//!
//! Each game gets a simple greedy controller that looks at the current state
//! and suggests the next command. The headless runner feeds these back into
//! the cabinet, so a demo exercises exactly the same paths as a human.

use glam::IVec2;

use crate::sim::bounce::{BALL_SIZE, PADDLE_STEP, PADDLE_WIDTH};
use crate::sim::puzzle::{BOARD_WIDTH, Board, Piece, PuzzleCommand, PuzzleMove};
use crate::sim::shooter::{BULLET_SIZE, ENEMY_SIZE, PLAYER_SIZE, PLAYER_STEP, ShooterCommand};
use crate::sim::snake::{Direction, GRID_SIZE};
use crate::sim::{BounceGame, Horizontal, PuzzleGame, ShooterGame, Simulation, SnakeGame};

pub trait Autopilot: Simulation {
    /// Next command to issue, if any. Only meaningful while playing.
    fn autopilot(&self) -> Option<Self::Command>;
}

/// Nudge direction that brings `from` closer to `to`, ignoring a dead zone
/// of half a step so the controller settles instead of oscillating.
fn steer(from: f32, to: f32, step: f32) -> Option<Horizontal> {
    let delta = to - from;
    if delta > step / 2.0 {
        Some(Horizontal::Right)
    } else if delta < -step / 2.0 {
        Some(Horizontal::Left)
    } else {
        None
    }
}

impl Autopilot for SnakeGame {
    /// Head for the food along the Manhattan metric, never into a wall or
    /// the body. Keeps the current heading on ties.
    fn autopilot(&self) -> Option<Direction> {
        if !self.phase().is_playing() {
            return None;
        }

        let head = self.head();
        let mut candidates = vec![self.direction];
        candidates.extend(
            [Direction::Up, Direction::Down, Direction::Left, Direction::Right]
                .into_iter()
                .filter(|d| *d != self.direction && *d != self.direction.opposite()),
        );

        let is_safe = |cell: IVec2| {
            (0..GRID_SIZE).contains(&cell.x)
                && (0..GRID_SIZE).contains(&cell.y)
                && !self.body.contains(&cell)
        };

        let mut best: Option<(Direction, i32)> = None;
        for direction in candidates {
            let next = head + direction.vector();
            if !is_safe(next) {
                continue;
            }
            let distance = (self.food - next).abs().element_sum();
            if best.is_none_or(|(_, d)| distance < d) {
                best = Some((direction, distance));
            }
        }
        best.map(|(direction, _)| direction)
    }
}

impl Autopilot for ShooterGame {
    /// Line up under the lowest enemy and fire once per approach.
    fn autopilot(&self) -> Option<ShooterCommand> {
        if !self.phase().is_playing() {
            return None;
        }

        let target = self
            .enemies
            .iter()
            .max_by(|a, b| a.pos.y.total_cmp(&b.pos.y))?;

        let ship_center = self.player_x + PLAYER_SIZE / 2.0;
        let target_center = target.pos.x + ENEMY_SIZE / 2.0;
        if let Some(direction) = steer(ship_center, target_center, PLAYER_STEP) {
            return Some(ShooterCommand::Move(direction));
        }

        // Hold fire while a shot is already climbing toward this enemy
        let in_flight = self.bullets.iter().any(|b| {
            b.pos.y > target.pos.y
                && b.pos.x + BULLET_SIZE > target.pos.x
                && b.pos.x < target.pos.x + ENEMY_SIZE
        });
        (!in_flight).then_some(ShooterCommand::Shoot)
    }
}

impl Autopilot for BounceGame {
    /// Keep the paddle centered under the ball.
    fn autopilot(&self) -> Option<Horizontal> {
        if !self.phase().is_playing() {
            return None;
        }
        let paddle_center = self.paddle_x + PADDLE_WIDTH / 2.0;
        let ball_center = self.ball.pos.x + BALL_SIZE / 2.0;
        steer(paddle_center, ball_center, PADDLE_STEP)
    }
}

/// Where the autopilot wants the falling piece to end up
fn puzzle_target(board: &Board, current: &Piece) -> Option<Piece> {
    let mut best: Option<(Piece, i32)> = None;

    for rotation in 0..4u8 {
        for x in -3..BOARD_WIDTH {
            let mut piece = Piece {
                rotation,
                pos: IVec2::new(x, current.pos.y),
                ..*current
            };
            if !board.fits(&piece) {
                continue;
            }
            while board.fits(&piece.shifted(IVec2::new(0, 1))) {
                piece = piece.shifted(IVec2::new(0, 1));
            }

            let rating = rate_placement(board, &piece);
            if best.is_none_or(|(_, r)| rating > r) {
                best = Some((piece, rating));
            }
        }
    }
    best.map(|(piece, _)| piece)
}

/// Favor cleared rows, then low landings, then few covered holes
fn rate_placement(board: &Board, piece: &Piece) -> i32 {
    let mut after = board.clone();
    if after.lock(piece) > 0 {
        return i32::MIN;
    }
    let lines = after.clear_full_rows().len() as i32;
    let depth: i32 = piece.cells().map(|c| c.y).sum();

    let mut holes = 0;
    for x in 0..BOARD_WIDTH {
        let mut covered = false;
        for y in 0..after.height() as i32 {
            let occupied = after.is_occupied(IVec2::new(x, y));
            if occupied {
                covered = true;
            } else if covered {
                holes += 1;
            }
        }
    }

    lines * 1000 + depth * 10 - holes * 40
}

impl Autopilot for PuzzleGame {
    /// Rotate, then slide toward the best landing spot and hard drop. Any
    /// blocked step drops in place.
    fn autopilot(&self) -> Option<PuzzleCommand> {
        if !self.phase().is_playing() {
            return None;
        }
        let current = self.current?;
        let Some(target) = puzzle_target(&self.board, &current) else {
            return Some(PuzzleCommand::HardDrop);
        };

        let (mv, candidate) = if current.rotation != target.rotation {
            (PuzzleMove::Rotate, current.rotated())
        } else if current.pos.x > target.pos.x {
            (PuzzleMove::Left, current.shifted(IVec2::new(-1, 0)))
        } else if current.pos.x < target.pos.x {
            (PuzzleMove::Right, current.shifted(IVec2::new(1, 0)))
        } else {
            return Some(PuzzleCommand::HardDrop);
        };

        if self.is_valid(&candidate) {
            Some(PuzzleCommand::Move(mv))
        } else {
            Some(PuzzleCommand::HardDrop)
        }
    }
}
