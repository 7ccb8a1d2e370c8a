//! Ball-and-paddle brick breaker
//!
//! Pixel coordinates, y grows downward. The ball moves a fixed velocity per
//! tick (no substepping); the paddle slides along the bottom.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::{Rect, overlaps};
use super::{GameId, GamePhase, Horizontal, Outcome, Simulation, Timer, TimerKind, log_transition};

pub const FIELD_WIDTH: f32 = 300.0;
pub const FIELD_HEIGHT: f32 = 400.0;

pub const BALL_SIZE: f32 = 12.0;
const BALL_START: Vec2 = Vec2::new(FIELD_WIDTH / 2.0, FIELD_HEIGHT - 100.0);
const BALL_START_VEL: Vec2 = Vec2::new(3.0, -3.0);

pub const PADDLE_WIDTH: f32 = 60.0;
pub const PADDLE_HEIGHT: f32 = 8.0;
/// Gap between the paddle and the bottom edge
pub const PADDLE_MARGIN: f32 = 10.0;
/// Horizontal distance per move command
pub const PADDLE_STEP: f32 = 30.0;
/// Paddle edges send the ball off at this horizontal speed
pub const MAX_DEFLECTION: f32 = 3.0;

pub const BRICK_WIDTH: f32 = 30.0;
pub const BRICK_HEIGHT: f32 = 15.0;
pub const BRICKS_PER_ROW: u32 = 10;
pub const BRICK_ROWS: u32 = 6;
/// Top of the first brick row
pub const BRICK_TOP: f32 = 50.0;

/// Points per brick
pub const BRICK_REWARD: u64 = 10;
/// Added to the score when the last brick falls
pub const WIN_BONUS: u64 = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec2,
    /// Pixels per tick
    pub vel: Vec2,
}

impl Ball {
    pub fn rect(&self) -> Rect {
        Rect::at(self.pos, Vec2::splat(BALL_SIZE))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Brick {
    pub id: u32,
    pub pos: Vec2,
    pub destroyed: bool,
}

impl Brick {
    pub fn rect(&self) -> Rect {
        Rect::at(self.pos, Vec2::new(BRICK_WIDTH, BRICK_HEIGHT))
    }
}

/// The full wall, row-major from the top-left
pub fn brick_wall() -> Vec<Brick> {
    (0..BRICK_ROWS)
        .flat_map(|row| {
            (0..BRICKS_PER_ROW).map(move |col| Brick {
                id: row * BRICKS_PER_ROW + col,
                pos: Vec2::new(
                    col as f32 * BRICK_WIDTH,
                    row as f32 * BRICK_HEIGHT + BRICK_TOP,
                ),
                destroyed: false,
            })
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BounceGame {
    pub ball: Ball,
    /// Left edge of the paddle
    pub paddle_x: f32,
    /// Fixed scan order: ascending id
    pub bricks: Vec<Brick>,
    pub score: u64,
    phase: GamePhase,
}

impl Default for BounceGame {
    fn default() -> Self {
        Self::new()
    }
}

impl BounceGame {
    pub fn new() -> Self {
        Self {
            ball: Ball {
                pos: BALL_START,
                vel: BALL_START_VEL,
            },
            paddle_x: (FIELD_WIDTH - PADDLE_WIDTH) / 2.0,
            bricks: brick_wall(),
            score: 0,
            phase: GamePhase::Idle,
        }
    }

    pub fn paddle_rect(&self) -> Rect {
        Rect::new(
            self.paddle_x,
            FIELD_HEIGHT - PADDLE_HEIGHT - PADDLE_MARGIN,
            PADDLE_WIDTH,
            PADDLE_HEIGHT,
        )
    }

    pub fn bricks_left(&self) -> usize {
        self.bricks.iter().filter(|b| !b.destroyed).count()
    }

    pub fn step(&mut self) {
        if !self.phase.is_playing() {
            return;
        }

        let paddle = self.paddle_rect();
        let ball = &mut self.ball;
        ball.pos += ball.vel;

        // Walls set the sign of the velocity and keep the ball in the field
        if ball.pos.x <= 0.0 {
            ball.pos.x = 0.0;
            ball.vel.x = ball.vel.x.abs();
        } else if ball.pos.x >= FIELD_WIDTH - BALL_SIZE {
            ball.pos.x = FIELD_WIDTH - BALL_SIZE;
            ball.vel.x = -ball.vel.x.abs();
        }
        if ball.pos.y <= 0.0 {
            ball.pos.y = 0.0;
            ball.vel.y = ball.vel.y.abs();
        }

        let ball_rect = ball.rect();
        if overlaps(&ball_rect, &paddle) {
            // Always send the ball back up, aimed by where it struck
            ball.vel.y = -ball.vel.y.abs();
            let hit = ((ball.pos.x - self.paddle_x) / PADDLE_WIDTH).clamp(0.0, 1.0);
            ball.vel.x = (hit - 0.5) * 2.0 * MAX_DEFLECTION;
        }

        // At most one brick per tick
        if let Some(brick) = self
            .bricks
            .iter_mut()
            .find(|b| !b.destroyed && overlaps(&ball_rect, &b.rect()))
        {
            brick.destroyed = true;
            ball.vel.y = -ball.vel.y;
            self.score += BRICK_REWARD;
            log::debug!("bounce: brick {} destroyed", brick.id);
        }

        if self.bricks.iter().all(|b| b.destroyed) {
            self.score += WIN_BONUS;
            self.end(Outcome::Won);
            return;
        }

        if self.ball.pos.y > FIELD_HEIGHT {
            self.end(Outcome::Lost);
        }
    }

    pub fn move_paddle(&mut self, direction: Horizontal) {
        if !self.phase.is_playing() {
            return;
        }
        self.paddle_x = (self.paddle_x + direction.sign() * PADDLE_STEP)
            .clamp(0.0, FIELD_WIDTH - PADDLE_WIDTH);
    }

    fn end(&mut self, outcome: Outcome) {
        let to = GamePhase::Ended(outcome);
        log_transition(Self::GAME, self.phase, to, self.score);
        self.phase = to;
    }
}

impl Simulation for BounceGame {
    type Command = Horizontal;

    const GAME: GameId = GameId::Bounce;
    const TIMERS: &'static [Timer] = &[Timer::every_ms(TimerKind::Step, 16)];

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
            }
            None => self.reset(),
        }
    }

    fn reset(&mut self) {
        *self = Self::new();
    }

    fn on_timer(&mut self, timer: TimerKind) {
        if timer == TimerKind::Step {
            self.step();
        }
    }

    fn command(&mut self, command: Horizontal) {
        self.move_paddle(command);
    }
}
