//! Vertical shoot-'em-up
//!
//! Pixel coordinates, y grows downward. Enemies drift down from the top,
//! bullets fly up from the ship parked on the bottom edge.

use std::str::FromStr;

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::{Rect, overlaps};
use super::{
    GameId, GamePhase, Horizontal, Outcome, ParseNameError, Simulation, Timer, TimerKind,
    log_transition,
};

pub const FIELD_WIDTH: f32 = 300.0;
pub const FIELD_HEIGHT: f32 = 400.0;

pub const PLAYER_SIZE: f32 = 20.0;
/// Horizontal distance per move command
pub const PLAYER_STEP: f32 = 20.0;

pub const BULLET_SIZE: f32 = 4.0;
/// Pixels per tick, upward
pub const BULLET_SPEED: f32 = 5.0;

pub const ENEMY_SIZE: f32 = 16.0;
/// Pixels per tick, downward
pub const ENEMY_SPEED: f32 = 2.0;

/// Points per enemy destroyed
pub const KILL_REWARD: u64 = 100;

/// Bullets leave the muzzle this far above the ship
const MUZZLE_GAP: f32 = 10.0;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Bullet {
    pub id: u32,
    pub pos: Vec2,
}

impl Bullet {
    pub fn rect(&self) -> Rect {
        Rect::at(self.pos, Vec2::splat(BULLET_SIZE))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Enemy {
    pub id: u32,
    pub pos: Vec2,
}

impl Enemy {
    pub fn rect(&self) -> Rect {
        Rect::at(self.pos, Vec2::splat(ENEMY_SIZE))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShooterCommand {
    Move(Horizontal),
    Shoot,
}

impl FromStr for ShooterCommand {
    type Err = ParseNameError;

    /// `left`, `right` or `shoot`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("shoot") {
            return Ok(ShooterCommand::Shoot);
        }
        s.parse().map(ShooterCommand::Move)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShooterGame {
    /// Left edge of the ship
    pub player_x: f32,
    /// Live bullets (ascending id)
    pub bullets: Vec<Bullet>,
    /// Live enemies (ascending id)
    pub enemies: Vec<Enemy>,
    pub score: u64,
    phase: GamePhase,
    next_bullet_id: u32,
    next_enemy_id: u32,
    seed: u64,
    #[serde(skip)]
    rng: Pcg32,
}

impl ShooterGame {
    pub fn new(seed: u64) -> Self {
        Self {
            player_x: (FIELD_WIDTH - PLAYER_SIZE) / 2.0,
            bullets: Vec::new(),
            enemies: Vec::new(),
            score: 0,
            phase: GamePhase::Idle,
            next_bullet_id: 0,
            next_enemy_id: 0,
            seed,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Hit zone of the ship on the bottom edge
    pub fn player_rect(&self) -> Rect {
        Rect::new(
            self.player_x,
            FIELD_HEIGHT - PLAYER_SIZE,
            PLAYER_SIZE,
            PLAYER_SIZE,
        )
    }

    pub fn step(&mut self) {
        if !self.phase.is_playing() {
            return;
        }

        for bullet in &mut self.bullets {
            bullet.pos.y -= BULLET_SPEED;
        }
        self.bullets.retain(|b| b.pos.y > -BULLET_SIZE);

        for enemy in &mut self.enemies {
            enemy.pos.y += ENEMY_SPEED;
        }
        // An enemy reaching the bottom ends the round, so none ever needs
        // discarding below the field.
        if self.enemies.iter().any(|e| e.pos.y >= FIELD_HEIGHT) {
            self.end(Outcome::Lost);
            return;
        }

        // Each bullet destroys at most the first enemy it overlaps
        let enemies = &mut self.enemies;
        let mut kills = 0u64;
        self.bullets.retain(|bullet| {
            let rect = bullet.rect();
            match enemies.iter().position(|e| overlaps(&rect, &e.rect())) {
                Some(index) => {
                    enemies.remove(index);
                    kills += 1;
                    false
                }
                None => true,
            }
        });
        self.score += kills * KILL_REWARD;

        let player = self.player_rect();
        if self.enemies.iter().any(|e| overlaps(&e.rect(), &player)) {
            self.end(Outcome::Lost);
        }
    }

    /// Drop a new enemy in at a random column above the field
    pub fn spawn_enemy(&mut self) {
        if !self.phase.is_playing() {
            return;
        }
        let x = self.rng.random_range(0.0..FIELD_WIDTH - ENEMY_SIZE);
        let id = self.next_enemy_id;
        self.next_enemy_id += 1;
        self.enemies.push(Enemy {
            id,
            pos: Vec2::new(x, -ENEMY_SIZE),
        });
    }

    pub fn shoot(&mut self) {
        if !self.phase.is_playing() {
            return;
        }
        let id = self.next_bullet_id;
        self.next_bullet_id += 1;
        self.bullets.push(Bullet {
            id,
            pos: Vec2::new(
                self.player_x + PLAYER_SIZE / 2.0 - BULLET_SIZE / 2.0,
                FIELD_HEIGHT - PLAYER_SIZE - MUZZLE_GAP,
            ),
        });
    }

    pub fn move_player(&mut self, direction: Horizontal) {
        if !self.phase.is_playing() {
            return;
        }
        self.player_x = (self.player_x + direction.sign() * PLAYER_STEP)
            .clamp(0.0, FIELD_WIDTH - PLAYER_SIZE);
    }

    fn end(&mut self, outcome: Outcome) {
        let to = GamePhase::Ended(outcome);
        log_transition(Self::GAME, self.phase, to, self.score);
        self.phase = to;
    }
}

impl Simulation for ShooterGame {
    type Command = ShooterCommand;

    const GAME: GameId = GameId::Shooter;
    const TIMERS: &'static [Timer] = &[
        Timer::every_ms(TimerKind::Step, 50),
        Timer::every_ms(TimerKind::SpawnEnemy, 2000),
    ];

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
        *self = Self::new(self.seed);
    }

    fn on_timer(&mut self, timer: TimerKind) {
        match timer {
            TimerKind::Step => self.step(),
            TimerKind::SpawnEnemy => self.spawn_enemy(),
            TimerKind::Gravity => {}
        }
    }

    fn command(&mut self, command: ShooterCommand) {
        match command {
            ShooterCommand::Move(direction) => self.move_player(direction),
            ShooterCommand::Shoot => self.shoot(),
        }
    }
}
