//! Snake on a square grid
//!
//! The body is stored head first. Each step grows a new head in the current
//! direction and drops the tail unless food was eaten.

use std::collections::VecDeque;
use std::str::FromStr;

use glam::IVec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::{Rect, overlaps};
use super::{
    GameId, GamePhase, Outcome, ParseNameError, Simulation, Timer, TimerKind, log_transition,
};

/// Cells per side of the square field
pub const GRID_SIZE: i32 = 20;
/// Points per food eaten
pub const FOOD_REWARD: u64 = 10;

const START_HEAD: IVec2 = IVec2::new(10, 10);
const START_FOOD: IVec2 = IVec2::new(15, 15);

/// Heading on the grid (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub fn vector(&self) -> IVec2 {
        match self {
            Direction::Up => IVec2::new(0, -1),
            Direction::Down => IVec2::new(0, 1),
            Direction::Left => IVec2::new(-1, 0),
            Direction::Right => IVec2::new(1, 0),
        }
    }

    pub fn opposite(&self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }
}

impl FromStr for Direction {
    type Err = ParseNameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "up" => Ok(Direction::Up),
            "down" => Ok(Direction::Down),
            "left" => Ok(Direction::Left),
            "right" => Ok(Direction::Right),
            _ => Err(ParseNameError::new("command", s)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SnakeGame {
    /// Segments, head first
    pub body: VecDeque<IVec2>,
    pub direction: Direction,
    pub food: IVec2,
    pub score: u64,
    phase: GamePhase,
    seed: u64,
    #[serde(skip)]
    rng: Pcg32,
}

impl SnakeGame {
    pub fn new(seed: u64) -> Self {
        Self {
            body: VecDeque::from([START_HEAD]),
            direction: Direction::Right,
            food: START_FOOD,
            score: 0,
            phase: GamePhase::Idle,
            seed,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    pub fn head(&self) -> IVec2 {
        self.body[0]
    }

    /// Change heading for the next step. Reversing onto the body is refused.
    pub fn set_direction(&mut self, direction: Direction) {
        if !self.phase.is_playing() || direction == self.direction.opposite() {
            return;
        }
        self.direction = direction;
    }

    /// Advance one cell
    pub fn step(&mut self) {
        if !self.phase.is_playing() {
            return;
        }

        let head = self.head() + self.direction.vector();
        let head_rect = Rect::cell(head);
        let field = Rect::new(0.0, 0.0, GRID_SIZE as f32, GRID_SIZE as f32);

        let hit_wall = !field.contains(&head_rect);
        let hit_self = self
            .body
            .iter()
            .any(|segment| overlaps(&Rect::cell(*segment), &head_rect));
        if hit_wall || hit_self {
            self.end(Outcome::Lost);
            return;
        }

        self.body.push_front(head);
        if head == self.food {
            self.score += FOOD_REWARD;
            self.place_food();
        } else {
            self.body.pop_back();
        }
    }

    /// Move the food to a random cell not covered by the body.
    /// A snake filling the whole field has nowhere left to go and wins.
    fn place_food(&mut self) {
        let free: Vec<IVec2> = (0..GRID_SIZE)
            .flat_map(|y| (0..GRID_SIZE).map(move |x| IVec2::new(x, y)))
            .filter(|cell| !self.body.contains(cell))
            .collect();

        if free.is_empty() {
            self.end(Outcome::Won);
            return;
        }
        self.food = free[self.rng.random_range(0..free.len())];
    }

    fn end(&mut self, outcome: Outcome) {
        let to = GamePhase::Ended(outcome);
        log_transition(Self::GAME, self.phase, to, self.score);
        self.phase = to;
    }
}

impl Simulation for SnakeGame {
    type Command = Direction;

    const GAME: GameId = GameId::Snake;
    const TIMERS: &'static [Timer] = &[Timer::every_ms(TimerKind::Step, 150)];

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
        if timer == TimerKind::Step {
            self.step();
        }
    }

    fn command(&mut self, command: Direction) {
        self.set_direction(command);
    }
}
