//! Single-game host loop
//!
//! A cabinet owns one simulation plus everything around it: the tick clock,
//! the best-score bridge and its store. Timer ticks and player commands go
//! through one FIFO queue, so no two mutations ever interleave and no lock
//! is needed.

use std::collections::VecDeque;
use std::time::Duration;

use serde::Serialize;

use super::{GamePhase, Simulation, TimerKind};
use crate::highscores::BestScore;
use crate::persistence::ScoreStore;
use crate::platform::TickClock;
use crate::platform::clock::DEFAULT_MAX_CATCH_UP;

/// Everything that can change a game, in arrival order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input<C> {
    Tick(TimerKind),
    TogglePlay,
    Reset,
    Command(C),
}

pub struct Cabinet<S: Simulation> {
    sim: S,
    clock: TickClock,
    best: BestScore,
    store: Box<dyn ScoreStore>,
    queue: VecDeque<Input<S::Command>>,
}

impl<S: Simulation> Cabinet<S> {
    pub fn new(sim: S, store: Box<dyn ScoreStore>) -> Self {
        Self::with_catch_up(sim, store, DEFAULT_MAX_CATCH_UP)
    }

    pub fn with_catch_up(sim: S, store: Box<dyn ScoreStore>, max_catch_up: u32) -> Self {
        let best = BestScore::load(S::GAME, store.as_ref());
        Self {
            sim,
            clock: TickClock::with_catch_up(S::TIMERS, max_catch_up),
            best,
            store,
            queue: VecDeque::new(),
        }
    }

    pub fn enqueue(&mut self, input: Input<S::Command>) {
        self.queue.push_back(input);
    }

    /// Process every queued input in arrival order
    pub fn pump(&mut self) {
        while let Some(input) = self.queue.pop_front() {
            self.process(input);
        }
    }

    pub fn handle(&mut self, input: Input<S::Command>) {
        self.enqueue(input);
        self.pump();
    }

    /// Let wall-clock time pass. Timers only run while the game is playing.
    pub fn advance(&mut self, elapsed: Duration) {
        if !self.sim.phase().is_playing() {
            self.clock.reset();
            return;
        }
        for kind in self.clock.advance(elapsed) {
            self.enqueue(Input::Tick(kind));
        }
        self.pump();
    }

    fn process(&mut self, input: Input<S::Command>) {
        let before = self.sim.phase();
        match input {
            Input::Tick(kind) => self.sim.on_timer(kind),
            Input::TogglePlay => self.sim.toggle_play(),
            Input::Reset => self.sim.reset(),
            Input::Command(command) => self.sim.command(command),
        }
        let after = self.sim.phase();

        if !after.is_playing() {
            self.clock.reset();
        }
        if after.is_ended() && !before.is_ended() {
            self.best.offer(self.sim.score(), self.store.as_mut());
        }
    }

    /// Read-only view for rendering
    pub fn state(&self) -> &S {
        &self.sim
    }

    pub fn phase(&self) -> GamePhase {
        self.sim.phase()
    }

    pub fn score(&self) -> u64 {
        self.sim.score()
    }

    pub fn best_score(&self) -> u64 {
        self.best.get()
    }

    pub fn store(&self) -> &dyn ScoreStore {
        self.store.as_ref()
    }

    pub fn snapshot_json(&self) -> Result<String, serde_json::Error>
    where
        S: Serialize,
    {
        serde_json::to_string(&self.sim)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStore;
    use crate::sim::snake::{Direction, SnakeGame};
    use crate::sim::{GameId, Outcome};

    fn cabinet(best: u64) -> Cabinet<SnakeGame> {
        let store = MemoryStore::new().with_score(GameId::Snake, best);
        Cabinet::new(SnakeGame::new(1), Box::new(store))
    }

    #[test]
    fn test_loads_best_on_start() {
        assert_eq!(cabinet(40).best_score(), 40);
    }

    #[test]
    fn test_ticks_only_while_playing() {
        let mut cab = cabinet(0);
        cab.advance(Duration::from_millis(600));
        assert_eq!(cab.state().head(), glam::IVec2::new(10, 10));

        cab.handle(Input::TogglePlay);
        cab.advance(Duration::from_millis(300));
        assert_eq!(cab.state().head(), glam::IVec2::new(12, 10));

        cab.handle(Input::TogglePlay);
        assert_eq!(cab.phase(), GamePhase::Paused);
        cab.advance(Duration::from_millis(300));
        assert_eq!(cab.state().head(), glam::IVec2::new(12, 10));
    }

    #[test]
    fn test_queue_preserves_order() {
        let mut cab = cabinet(0);
        cab.handle(Input::TogglePlay);
        cab.enqueue(Input::Command(Direction::Down));
        cab.enqueue(Input::Tick(TimerKind::Step));
        cab.enqueue(Input::Command(Direction::Left));
        cab.enqueue(Input::Tick(TimerKind::Step));
        cab.pump();
        assert_eq!(cab.state().head(), glam::IVec2::new(9, 11));
    }

    #[test]
    fn test_end_offers_score_once() {
        let mut cab = cabinet(0);
        cab.handle(Input::TogglePlay);
        cab.handle(Input::Tick(TimerKind::Step));
        // Put food in the path so the round ends with a score
        let mut sim = cab.state().clone();
        sim.food = glam::IVec2::new(12, 10);
        cab.sim = sim;
        for _ in 0..20 {
            cab.handle(Input::Tick(TimerKind::Step));
        }
        assert_eq!(cab.phase(), GamePhase::Ended(Outcome::Lost));
        assert_eq!(cab.best_score(), cab.score());
        assert!(cab.best_score() >= 10);
        assert_eq!(
            cab.store().get(GameId::Snake).ok().flatten(),
            Some(cab.best_score())
        );

        // Reset and a weaker round keep the best
        let best = cab.best_score();
        cab.handle(Input::Reset);
        cab.handle(Input::TogglePlay);
        for _ in 0..20 {
            cab.handle(Input::Tick(TimerKind::Step));
        }
        assert_eq!(cab.best_score(), best);
    }

    #[test]
    fn test_snapshot_json() {
        let cab = cabinet(0);
        let json = cab.snapshot_json().unwrap_or_default();
        assert!(json.contains("\"score\":0"));
        assert!(json.contains("\"direction\":\"Right\""));
    }
}
