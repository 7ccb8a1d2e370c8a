//! Fixed-period tick driver
//!
//! The host feeds elapsed wall-clock time; the clock answers with the timer
//! events that became due, in the order they fell due. Each timer keeps its
//! own accumulator so periods never drift relative to each other.

use std::time::Duration;

use crate::sim::{Timer, TimerKind};

/// Maximum ticks a single timer may catch up in one advance
pub const DEFAULT_MAX_CATCH_UP: u32 = 8;

#[derive(Debug, Clone)]
struct Slot {
    timer: Timer,
    accumulated: Duration,
}

#[derive(Debug, Clone)]
pub struct TickClock {
    slots: Vec<Slot>,
    max_catch_up: u32,
}

impl TickClock {
    pub fn new(timers: &[Timer]) -> Self {
        Self::with_catch_up(timers, DEFAULT_MAX_CATCH_UP)
    }

    pub fn with_catch_up(timers: &[Timer], max_catch_up: u32) -> Self {
        Self {
            slots: timers
                .iter()
                .filter(|t| !t.period.is_zero())
                .map(|&timer| Slot {
                    timer,
                    accumulated: Duration::ZERO,
                })
                .collect(),
            max_catch_up: max_catch_up.max(1),
        }
    }

    /// Feed elapsed time, returning due timer events ordered by due time
    /// (ties broken by declaration order).
    pub fn advance(&mut self, elapsed: Duration) -> Vec<TimerKind> {
        let mut due: Vec<(Duration, usize, TimerKind)> = Vec::new();

        for (index, slot) in self.slots.iter_mut().enumerate() {
            let period = slot.timer.period;
            let before = slot.accumulated;
            slot.accumulated = slot.accumulated.saturating_add(elapsed);

            let mut fired = 0;
            while slot.accumulated >= period && fired < self.max_catch_up {
                slot.accumulated -= period;
                fired += 1;
                // Offset into this advance at which the tick fell due
                let at = (period * fired).saturating_sub(before);
                due.push((at, index, slot.timer.kind));
            }

            if slot.accumulated >= period {
                log::debug!(
                    "{:?} timer dropped {:?} of backlog",
                    slot.timer.kind,
                    slot.accumulated
                );
                slot.accumulated = Duration::ZERO;
            }
        }

        due.sort_by_key(|&(at, index, _)| (at, index));
        due.into_iter().map(|(_, _, kind)| kind).collect()
    }

    /// Forget all partial progress (pause, reset, navigation away)
    pub fn reset(&mut self) {
        for slot in &mut self.slots {
            slot.accumulated = Duration::ZERO;
        }
    }
}
