//! Platform abstraction layer
//!
//! Handles host-environment concerns the simulation must not know about:
//! - Time/ticks (fixed-period timers driven by wall-clock deltas)
//!
//! Storage lives in `persistence`.

pub mod clock;

pub use clock::TickClock;
