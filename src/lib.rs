//! Retro Arcade - four classic arcade games on one deterministic core
//!
//! Core modules:
//! - `sim`: Deterministic simulations (snake, shooter, bounce, puzzle), collision and the cabinet host
//! - `platform`: Tick clock driving the per-game timers
//! - `persistence`: Best-score stores (JSON file, LocalStorage, in-memory)
//! - `highscores`: Ratcheting best-score bridge
//! - `autopilot`: Demo-mode controllers
//! - `settings`: Runner configuration
//! - `arcade`: All four cabinets addressed by game and command name
//! - `web`: Browser bindings over LocalStorage (wasm32 only)

pub mod arcade;
pub mod autopilot;
pub mod highscores;
pub mod persistence;
pub mod platform;
pub mod settings;
pub mod sim;

#[cfg(target_arch = "wasm32")]
pub mod web;

pub use arcade::Arcade;
pub use autopilot::Autopilot;
pub use highscores::BestScore;
pub use settings::Settings;

/// Install the platform logger. Safe to call more than once.
#[cfg(not(target_arch = "wasm32"))]
pub fn init_logging() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .try_init();
}

/// Install the platform logger. Safe to call more than once.
#[cfg(target_arch = "wasm32")]
pub fn init_logging() {
    let _ = console_log::init_with_level(log::Level::Info);
}
