//! Browser bindings
//!
//! A page creates one `WebArcade`, forwards key presses as command names and
//! calls `advance` from its animation frame with the elapsed milliseconds.
//! Best scores and settings live in LocalStorage.

use std::time::Duration;

use wasm_bindgen::prelude::*;

use crate::arcade::Arcade;
use crate::persistence::LocalStorageStore;
use crate::settings::Settings;
use crate::sim::GameId;

#[wasm_bindgen(start)]
pub fn start() {
    crate::init_logging();
    log::info!("Retro Arcade loaded");
}

#[wasm_bindgen]
pub struct WebArcade {
    arcade: Arcade,
    settings: Settings,
}

impl Default for WebArcade {
    fn default() -> Self {
        Self::new()
    }
}

#[wasm_bindgen]
impl WebArcade {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        let settings = Settings::load();
        let arcade = Arcade::new(&settings, |_| Box::new(LocalStorageStore::new()));
        Self { arcade, settings }
    }

    #[wasm_bindgen(js_name = togglePlay)]
    pub fn toggle_play(&mut self, game: &str) -> Result<(), JsError> {
        self.arcade.toggle_play(game.parse::<GameId>()?);
        Ok(())
    }

    pub fn reset(&mut self, game: &str) -> Result<(), JsError> {
        self.arcade.reset(game.parse::<GameId>()?);
        Ok(())
    }

    pub fn command(&mut self, game: &str, name: &str) -> Result<(), JsError> {
        self.arcade.command(game.parse::<GameId>()?, name)?;
        Ok(())
    }

    /// Feed wall-clock time; negative or non-finite values count as zero
    pub fn advance(&mut self, game: &str, elapsed_ms: f64) -> Result<(), JsError> {
        let elapsed = Duration::try_from_secs_f64(elapsed_ms / 1000.0).unwrap_or(Duration::ZERO);
        self.arcade.advance(game.parse::<GameId>()?, elapsed);
        Ok(())
    }

    /// `idle`, `playing`, `paused`, `won` or `lost`
    pub fn phase(&self, game: &str) -> Result<String, JsError> {
        Ok(self.arcade.phase(game.parse::<GameId>()?).as_str().to_string())
    }

    pub fn score(&self, game: &str) -> Result<u64, JsError> {
        Ok(self.arcade.score(game.parse::<GameId>()?))
    }

    #[wasm_bindgen(js_name = bestScore)]
    pub fn best_score(&self, game: &str) -> Result<u64, JsError> {
        Ok(self.arcade.best_score(game.parse::<GameId>()?))
    }

    /// Render state as JSON for the page to draw
    pub fn snapshot(&self, game: &str) -> Result<String, JsError> {
        Ok(self.arcade.snapshot_json(game.parse::<GameId>()?)?)
    }

    /// Game names accepted by every other method
    pub fn games() -> Vec<String> {
        GameId::ALL.iter().map(|game| game.as_str().to_string()).collect()
    }

    #[wasm_bindgen(js_name = saveSettings)]
    pub fn save_settings(&self) {
        self.settings.save();
    }
}
