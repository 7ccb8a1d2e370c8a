//! Runner settings
//!
//! Persisted as JSON: a file on native, LocalStorage on the web. Missing
//! fields take their defaults, so old files keep loading.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::platform::clock::DEFAULT_MAX_CATCH_UP;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Fixed RNG seed for reproducible runs (random when unset)
    pub seed: Option<u64>,
    /// Where best scores are kept on native builds
    pub scores_path: PathBuf,
    /// Simulated seconds each game runs in the headless demo
    pub demo_seconds: u32,
    /// Most ticks one timer may catch up after a stall
    pub max_catch_up_ticks: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            seed: None,
            scores_path: PathBuf::from("arcade_scores.json"),
            demo_seconds: 30,
            max_catch_up_ticks: DEFAULT_MAX_CATCH_UP,
        }
    }
}

impl Settings {
    /// The configured seed, or a fresh random one
    pub fn resolve_seed(&self) -> u64 {
        self.seed.unwrap_or_else(rand::random)
    }

    /// Parse stored settings, falling back to defaults when they are invalid
    pub fn from_json(json: &str, source: &str) -> Self {
        match serde_json::from_str(json) {
            Ok(settings) => {
                log::info!("Loaded settings from {source}");
                settings
            }
            Err(err) => {
                log::warn!("Ignoring invalid settings in {source}: {err}");
                Self::default()
            }
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// LocalStorage key
    #[cfg(target_arch = "wasm32")]
    const STORAGE_KEY: &'static str = "arcade_settings";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let stored = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
            .and_then(|storage| storage.get_item(Self::STORAGE_KEY).ok().flatten());

        match stored {
            Some(json) => Self::from_json(&json, "LocalStorage"),
            None => {
                log::info!("Using default settings");
                Self::default()
            }
        }
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = self.to_json() {
                if storage.set_item(Self::STORAGE_KEY, &json).is_err() {
                    log::warn!("Could not save settings");
                    return;
                }
                log::info!("Settings saved");
            }
        }
    }

    /// Load settings from a JSON file, falling back to defaults
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from(path: &std::path::Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(json) => Self::from_json(&json, &path.display().to_string()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                log::info!("No settings at {}, using defaults", path.display());
                Self::default()
            }
            Err(err) => {
                log::warn!("Could not read {}: {err}", path.display());
                Self::default()
            }
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save_to(&self, path: &std::path::Path) -> std::io::Result<()> {
        let json = self.to_json().map_err(std::io::Error::other)?;
        std::fs::write(path, json)?;
        log::info!("Settings saved to {}", path.display());
        Ok(())
    }
}
