//! Player preferences
//!
//! Persisted in LocalStorage on the web. These never touch the simulation
//! rules; they only pick options the player is allowed to choose.

use serde::{Deserialize, Serialize};

/// Player settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    pub muted: bool,
    /// Mute when window loses focus
    pub mute_on_blur: bool,

    // === Gameplay ===
    /// Restarts keep the speed and spawn cadence reached in the last run
    pub preserve_difficulty: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
            mute_on_blur: true,
            preserve_difficulty: false,
        }
    }
}

impl Settings {
    /// LocalStorage key
    #[cfg(target_arch = "wasm32")]
    const STORAGE_KEY: &'static str = "sky_gates_settings";

    /// Gain applied to sound effects, ignoring mute
    ///
    /// Always in `[0, 1]`; non-finite volumes are silent.
    pub fn sfx_gain(&self) -> f32 {
        let level = |v: f32| if v.is_finite() { v.clamp(0.0, 1.0) } else { 0.0 };
        level(self.master_volume) * level(self.sfx_volume)
    }

    /// Parse stored settings, falling back to defaults for anything missing
    pub fn from_json(json: &str) -> Option<Self> {
        serde_json::from_str(json).ok()
    }

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                if let Some(settings) = Self::from_json(&json) {
                    log::info!("Loaded settings from LocalStorage");
                    return settings;
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Settings saved");
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}
