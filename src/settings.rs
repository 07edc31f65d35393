//! Game settings and preferences
//!
//! Stored as JSON: LocalStorage on the web, a file next to the binary's
//! working directory on native builds.

use serde::{Deserialize, Serialize};

use crate::consts::{ARENA_HEIGHT, ARENA_WIDTH, MIN_ARENA_HEIGHT, MIN_ARENA_WIDTH, SIM_HZ};

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Simulation ticks per second
    pub tick_rate_hz: u32,

    // === Arena ===
    /// Arena width when the frontend has no window size to go by
    pub arena_width: f32,
    /// Arena height when the frontend has no window size to go by
    pub arena_height: f32,

    // === HUD ===
    /// Show FPS counter
    pub show_fps: bool,

    // === Accessibility ===
    /// High contrast palette
    pub high_contrast: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tick_rate_hz: SIM_HZ,
            arena_width: ARENA_WIDTH,
            arena_height: ARENA_HEIGHT,
            show_fps: false,
            high_contrast: false,
        }
    }
}

impl Settings {
    /// LocalStorage key
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "hack_dodge_settings";

    /// Environment variable naming the native settings file
    pub const PATH_ENV: &'static str = "HACK_DODGE_SETTINGS";
    /// Native settings file used when `PATH_ENV` is unset
    pub const DEFAULT_PATH: &'static str = "hack-dodge.json";

    /// Parse settings JSON. Missing fields take their defaults; out-of-range
    /// values are pulled back to something playable.
    pub fn from_json(json: &str) -> Option<Self> {
        match serde_json::from_str::<Settings>(json) {
            Ok(settings) => Some(settings.sanitized()),
            Err(e) => {
                log::warn!("Ignoring malformed settings: {}", e);
                None
            }
        }
    }

    pub fn to_json(&self) -> Option<String> {
        serde_json::to_string_pretty(self).ok()
    }

    fn sanitized(mut self) -> Self {
        let defaults = Self::default();
        if self.tick_rate_hz == 0 || self.tick_rate_hz > 240 {
            log::warn!(
                "tick_rate_hz {} out of range, using {}",
                self.tick_rate_hz,
                defaults.tick_rate_hz
            );
            self.tick_rate_hz = defaults.tick_rate_hz;
        }
        // Both start positions must lie inside the arena
        if !(self.arena_width.is_finite() && self.arena_width >= MIN_ARENA_WIDTH) {
            log::warn!(
                "arena_width {} too small, using {}",
                self.arena_width,
                defaults.arena_width
            );
            self.arena_width = defaults.arena_width;
        }
        if !(self.arena_height.is_finite() && self.arena_height >= MIN_ARENA_HEIGHT) {
            log::warn!(
                "arena_height {} too small, using {}",
                self.arena_height,
                defaults.arena_height
            );
            self.arena_height = defaults.arena_height;
        }
        self
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
            if let Some(json) = self.to_json() {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Settings saved");
            }
        }
    }

    /// Native settings file path
    #[cfg(not(target_arch = "wasm32"))]
    pub fn path() -> std::path::PathBuf {
        std::env::var_os(Self::PATH_ENV)
            .map(std::path::PathBuf::from)
            .unwrap_or_else(|| std::path::PathBuf::from(Self::DEFAULT_PATH))
    }

    /// Load settings from the native settings file
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        let path = Self::path();
        match std::fs::read_to_string(&path) {
            Ok(json) => {
                if let Some(settings) = Self::from_json(&json) {
                    log::info!("Loaded settings from {}", path.display());
                    return settings;
                }
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => log::warn!("Could not read {}: {}", path.display(), e),
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to the native settings file
    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        let path = Self::path();
        if let Some(json) = self.to_json() {
            match std::fs::write(&path, json) {
                Ok(()) => log::info!("Settings saved to {}", path.display()),
                Err(e) => log::warn!("Could not write {}: {}", path.display(), e),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let s = Settings::default();
        assert_eq!(s.tick_rate_hz, 60);
        assert!(!s.show_fps);
    }

    #[test]
    fn test_missing_fields_take_defaults() {
        let s = Settings::from_json(r#"{ "show_fps": true }"#).expect("valid json");
        assert!(s.show_fps);
        assert_eq!(s.tick_rate_hz, 60);
        assert_eq!(s.arena_width, ARENA_WIDTH);
    }

    #[test]
    fn test_malformed_json_is_rejected() {
        assert!(Settings::from_json("{ not json").is_none());
        assert!(Settings::from_json(r#"{ "tick_rate_hz": "fast" }"#).is_none());
    }

    #[test]
    fn test_out_of_range_values_sanitized() {
        let s = Settings::from_json(
            r#"{ "tick_rate_hz": 0, "arena_width": 10.0, "arena_height": 500.0 }"#,
        )
        .expect("valid json");
        assert_eq!(s.tick_rate_hz, 60);
        assert_eq!(s.arena_width, ARENA_WIDTH);
        assert_eq!(s.arena_height, 500.0);
    }

    #[test]
    fn test_arena_must_hold_start_positions() {
        let s = Settings::from_json(r#"{ "arena_width": 80.0, "arena_height": 239.0 }"#)
            .expect("valid json");
        assert_eq!(s.arena_width, ARENA_WIDTH);
        assert_eq!(s.arena_height, ARENA_HEIGHT);

        let s = Settings::from_json(r#"{ "arena_width": 240.0, "arena_height": 240.0 }"#)
            .expect("valid json");
        assert_eq!(s.arena_width, MIN_ARENA_WIDTH);
        assert_eq!(s.arena_height, MIN_ARENA_HEIGHT);
    }

    #[test]
    fn test_json_contains_fields() {
        let json = Settings::default().to_json().expect("serializable");
        assert!(json.contains("\"tick_rate_hz\": 60"));
        assert!(json.contains("\"high_contrast\": false"));
    }
}
