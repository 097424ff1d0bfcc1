//! Player preferences
//!
//! Display and accessibility options only; gameplay tuning is fixed.
//! Persisted in LocalStorage on the web and read from a JSON file natively.

use serde::{Deserialize, Serialize};

use crate::consts::DEFAULT_WINDOW_SCALE;
use crate::error::SettingsError;

/// Largest integer window scale accepted
pub const MAX_WINDOW_SCALE: u32 = 8;

/// Environment variable naming the native settings file
pub const SETTINGS_ENV: &str = "PONGOPHER_SETTINGS";

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Integer upscale of the 256x256 screen
    pub window_scale: u32,
    /// Show FPS counter
    pub show_fps: bool,
    /// Reduced motion (no mascot spin)
    pub reduced_motion: bool,
    /// High contrast palette
    pub high_contrast: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            window_scale: DEFAULT_WINDOW_SCALE,
            show_fps: false,
            reduced_motion: false,
            high_contrast: false,
        }
    }
}

impl Settings {
    /// LocalStorage key
    #[cfg(target_arch = "wasm32")]
    const STORAGE_KEY: &'static str = "pon_gopher_settings";

    pub fn validate(&self) -> Result<(), SettingsError> {
        if !(1..=MAX_WINDOW_SCALE).contains(&self.window_scale) {
            return Err(SettingsError::WindowScale(self.window_scale));
        }
        Ok(())
    }

    /// Parse and validate settings JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Window size in physical pixels
    pub fn window_size(&self) -> (u32, u32) {
        let side = crate::consts::SCREEN_WIDTH as u32 * self.window_scale;
        (side, side)
    }

    /// Use `result` if it holds valid settings, otherwise log why and fall
    /// back to the defaults
    fn or_default(result: Result<Self, SettingsError>) -> Self {
        match result {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("Ignoring saved settings: {}", e);
                Self::default()
            }
        }
    }

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                let result = Self::from_json(&json);
                if result.is_ok() {
                    log::info!("Loaded settings from LocalStorage");
                }
                return Self::or_default(result);
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
            match self.to_json() {
                Ok(json) => {
                    let _ = storage.set_item(Self::STORAGE_KEY, &json);
                    log::info!("Settings saved");
                }
                Err(e) => log::warn!("Settings not saved: {}", e),
            }
        }
    }

    /// Load settings from the file named by `PONGOPHER_SETTINGS`, if set
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        match std::env::var_os(SETTINGS_ENV) {
            Some(path) => {
                let result = Self::load_file(std::path::Path::new(&path));
                if result.is_ok() {
                    log::info!("Loaded settings from {}", path.to_string_lossy());
                }
                Self::or_default(result)
            }
            None => {
                log::info!("Using default settings");
                Self::default()
            }
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_file(path: &std::path::Path) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save_file(&self, path: &std::path::Path) -> Result<(), SettingsError> {
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let settings = Settings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.window_size(), (512, 512));
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let settings = Settings::from_json(r#"{ "show_fps": true }"#).unwrap();
        assert!(settings.show_fps);
        assert_eq!(settings.window_scale, DEFAULT_WINDOW_SCALE);
        assert!(!settings.high_contrast);
    }

    #[test]
    fn test_rejects_bad_scale() {
        let err = Settings::from_json(r#"{ "window_scale": 0 }"#).unwrap_err();
        assert!(matches!(err, SettingsError::WindowScale(0)));
        let err = Settings::from_json(r#"{ "window_scale": 9 }"#).unwrap_err();
        assert!(matches!(err, SettingsError::WindowScale(9)));
    }

    #[test]
    fn test_rejects_garbage() {
        let err = Settings::from_json("not json").unwrap_err();
        assert!(matches!(err, SettingsError::Parse(_)));
    }

    #[test]
    fn test_json_round_trip() {
        let settings = Settings {
            window_scale: 3,
            show_fps: true,
            reduced_motion: true,
            high_contrast: false,
        };
        let json = settings.to_json().unwrap();
        assert_eq!(Settings::from_json(&json).unwrap(), settings);
    }

    #[test]
    fn test_or_default_falls_back() {
        let fallback = Settings::or_default(Err(SettingsError::WindowScale(42)));
        assert_eq!(fallback, Settings::default());
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn test_load_file() {
        let dir = std::env::temp_dir();
        let path = dir.join(format!("pon_gopher_settings_{}.json", std::process::id()));
        std::fs::write(&path, r#"{ "window_scale": 4, "reduced_motion": true }"#).unwrap();

        let settings = Settings::load_file(&path).unwrap();
        assert_eq!(settings.window_scale, 4);
        assert!(settings.reduced_motion);

        std::fs::remove_file(&path).unwrap();
        assert!(matches!(
            Settings::load_file(&path),
            Err(SettingsError::Io(_))
        ));
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn test_save_file_then_load() {
        let path = std::env::temp_dir().join(format!(
            "pon_gopher_saved_{}.json",
            std::process::id()
        ));
        let settings = Settings {
            window_scale: 5,
            show_fps: true,
            reduced_motion: false,
            high_contrast: true,
        };

        settings.save_file(&path).unwrap();
        assert_eq!(Settings::load_file(&path).unwrap(), settings);

        std::fs::remove_file(&path).unwrap();
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn test_save_file_reports_io_errors() {
        let dir = std::env::temp_dir().join(format!("pon_gopher_missing_{}", std::process::id()));
        let err = Settings::default()
            .save_file(&dir.join("settings.json"))
            .unwrap_err();
        assert!(matches!(err, SettingsError::Io(_)));
    }
}
