use std::path::Path;

use anyhow::Result;
use serde::{Deserialize, Serialize};

/// User preferences, remembered between runs.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    pub script_enabled: bool,
    /// Stop reporting problems for a fork after finding the first one
    pub energy_saving: bool,
    /// Don't check anything when zoomed out further than this
    pub check_from_zoom: u32,
}

impl Default for Settings {
    fn default() -> Settings {
        Settings {
            script_enabled: true,
            energy_saving: true,
            check_from_zoom: 17,
        }
    }
}

/// The format on disk, tagged with the version that wrote it.
#[derive(Serialize, Deserialize)]
struct StoredSettings {
    v: String,
    settings: Settings,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScriptState {
    Enabled,
    Disabled,
    /// Enabled, but zoomed out too far
    ZoomDisabled,
}

impl Settings {
    /// Never fails; anything unusable falls back to the defaults.
    pub fn load(path: &str) -> Settings {
        if !Path::new(path).exists() {
            info!("Running for the first time, no settings at {}", path);
            return Settings::default();
        }
        match abstutil::read_json::<StoredSettings>(path) {
            Ok(stored) => {
                info!("Loaded settings from {} (version {})", path, stored.v);
                stored.settings
            }
            Err(err) => {
                warn!("Settings found, but couldn't parse them: {:#}", err);
                Settings::default()
            }
        }
    }

    pub fn save(&self, path: &str) -> Result<()> {
        abstutil::write_json(
            path,
            &StoredSettings {
                v: env!("CARGO_PKG_VERSION").to_string(),
                settings: self.clone(),
            },
        )
    }

    pub fn state(&self, zoom: u32) -> ScriptState {
        if !self.script_enabled {
            ScriptState::Disabled
        } else if zoom >= self.check_from_zoom {
            ScriptState::Enabled
        } else {
            ScriptState::ZoomDisabled
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> String {
        std::env::temp_dir()
            .join(format!("falcon_eye_{}_{}.json", name, std::process::id()))
            .display()
            .to_string()
    }

    #[test]
    fn states() {
        let mut settings = Settings::default();
        assert_eq!(settings.state(17), ScriptState::Enabled);
        assert_eq!(settings.state(20), ScriptState::Enabled);
        assert_eq!(settings.state(16), ScriptState::ZoomDisabled);
        settings.script_enabled = false;
        assert_eq!(settings.state(20), ScriptState::Disabled);
    }

    #[test]
    fn missing_file_uses_defaults() {
        assert_eq!(Settings::load(&temp_path("missing")), Settings::default());
    }

    #[test]
    fn garbage_uses_defaults() {
        let path = temp_path("garbage");
        std::fs::write(&path, "not json").unwrap();
        assert_eq!(Settings::load(&path), Settings::default());
        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn save_and_load() {
        let path = temp_path("saved");
        let settings = Settings {
            script_enabled: false,
            energy_saving: false,
            check_from_zoom: 15,
        };
        settings.save(&path).unwrap();

        let raw: serde_json::Value = abstutil::read_json(&path).unwrap();
        assert_eq!(raw["v"], env!("CARGO_PKG_VERSION"));
        assert_eq!(raw["settings"]["check_from_zoom"], 15);

        assert_eq!(Settings::load(&path), settings);
        std::fs::remove_file(&path).unwrap();
    }
}
