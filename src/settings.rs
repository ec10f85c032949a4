//! Game tunables
//!
//! Persisted as JSON next to the level files. Anything missing from the file
//! falls back to the built-in default.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::levels::DEFAULT_LEVEL;
use crate::sim::{LevelGrid, LevelLoadError};

/// Tunable game parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Player ===
    /// Linear damping on the player body (0.5 and 0.75 both play well)
    pub player_damping: f32,
    /// Accelerometer g to world gravity
    pub tilt_gravity_scale: f32,

    // === Dying sequence ===
    /// Seconds to slide into the vortex
    pub death_move_secs: f32,
    /// Seconds to shrink away once there
    pub death_scale_secs: f32,

    // === HUD ===
    /// Seconds for the "+1" popup to fade out
    pub score_popup_secs: f32,

    // === Level ===
    /// Directory holding `<name>.txt` level files; built-in levels when unset
    pub level_dir: Option<PathBuf>,
    /// Level to load
    pub level_name: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            player_damping: PLAYER_DAMPING,
            tilt_gravity_scale: TILT_GRAVITY_SCALE,

            death_move_secs: DEATH_MOVE_SECS,
            death_scale_secs: DEATH_SCALE_SECS,

            score_popup_secs: SCORE_POPUP_SECS,

            level_dir: None,
            level_name: DEFAULT_LEVEL.to_string(),
        }
    }
}

impl Settings {
    /// Total length of the dying sequence
    pub fn death_sequence_secs(&self) -> f32 {
        self.death_move_secs + self.death_scale_secs
    }

    /// Load the configured level, from `level_dir` if set, else built in
    pub fn load_level(&self) -> Result<LevelGrid, LevelLoadError> {
        match &self.level_dir {
            Some(dir) => LevelGrid::load_named(dir, &self.level_name),
            None => LevelGrid::builtin(&self.level_name),
        }
    }

    /// Load settings from a JSON file, using defaults if it is missing or unreadable
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(json) => match serde_json::from_str(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from {}", path.display());
                    settings
                }
                Err(e) => {
                    log::warn!("Ignoring malformed settings {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("Using default settings");
                Self::default()
            }
        }
    }

    /// Save settings as pretty JSON
    pub fn save(&self, path: impl AsRef<Path>) -> std::io::Result<()> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self).map_err(std::io::Error::other)?;
        std::fs::write(path, json)?;
        log::info!("Settings saved to {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("tilt_maze_{}_{}.json", name, std::process::id()))
    }

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.player_damping, 0.5);
        assert_eq!(settings.tilt_gravity_scale, 50.0);
        assert_eq!(settings.death_sequence_secs(), 0.5);
        assert_eq!(settings.level_name, "level1");
        assert!(settings.level_dir.is_none());
    }

    #[test]
    fn test_load_level_prefers_directory() {
        let settings = Settings::default();
        assert_eq!(settings.load_level().unwrap().height(), 12);

        let missing = Settings {
            level_dir: Some(std::env::temp_dir().join("tilt_maze_no_levels_here")),
            ..Settings::default()
        };
        assert!(matches!(
            missing.load_level(),
            Err(LevelLoadError::NotFound { .. })
        ));
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let settings = Settings::load(temp_path("missing"));
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let path = temp_path("partial");
        std::fs::write(&path, r#"{ "player_damping": 0.75 }"#).unwrap();
        let settings = Settings::load(&path);
        std::fs::remove_file(&path).unwrap();

        assert_eq!(settings.player_damping, 0.75);
        assert_eq!(settings.tilt_gravity_scale, 50.0);
    }

    #[test]
    fn test_malformed_file_gives_defaults() {
        let path = temp_path("malformed");
        std::fs::write(&path, "{ not json").unwrap();
        let settings = Settings::load(&path);
        std::fs::remove_file(&path).unwrap();

        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_save_then_load() {
        let path = temp_path("saved");
        let settings = Settings {
            death_move_secs: 0.4,
            level_dir: Some(PathBuf::from("levels")),
            ..Settings::default()
        };
        settings.save(&path).unwrap();
        let loaded = Settings::load(&path);
        std::fs::remove_file(&path).unwrap();

        assert_eq!(loaded, settings);
    }
}
