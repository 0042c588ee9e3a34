//! Tuning constants and the persisted game configuration.

use crate::error::ConfigError;
use crate::state::Tuning;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

// Grid
pub const DEFAULT_GRID_SIZE: i32 = 8;
pub const MIN_GRID_SIZE: i32 = 2; // Smallest board that still fits a dirt cell
pub const MAX_GRID_SIZE: i32 = 32;

// Battery gauge
pub const BATTERY_MAX: i32 = 100;
pub const DEFAULT_MOVE_COST: i32 = 3; // Battery drained per successful move
pub const DEFAULT_CHARGE_RATE: i32 = 10; // Battery gained per charge tick under the sun
pub const CHARGE_INTERVAL_MS: u64 = 1000; // Fixed cadence of charge ticks

// Sun
pub const DEFAULT_SUN_INTERVAL_MS: u64 = 3000; // Time between sun steps
pub const SUN_HALF_WIDTH: i32 = 1; // Beam covers the sun column +/- this many

// Level generation
pub const BASE_DIRT_COUNT: u32 = 3; // Dirt count is base + level, capped by density
pub const BASE_OBSTACLE_COUNT: u32 = 2;
pub const DIRT_DENSITY_CAP: f32 = 0.3; // Dirt never covers more than this board fraction
pub const OBSTACLE_DENSITY_CAP: f32 = 0.2;

// Presentation
pub const DEFAULT_TILE_SIZE: i32 = 48; // Cell size in pixels
pub const MIN_TILE_SIZE: i32 = 8;
pub const UI_PANEL_WIDTH: i32 = 200; // Width of the side panel
pub const MIN_WINDOW_HEIGHT: i32 = 360; // Keeps the panel readable on tiny boards
pub const LEVEL_BANNER_SECS: f32 = 2.5; // How long the level-complete banner holds
pub const NOTICE_TTL_SECS: f32 = 2.0; // How long a notice stays on screen

pub const DEFAULT_CONFIG_FILE: &str = "sunvac.json";

/// Saved game configuration. Serialized as camelCase JSON so existing config
/// blobs keep loading; missing fields fall back to their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GameConfig {
    pub grid_size: i32,
    pub battery_move_cost: i32,
    pub battery_charge_rate: i32,
    /// Milliseconds between sun steps.
    pub sun_move_interval: u64,
    pub last_level: u32,
    pub last_score: u32,
    /// Cell size in pixels; presentation only.
    pub tile_size: i32,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            grid_size: DEFAULT_GRID_SIZE,
            battery_move_cost: DEFAULT_MOVE_COST,
            battery_charge_rate: DEFAULT_CHARGE_RATE,
            sun_move_interval: DEFAULT_SUN_INTERVAL_MS,
            last_level: 1,
            last_score: 0,
            tile_size: DEFAULT_TILE_SIZE,
        }
    }
}

impl GameConfig {
    /// Load from `path`, or start from defaults when no file exists yet.
    pub fn load(path: &Path) -> Result<GameConfig, ConfigError> {
        if !path.exists() {
            return Ok(GameConfig::default());
        }
        let bytes = fs::read(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        serde_json::from_slice(&bytes).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
    }

    /// Write the configuration back to `path` as pretty-printed JSON.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let bytes = serde_json::to_vec_pretty(self)?;
        fs::write(path, bytes).map_err(|source| ConfigError::Write {
            path: path.display().to_string(),
            source,
        })
    }

    /// Reject values the engine cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.grid_size < MIN_GRID_SIZE || self.grid_size > MAX_GRID_SIZE {
            return Err(ConfigError::GridSizeOutOfRange {
                value: self.grid_size,
                min: MIN_GRID_SIZE,
                max: MAX_GRID_SIZE,
            });
        }
        if self.battery_move_cost < 0 {
            return Err(ConfigError::NegativeMoveCost(self.battery_move_cost));
        }
        if self.battery_charge_rate < 0 {
            return Err(ConfigError::NegativeChargeRate(self.battery_charge_rate));
        }
        if self.sun_move_interval == 0 {
            return Err(ConfigError::ZeroSunInterval);
        }
        if self.tile_size < MIN_TILE_SIZE {
            return Err(ConfigError::TileTooSmall {
                value: self.tile_size,
                min: MIN_TILE_SIZE,
            });
        }
        Ok(())
    }

    /// The slice of the configuration the reducer needs.
    pub fn tuning(&self) -> Tuning {
        Tuning {
            move_cost: self.battery_move_cost,
            charge_rate: self.battery_charge_rate,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    fn temp_config_path(name: &str) -> std::path::PathBuf {
        env::temp_dir().join(format!("sunvac-config-test-{}.json", name))
    }

    #[test]
    fn test_defaults_match_the_classic_tuning() {
        let config = GameConfig::default();
        assert_eq!(config.grid_size, 8);
        assert_eq!(config.battery_move_cost, 3);
        assert_eq!(config.battery_charge_rate, 10);
        assert_eq!(config.sun_move_interval, 3000);
        assert_eq!(config.last_level, 1);
        assert_eq!(config.last_score, 0);
        assert_eq!(config.tile_size, 48);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_serializes_as_camel_case() {
        let json = serde_json::to_string(&GameConfig::default()).unwrap();
        assert!(json.contains("\"gridSize\""));
        assert!(json.contains("\"batteryMoveCost\""));
        assert!(json.contains("\"sunMoveInterval\""));
        assert!(json.contains("\"lastLevel\""));
        assert!(!json.contains("grid_size"));
    }

    #[test]
    fn test_partial_blob_fills_in_defaults() {
        let config: GameConfig =
            serde_json::from_str(r#"{"gridSize": 12, "lastScore": 40}"#).unwrap();
        assert_eq!(config.grid_size, 12);
        assert_eq!(config.last_score, 40);
        assert_eq!(config.battery_move_cost, DEFAULT_MOVE_COST);
        assert_eq!(config.sun_move_interval, DEFAULT_SUN_INTERVAL_MS);
    }

    #[test]
    fn test_missing_file_loads_defaults() {
        let path = temp_config_path("missing");
        let _ = fs::remove_file(&path);
        let config = GameConfig::load(&path).unwrap();
        assert_eq!(config, GameConfig::default());
    }

    #[test]
    fn test_save_then_load_round_trips() {
        let path = temp_config_path("roundtrip");
        let mut config = GameConfig::default();
        config.grid_size = 10;
        config.last_level = 5;
        config.last_score = 23;
        config.save(&path).unwrap();
        let loaded = GameConfig::load(&path).unwrap();
        assert_eq!(loaded, config);
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_corrupt_file_is_a_parse_error() {
        let path = temp_config_path("corrupt");
        fs::write(&path, b"this is not json").unwrap();
        let err = GameConfig::load(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = GameConfig::default();
        config.grid_size = 1;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::GridSizeOutOfRange { .. })
        ));

        let mut config = GameConfig::default();
        config.grid_size = 64;
        assert!(config.validate().is_err());

        let mut config = GameConfig::default();
        config.battery_move_cost = -1;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NegativeMoveCost(-1))
        ));

        let mut config = GameConfig::default();
        config.sun_move_interval = 0;
        assert!(matches!(config.validate(), Err(ConfigError::ZeroSunInterval)));

        let mut config = GameConfig::default();
        config.tile_size = 2;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::TileTooSmall { .. })
        ));
    }

    #[test]
    fn test_tuning_extracts_the_reducer_knobs() {
        let mut config = GameConfig::default();
        config.battery_move_cost = 5;
        config.battery_charge_rate = 20;
        let tuning = config.tuning();
        assert_eq!(tuning.move_cost, 5);
        assert_eq!(tuning.charge_rate, 20);
    }
}
