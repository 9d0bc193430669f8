use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::ConfigError;
use crate::geom::GridPos;
use crate::spatial::TileId;

/// Environment variable naming an optional JSON config file.
pub const CONFIG_ENV_VAR: &str = "GRID_RPG_CONFIG";

/// Startup configuration. Every field has a default, so `{}` is a valid file.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Logical screen width in pixels.
    pub screen_width: u32,
    /// Logical screen height in pixels.
    pub screen_height: u32,
    /// Pixels per grid cell.
    pub tile_size: u32,
    /// Ticks between two player steps.
    pub move_interval: u32,
    /// Simulation rate.
    pub ticks_per_second: u32,
    /// Upper bound on catch-up ticks run in one frame.
    pub max_ticks_per_frame: u32,
    /// 0-based id of the impassable tile.
    pub wall_tile_id: u32,
    /// Player's starting cell.
    pub player_start: GridPos,
    /// Tiled JSON map; a generated field is used when absent.
    pub map_path: Option<PathBuf>,
    /// Width of the generated field, in tiles.
    pub map_width: u32,
    /// Height of the generated field, in tiles.
    pub map_height: u32,
    /// Player sprite strip image.
    pub player_sprite: PathBuf,
    /// Tile atlas image.
    pub tileset_sprite: PathBuf,
    /// Side of one atlas tile in pixels.
    pub atlas_tile_size: u32,
    /// Side of one player frame in pixels.
    pub player_frame_size: u32,
    /// Frames in the player strip.
    pub player_frame_count: u32,
    /// Ticks each player frame is shown.
    pub player_ticks_per_frame: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            screen_width: 480,
            screen_height: 320,
            tile_size: 20,
            move_interval: 5,
            ticks_per_second: 60,
            max_ticks_per_frame: 5,
            wall_tile_id: 1,
            player_start: GridPos::new(10, 7),
            map_path: None,
            map_width: 60,
            map_height: 40,
            player_sprite: PathBuf::from("assets/sprites/characters/player.png"),
            tileset_sprite: PathBuf::from("assets/sprites/tilesets/grass.png"),
            atlas_tile_size: 16,
            player_frame_size: 48,
            player_frame_count: 6,
            player_ticks_per_frame: 6,
        }
    }
}

impl GameConfig {
    /// Parses and validates config JSON.
    pub fn from_json_str(txt: &str) -> Result<Self, ConfigError> {
        let cfg: GameConfig = serde_json::from_str(txt).map_err(|source| ConfigError::Json {
            path: PathBuf::from("<inline>"),
            source,
        })?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Reads, parses and validates a config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let txt = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let cfg: GameConfig = serde_json::from_str(&txt).map_err(|source| ConfigError::Json {
            path: path.to_path_buf(),
            source,
        })?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Loads the file named by [`CONFIG_ENV_VAR`], or defaults when unset.
    pub fn from_env() -> Result<Self, ConfigError> {
        match std::env::var_os(CONFIG_ENV_VAR) {
            Some(path) => Self::load(Path::new(&path)),
            None => Ok(Self::default()),
        }
    }

    /// Rejects values the tick loop cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let checks: [(&'static str, u32); 6] = [
            ("screen_width", self.screen_width),
            ("screen_height", self.screen_height),
            ("tile_size", self.tile_size),
            ("move_interval", self.move_interval),
            ("ticks_per_second", self.ticks_per_second),
            ("max_ticks_per_frame", self.max_ticks_per_frame),
        ];
        for (field, value) in checks {
            if value == 0 {
                return Err(ConfigError::Invalid {
                    field,
                    reason: "must be greater than zero",
                });
            }
        }
        for (field, value) in [("map_width", self.map_width), ("map_height", self.map_height)] {
            if value == 0 || value > i32::MAX as u32 {
                return Err(ConfigError::Invalid {
                    field,
                    reason: "must be between 1 and i32::MAX",
                });
            }
        }
        Ok(())
    }

    /// The configured wall id.
    pub fn wall_tile(&self) -> TileId {
        TileId(self.wall_tile_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_gives_defaults() {
        let cfg = GameConfig::from_json_str("{}").expect("defaults");
        assert_eq!(cfg, GameConfig::default());
        assert_eq!(cfg.move_interval, 5);
        assert_eq!(cfg.tile_size, 20);
        assert_eq!(cfg.player_start, GridPos::new(10, 7));
    }

    #[test]
    fn overrides_are_applied() {
        let cfg = GameConfig::from_json_str(
            r#"{ "move_interval": 3, "player_start": { "x": 1, "y": 2 }, "map_path": "maps/a.json" }"#,
        )
        .expect("parse");
        assert_eq!(cfg.move_interval, 3);
        assert_eq!(cfg.player_start, GridPos::new(1, 2));
        assert_eq!(cfg.map_path.as_deref(), Some(Path::new("maps/a.json")));
    }

    #[test]
    fn zero_interval_is_rejected() {
        let err = GameConfig::from_json_str(r#"{ "move_interval": 0 }"#).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                field: "move_interval",
                ..
            }
        ));
    }

    #[test]
    fn field_size_must_fit_grid_coordinates() {
        let err = GameConfig::from_json_str(r#"{ "map_height": 0 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "map_height", .. }));

        let err = GameConfig::from_json_str(r#"{ "map_width": 4294967295 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "map_width", .. }));

        let cfg = GameConfig::from_json_str(r#"{ "map_width": 2147483647, "map_height": 1 }"#);
        assert!(cfg.is_ok());
    }

    #[test]
    fn malformed_json_is_a_json_error() {
        let err = GameConfig::from_json_str("{ nope").unwrap_err();
        assert!(matches!(err, ConfigError::Json { .. }));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = GameConfig::load(Path::new("/definitely/not/here.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
