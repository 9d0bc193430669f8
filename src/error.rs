use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while decoding or building a tile map.
#[derive(Debug, Error)]
pub enum MapError {
    /// The map file could not be read.
    #[error("failed to read map file {path}: {source}")]
    Io {
        /// Path that failed.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
    /// The map file is not valid JSON for the expected shape.
    #[error("failed to parse map JSON {path}: {source}")]
    Json {
        /// Path that failed (`<inline>` for string input).
        path: PathBuf,
        /// Underlying serde error.
        #[source]
        source: serde_json::Error,
    },
    /// Structural problem with the map (dimensions, format, layer size).
    #[error("invalid map: {0}")]
    InvalidMap(String),
    /// Two tiles of one layer occupy the same cell.
    #[error("layer '{layer}' has more than one tile at ({x}, {y})")]
    DuplicateTile {
        /// Layer name.
        layer: String,
        /// Cell column.
        x: i32,
        /// Cell row.
        y: i32,
    },
    /// A tile lies outside the map's width/height.
    #[error("layer '{layer}' has a tile at ({x}, {y}) outside the {width}x{height} map")]
    TileOutOfBounds {
        /// Layer name.
        layer: String,
        /// Cell column.
        x: i32,
        /// Cell row.
        y: i32,
        /// Map width in tiles.
        width: u32,
        /// Map height in tiles.
        height: u32,
    },
}

/// Errors raised while loading startup configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("failed to read config file {path}: {source}")]
    Io {
        /// Path that failed.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
    /// The config file is not valid JSON for [`GameConfig`](crate::GameConfig).
    #[error("failed to parse config {path}: {source}")]
    Json {
        /// Path that failed (`<inline>` for string input).
        path: PathBuf,
        /// Underlying serde error.
        #[source]
        source: serde_json::Error,
    },
    /// A value parsed but is unusable.
    #[error("invalid config value for `{field}`: {reason}")]
    Invalid {
        /// Field name.
        field: &'static str,
        /// What is wrong with it.
        reason: &'static str,
    },
}
