// src/loader/json_loader.rs
use crate::error::MapError;
use crate::ir_map::*;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Deserialize)]
struct JsonLayer {
    #[serde(default)]
    data: Vec<u32>,
    #[serde(default)]
    width: u32,
    #[serde(default)]
    height: u32,
    #[serde(default = "default_true")]
    visible: bool,
    #[serde(default)]
    name: String,
    #[serde(rename = "type")]
    kind: Option<String>, // "tilelayer" expected here
}

fn default_true() -> bool {
    true
}

#[derive(Deserialize)]
struct JsonMap {
    width: u32,
    height: u32,
    layers: Vec<JsonLayer>,
}

const INLINE_SOURCE: &str = "<inline>";

/// Decodes Tiled JSON text into an [`IrMap`]. Only visible tile layers are
/// kept; object and image layers are skipped.
pub fn decode_map_str(txt: &str) -> Result<IrMap, MapError> {
    let j: JsonMap = serde_json::from_str(txt).map_err(|source| MapError::Json {
        path: PathBuf::from(INLINE_SOURCE),
        source,
    })?;
    json_to_ir(j)
}

/// Reads and decodes a Tiled JSON map file.
pub fn decode_map_file(path: &Path) -> Result<IrMap, MapError> {
    if path.extension().and_then(|e| e.to_str()) != Some("json") {
        return Err(MapError::InvalidMap(format!(
            "Map file must be a JSON file: {}",
            path.display()
        )));
    }

    let txt = std::fs::read_to_string(path).map_err(|source| MapError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let j: JsonMap = serde_json::from_str(&txt).map_err(|source| MapError::Json {
        path: path.to_path_buf(),
        source,
    })?;

    debug!(path = %path.display(), "decoding map file");
    json_to_ir(j)
}

fn json_to_ir(j: JsonMap) -> Result<IrMap, MapError> {
    let mut layers = Vec::with_capacity(j.layers.len());
    for l in j.layers {
        if l.kind.as_deref().unwrap_or("tilelayer") != "tilelayer" || !l.visible {
            debug!(layer = %l.name, "skipping non-tile or hidden layer");
            continue;
        }

        // Tiled omits per-layer size on some exports; fall back to the map's.
        let width = if l.width == 0 { j.width } else { l.width };
        let height = if l.height == 0 { j.height } else { l.height };
        if l.data.len() != (width as usize) * (height as usize) {
            return Err(MapError::InvalidMap(format!(
                "layer '{}' has {} cells, expected {}x{}",
                l.name,
                l.data.len(),
                width,
                height
            )));
        }

        layers.push(IrLayer::from_gids(l.name, width, &l.data)?);
    }

    Ok(IrMap {
        width: j.width,
        height: j.height,
        layers,
    })
}
