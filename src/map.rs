use std::path::Path;

use tracing::debug;

use crate::error::MapError;
use crate::geom::GridPos;
use crate::ir_map::IrMap;
use crate::loader::json_loader::decode_map_file;
use crate::spatial::{CellIndex, LayerIdx, TileId, TileLoc};

/// A placed tile. Immutable once the map is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tile {
    /// Atlas id.
    pub id: TileId,
    /// Grid cell.
    pub position: GridPos,
}

/// One draw layer of a [`TileMap`].
#[derive(Debug, Clone, PartialEq)]
pub struct Layer {
    /// Name from the decoded map.
    pub name: String,
    /// Tiles, at most one per cell.
    pub tiles: Vec<Tile>,
}

/// Layered, immutable tile grid with per-cell lookup.
#[derive(Debug)]
pub struct TileMap {
    width: u32,
    height: u32,
    layers: Vec<Layer>,
    index: CellIndex,
}

impl TileMap {
    /// Decodes a Tiled JSON file and builds the map from it.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, MapError> {
        let ir = decode_map_file(path.as_ref())?;
        Self::from_ir(ir)
    }

    /// Builds the map from decoded data, rejecting empty dimensions, tiles
    /// outside the map and two tiles on one cell of the same layer.
    pub fn from_ir(ir: IrMap) -> Result<Self, MapError> {
        if ir.width == 0 || ir.height == 0 {
            return Err(MapError::InvalidMap(format!(
                "map dimensions must be non-zero, got {}x{}",
                ir.width, ir.height
            )));
        }
        if ir.layers.len() > LayerIdx::MAX as usize {
            return Err(MapError::InvalidMap(format!(
                "too many layers: {}",
                ir.layers.len()
            )));
        }

        let mut index = CellIndex::new();
        let mut layers = Vec::with_capacity(ir.layers.len());

        for (lz, layer) in ir.layers.into_iter().enumerate() {
            let mut tiles = Vec::with_capacity(layer.tiles.len());
            for t in layer.tiles {
                let in_bounds = t.x >= 0
                    && t.y >= 0
                    && (t.x as u32) < ir.width
                    && (t.y as u32) < ir.height;
                if !in_bounds {
                    return Err(MapError::TileOutOfBounds {
                        layer: layer.name,
                        x: t.x,
                        y: t.y,
                        width: ir.width,
                        height: ir.height,
                    });
                }

                let position = GridPos::new(t.x, t.y);
                let loc = TileLoc {
                    layer: lz as LayerIdx,
                    index: tiles.len(),
                };
                if !index.insert(position, loc) {
                    return Err(MapError::DuplicateTile {
                        layer: layer.name,
                        x: t.x,
                        y: t.y,
                    });
                }
                tiles.push(Tile { id: t.id, position });
            }
            layers.push(Layer {
                name: layer.name,
                tiles,
            });
        }

        debug!(
            width = ir.width,
            height = ir.height,
            layers = layers.len(),
            tiles = index.len(),
            "tile map built"
        );

        Ok(Self {
            width: ir.width,
            height: ir.height,
            layers,
            index,
        })
    }

    /// Width in tiles.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in tiles.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Layers in draw order.
    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    /// Every tile at `(x, y)`, bottom layer first. Empty for unpopulated or
    /// out-of-bounds cells.
    pub fn tiles_at(&self, x: i32, y: i32) -> impl Iterator<Item = &Tile> + '_ {
        self.index
            .get(GridPos::new(x, y))
            .iter()
            .map(move |loc| &self.layers[loc.layer as usize].tiles[loc.index])
    }

    /// Whether any tile at `cell` carries `wall`.
    pub fn is_wall(&self, cell: GridPos, wall: TileId) -> bool {
        self.tiles_at(cell.x, cell.y).any(|t| t.id == wall)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir_map::{IrLayer, IrTile};

    fn tile(id: u32, x: i32, y: i32) -> IrTile {
        IrTile {
            id: TileId(id),
            x,
            y,
        }
    }

    fn two_layer_map() -> TileMap {
        TileMap::from_ir(IrMap {
            width: 8,
            height: 8,
            layers: vec![
                IrLayer {
                    name: "ground".into(),
                    tiles: vec![tile(0, 5, 5), tile(0, 1, 1)],
                },
                IrLayer {
                    name: "walls".into(),
                    tiles: vec![tile(3, 5, 5)],
                },
            ],
        })
        .expect("valid map")
    }

    #[test]
    fn tiles_at_returns_every_layer_in_order() {
        let map = two_layer_map();
        let ids: Vec<_> = map.tiles_at(5, 5).map(|t| t.id).collect();
        assert_eq!(ids, vec![TileId(0), TileId(3)]);
        assert_eq!(map.tiles_at(1, 1).count(), 1);
        assert_eq!(map.tiles_at(2, 2).count(), 0);
    }

    #[test]
    fn is_wall_checks_all_layers() {
        let map = two_layer_map();
        assert!(map.is_wall(GridPos::new(5, 5), TileId(3)));
        assert!(!map.is_wall(GridPos::new(1, 1), TileId(3)));
        assert!(!map.is_wall(GridPos::new(-4, 100), TileId(3)));
    }

    #[test]
    fn lookup_on_empty_map_is_empty() {
        let map = TileMap::from_ir(IrMap {
            width: 3,
            height: 3,
            layers: Vec::new(),
        })
        .expect("empty map");
        assert_eq!(map.tiles_at(0, 0).count(), 0);
        assert!(!map.is_wall(GridPos::new(0, 0), TileId(0)));
    }

    #[test]
    fn rejects_duplicate_cell_within_layer() {
        let err = TileMap::from_ir(IrMap {
            width: 4,
            height: 4,
            layers: vec![IrLayer {
                name: "dup".into(),
                tiles: vec![tile(0, 2, 2), tile(1, 2, 2)],
            }],
        })
        .unwrap_err();
        assert!(matches!(err, MapError::DuplicateTile { ref layer, x: 2, y: 2 } if layer == "dup"));
    }

    #[test]
    fn rejects_tiles_outside_the_map() {
        let err = TileMap::from_ir(IrMap {
            width: 2,
            height: 2,
            layers: vec![IrLayer {
                name: "edge".into(),
                tiles: vec![tile(0, 2, 0)],
            }],
        })
        .unwrap_err();
        assert!(matches!(err, MapError::TileOutOfBounds { x: 2, y: 0, .. }));

        let err = TileMap::from_ir(IrMap {
            width: 2,
            height: 2,
            layers: vec![IrLayer {
                name: "neg".into(),
                tiles: vec![tile(0, -1, 0)],
            }],
        })
        .unwrap_err();
        assert!(matches!(err, MapError::TileOutOfBounds { x: -1, .. }));
    }

    #[test]
    fn rejects_zero_dimensions() {
        let err = TileMap::from_ir(IrMap::default()).unwrap_err();
        assert!(matches!(err, MapError::InvalidMap(_)));
    }
}
