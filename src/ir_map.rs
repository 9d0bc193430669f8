//! Decoded, format-agnostic map data handed to [`TileMap`](crate::TileMap).

use crate::error::MapError;
use crate::spatial::TileId;

/// Canonical decoded map: dimensions plus layers of `(id, x, y)` triples.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IrMap {
    /// Width in tiles.
    pub width: u32,
    /// Height in tiles.
    pub height: u32,
    /// Draw order: array order.
    pub layers: Vec<IrLayer>,
}

/// One layer of decoded tiles. May be sparse.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IrLayer {
    /// Layer name, used in error messages.
    pub name: String,
    /// Tiles in this layer, already in the 0-based id space.
    pub tiles: Vec<IrTile>,
}

/// A single decoded tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IrTile {
    /// 0-based tile id.
    pub id: TileId,
    /// Column.
    pub x: i32,
    /// Row.
    pub y: i32,
}

impl IrLayer {
    /// Builds a layer from a row-major array of external 1-based gids.
    /// Gid 0 leaves the cell empty.
    pub fn from_gids(name: impl Into<String>, width: u32, data: &[u32]) -> Result<Self, MapError> {
        let name = name.into();
        if width == 0 {
            return Err(MapError::InvalidMap(format!(
                "layer '{name}' has zero width"
            )));
        }
        let w = width as usize;
        let mut tiles = Vec::with_capacity(data.len());
        for (idx, &raw_gid) in data.iter().enumerate() {
            let Some(id) = TileId::from_gid(raw_gid) else {
                continue;
            };
            let (Ok(x), Ok(y)) = (i32::try_from(idx % w), i32::try_from(idx / w)) else {
                return Err(MapError::InvalidMap(format!(
                    "layer '{name}' is too large to address"
                )));
            };
            tiles.push(IrTile { id, x, y });
        }
        Ok(Self { name, tiles })
    }
}

impl IrMap {
    /// A `width` x `height` field of ground tiles (id 0) with a ring of
    /// `wall` tiles on a second layer along the map edge. Sides beyond
    /// `i32::MAX` are clamped.
    pub fn field(width: u32, height: u32, wall: TileId) -> Self {
        let width = width.min(i32::MAX as u32);
        let height = height.min(i32::MAX as u32);
        let (w, h) = (width as i32, height as i32);
        let mut ground = Vec::with_capacity(width as usize * height as usize);
        let mut walls = Vec::new();
        for y in 0..h {
            for x in 0..w {
                ground.push(IrTile {
                    id: TileId(0),
                    x,
                    y,
                });
                if x == 0 || y == 0 || x == w - 1 || y == h - 1 {
                    walls.push(IrTile { id: wall, x, y });
                }
            }
        }
        Self {
            width,
            height,
            layers: vec![
                IrLayer {
                    name: "ground".into(),
                    tiles: ground,
                },
                IrLayer {
                    name: "walls".into(),
                    tiles: walls,
                },
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_gids_skips_empty_cells_and_lays_out_row_major() {
        let layer = IrLayer::from_gids("L", 3, &[0, 2, 0, 5, 0, 1]).expect("layer");
        assert_eq!(
            layer.tiles,
            vec![
                IrTile { id: TileId(1), x: 1, y: 0 },
                IrTile { id: TileId(4), x: 0, y: 1 },
                IrTile { id: TileId(0), x: 2, y: 1 },
            ]
        );
    }

    #[test]
    fn from_gids_rejects_zero_width() {
        let err = IrLayer::from_gids("flat", 0, &[1]).unwrap_err();
        assert!(matches!(err, MapError::InvalidMap(_)));
    }

    #[test]
    fn field_clamps_sides_that_do_not_fit_i32() {
        let map = IrMap::field(u32::MAX, 0, TileId(1));
        assert_eq!(map.width, i32::MAX as u32);
        assert!(map.layers.iter().all(|l| l.tiles.is_empty()));
    }

    #[test]
    fn field_has_ground_everywhere_and_walls_on_the_border() {
        let map = IrMap::field(4, 3, TileId(9));
        assert_eq!(map.layers[0].tiles.len(), 12);
        // 4x3 ring: everything except the two inner cells
        assert_eq!(map.layers[1].tiles.len(), 10);
        assert!(map.layers[1]
            .tiles
            .iter()
            .all(|t| t.id == TileId(9) && !(t.y == 1 && (t.x == 1 || t.x == 2))));
    }
}
