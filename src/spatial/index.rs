use std::collections::HashMap;

use crate::geom::GridPos;

/// 0-based tile id, indexing a sprite atlas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TileId(pub u32);

pub type LayerIdx = u16;

// bits 31..29 are the horizontal/vertical/diagonal flip flags
pub const GID_MASK: u32 = 0x1FFF_FFFF; // keep lower 29 bits (bit 28 is free)

impl TileId {
    /// The bare id.
    #[inline]
    pub fn raw(self) -> u32 {
        self.0
    }

    /// Converts an external 1-based gid (flip flags allowed) to a 0-based id.
    /// Gid 0 is an empty cell and yields `None`.
    #[inline]
    pub fn from_gid(raw_gid: u32) -> Option<Self> {
        let gid = raw_gid & GID_MASK;
        gid.checked_sub(1).map(TileId)
    }
}

/// Where a tile lives inside [`CellIndex`]'s owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileLoc {
    pub layer: LayerIdx,
    pub index: usize,
}

/// Cell -> tile locations, in insertion (layer) order.
#[derive(Debug, Default)]
pub struct CellIndex {
    cells: HashMap<GridPos, Vec<TileLoc>>,
}

impl CellIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a tile. Returns `false` when `layer` already has a tile at `cell`.
    pub fn insert(&mut self, cell: GridPos, loc: TileLoc) -> bool {
        let locs = self.cells.entry(cell).or_default();
        if locs.iter().any(|l| l.layer == loc.layer) {
            return false;
        }
        locs.push(loc);
        true
    }

    pub fn get(&self, cell: GridPos) -> &[TileLoc] {
        self.cells.get(&cell).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.cells.values().map(Vec::len).sum()
    }
}
