use macroquad::math::{vec2, Rect, Vec2};

use crate::spatial::TileId;

/// A regular grid atlas: tile `id` sits at column `id % columns`, row
/// `id / columns`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpriteAtlas {
    /// Side of one square tile, in atlas pixels.
    pub tile_size: u32,
    /// Tiles per atlas row (atlas width / tile size).
    pub columns: u32,
}

impl SpriteAtlas {
    /// Atlas whose rows are `atlas_width` pixels wide. Always at least one column.
    pub fn new(tile_size: u32, atlas_width: u32) -> Self {
        let columns = if tile_size == 0 {
            1
        } else {
            (atlas_width / tile_size).max(1)
        };
        Self { tile_size, columns }
    }

    /// Source rectangle of `id` inside the atlas image.
    pub fn sprite_rect(&self, id: TileId) -> Rect {
        let local = id.raw();
        let col = local % self.columns;
        let row = local / self.columns;
        let ts = self.tile_size as f32;
        Rect::new(col as f32 * ts, row as f32 * ts, ts, ts)
    }
}

/// A horizontal strip of equally sized animation frames.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationStrip {
    /// Top-left of the first frame.
    pub origin: Vec2,
    /// Size of a single frame.
    pub frame_size: Vec2,
    /// Frames in the strip.
    pub frame_count: u32,
    /// Ticks each frame stays on screen.
    pub ticks_per_frame: u32,
}

impl AnimationStrip {
    /// Frame index shown at `clock` ticks.
    pub fn frame_index(&self, clock: u64) -> u32 {
        let per = u64::from(self.ticks_per_frame.max(1));
        let count = u64::from(self.frame_count.max(1));
        ((clock / per) % count) as u32
    }

    /// Source rectangle of the frame shown at `clock` ticks.
    pub fn frame_rect(&self, clock: u64) -> Rect {
        let i = self.frame_index(clock) as f32;
        let src = self.origin + vec2(i * self.frame_size.x, 0.0);
        Rect::new(src.x, src.y, self.frame_size.x, self.frame_size.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sprite_rect_is_row_major() {
        let atlas = SpriteAtlas::new(16, 64);
        assert_eq!(atlas.columns, 4);
        assert_eq!(atlas.sprite_rect(TileId(0)), Rect::new(0.0, 0.0, 16.0, 16.0));
        assert_eq!(atlas.sprite_rect(TileId(3)), Rect::new(48.0, 0.0, 16.0, 16.0));
        assert_eq!(atlas.sprite_rect(TileId(5)), Rect::new(16.0, 16.0, 16.0, 16.0));
    }

    #[test]
    fn narrow_atlas_still_has_one_column() {
        let atlas = SpriteAtlas::new(32, 16);
        assert_eq!(atlas.columns, 1);
        assert_eq!(atlas.sprite_rect(TileId(2)).y, 64.0);
    }

    #[test]
    fn animation_advances_every_ticks_per_frame_and_wraps() {
        let strip = AnimationStrip {
            origin: Vec2::ZERO,
            frame_size: vec2(48.0, 48.0),
            frame_count: 6,
            ticks_per_frame: 6,
        };
        assert_eq!(strip.frame_index(0), 0);
        assert_eq!(strip.frame_index(5), 0);
        assert_eq!(strip.frame_index(6), 1);
        assert_eq!(strip.frame_index(35), 5);
        assert_eq!(strip.frame_index(36), 0);
        assert_eq!(strip.frame_rect(12), Rect::new(96.0, 0.0, 48.0, 48.0));
    }
}
