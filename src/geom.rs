use std::fmt;

use macroquad::math::{vec2, Vec2};
use serde::Deserialize;

/// Integer cell coordinate on the tile grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
pub struct GridPos {
    /// Column.
    pub x: i32,
    /// Row, growing downwards.
    pub y: i32,
}

impl GridPos {
    /// Cell at `(x, y)`.
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The neighbouring cell one step in `dir`. `Direction::None` returns `self`.
    #[inline]
    pub fn step(self, dir: Direction) -> Self {
        let (dx, dy) = dir.delta();
        Self::new(self.x + dx, self.y + dy)
    }

    /// Top-left pixel of this cell, shifted by `anchor` for sprite placement.
    #[inline]
    pub fn to_pixels(self, tile_size: u32, anchor: Vec2) -> Vec2 {
        let ts = tile_size as f32;
        vec2(self.x as f32 * ts, self.y as f32 * ts) + anchor
    }
}

impl fmt::Display for GridPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Resolved movement intent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Direction {
    /// Standing still.
    #[default]
    None,
    /// Towards -x.
    Left,
    /// Towards +x.
    Right,
    /// Towards -y.
    Up,
    /// Towards +y.
    Down,
}

impl Direction {
    /// Grid delta of one step.
    #[inline]
    pub const fn delta(self) -> (i32, i32) {
        match self {
            Direction::None => (0, 0),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
        }
    }

    /// The direction pointing the other way on the same axis.
    #[inline]
    pub const fn opposite(self) -> Self {
        match self {
            Direction::None => Direction::None,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
        }
    }
}
