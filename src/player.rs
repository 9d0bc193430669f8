use std::fmt;

use crate::geom::{Direction, GridPos};

/// The single player actor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Player {
    /// Current grid cell.
    pub position: GridPos,
    /// Last direction the player stepped or tried to step in.
    pub facing: Direction,
    /// Ticks since the session started, drives sprite frames.
    pub animation_clock: u64,
}

impl Player {
    /// Player standing at `position`.
    pub fn new(position: GridPos) -> Self {
        Self {
            position,
            ..Self::default()
        }
    }

    /// Advances the animation clock by one tick.
    #[inline]
    pub fn tick(&mut self) {
        self.animation_clock = self.animation_clock.wrapping_add(1);
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P: {}", self.position)
    }
}
