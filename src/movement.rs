use tracing::debug;

use crate::camera::Camera;
use crate::geom::{Direction, GridPos};
use crate::map::TileMap;
use crate::player::Player;
use crate::spatial::TileId;

/// Result of one tick of the movement scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// Not a movement tick.
    Waiting,
    /// Movement tick, but no direction is active.
    Idle,
    /// A wall occupies the destination cell.
    Blocked(GridPos),
    /// The player stepped into the given cell.
    Moved(GridPos),
}

/// Whether the cell one step from `from` in `dir` holds a `wall` tile.
/// `Direction::None` never collides.
pub fn collides(map: &TileMap, from: GridPos, dir: Direction, wall: TileId) -> bool {
    if dir == Direction::None {
        return false;
    }
    map.is_wall(from.step(dir), wall)
}

/// Lets the player take one grid step every `move_interval` ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveScheduler {
    move_interval: u64,
    wall: TileId,
    tile_size: u32,
}

impl MoveScheduler {
    /// `move_interval` of 0 is treated as 1.
    pub fn new(move_interval: u32, wall: TileId, tile_size: u32) -> Self {
        Self {
            move_interval: u64::from(move_interval.max(1)),
            wall,
            tile_size,
        }
    }

    /// Ticks between steps.
    pub fn move_interval(&self) -> u64 {
        self.move_interval
    }

    /// A step is attempted on ticks that are multiples of the interval.
    #[inline]
    pub fn is_move_tick(&self, tick: u64) -> bool {
        tick % self.move_interval == 0
    }

    /// Runs the gate for `tick`. On success the player moves one cell and the
    /// camera shifts by one tile in the same direction.
    pub fn step(
        &self,
        tick: u64,
        dir: Direction,
        map: &TileMap,
        player: &mut Player,
        camera: &mut Camera,
    ) -> MoveOutcome {
        if !self.is_move_tick(tick) {
            return MoveOutcome::Waiting;
        }
        if dir == Direction::None {
            return MoveOutcome::Idle;
        }

        player.facing = dir;
        let target = player.position.step(dir);
        if collides(map, player.position, dir, self.wall) {
            debug!(tick, from = %player.position, to = %target, "colliding with wall");
            return MoveOutcome::Blocked(target);
        }

        let (dx, dy) = dir.delta();
        let ts = self.tile_size as f32;
        player.position = target;
        camera.translate(dx as f32 * ts, dy as f32 * ts);
        debug!(tick, to = %target, "player stepped");
        MoveOutcome::Moved(target)
    }
}
