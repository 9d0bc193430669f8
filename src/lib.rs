#![warn(missing_docs)]

//! Minimal grid-based tile RPG for Macroquad: grid movement, wall collision
//! and a world-to-screen camera.

mod camera;
mod clock;
mod config;
mod error;
mod game;
mod geom;
mod input;
mod ir_map;
mod loader {
    pub mod json_loader;
}
mod map;
mod movement;
mod player;
pub mod render;
mod spatial;
mod tileset;

pub use camera::{Camera, ZOOM_BASE};
pub use clock::{FixedStep, StepPlan};
pub use config::{GameConfig, CONFIG_ENV_VAR};
pub use error::{ConfigError, MapError};
pub use game::Game;
pub use geom::{Direction, GridPos};
pub use input::{
    ActionSet, Control, InputAction, InputCollector, InputSnapshot, IntentResolver, KEY_BINDINGS,
};
pub use ir_map::{IrLayer, IrMap, IrTile};
pub use loader::json_loader::{decode_map_file, decode_map_str};
pub use map::{Layer, Tile, TileMap};
pub use movement::{collides, MoveOutcome, MoveScheduler};
pub use player::Player;
pub use spatial::TileId;
pub use tileset::{AnimationStrip, SpriteAtlas};
