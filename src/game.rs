use macroquad::math::vec2;
use tracing::{debug, info};

use crate::camera::Camera;
use crate::config::GameConfig;
use crate::geom::Direction;
use crate::input::{Control, InputAction, InputSnapshot, IntentResolver};
use crate::map::TileMap;
use crate::movement::MoveScheduler;
use crate::player::Player;

/// All mutable session state, advanced one tick at a time.
#[derive(Debug)]
pub struct Game {
    tick: u64,
    map: TileMap,
    player: Player,
    camera: Camera,
    resolver: IntentResolver,
    scheduler: MoveScheduler,
}

impl Game {
    /// New session on `map` with the player at the configured start cell.
    pub fn new(config: &GameConfig, map: TileMap) -> Self {
        let viewport = vec2(config.screen_width as f32, config.screen_height as f32);
        Self {
            tick: 0,
            map,
            player: Player::new(config.player_start),
            camera: Camera::new(viewport),
            resolver: IntentResolver::default(),
            scheduler: MoveScheduler::new(
                config.move_interval,
                config.wall_tile(),
                config.tile_size,
            ),
        }
    }

    /// One simulation step: advance the tick counter, resolve input, gate
    /// movement, then apply camera controls and the animation clock.
    pub fn update(&mut self, input: &InputSnapshot) -> Control {
        self.tick = self.tick.wrapping_add(1);

        if self.resolver.apply(input) == Control::Exit {
            info!(tick = self.tick, reason = "exit_key", "shutdown_requested");
            return Control::Exit;
        }

        self.scheduler.step(
            self.tick,
            self.resolver.direction(),
            &self.map,
            &mut self.player,
            &mut self.camera,
        );

        self.apply_camera_controls(input);
        self.player.tick();
        Control::Continue
    }

    fn apply_camera_controls(&mut self, input: &InputSnapshot) {
        if input.just_pressed.contains(InputAction::ResetCamera) {
            self.camera.reset();
            debug!("camera reset");
        }
        let held = &input.held;
        if held.contains(InputAction::ZoomIn) {
            self.camera.zoom_by(1);
        }
        if held.contains(InputAction::ZoomOut) {
            self.camera.zoom_by(-1);
        }
        if held.contains(InputAction::RotateCw) {
            self.camera.rotate_by(1);
        }
        if held.contains(InputAction::RotateCcw) {
            self.camera.rotate_by(-1);
        }
    }

    /// Ticks run so far.
    pub fn tick(&self) -> u64 {
        self.tick
    }

    /// The map being played.
    pub fn map(&self) -> &TileMap {
        &self.map
    }

    /// The player.
    pub fn player(&self) -> &Player {
        &self.player
    }

    /// The camera.
    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// Current movement intent.
    pub fn direction(&self) -> Direction {
        self.resolver.direction()
    }

    /// Camera, player and cursor readout for the debug overlay.
    pub fn debug_text(&self, cursor_x: f32, cursor_y: f32) -> String {
        let (wx, wy) = self.camera.screen_to_world(cursor_x, cursor_y);
        let cursor = if wx.is_nan() || wy.is_nan() {
            "N/A".to_string()
        } else {
            format!("{wx:.2},{wy:.2}")
        };
        format!(
            "{}\n{}\nCursor World Pos: {}",
            self.camera, self.player, cursor
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::GridPos;
    use crate::ir_map::IrMap;
    use InputAction::*;

    fn game() -> Game {
        let cfg = GameConfig::default();
        let map = TileMap::from_ir(IrMap::field(60, 40, cfg.wall_tile())).expect("field");
        Game::new(&cfg, map)
    }

    fn idle(game: &mut Game, ticks: u64) {
        for _ in 0..ticks {
            game.update(&InputSnapshot::default());
        }
    }

    #[test]
    fn first_step_happens_on_the_fifth_tick() {
        let mut g = game();
        g.update(&InputSnapshot::pressed([MoveRight]));
        idle(&mut g, 3);
        assert_eq!(g.player().position, GridPos::new(10, 7));
        idle(&mut g, 1);
        assert_eq!(g.tick(), 5);
        assert_eq!(g.player().position, GridPos::new(11, 7));
        assert_eq!(g.camera().position, vec2(20.0, 0.0));
    }

    #[test]
    fn holding_a_direction_steps_every_interval() {
        let mut g = game();
        g.update(&InputSnapshot::pressed([MoveDown]));
        idle(&mut g, 19);
        assert_eq!(g.tick(), 20);
        assert_eq!(g.player().position, GridPos::new(10, 11));
    }

    #[test]
    fn border_wall_stops_the_player() {
        let mut g = game();
        g.update(&InputSnapshot::pressed([MoveUp]));
        idle(&mut g, 100);
        // row 0 is wall, so the player stops on row 1
        assert_eq!(g.player().position, GridPos::new(10, 1));
        assert_eq!(g.camera().position, vec2(0.0, -120.0));
    }

    #[test]
    fn release_stops_movement() {
        let mut g = game();
        g.update(&InputSnapshot::pressed([MoveLeft]));
        g.update(&InputSnapshot::released([MoveLeft]));
        idle(&mut g, 10);
        assert_eq!(g.direction(), Direction::None);
        assert_eq!(g.player().position, GridPos::new(10, 7));
    }

    #[test]
    fn exit_returns_before_moving() {
        let mut g = game();
        g.update(&InputSnapshot::pressed([MoveRight]));
        idle(&mut g, 3);
        assert_eq!(g.update(&InputSnapshot::pressed([Exit])), Control::Exit);
        assert_eq!(g.player().position, GridPos::new(10, 7));
    }

    #[test]
    fn camera_controls_zoom_rotate_and_reset() {
        let mut g = game();
        let held = InputSnapshot {
            held: [ZoomIn, RotateCcw].into(),
            ..InputSnapshot::default()
        };
        g.update(&held);
        g.update(&held);
        assert_eq!(g.camera().zoom_factor, 2);
        assert_eq!(g.camera().rotation_degrees, 358);

        g.update(&InputSnapshot::pressed([ResetCamera]));
        assert_eq!(g.camera().zoom_factor, 0);
        assert_eq!(g.camera().rotation_degrees, 0);
    }

    #[test]
    fn animation_clock_advances_every_tick() {
        let mut g = game();
        idle(&mut g, 7);
        assert_eq!(g.player().animation_clock, 7);
    }

    #[test]
    fn debug_text_reports_cursor_world_position() {
        let g = game();
        let text = g.debug_text(30.0, 40.0);
        assert!(text.contains("CAM: (0.0, 0.0), R: 0, S: 0"));
        assert!(text.contains("P: (10, 7)"));
        assert!(text.ends_with("Cursor World Pos: 30.00,40.00"));
    }
}
