use std::time::Duration;

use anyhow::Context;
use grid_rpg::render::{draw_debug, draw_world, Sprites};
use grid_rpg::{
    ActionSet, Control, FixedStep, Game, GameConfig, InputCollector, IrMap, TileMap, KEY_BINDINGS,
};
use macroquad::prelude::*;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

fn window_conf() -> Conf {
    // Conf is built before main runs, so a bad config file falls back here and
    // is reported properly once `run` loads it again.
    let cfg = GameConfig::from_env().unwrap_or_default();
    Conf {
        window_title: "RPG".into(),
        window_width: cfg.screen_width as i32,
        window_height: cfg.screen_height as i32,
        ..Default::default()
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    init_tracing();
    if let Err(err) = run().await {
        error!(error = %format!("{err:#}"), "startup_failed");
        std::process::exit(1);
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}

fn load_map(cfg: &GameConfig) -> anyhow::Result<TileMap> {
    match &cfg.map_path {
        Some(path) => {
            TileMap::load(path).with_context(|| format!("Loading map {}", path.display()))
        }
        None => TileMap::from_ir(IrMap::field(cfg.map_width, cfg.map_height, cfg.wall_tile()))
            .context("Building generated map"),
    }
}

fn poll_keyboard(input: &mut InputCollector) {
    let mut pressed = ActionSet::default();
    let mut released = ActionSet::default();
    let mut held = ActionSet::default();
    for &(key, action) in KEY_BINDINGS {
        if is_key_pressed(key) {
            pressed.set(action, true);
        }
        if is_key_released(key) {
            released.set(action, true);
        }
        if is_key_down(key) {
            held.set(action, true);
        }
    }
    let (mx, my) = mouse_position();
    input.record_frame(pressed, released, held, vec2(mx, my));
}

async fn run() -> anyhow::Result<()> {
    let cfg = GameConfig::from_env().context("Loading config")?;
    let map = load_map(&cfg)?;
    let sprites = Sprites::load(&cfg).await?;
    info!(
        width = map.width(),
        height = map.height(),
        move_interval = cfg.move_interval,
        tile_size = cfg.tile_size,
        "game_ready"
    );

    let mut game = Game::new(&cfg, map);
    let mut clock = FixedStep::new(cfg.ticks_per_second, cfg.max_ticks_per_frame);
    let mut input = InputCollector::default();

    loop {
        poll_keyboard(&mut input);

        let plan = clock.advance(Duration::from_secs_f32(get_frame_time().max(0.0)));
        if !plan.dropped_backlog.is_zero() {
            warn!(
                dropped_ms = plan.dropped_backlog.as_millis() as u64,
                "sim_clamp_triggered"
            );
        }
        for _ in 0..plan.ticks_to_run {
            let snapshot = input.snapshot_for_tick();
            if game.update(&snapshot) == Control::Exit {
                return Ok(());
            }
        }

        draw_world(&game, &sprites);
        draw_debug(&game, input.cursor());

        next_frame().await;
    }
}
