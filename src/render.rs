//! Macroquad drawing of a [`Game`]. Reads game state, never mutates it.

use anyhow::Context;
use macroquad::prelude::*;

use crate::config::GameConfig;
use crate::game::Game;
use crate::tileset::{AnimationStrip, SpriteAtlas};

const HELP_TEXT: &str = "Move (WASD/Arrows)\nReset (Space)\nZoom (Q/E) Rotate (R/T)";
const FONT_SIZE: f32 = 16.0;
const LINE_HEIGHT: f32 = 14.0;

/// Textures and sprite lookups owned by the renderer.
pub struct Sprites {
    tileset: Texture2D,
    player: Texture2D,
    atlas: SpriteAtlas,
    strip: AnimationStrip,
    tile_size: u32,
}

impl Sprites {
    /// Loads both sprite sheets named in `config`.
    pub async fn load(config: &GameConfig) -> anyhow::Result<Self> {
        let tileset = load_png(&config.tileset_sprite).await?;
        let player = load_png(&config.player_sprite).await?;

        let frame = config.player_frame_size as f32;
        Ok(Self {
            atlas: SpriteAtlas::new(config.atlas_tile_size, tileset.width() as u32),
            strip: AnimationStrip {
                origin: Vec2::ZERO,
                frame_size: vec2(frame, frame),
                frame_count: config.player_frame_count,
                ticks_per_frame: config.player_ticks_per_frame,
            },
            tileset,
            player,
            tile_size: config.tile_size,
        })
    }
}

async fn load_png(path: &std::path::Path) -> anyhow::Result<Texture2D> {
    let path_str = path
        .to_str()
        .with_context(|| format!("Texture path is not UTF-8: {}", path.display()))?;
    let tex = load_texture(path_str)
        .await
        .with_context(|| format!("Loading texture {}", path.display()))?;
    tex.set_filter(FilterMode::Nearest);
    Ok(tex)
}

/// Draws a `size` sprite whose world top-left is `world` through the camera.
fn draw_world_sprite(tex: &Texture2D, src: Rect, world: Vec2, size: Vec2, game: &Game) {
    let cam = game.camera();
    let m = cam.world_to_screen();
    let scale = cam.scale();
    let center = m.transform_point2(world + size * 0.5);
    let dest = size * scale;

    draw_texture_ex(
        tex,
        center.x - dest.x * 0.5,
        center.y - dest.y * 0.5,
        WHITE,
        DrawTextureParams {
            source: Some(src),
            dest_size: Some(dest),
            rotation: (cam.rotation_degrees as f32).to_radians(),
            ..Default::default()
        },
    );
}

/// Map layers in order, then the player on top.
pub fn draw_world(game: &Game, sprites: &Sprites) {
    clear_background(BLACK);

    let ts = sprites.tile_size as f32;
    let tile_size = vec2(ts, ts);
    for layer in game.map().layers() {
        for tile in &layer.tiles {
            draw_world_sprite(
                &sprites.tileset,
                sprites.atlas.sprite_rect(tile.id),
                tile.position.to_pixels(sprites.tile_size, Vec2::ZERO),
                tile_size,
                game,
            );
        }
    }

    let player = game.player();
    let frame = sprites.strip.frame_size;
    // center the frame on the player's cell
    let anchor = (tile_size - frame) * 0.5;
    draw_world_sprite(
        &sprites.player,
        sprites.strip.frame_rect(player.animation_clock),
        player.position.to_pixels(sprites.tile_size, anchor),
        frame,
        game,
    );
}

/// FPS and key help at the top, camera/player/cursor readout at the bottom.
pub fn draw_debug(game: &Game, cursor: Vec2) {
    let top = format!("FPS: {}\n{}", get_fps(), HELP_TEXT);
    draw_lines(&top, 0.0, LINE_HEIGHT);

    let bottom = game.debug_text(cursor.x, cursor.y);
    let lines = bottom.lines().count() as f32;
    draw_lines(&bottom, 0.0, screen_height() - lines * LINE_HEIGHT + LINE_HEIGHT * 0.5);
}

fn draw_lines(text: &str, x: f32, y: f32) {
    for (i, line) in text.lines().enumerate() {
        draw_text(line, x, y + i as f32 * LINE_HEIGHT, FONT_SIZE, WHITE);
    }
}
