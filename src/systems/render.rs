//! Draw pass.
//!
//! Runs as an exclusive system at the end of the frame. It syncs sheet
//! textures with the [`SheetStore`], draws the terrain as flat tiles, then
//! every visible [`Sprite`] in z order into the fixed-resolution [`RenderTarget`] and scales that onto
//! the window. Sprites standing in tall grass come out as two quads, see
//! [`Sprite::draw_parts`].
//!
//! With [`DebugMode`] present, pivots are marked and the player's sheet,
//! idle timer and travel state are printed in the corner.

use bevy_ecs::prelude::*;
use raylib::ffi;
use raylib::prelude::*;

use crate::components::character::{BlendType, MapCharacter, Player};
use crate::components::idletracker::IdleTracker;
use crate::components::sprite::Sprite;
use crate::components::visualstate::CharacterVisualState;
use crate::resources::debugmode::DebugMode;
use crate::resources::environment::Environment;
use crate::resources::mapview::{MapView, REAL_RES_X, REAL_RES_Y, TILE_HEIGHT, TILE_WIDTH};
use crate::resources::rendertarget::RenderTarget;
use crate::resources::screensize::ScreenSize;
use crate::resources::sheetstore::SheetStore;
use crate::resources::terrainmap::{TerrainMap, TerrainTag};
use crate::resources::texturestore::SheetTextures;

const BACKGROUND: Color = Color::new(48, 96, 64, 255);

/// Sprites to draw, back to front.
pub fn draw_order(world: &mut World) -> Vec<Sprite> {
    let mut q = world.query::<&Sprite>();
    let mut sprites: Vec<Sprite> = q.iter(world).filter(|s| s.visible).cloned().collect();
    sprites.sort_by_key(|s| s.z);
    sprites
}

fn terrain_color(tag: TerrainTag) -> Color {
    match tag {
        TerrainTag::Normal => Color::new(112, 168, 96, 255),
        TerrainTag::TallGrass => Color::new(56, 128, 56, 255),
        TerrainTag::Ice => Color::new(200, 232, 248, 255),
        TerrainTag::Water => Color::new(64, 112, 200, 255),
        TerrainTag::Wall => Color::new(96, 88, 80, 255),
    }
}

fn draw_terrain<D: RaylibDraw>(d: &mut D, world: &World) {
    let (Some(terrain), Some(view), Some(screen)) = (
        world.get_resource::<TerrainMap>(),
        world.get_resource::<MapView>(),
        world.get_resource::<ScreenSize>(),
    ) else {
        return;
    };
    for y in 0..terrain.height {
        for x in 0..terrain.width {
            let left = view.to_screen_x((x * REAL_RES_X) as f32);
            let top = view.to_screen_y((y * REAL_RES_Y) as f32);
            let rect = Rectangle::new(
                view.zoom_screen_x(left, screen),
                view.zoom_screen_y(top, screen),
                TILE_WIDTH as f32 * view.zoom_x,
                TILE_HEIGHT as f32 * view.zoom_y,
            );
            d.draw_rectangle_rec(rect, terrain_color(terrain.tag_at(x, y)));
        }
    }
}

fn blend_mode(blend: BlendType) -> Option<BlendMode> {
    match blend {
        BlendType::Normal => None,
        BlendType::Add => Some(BlendMode::BLEND_ADDITIVE),
        BlendType::Subtract => Some(BlendMode::BLEND_SUBTRACT_COLORS),
    }
}

fn draw_sprites<D: RaylibDraw>(d: &mut D, sprites: &[Sprite], textures: Option<&SheetTextures>) {
    for sprite in sprites {
        let blend = blend_mode(sprite.blend_type);
        if let Some(mode) = blend {
            unsafe { ffi::BeginBlendMode(mode as i32) };
        }
        for part in sprite.draw_parts() {
            let tint = Color::new(sprite.tint.r, sprite.tint.g, sprite.tint.b, part.alpha);
            if sprite.tile_id.is_some() {
                d.draw_rectangle_rec(part.dest, tint);
                continue;
            }
            if let Some(tex) = textures.and_then(|t| t.get(&sprite.sheet_key)) {
                d.draw_texture_pro(tex, part.src, part.dest, Vector2::zero(), 0.0, tint);
            }
        }
        if blend.is_some() {
            unsafe { ffi::EndBlendMode() };
        }
    }
}

fn draw_debug<D: RaylibDraw>(d: &mut D, world: &mut World, sprites: &[Sprite]) {
    for sprite in sprites {
        let (x, y) = (sprite.position.x as i32, sprite.position.y as i32);
        d.draw_line(x - 4, y, x + 4, y, Color::RED);
        d.draw_line(x, y - 4, x, y + 4, Color::RED);
    }

    let mut lines = Vec::new();
    let mut players =
        world.query_filtered::<(&MapCharacter, &CharacterVisualState, &IdleTracker), With<Player>>();
    for (character, visual, tracker) in players.iter(world) {
        lines.push(format!(
            "{} pattern {} idle {}",
            visual.asset_name(),
            visual.pattern,
            tracker.idle_timer
        ));
        lines.push(format!(
            "tile ({}, {}) speed {} bush {}",
            character.x, character.y, character.move_speed, character.bush_depth
        ));
    }
    if let Some(env) = world.get_resource::<Environment>() {
        lines.push(format!("weather {:?} {:?}", env.weather, env.travel));
    }
    lines.push(format!("sheets cached {}", world.resource::<SheetStore>().len()));
    for (i, line) in lines.iter().enumerate() {
        d.draw_text(line, 6, 6 + i as i32 * 12, 10, Color::WHITE);
    }
}

/// Exclusive draw system.
pub fn render_system(world: &mut World) {
    let Some(mut rl) = world.remove_non_send_resource::<RaylibHandle>() else {
        return;
    };
    let Some(thread) = world.remove_non_send_resource::<RaylibThread>() else {
        world.insert_non_send_resource(rl);
        return;
    };
    let mut textures = world.remove_non_send_resource::<SheetTextures>();
    if let Some(textures) = textures.as_mut() {
        textures.sync(&mut rl, &thread, world.resource::<SheetStore>());
    }
    let mut target = world.remove_non_send_resource::<RenderTarget>();

    let sprites = draw_order(world);
    let debug = world.contains_resource::<DebugMode>();
    let (window_w, window_h) = (rl.get_screen_width(), rl.get_screen_height());
    {
        let mut d = rl.begin_drawing(&thread);
        d.clear_background(Color::BLACK);
        match target.as_mut() {
            Some(target) => {
                {
                    let mut t = d.begin_texture_mode(&thread, &mut target.texture);
                    t.clear_background(BACKGROUND);
                    draw_terrain(&mut t, world);
                    draw_sprites(&mut t, &sprites, textures.as_ref());
                    if debug {
                        draw_debug(&mut t, world, &sprites);
                    }
                }
                let dest = target.dest_rect(window_w, window_h);
                let src = target.source_rect();
                d.draw_texture_pro(&target.texture, src, dest, Vector2::zero(), 0.0, Color::WHITE);
            }
            None => {
                d.clear_background(BACKGROUND);
                draw_terrain(&mut d, world);
                draw_sprites(&mut d, &sprites, textures.as_ref());
                if debug {
                    draw_debug(&mut d, world, &sprites);
                }
            }
        }
        if debug {
            d.draw_fps(window_w - 90, 6);
        }
    }

    if let Some(target) = target {
        world.insert_non_send_resource(target);
    }
    if let Some(textures) = textures {
        world.insert_non_send_resource(textures);
    }
    world.insert_non_send_resource(thread);
    world.insert_non_send_resource(rl);
}
