//! Surf/dive base controller.
//!
//! A character with [`SurfBase`] gets a second sprite drawn just below it
//! while the player is on water: `base_surf` when surfing, `base_dive` when
//! diving (surfing wins if both are set). The base entity is spawned on the
//! first water tick and despawned on the first dry one, or when the host
//! goes away. Both base sheets are retained for as long as the entity lives
//! and released by [`release_base_on_remove`].
//!
//! The base uses its own 8x4 grid: the column is the host's `pattern_surf`
//! and the row its facing. It follows the host sprite, or sits on a fixed
//! tile when the host's `anchor_override` is set.

use bevy_ecs::lifecycle::Remove;
use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;
use log::{debug, warn};
use raylib::prelude::{Rectangle, Vector2};

use crate::components::character::MapCharacter;
use crate::components::companion::{
    BASE_FRAMES, BASE_Y_OFFSET, BaseGrid, CompanionMode, CompanionSprite, SurfBase,
};
use crate::components::sheetsuffix::DIRECTION_ROWS;
use crate::components::sprite::Sprite;
use crate::resources::environment::{Environment, Travel};
use crate::resources::mapview::{MapView, REAL_RES_X, REAL_RES_Y, TILE_HEIGHT, TILE_WIDTH};
use crate::resources::screensize::ScreenSize;
use crate::resources::sheetstore::SheetStore;

/// Which base to show for the current travel flags.
pub fn companion_mode(travel: &Travel) -> Option<CompanionMode> {
    if travel.surfing {
        Some(CompanionMode::Surf)
    } else if travel.diving {
        Some(CompanionMode::Dive)
    } else {
        None
    }
}

/// Retain a base sheet and slice it into its grid.
fn retain_grid(sheets: &mut SheetStore, name: &str) -> Option<BaseGrid> {
    let Some(handle) = sheets.retain(name) else {
        warn!("Base sheet '{}' is not available", name);
        return None;
    };
    Some(BaseGrid {
        sheet: handle.id,
        frame_width: handle.info.width / BASE_FRAMES,
        frame_height: handle.info.height / DIRECTION_ROWS,
    })
}

fn release_grids(sheets: &mut SheetStore, companion: &CompanionSprite) {
    for grid in [companion.surf, companion.dive].into_iter().flatten() {
        sheets.release(grid.sheet);
    }
}

/// Screen position of a base pinned to tile (`tile_x`, `tile_y`).
pub fn anchor_position(tile_x: f32, tile_y: f32, view: &MapView, screen: &ScreenSize) -> Vector2 {
    let x = view.to_screen_x(tile_x * REAL_RES_X as f32) + (TILE_WIDTH / 2) as f32;
    let y = view.to_screen_y(tile_y * REAL_RES_Y as f32) + (TILE_HEIGHT / 2 + BASE_Y_OFFSET) as f32;
    Vector2 {
        x: view.zoom_screen_x(x, screen),
        y: view.zoom_screen_y(y, screen),
    }
}

/// Compose the base sprite from its host for this tick.
pub fn compose_base_sprite(
    companion: &CompanionSprite,
    host: &MapCharacter,
    host_sprite: &Sprite,
    sheets: &SheetStore,
    view: &MapView,
    screen: &ScreenSize,
    out: &mut Sprite,
) {
    let Some(grid) = companion.grid() else {
        out.visible = false;
        return;
    };
    let (cw, ch) = (grid.frame_width, grid.frame_height);
    out.sheet_key = sheets.name(grid.sheet).unwrap_or_default().to_string();
    out.tile_id = None;
    out.src = Rectangle::new(
        (host.pattern_surf as i32 * cw) as f32,
        (host.direction.row() * ch) as f32,
        cw as f32,
        ch as f32,
    );
    out.position = match companion.anchor_override {
        Some((tx, ty)) => anchor_position(tx, ty, view, screen),
        None => host_sprite.position,
    };
    out.origin = Vector2 {
        x: (cw / 2) as f32,
        y: (ch - BASE_Y_OFFSET - host.bob_height) as f32,
    };
    out.z = host.screen_z(view, ch) - 1;
    out.zoom = host_sprite.zoom;
    out.tint = host_sprite.tint;
    out.opacity = host_sprite.opacity;
    out.blend_type = host_sprite.blend_type;
    out.bush_depth = 0;
    out.visible = host_sprite.visible;
}

/// Spawn, update or despawn each host's base sprite.
#[allow(clippy::type_complexity)]
pub fn companion_sprite_system(
    mut commands: Commands,
    mut hosts: Query<(Entity, &MapCharacter, &mut SurfBase, &Sprite), Without<CompanionSprite>>,
    mut bases: Query<(&mut CompanionSprite, &mut Sprite), Without<SurfBase>>,
    env: Res<Environment>,
    mut sheets: ResMut<SheetStore>,
    view: Res<MapView>,
    screen: Res<ScreenSize>,
) {
    let mode = companion_mode(&env.travel);
    for (host_entity, host, mut surf_base, host_sprite) in hosts.iter_mut() {
        let Some(mode) = mode else {
            if let Some(base) = surf_base.sprite.take() {
                commands.entity(base).despawn();
                debug!("Despawned base sprite of {:?}", host_entity);
            }
            continue;
        };

        if let Some(base) = surf_base.sprite {
            if let Ok((mut companion, mut sprite)) = bases.get_mut(base) {
                companion.mode = mode;
                companion.anchor_override = surf_base.anchor_override;
                compose_base_sprite(&companion, host, host_sprite, &sheets, &view, &screen, &mut sprite);
                continue;
            }
            // Despawned behind our back, its sheets are already released.
            surf_base.sprite = None;
        }

        let companion = CompanionSprite {
            host: host_entity,
            mode,
            surf: retain_grid(&mut sheets, CompanionMode::Surf.sheet_name()),
            dive: retain_grid(&mut sheets, CompanionMode::Dive.sheet_name()),
            anchor_override: surf_base.anchor_override,
        };
        let mut sprite = Sprite::default();
        compose_base_sprite(&companion, host, host_sprite, &sheets, &view, &screen, &mut sprite);
        let base = commands.spawn((companion, sprite)).id();
        surf_base.sprite = Some(base);
        debug!("Spawned {:?} base sprite for {:?}", mode, host_entity);
    }
}

/// Release a base sprite's sheets whenever it is despawned.
pub fn release_base_on_remove(
    trigger: On<Remove, CompanionSprite>,
    bases: Query<&CompanionSprite>,
    sheets: Option<ResMut<SheetStore>>,
) {
    let (Ok(companion), Some(mut sheets)) = (bases.get(trigger.event().entity), sheets) else {
        return;
    };
    release_grids(&mut sheets, companion);
}

/// Take the base sprite down with its host.
pub fn despawn_base_with_host(
    trigger: On<Remove, SurfBase>,
    hosts: Query<&SurfBase>,
    bases: Query<(), With<CompanionSprite>>,
    mut commands: Commands,
) {
    let host = trigger.event().entity;
    let Some(base) = hosts.get(host).ok().and_then(|b| b.sprite) else {
        return;
    };
    if bases.contains(base) {
        commands.entity(base).despawn();
        debug!("Despawned base sprite of removed host {:?}", host);
    }
}
