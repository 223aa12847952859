//! Grid movement of the player.
//!
//! The player walks tile by tile: a held direction turns them and, if the
//! tile ahead is passable, starts a step that takes `move_time` seconds. On
//! ice the player keeps sliding in the facing direction until blocked, still
//! playing the walk cycle. Bush depth is refreshed from the terrain at the
//! end of every tick.

use bevy_ecs::prelude::*;

use crate::components::character::{MapCharacter, Player};
use crate::components::visualstate::CharacterVisualState;
use crate::resources::environment::Environment;
use crate::resources::input::InputState;
use crate::resources::mapview::{REAL_RES_X, REAL_RES_Y};
use crate::resources::terrainmap::{BUSH_DEPTH, TerrainMap};
use crate::resources::worldtime::WorldTime;

/// Move `real` towards `target` by at most `step`.
fn approach(real: f32, target: f32, step: f32) -> f32 {
    if real < target {
        (real + step).min(target)
    } else {
        (real - step).max(target)
    }
}

/// Advance a step in progress by `delta` seconds. Returns whether the
/// position changed.
pub fn advance_step(character: &mut MapCharacter, delta: f32) -> bool {
    if !character.is_moving() {
        return false;
    }
    let time = character.move_time.max(f32::EPSILON);
    let step_x = REAL_RES_X as f32 * delta / time;
    let step_y = REAL_RES_Y as f32 * delta / time;
    character.real_x = approach(character.real_x, (character.x * REAL_RES_X) as f32, step_x);
    character.real_y = approach(character.real_y, (character.y * REAL_RES_Y) as f32, step_y);
    true
}

/// Try to start a step in the facing direction.
pub fn try_start_step(character: &mut MapCharacter, terrain: &TerrainMap, env: &Environment) -> bool {
    let (dx, dy) = character.direction.delta();
    let (nx, ny) = (character.x + dx, character.y + dy);
    if !terrain.passable(nx, ny, &env.travel) {
        return false;
    }
    character.x = nx;
    character.y = ny;
    true
}

/// Bush depth for a character's current tile and motion.
pub fn bush_depth_at(character: &MapCharacter, terrain: &TerrainMap) -> i32 {
    if character.has_tile_graphic() || character.always_on_top || character.is_moving() {
        return 0;
    }
    if terrain.tag_at(character.x, character.y).is_bush() {
        BUSH_DEPTH
    } else {
        0
    }
}

pub fn player_movement_system(
    mut query: Query<(&mut MapCharacter, &mut CharacterVisualState), With<Player>>,
    input: Res<InputState>,
    mut env: ResMut<Environment>,
    terrain: Res<TerrainMap>,
    time: Res<WorldTime>,
) {
    for (mut character, mut visual) in query.iter_mut() {
        character.moved_last_frame = character.moved_this_frame;

        if !character.is_moving() {
            if env.travel.ice_sliding {
                if !try_start_step(&mut character, &terrain, &env) {
                    env.travel.ice_sliding = false;
                }
            } else if !env.input_blocked() && !character.move_route_forcing {
                if let Some(direction) = input.dir4_direction() {
                    character.direction = direction;
                    try_start_step(&mut character, &terrain, &env);
                }
            }
        }

        let moved = advance_step(&mut character, time.delta);
        character.moved_this_frame = moved;

        if moved && !character.is_moving() {
            // Arrived on a tile: ice keeps the player going unless Ctrl is held.
            let (dx, dy) = character.direction.delta();
            let on_ice = terrain.tag_at(character.x, character.y).is_ice();
            let ahead_free =
                terrain.passable(character.x + dx, character.y + dy, &env.travel);
            if on_ice && ahead_free && !input.ctrl.active {
                env.travel.ice_sliding = true;
                visual.straighten();
            } else {
                env.travel.ice_sliding = false;
                visual.walk_anime = true;
            }
        }

        character.bush_depth = bush_depth_at(&character, &terrain);
    }
}
