//! Step animation.
//!
//! Advances each character's pattern column. Walking shows the 8-column
//! cycle at `move_time / 8` per column; idle sheets cycle through 40 columns
//! at `move_time / 4.25`. Starting a step advances one column at once and
//! stopping snaps back to the resting column.
//!
//! While the player is surfing or diving a slow bob runs alongside: the base
//! column (`pattern_surf`) cycles over the 8 base frames every
//! [`SURF_BOB_DURATION`] seconds and the character sits 2 pixels higher on
//! the second half of the cycle.

use bevy_ecs::prelude::*;

use crate::components::character::{MapCharacter, Player};
use crate::components::companion::BASE_FRAMES;
use crate::components::visualstate::CharacterVisualState;
use crate::resources::environment::Environment;
use crate::resources::worldtime::WorldTime;

/// Seconds for one full surf bob cycle.
pub const SURF_BOB_DURATION: f32 = 1.5;
/// Pixels the character rises on the upper half of the bob.
pub const SURF_BOB_HEIGHT: i32 = 2;
/// Pattern advance when a walk starts; always within the movement cycle.
const WALK_CYCLE: u32 = 8;

/// Advance `visual`'s pattern for one tick.
///
/// `anime_count` must already include this tick's time.
pub fn update_pattern(visual: &mut CharacterVisualState, moved_last: bool, moved_this: bool, move_time: f32) {
    if visual.lock_pattern {
        return;
    }
    if moved_last && !moved_this && !visual.step_anime {
        visual.pattern = visual.original_pattern;
        visual.anime_count = 0.0;
        return;
    }
    if !moved_last && moved_this && !visual.step_anime {
        if visual.walk_anime {
            visual.pattern = (visual.pattern + 1) % WALK_CYCLE;
        }
        visual.anime_count = 0.0;
        return;
    }
    if !moved_this && !visual.step_anime {
        return;
    }

    let required = move_time / visual.suffix.pattern_divisor();
    if required <= 0.0 || visual.anime_count < required {
        return;
    }
    let cycle = visual.suffix.cycle_length();
    visual.pattern = (visual.pattern + 1) % cycle;
    visual.anime_count -= required;
}

/// Surf bob column and height at `elapsed` seconds.
pub fn surf_bob(elapsed: f32) -> (u32, i32) {
    let phase = elapsed.rem_euclid(SURF_BOB_DURATION) / SURF_BOB_DURATION;
    let column = ((phase * BASE_FRAMES as f32) as u32).min(BASE_FRAMES as u32 - 1);
    let height = if column >= BASE_FRAMES as u32 / 2 {
        SURF_BOB_HEIGHT
    } else {
        0
    };
    (column, height)
}

pub fn step_animation_system(
    mut query: Query<(&mut CharacterVisualState, &mut MapCharacter, Has<Player>)>,
    env: Res<Environment>,
    time: Res<WorldTime>,
) {
    for (mut visual, mut character, is_player) in query.iter_mut() {
        if character.moved_this_frame || visual.step_anime {
            visual.anime_count += time.delta;
        }
        update_pattern(
            &mut visual,
            character.moved_last_frame,
            character.moved_this_frame,
            character.move_time,
        );

        if is_player && env.travel.on_water() {
            let (column, height) = surf_bob(time.elapsed);
            character.pattern_surf = column;
            character.bob_height = height;
            if !character.moved_this_frame && !visual.step_anime && !visual.lock_pattern {
                visual.pattern = column % visual.suffix.cycle_length();
            }
        } else if character.bob_height != 0 || character.pattern_surf != 0 {
            character.pattern_surf = 0;
            character.bob_height = 0;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::sheetsuffix::SheetSuffix;

    const MOVE_TIME: f32 = 0.25;

    fn walking() -> CharacterVisualState {
        CharacterVisualState::new("trainer_red")
    }

    fn idle() -> CharacterVisualState {
        let mut v = CharacterVisualState::new("trainer_red");
        v.set_suffix(SheetSuffix::Idle);
        v.step_anime = true;
        v
    }

    #[test]
    fn test_step_start_advances_immediately() {
        let mut v = walking();
        v.pattern = 3;
        v.anime_count = 0.02;
        update_pattern(&mut v, false, true, MOVE_TIME);
        assert_eq!(v.pattern, 4);
        assert_eq!(v.anime_count, 0.0);
    }

    #[test]
    fn test_step_start_without_walk_anime_keeps_column() {
        let mut v = walking();
        v.walk_anime = false;
        v.pattern = 3;
        update_pattern(&mut v, false, true, MOVE_TIME);
        assert_eq!(v.pattern, 3);
    }

    #[test]
    fn test_stop_snaps_to_original() {
        let mut v = walking();
        v.pattern = 6;
        v.original_pattern = 0;
        v.anime_count = 0.01;
        update_pattern(&mut v, true, false, MOVE_TIME);
        assert_eq!(v.pattern, 0);
        assert_eq!(v.anime_count, 0.0);
    }

    #[test]
    fn test_walking_cycle_wraps_at_eight() {
        let mut v = walking();
        v.pattern = 7;
        v.anime_count = MOVE_TIME / 8.0;
        update_pattern(&mut v, true, true, MOVE_TIME);
        assert_eq!(v.pattern, 0);
    }

    #[test]
    fn test_idle_cycle_wraps_at_forty() {
        let mut v = idle();
        v.pattern = 39;
        v.anime_count = MOVE_TIME / 4.25;
        update_pattern(&mut v, false, false, MOVE_TIME);
        assert_eq!(v.pattern, 0);

        v.pattern = 8;
        v.anime_count = MOVE_TIME / 4.25;
        update_pattern(&mut v, false, false, MOVE_TIME);
        assert_eq!(v.pattern, 9);
    }

    #[test]
    fn test_below_threshold_no_change() {
        let mut v = idle();
        v.pattern = 12;
        v.anime_count = MOVE_TIME / 4.25 * 0.5;
        update_pattern(&mut v, false, false, MOVE_TIME);
        assert_eq!(v.pattern, 12);
        assert_eq!(v.anime_count, MOVE_TIME / 4.25 * 0.5);
    }

    #[test]
    fn test_remainder_is_carried() {
        let mut v = walking();
        let required = MOVE_TIME / 8.0;
        v.anime_count = required + 0.01;
        update_pattern(&mut v, true, true, MOVE_TIME);
        assert_eq!(v.pattern, 1);
        assert!((v.anime_count - 0.01).abs() < 1e-6);
    }

    #[test]
    fn test_lock_pattern_freezes() {
        let mut v = walking();
        v.lock_pattern = true;
        v.pattern = 5;
        update_pattern(&mut v, true, false, MOVE_TIME);
        assert_eq!(v.pattern, 5);
    }

    #[test]
    fn test_standing_still_does_not_cycle() {
        let mut v = walking();
        v.pattern = 0;
        v.anime_count = 10.0;
        update_pattern(&mut v, false, false, MOVE_TIME);
        assert_eq!(v.pattern, 0);
    }

    #[test]
    fn test_surf_bob_cycle() {
        assert_eq!(surf_bob(0.0), (0, 0));
        assert_eq!(surf_bob(SURF_BOB_DURATION * 0.49), (3, 0));
        assert_eq!(surf_bob(SURF_BOB_DURATION * 0.5), (4, SURF_BOB_HEIGHT));
        assert_eq!(surf_bob(SURF_BOB_DURATION * 0.99), (7, SURF_BOB_HEIGHT));
        assert_eq!(surf_bob(SURF_BOB_DURATION), (0, 0));
    }
}
