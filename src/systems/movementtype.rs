//! Movement type selection.
//!
//! Between steps the player's charset and move speed are chosen from how
//! they are travelling: walking, running, cycling, surfing, diving, sliding
//! on ice or fishing. The charset comes from
//! [`PlayerMetadata`]; changing it always drops the player back onto the
//! movement sheet of the new charset.

use bevy_ecs::prelude::*;
use log::debug;

use crate::components::character::{MapCharacter, Player};
use crate::components::visualstate::CharacterVisualState;
use crate::resources::environment::Environment;
use crate::resources::input::InputState;
use crate::resources::playermetadata::PlayerMetadata;
use crate::resources::terrainmap::TerrainMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MovementType {
    Walking,
    Running,
    Cycling,
    Surfing,
    Diving,
    IceSliding,
    Fishing,
    SurfFishing,
}

impl MovementType {
    /// Move speed for this type of travel.
    pub fn move_speed(self) -> Option<u8> {
        match self {
            MovementType::Walking => Some(3),
            MovementType::Running => Some(4),
            MovementType::Cycling => Some(5),
            MovementType::Surfing => Some(4),
            MovementType::Diving => Some(3),
            MovementType::IceSliding => Some(4),
            MovementType::Fishing | MovementType::SurfFishing => None,
        }
    }
}

/// Whether the player may run right now.
pub fn can_run(
    character: &MapCharacter,
    env: &Environment,
    input: &InputState,
    on_ice: bool,
) -> bool {
    if character.move_route_forcing {
        return character.move_speed > 3;
    }
    if env.in_menu || env.message_window_showing {
        return false;
    }
    let travel = &env.travel;
    if !env.has_running_shoes && !travel.diving && !travel.surfing && !travel.bicycle {
        return false;
    }
    if on_ice {
        return false;
    }
    env.run_by_default ^ input.action_back.active
}

/// Pick the movement type.
///
/// `stepping` is true when the player is walking or about to take a step;
/// running only applies then.
pub fn select_movement_type(env: &Environment, on_ice: bool, stepping: bool, faster: bool) -> MovementType {
    let travel = &env.travel;
    if travel.fishing {
        return if travel.surfing {
            MovementType::SurfFishing
        } else {
            MovementType::Fishing
        };
    }
    if on_ice && !travel.on_water() {
        return MovementType::IceSliding;
    }
    if travel.diving {
        MovementType::Diving
    } else if travel.surfing {
        MovementType::Surfing
    } else if travel.bicycle {
        MovementType::Cycling
    } else if stepping && faster {
        MovementType::Running
    } else {
        MovementType::Walking
    }
}

/// Apply the movement type's charset and speed to the player.
pub fn movement_type_system(
    mut query: Query<(&mut CharacterVisualState, &mut MapCharacter), With<Player>>,
    env: Res<Environment>,
    input: Res<InputState>,
    metadata: Res<PlayerMetadata>,
    terrain: Res<TerrainMap>,
) {
    for (mut visual, mut character) in query.iter_mut() {
        if character.is_moving() {
            continue;
        }
        let on_ice = terrain.tag_at(character.x, character.y).is_ice();
        let stepping = input.dir4() != 0 && !env.input_blocked();
        let faster = can_run(&character, &env, &input, on_ice);
        let movement = select_movement_type(&env, on_ice, stepping, faster);

        if !character.move_route_forcing {
            if let Some(speed) = movement.move_speed() {
                if character.move_speed != speed {
                    character.set_move_speed(speed);
                    visual.move_time_override = None;
                }
            }
        }

        let charset = metadata.charset_for(movement);
        if charset.is_empty() {
            continue;
        }
        if let Some(saved) = visual.set_base_name(charset) {
            if let Some(original) = saved {
                character.move_time = original;
            }
            debug!("Player charset -> '{}' ({:?})", visual.base_name, movement);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::environment::Travel;

    fn env() -> Environment {
        Environment {
            has_running_shoes: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_can_run_needs_shoes_or_vehicle() {
        let c = MapCharacter::new(0, 0);
        let mut input = InputState::default();
        input.action_back.active = true;
        let mut e = Environment::default();
        assert!(!can_run(&c, &e, &input, false));
        e.travel.surfing = true;
        assert!(can_run(&c, &e, &input, false));
    }

    #[test]
    fn test_can_run_xor_run_by_default() {
        let c = MapCharacter::new(0, 0);
        let mut input = InputState::default();
        let mut e = env();
        assert!(!can_run(&c, &e, &input, false));
        input.action_back.active = true;
        assert!(can_run(&c, &e, &input, false));
        e.run_by_default = true;
        assert!(!can_run(&c, &e, &input, false));
        input.action_back.active = false;
        assert!(can_run(&c, &e, &input, false));
    }

    #[test]
    fn test_cannot_run_on_ice_or_in_dialog() {
        let c = MapCharacter::new(0, 0);
        let mut input = InputState::default();
        input.action_back.active = true;
        let mut e = env();
        assert!(!can_run(&c, &e, &input, true));
        e.message_window_showing = true;
        assert!(!can_run(&c, &e, &input, false));
    }

    #[test]
    fn test_forced_route_uses_speed() {
        let mut c = MapCharacter::new(0, 0);
        c.move_route_forcing = true;
        let e = Environment::default();
        let input = InputState::default();
        assert!(!can_run(&c, &e, &input, false));
        c.set_move_speed(4);
        assert!(can_run(&c, &e, &input, false));
    }

    #[test]
    fn test_selection_priority() {
        let mut e = env();
        assert_eq!(select_movement_type(&e, false, true, true), MovementType::Running);
        assert_eq!(select_movement_type(&e, false, false, true), MovementType::Walking);
        assert_eq!(select_movement_type(&e, true, true, false), MovementType::IceSliding);
        e.travel = Travel {
            bicycle: true,
            ..Default::default()
        };
        assert_eq!(select_movement_type(&e, false, true, true), MovementType::Cycling);
        e.travel = Travel {
            surfing: true,
            diving: true,
            ..Default::default()
        };
        assert_eq!(select_movement_type(&e, false, true, true), MovementType::Diving);
        e.travel.fishing = true;
        assert_eq!(select_movement_type(&e, false, false, false), MovementType::SurfFishing);
    }

    #[test]
    fn test_speeds() {
        assert_eq!(MovementType::Walking.move_speed(), Some(3));
        assert_eq!(MovementType::Cycling.move_speed(), Some(5));
        assert_eq!(MovementType::Surfing.move_speed(), Some(4));
        assert_eq!(MovementType::Fishing.move_speed(), None);
    }
}
