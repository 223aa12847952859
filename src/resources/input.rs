//! Per-frame keyboard input resource.
//!
//! Captures the keys the overworld cares about and exposes them to systems
//! via the [`InputState`] resource. Arrow keys and WASD both move the player;
//! the remaining bindings drive running and the demo toggles.
use bevy_ecs::prelude::*;
use raylib::prelude::KeyboardKey;

use crate::components::character::Direction;

#[derive(Debug, Clone, Copy)]
/// Boolean key state with an associated keyboard binding.
pub struct BoolState {
    /// Whether the key is currently active/pressed this frame.
    pub active: bool,
    /// Whether the key was just pressed this frame.
    pub just_pressed: bool,
    /// The key bound to this action.
    pub key_binding: KeyboardKey,
}

impl BoolState {
    pub fn bound_to(key_binding: KeyboardKey) -> Self {
        Self {
            active: false,
            just_pressed: false,
            key_binding,
        }
    }
}

impl Default for BoolState {
    fn default() -> Self {
        Self::bound_to(KeyboardKey::KEY_NULL)
    }
}

#[derive(Resource, Debug, Clone)]
pub struct InputState {
    pub down: BoolState,
    pub left: BoolState,
    pub right: BoolState,
    pub up: BoolState,
    pub alt_down: BoolState,
    pub alt_left: BoolState,
    pub alt_right: BoolState,
    pub alt_up: BoolState,
    /// Held to invert the run setting.
    pub action_back: BoolState,
    /// Held to ignore ice.
    pub ctrl: BoolState,
    pub mode_debug: BoolState,
    pub toggle_surf: BoolState,
    pub toggle_dive: BoolState,
    pub toggle_bicycle: BoolState,
    pub cycle_weather: BoolState,
    pub toggle_message: BoolState,
    pub toggle_menu: BoolState,
}

impl Default for InputState {
    fn default() -> Self {
        Self {
            down: BoolState::bound_to(KeyboardKey::KEY_DOWN),
            left: BoolState::bound_to(KeyboardKey::KEY_LEFT),
            right: BoolState::bound_to(KeyboardKey::KEY_RIGHT),
            up: BoolState::bound_to(KeyboardKey::KEY_UP),
            alt_down: BoolState::bound_to(KeyboardKey::KEY_S),
            alt_left: BoolState::bound_to(KeyboardKey::KEY_A),
            alt_right: BoolState::bound_to(KeyboardKey::KEY_D),
            alt_up: BoolState::bound_to(KeyboardKey::KEY_W),
            action_back: BoolState::bound_to(KeyboardKey::KEY_X),
            ctrl: BoolState::bound_to(KeyboardKey::KEY_LEFT_CONTROL),
            mode_debug: BoolState::bound_to(KeyboardKey::KEY_F11),
            toggle_surf: BoolState::bound_to(KeyboardKey::KEY_ONE),
            toggle_dive: BoolState::bound_to(KeyboardKey::KEY_TWO),
            toggle_bicycle: BoolState::bound_to(KeyboardKey::KEY_THREE),
            cycle_weather: BoolState::bound_to(KeyboardKey::KEY_FOUR),
            toggle_message: BoolState::bound_to(KeyboardKey::KEY_M),
            toggle_menu: BoolState::bound_to(KeyboardKey::KEY_ENTER),
        }
    }
}

impl InputState {
    /// Pressed direction, first match in down/left/right/up order.
    pub fn dir4_direction(&self) -> Option<Direction> {
        if self.down.active || self.alt_down.active {
            Some(Direction::Down)
        } else if self.left.active || self.alt_left.active {
            Some(Direction::Left)
        } else if self.right.active || self.alt_right.active {
            Some(Direction::Right)
        } else if self.up.active || self.alt_up.active {
            Some(Direction::Up)
        } else {
            None
        }
    }

    /// Pressed direction code, 0 when none.
    pub fn dir4(&self) -> u8 {
        self.dir4_direction().map_or(0, Direction::code)
    }

    /// Hold exactly one direction (or none). Used by scripted input and tests.
    pub fn press_direction(&mut self, direction: Option<Direction>) {
        for state in [
            &mut self.down,
            &mut self.left,
            &mut self.right,
            &mut self.up,
            &mut self.alt_down,
            &mut self.alt_left,
            &mut self.alt_right,
            &mut self.alt_up,
        ] {
            state.active = false;
        }
        match direction {
            Some(Direction::Down) => self.down.active = true,
            Some(Direction::Left) => self.left.active = true,
            Some(Direction::Right) => self.right.active = true,
            Some(Direction::Up) => self.up.active = true,
            None => {}
        }
    }

    /// Every binding, for the polling system.
    pub fn states_mut(&mut self) -> [&mut BoolState; 17] {
        [
            &mut self.down,
            &mut self.left,
            &mut self.right,
            &mut self.up,
            &mut self.alt_down,
            &mut self.alt_left,
            &mut self.alt_right,
            &mut self.alt_up,
            &mut self.action_back,
            &mut self.ctrl,
            &mut self.mode_debug,
            &mut self.toggle_surf,
            &mut self.toggle_dive,
            &mut self.toggle_bicycle,
            &mut self.cycle_weather,
            &mut self.toggle_message,
            &mut self.toggle_menu,
        ]
    }
}
