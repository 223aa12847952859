//! Input system.
//!
//! [`update_input_state`] reads the keyboard from Raylib each frame and
//! writes the results into [`InputState`]. Pressing the debug key fires a
//! [`SwitchDebugEvent`].
use bevy_ecs::prelude::*;

use crate::events::switchdebug::SwitchDebugEvent;
use crate::resources::input::InputState;

/// Poll Raylib for keyboard input and update the `InputState` resource.
pub fn update_input_state(
    mut input: ResMut<InputState>,
    rl: NonSendMut<raylib::RaylibHandle>,
    mut commands: Commands,
) {
    for state in input.states_mut() {
        state.active = rl.is_key_down(state.key_binding);
        state.just_pressed = rl.is_key_pressed(state.key_binding);
    }

    if input.mode_debug.just_pressed {
        commands.trigger(SwitchDebugEvent {});
    }
}
