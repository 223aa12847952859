//! Debug overlay toggle.
//!
//! Emitting a [`SwitchDebugEvent`] flips the presence of the [`DebugMode`]
//! resource. The draw pass shows sheet names, idle timers and pivots while it
//! is present, and the animation observer logs every one-shot it sees.
use crate::resources::debugmode::DebugMode;
use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;
use log::info;

/// Toggle the [`DebugMode`] resource on/off.
#[derive(Event, Debug, Clone, Copy)]
pub struct SwitchDebugEvent {}

/// Observer that inserts or removes [`DebugMode`].
pub fn switch_debug_observer(
    _trigger: On<SwitchDebugEvent>,
    mut commands: Commands,
    debug_mode: Option<Res<DebugMode>>,
) {
    if debug_mode.is_some() {
        commands.remove_resource::<DebugMode>();
        info!("Debug overlay disabled");
    } else {
        commands.insert_resource(DebugMode::default());
        info!("Debug overlay enabled");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_twice() {
        let mut world = World::new();
        world.add_observer(switch_debug_observer);
        world.trigger(SwitchDebugEvent {});
        world.flush();
        assert!(world.contains_resource::<DebugMode>());
        world.trigger(SwitchDebugEvent {});
        world.flush();
        assert!(!world.contains_resource::<DebugMode>());
    }
}
