//! Debug overlay switch.
//!
//! Present means on. Toggled by
//! [`SwitchDebugEvent`](crate::events::switchdebug::SwitchDebugEvent).

use bevy_ecs::prelude::Resource;

#[derive(Resource, Debug, Clone, Copy, Default)]
pub struct DebugMode {}
