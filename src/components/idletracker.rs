use bevy_ecs::prelude::Component;

/// Player-only bookkeeping for idle sheet selection.
///
/// Lives as long as the player entity and is never saved.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IdleTracker {
    /// Polls since the player last moved. Holding a direction without
    /// moving (against a wall, in a dialog) keeps it counting.
    pub idle_timer: u32,
    /// Moving flag seen on the previous poll.
    pub was_moving: bool,
    /// Direction code seen on the previous poll, 0 for none.
    pub last_direction: u8,
}
