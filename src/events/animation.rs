//! One-shot character animation trigger.
//!
//! Setting [`MapCharacter::animation_id`](crate::components::character::MapCharacter)
//! queues an animation (an emote bubble, a dust puff...) over a character.
//! The graphic system fires a [`CharacterAnimationEvent`] for it on the next
//! tick and clears the id, so each request plays exactly once.
use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;
use log::info;

use crate::resources::debugmode::DebugMode;

#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct CharacterAnimationEvent {
    pub entity: Entity,
    pub animation_id: u32,
}

/// Animations fired so far, oldest first.
#[derive(Resource, Debug, Default)]
pub struct PlayedAnimations {
    pub log: Vec<CharacterAnimationEvent>,
}

/// Observer that records fired animations.
pub fn character_animation_observer(
    trigger: On<CharacterAnimationEvent>,
    played: Option<ResMut<PlayedAnimations>>,
    debug_mode: Option<Res<DebugMode>>,
) {
    let event = *trigger.event();
    if debug_mode.is_some() {
        info!(
            "Animation {} on entity {:?}",
            event.animation_id, event.entity
        );
    }
    if let Some(mut played) = played {
        played.log.push(event);
    }
}
