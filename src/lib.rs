//! Overworld character library.
//!
//! Exposes the components, resources, systems and events that animate map
//! characters, for use in integration tests and by the demo binary.

pub mod components;
pub mod events;
pub mod game;
pub mod resources;
pub mod systems;
