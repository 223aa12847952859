//! ECS components for map characters.
//!
//! Submodules overview:
//! - [`character`] – tile position, movement flags and render attributes of a map character
//! - [`companion`] – surf/dive base sprite owned by the player
//! - [`graphiccache`] – last resolved sheet and frame size of a character
//! - [`idletracker`] – per-character idle timer and tracked sheet name
//! - [`sheetsuffix`] – which sheet variant (walk, run, stand, idle, weather idle) is shown
//! - [`sprite`] – resolved draw data for one frame of a sheet
//! - [`tint`] – RGBA colour multiplier
//! - [`visualstate`] – sheet base name, suffix, pattern and step counters

pub mod character;
pub mod companion;
pub mod graphiccache;
pub mod idletracker;
pub mod sheetsuffix;
pub mod sprite;
pub mod tint;
pub mod visualstate;
