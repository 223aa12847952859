//! Overworld systems.
//!
//! Submodules overview
//! - [`companion`] – spawn, follow and despawn the surf/dive base sprite
//! - [`graphic`] – resolve sheets and fill each character's [`crate::components::sprite::Sprite`]
//! - [`idle`] – choose between walk, stand, idle and weather idle sheets
//! - [`input`] – read hardware input and update [`crate::resources::input::InputState`]
//! - [`movement`] – tile stepping, ice sliding and bush depth for the player
//! - [`movementtype`] – pick the walk, run, cycle, surf or dive charset
//! - [`render`] – draw terrain, sprites and debug overlays using Raylib
//! - [`stepanimation`] – advance walk patterns and the surf bob
//! - [`time`] – update simulation time and delta

pub mod companion;
pub mod graphic;
pub mod idle;
pub mod input;
pub mod movement;
pub mod movementtype;
pub mod render;
pub mod stepanimation;
pub mod time;
