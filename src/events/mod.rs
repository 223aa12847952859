//! Event types and observers.
//!
//! Submodules:
//! - [`animation`] – one-shot animation requested by a character's graphic update
//! - [`switchdebug`] – toggle debug rendering and diagnostics on/off
pub mod animation;
pub mod switchdebug;
