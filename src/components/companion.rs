//! Surf/dive base sprite components.
//!
//! While the player surfs or dives a second sprite, the "base", is drawn one
//! layer below them. [`SurfBase`] sits on the player and tracks the base
//! entity, which is spawned on the first water tick and despawned on the
//! first dry one. The base entity carries [`CompanionSprite`].

use bevy_ecs::prelude::{Component, Entity};

use crate::resources::sheetstore::SheetId;

/// Sheet used under a surfing player.
pub const SURF_BASE_SHEET: &str = "base_surf";
/// Sheet used under a diving player.
pub const DIVE_BASE_SHEET: &str = "base_dive";
/// Columns in a base sheet.
pub const BASE_FRAMES: i32 = 8;
/// The base is drawn this many pixels lower than a plain character frame.
pub const BASE_Y_OFFSET: i32 = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompanionMode {
    Surf,
    Dive,
}

impl CompanionMode {
    pub fn sheet_name(self) -> &'static str {
        match self {
            CompanionMode::Surf => SURF_BASE_SHEET,
            CompanionMode::Dive => DIVE_BASE_SHEET,
        }
    }
}

/// One retained base sheet sliced into its 8x4 grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BaseGrid {
    pub sheet: SheetId,
    pub frame_width: i32,
    pub frame_height: i32,
}

/// State of a spawned base sprite.
#[derive(Component, Debug, Clone)]
pub struct CompanionSprite {
    pub host: Entity,
    pub mode: CompanionMode,
    pub surf: Option<BaseGrid>,
    pub dive: Option<BaseGrid>,
    /// Fixed tile position copied from the host's [`SurfBase`].
    pub anchor_override: Option<(f32, f32)>,
}

impl CompanionSprite {
    pub fn grid(&self) -> Option<BaseGrid> {
        match self.mode {
            CompanionMode::Surf => self.surf,
            CompanionMode::Dive => self.dive,
        }
    }
}

/// Attach to a character to give it a surf/dive base while on water.
#[derive(Component, Debug, Clone, Default)]
pub struct SurfBase {
    pub sprite: Option<Entity>,
    /// Pin the base to this tile position instead of following the
    /// character, for scripted sequences.
    pub anchor_override: Option<(f32, f32)>,
}
