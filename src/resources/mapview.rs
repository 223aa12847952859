//! Map view resource.
//!
//! Holds the part of the world that is on screen and the zoom the tilemap
//! renderer applies. Character sprites and the surf base go through the same
//! conversions so they stay glued to the tiles underneath them.
//!
//! World positions are stored in subpixels: one tile is
//! [`REAL_RES_X`] x [`REAL_RES_Y`] units.

use bevy_ecs::prelude::Resource;

use crate::resources::screensize::ScreenSize;

pub const TILE_WIDTH: i32 = 32;
pub const TILE_HEIGHT: i32 = 32;
pub const X_SUBPIXELS: i32 = 4;
pub const Y_SUBPIXELS: i32 = 4;
pub const REAL_RES_X: i32 = TILE_WIDTH * X_SUBPIXELS;
pub const REAL_RES_Y: i32 = TILE_HEIGHT * Y_SUBPIXELS;

/// Visible map region (top-left corner, in subpixels) and zoom.
#[derive(Resource, Debug, Clone, Copy)]
pub struct MapView {
    pub display_x: f32,
    pub display_y: f32,
    pub zoom_x: f32,
    pub zoom_y: f32,
}

impl Default for MapView {
    fn default() -> Self {
        Self {
            display_x: 0.0,
            display_y: 0.0,
            zoom_x: 1.0,
            zoom_y: 1.0,
        }
    }
}

impl MapView {
    pub fn with_zoom(mut self, zoom: f32) -> Self {
        self.zoom_x = zoom;
        self.zoom_y = zoom;
        self
    }

    /// Screen x of a subpixel world x, before zoom.
    pub fn to_screen_x(&self, real_x: f32) -> f32 {
        ((real_x - self.display_x) / X_SUBPIXELS as f32).round()
    }

    /// Screen y of a subpixel world y, before zoom.
    pub fn to_screen_y(&self, real_y: f32) -> f32 {
        ((real_y - self.display_y) / Y_SUBPIXELS as f32).round()
    }

    /// Scale a screen x around the horizontal centre of the screen.
    pub fn zoom_screen_x(&self, x: f32, screen: &ScreenSize) -> f32 {
        if self.zoom_x == 1.0 {
            return x;
        }
        let half = (screen.w / 2) as f32;
        (x - half) * self.zoom_x + half
    }

    /// Scale a screen y around the vertical centre of the screen.
    pub fn zoom_screen_y(&self, y: f32, screen: &ScreenSize) -> f32 {
        if self.zoom_y == 1.0 {
            return y;
        }
        let half = (screen.h / 2) as f32;
        (y - half) * self.zoom_y + half
    }

    /// Scroll so the given subpixel position sits in the middle of the screen.
    pub fn center_on(&mut self, real_x: f32, real_y: f32, screen: &ScreenSize) {
        let center_x = ((screen.w - TILE_WIDTH) / 2 * X_SUBPIXELS) as f32;
        let center_y = ((screen.h - TILE_HEIGHT) / 2 * Y_SUBPIXELS) as f32;
        self.display_x = real_x - center_x;
        self.display_y = real_y - center_y;
    }
}
