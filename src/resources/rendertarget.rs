//! Fixed-resolution framebuffer.
//!
//! The map is drawn at the configured render size into a texture, which is
//! then scaled onto the window keeping its aspect ratio (letterboxed or
//! pillarboxed). Character sprites stay pixel-aligned at any window size.

use raylib::ffi::{self, TextureFilter};
use raylib::prelude::*;

/// Render texture at the game's internal resolution.
///
/// NonSend: it owns a GPU texture that must stay on the main thread.
pub struct RenderTarget {
    pub texture: RenderTexture2D,
    pub game_width: u32,
    pub game_height: u32,
}

impl RenderTarget {
    /// Create the framebuffer with nearest-neighbour filtering.
    pub fn new(
        rl: &mut RaylibHandle,
        th: &RaylibThread,
        width: u32,
        height: u32,
    ) -> Result<Self, String> {
        let texture = rl
            .load_render_texture(th, width, height)
            .map_err(|e| format!("Failed to create render texture: {}", e))?;
        unsafe {
            ffi::SetTextureFilter(texture.texture, TextureFilter::TEXTURE_FILTER_POINT as i32);
        }
        Ok(Self {
            texture,
            game_width: width,
            game_height: height,
        })
    }

    /// Whole framebuffer, flipped vertically for OpenGL.
    pub fn source_rect(&self) -> Rectangle {
        Rectangle {
            x: 0.0,
            y: 0.0,
            width: self.game_width as f32,
            height: -(self.game_height as f32),
        }
    }

    /// Where the framebuffer lands in a `window_w` x `window_h` window.
    pub fn dest_rect(&self, window_w: i32, window_h: i32) -> Rectangle {
        letterbox(self.game_width, self.game_height, window_w, window_h)
    }
}

/// Largest rectangle with the game's aspect ratio centred in the window.
pub fn letterbox(game_w: u32, game_h: u32, window_w: i32, window_h: i32) -> Rectangle {
    if game_w == 0 || game_h == 0 || window_w <= 0 || window_h <= 0 {
        return Rectangle::new(0.0, 0.0, 0.0, 0.0);
    }
    let scale = (window_w as f32 / game_w as f32).min(window_h as f32 / game_h as f32);
    let width = game_w as f32 * scale;
    let height = game_h as f32 * scale;
    Rectangle::new(
        (window_w as f32 - width) / 2.0,
        (window_h as f32 - height) / 2.0,
        width,
        height,
    )
}
