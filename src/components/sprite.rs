use bevy_ecs::prelude::Component;
use raylib::prelude::{Color, Rectangle, Vector2};

use crate::components::character::BlendType;

/// Composed on-screen placement of a character or surf base.
///
/// Written by the graphic and companion systems each tick and consumed by
/// the draw pass. `position` is the pivot in screen pixels; `origin` is the
/// pivot inside the source frame. `sheet_key` names a sheet in the
/// [`SheetStore`](crate::resources::sheetstore::SheetStore); tile graphics
/// carry `tile_id` instead.
#[derive(Component, Clone, Debug)]
pub struct Sprite {
    pub sheet_key: String,
    pub tile_id: Option<u32>,
    pub src: Rectangle,
    pub position: Vector2,
    pub origin: Vector2,
    pub z: i32,
    pub tint: Color,
    pub opacity: u8,
    pub blend_type: BlendType,
    pub zoom: Vector2,
    pub visible: bool,
    /// Rows at the bottom of the frame hidden in tall grass.
    pub bush_depth: i32,
}

impl Default for Sprite {
    fn default() -> Self {
        Self {
            sheet_key: String::new(),
            tile_id: None,
            src: Rectangle::new(0.0, 0.0, 0.0, 0.0),
            position: Vector2 { x: 0.0, y: 0.0 },
            origin: Vector2 { x: 0.0, y: 0.0 },
            z: 0,
            tint: Color::WHITE,
            opacity: 255,
            blend_type: BlendType::Normal,
            zoom: Vector2 { x: 1.0, y: 1.0 },
            visible: false,
            bush_depth: 0,
        }
    }
}

/// One textured quad of a sprite: source rect, destination rect and the
/// alpha (0-255) to draw it with.
#[derive(Debug, Clone, Copy)]
pub struct DrawPart {
    pub src: Rectangle,
    pub dest: Rectangle,
    pub alpha: u8,
}

/// Alpha of the submerged part of a sprite, out of 255.
pub const BUSH_ALPHA: u8 = 128;

impl Sprite {
    fn alpha(&self) -> u8 {
        ((self.tint.a as u16 * self.opacity as u16) / 255) as u8
    }

    /// Quads to draw, top-left anchored.
    ///
    /// With no bush depth this is the whole frame. Otherwise the frame is
    /// split: the top part at full alpha and the bottom `bush_depth` rows at
    /// [`BUSH_ALPHA`].
    pub fn draw_parts(&self) -> Vec<DrawPart> {
        if !self.visible || self.src.width <= 0.0 || self.src.height <= 0.0 {
            return Vec::new();
        }
        let left = self.position.x - self.origin.x * self.zoom.x;
        let top = self.position.y - self.origin.y * self.zoom.y;
        let alpha = self.alpha();
        let bush = (self.bush_depth as f32).clamp(0.0, self.src.height);
        let upper = self.src.height - bush;

        let mut parts = Vec::with_capacity(2);
        if upper > 0.0 {
            parts.push(DrawPart {
                src: Rectangle::new(self.src.x, self.src.y, self.src.width, upper),
                dest: Rectangle::new(
                    left,
                    top,
                    self.src.width * self.zoom.x,
                    upper * self.zoom.y,
                ),
                alpha,
            });
        }
        if bush > 0.0 {
            parts.push(DrawPart {
                src: Rectangle::new(self.src.x, self.src.y + upper, self.src.width, bush),
                dest: Rectangle::new(
                    left,
                    top + upper * self.zoom.y,
                    self.src.width * self.zoom.x,
                    bush * self.zoom.y,
                ),
                alpha: ((alpha as u16 * BUSH_ALPHA as u16) / 255) as u8,
            });
        }
        parts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sprite() -> Sprite {
        Sprite {
            sheet_key: "trainer_red".into(),
            src: Rectangle::new(64.0, 32.0, 32.0, 32.0),
            position: Vector2 { x: 100.0, y: 200.0 },
            origin: Vector2 { x: 16.0, y: 32.0 },
            visible: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_single_part_without_bush() {
        let parts = sprite().draw_parts();
        assert_eq!(parts.len(), 1);
        assert_eq!(parts[0].dest.x, 84.0);
        assert_eq!(parts[0].dest.y, 168.0);
        assert_eq!(parts[0].src.height, 32.0);
        assert_eq!(parts[0].alpha, 255);
    }

    #[test]
    fn test_bush_splits_frame() {
        let mut s = sprite();
        s.bush_depth = 12;
        let parts = s.draw_parts();
        assert_eq!(parts.len(), 2);
        assert_eq!(parts[0].src.height, 20.0);
        assert_eq!(parts[1].src.y, 52.0);
        assert_eq!(parts[1].src.height, 12.0);
        assert_eq!(parts[1].dest.y, 188.0);
        assert_eq!(parts[1].alpha, 128);
    }

    #[test]
    fn test_zoom_scales_destination() {
        let mut s = sprite();
        s.zoom = Vector2 { x: 2.0, y: 2.0 };
        let parts = s.draw_parts();
        assert_eq!(parts[0].dest.x, 68.0);
        assert_eq!(parts[0].dest.width, 64.0);
    }

    #[test]
    fn test_invisible_draws_nothing() {
        let mut s = sprite();
        s.visible = false;
        assert!(s.draw_parts().is_empty());
    }

    #[test]
    fn test_opacity_scales_alpha() {
        let mut s = sprite();
        s.opacity = 51;
        assert_eq!(s.draw_parts()[0].alpha, 51);
    }
}
