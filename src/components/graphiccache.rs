use bevy_ecs::prelude::Component;

use crate::components::sheetsuffix::FrameGeometry;

/// What the graphic system last built a character's sprite from.
///
/// When sheet name, hue, tile id and bush depth all match, the sheet and
/// frame geometry are reused as-is.
#[derive(Component, Debug, Clone, Default, PartialEq)]
pub struct GraphicCache {
    pub sheet_name: String,
    pub hue: i32,
    pub tile_id: u32,
    pub bush_depth: i32,
    pub geometry: FrameGeometry,
    /// The sheet name contains an `offset` marker.
    pub sprite_offset: bool,
    /// Set once the cache has been filled at least once.
    pub built: bool,
}

impl GraphicCache {
    pub fn matches(&self, sheet_name: &str, hue: i32, tile_id: u32, bush_depth: i32) -> bool {
        self.built
            && self.sheet_name == sheet_name
            && self.hue == hue
            && self.tile_id == tile_id
            && self.bush_depth == bush_depth
    }
}
