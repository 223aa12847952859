//! Character sprite composition.
//!
//! Each tick, every character's [`Sprite`] is rebuilt from its
//! [`MapCharacter`] and [`CharacterVisualState`]. The sheet itself is only
//! re-resolved when the graphic identity (sheet name, hue, tile id, bush
//! depth) changes; the retained handle is released at that point, or when
//! the character goes away, so the [`SheetStore`] can evict sheets nobody
//! shows anymore.
//!
//! Character sheets are 4 rows (down, left, right, up) of N columns, where N
//! depends on the [`SheetSuffix`](crate::components::sheetsuffix::SheetSuffix).
//! The pivot is the bottom centre of the frame, raised by 16 pixels for
//! sheets whose name contains `offset` and by the surf bob height.

use bevy_ecs::lifecycle::Remove;
use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;
use raylib::prelude::{Color, Rectangle, Vector2};

use crate::components::character::{Direction, MapCharacter, RegularTone};
use crate::components::graphiccache::GraphicCache;
use crate::components::sheetsuffix::{FrameGeometry, SheetSuffix};
use crate::components::sprite::Sprite;
use crate::components::visualstate::CharacterVisualState;
use crate::events::animation::CharacterAnimationEvent;
use crate::resources::environment::AmbientTone;
use crate::resources::mapview::{MapView, TILE_HEIGHT, TILE_WIDTH};
use crate::resources::screensize::ScreenSize;
use crate::resources::sheetstore::{SheetInfo, SheetStore};

/// Pivot lift for sheets marked `offset`.
pub const OFFSET_LIFT: i32 = 16;

/// Slice a sheet of `info` dimensions for `suffix`.
pub fn frame_geometry(info: SheetInfo, suffix: SheetSuffix) -> FrameGeometry {
    FrameGeometry::of_sheet(info.width, info.height, suffix)
}

/// Geometry of a tile graphic: one tile, one column.
pub fn tile_geometry() -> FrameGeometry {
    FrameGeometry {
        frame_width: TILE_WIDTH,
        frame_height: TILE_HEIGHT,
        frames_per_direction: 1,
    }
}

/// Sheet names containing `offset` (any case) sit 16 pixels higher.
pub fn has_offset_marker(name: &str) -> bool {
    name.to_ascii_lowercase().contains("offset")
}

/// Source rectangle of the frame for `pattern` facing `direction`.
pub fn source_rect(geometry: &FrameGeometry, pattern: u32, direction: Direction) -> Rectangle {
    let column = pattern % geometry.frames_per_direction.max(1);
    Rectangle::new(
        (column as i32 * geometry.frame_width) as f32,
        (direction.row() * geometry.frame_height) as f32,
        geometry.frame_width as f32,
        geometry.frame_height as f32,
    )
}

/// Pivot inside the frame.
pub fn sprite_origin(geometry: &FrameGeometry, offset: bool, bob_height: i32) -> Vector2 {
    let mut oy = geometry.frame_height;
    if offset {
        oy -= OFFSET_LIFT;
    }
    oy -= bob_height;
    Vector2 {
        x: (geometry.frame_width / 2) as f32,
        y: oy as f32,
    }
}

/// Refresh the cached sheet when the graphic identity changed.
fn refresh_graphic(
    character: &mut MapCharacter,
    visual: &mut CharacterVisualState,
    cache: &mut GraphicCache,
    sheets: &mut SheetStore,
) {
    let tile = character.has_tile_graphic();
    let name = if tile { String::new() } else { visual.asset_name() };
    if cache.matches(&name, character.hue, character.tile_id, character.bush_depth) {
        return;
    }

    // Retain before releasing so an unchanged sheet is never evicted in between.
    let handle = if tile {
        None
    } else {
        sheets.resolve(&visual.base_name, visual.suffix)
    };
    if let Some(old) = visual.sheet.take() {
        sheets.release(old);
    }

    let geometry = if tile {
        tile_geometry()
    } else {
        match handle {
            Some(h) => {
                visual.sheet = Some(h.id);
                frame_geometry(h.info, visual.suffix)
            }
            None => FrameGeometry::default(),
        }
    };
    visual.frame_width = geometry.frame_width;
    visual.frame_height = geometry.frame_height;
    character.sprite_size = (geometry.frame_width, geometry.frame_height);

    cache.sprite_offset = !tile && has_offset_marker(&name);
    cache.sheet_name = name;
    cache.hue = character.hue;
    cache.tile_id = character.tile_id;
    cache.bush_depth = character.bush_depth;
    cache.geometry = geometry;
    cache.built = true;
}

/// Build every character's sprite for this tick.
#[allow(clippy::type_complexity)]
pub fn character_graphic_system(
    mut query: Query<(
        Entity,
        &mut MapCharacter,
        &mut CharacterVisualState,
        &mut GraphicCache,
        &mut Sprite,
        Has<RegularTone>,
    )>,
    mut sheets: ResMut<SheetStore>,
    view: Res<MapView>,
    screen: Res<ScreenSize>,
    tone: Option<Res<AmbientTone>>,
    mut commands: Commands,
) {
    let ambient = tone.map_or(Color::WHITE, |t| t.0.color());
    for (entity, mut character, mut visual, mut cache, mut sprite, regular_tone) in query.iter_mut() {
        refresh_graphic(&mut character, &mut visual, &mut cache, &mut sheets);

        let geometry = cache.geometry;
        let tile = character.has_tile_graphic();
        sprite.sheet_key = cache.sheet_name.clone();
        sprite.tile_id = tile.then_some(character.tile_id);
        sprite.src = if tile {
            Rectangle::new(0.0, 0.0, geometry.frame_width as f32, geometry.frame_height as f32)
        } else {
            source_rect(&geometry, visual.pattern, character.direction)
        };
        sprite.origin = if tile {
            sprite_origin(&geometry, false, 0)
        } else {
            sprite_origin(&geometry, cache.sprite_offset, character.bob_height)
        };
        sprite.position = Vector2 {
            x: view.zoom_screen_x(character.screen_x(&view), &screen),
            y: view.zoom_screen_y(character.screen_y(&view), &screen),
        };
        sprite.zoom = Vector2 {
            x: view.zoom_x,
            y: view.zoom_y,
        };
        sprite.z = character.screen_z(&view, geometry.frame_height);
        sprite.tint = if regular_tone { Color::WHITE } else { ambient };
        sprite.opacity = character.opacity;
        sprite.blend_type = character.blend_type;
        sprite.bush_depth = character.bush_depth;
        sprite.visible = !character.transparent && geometry.frame_width > 0 && geometry.frame_height > 0;

        if let Some(animation_id) = character.animation_id.take() {
            commands.trigger(CharacterAnimationEvent {
                entity,
                animation_id,
            });
        }
    }
}

/// Drop the sheet reference of a character that is despawned or loses its
/// visual state.
pub fn release_sheet_on_remove(
    trigger: On<Remove, CharacterVisualState>,
    visuals: Query<&CharacterVisualState>,
    sheets: Option<ResMut<SheetStore>>,
) {
    let (Ok(visual), Some(mut sheets)) = (visuals.get(trigger.event().entity), sheets) else {
        return;
    };
    if let Some(id) = visual.sheet {
        sheets.release(id);
    }
}
