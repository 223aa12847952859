//! Map character component.
//!
//! [`MapCharacter`] is the logical side of a character standing on the tile
//! grid: where it is, which way it faces, how fast it walks and the per-frame
//! flags the animation and render systems read. The visual side (sheet and
//! pattern) lives in
//! [`CharacterVisualState`](crate::components::visualstate::CharacterVisualState).

use bevy_ecs::prelude::Component;
use serde::{Deserialize, Serialize};

use crate::resources::mapview::{MapView, REAL_RES_X, REAL_RES_Y, TILE_HEIGHT, TILE_WIDTH};

/// Tile ids at or above this value draw a tileset tile instead of a charset.
pub const TILE_GRAPHIC_THRESHOLD: u32 = 384;

/// Facing direction, using numpad codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Direction {
    #[default]
    Down = 2,
    Left = 4,
    Right = 6,
    Up = 8,
}

impl Direction {
    pub fn code(self) -> u8 {
        self as u8
    }

    pub fn from_code(code: u8) -> Option<Direction> {
        match code {
            2 => Some(Direction::Down),
            4 => Some(Direction::Left),
            6 => Some(Direction::Right),
            8 => Some(Direction::Up),
            _ => None,
        }
    }

    /// Sheet row for this direction: `(code - 2) / 2`.
    pub fn row(self) -> i32 {
        (self.code() as i32 - 2) / 2
    }

    /// Tile offset of one step in this direction.
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
            Direction::Up => (0, -1),
        }
    }
}

/// Marker for the player-controlled character.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Player;

/// Marker for characters drawn without the ambient tone.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct RegularTone;

/// How a sprite is composited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BlendType {
    #[default]
    Normal,
    Add,
    Subtract,
}

#[derive(Component, Debug, Clone)]
pub struct MapCharacter {
    /// Destination tile.
    pub x: i32,
    pub y: i32,
    /// Current position in subpixels; trails `x`/`y` while a step is in progress.
    pub real_x: f32,
    pub real_y: f32,
    pub direction: Direction,
    pub move_speed: u8,
    /// Seconds to walk one tile.
    pub move_time: f32,
    /// A scripted route is driving this character.
    pub move_route_forcing: bool,
    pub moved_last_frame: bool,
    pub moved_this_frame: bool,
    pub tile_id: u32,
    pub hue: i32,
    pub bush_depth: i32,
    pub bob_height: i32,
    pub pattern_surf: u32,
    pub transparent: bool,
    pub opacity: u8,
    pub blend_type: BlendType,
    pub always_on_top: bool,
    /// Queued one-shot animation, consumed by the graphic system.
    pub animation_id: Option<u32>,
    /// Frame size of the current graphic, written by the graphic system.
    pub sprite_size: (i32, i32),
}

impl MapCharacter {
    pub fn new(x: i32, y: i32) -> Self {
        let mut character = Self {
            x,
            y,
            real_x: (x * REAL_RES_X) as f32,
            real_y: (y * REAL_RES_Y) as f32,
            direction: Direction::Down,
            move_speed: 3,
            move_time: 0.0,
            move_route_forcing: false,
            moved_last_frame: false,
            moved_this_frame: false,
            tile_id: 0,
            hue: 0,
            bush_depth: 0,
            bob_height: 0,
            pattern_surf: 0,
            transparent: false,
            opacity: 255,
            blend_type: BlendType::Normal,
            always_on_top: false,
            animation_id: None,
            sprite_size: (0, 0),
        };
        character.set_move_speed(3);
        character
    }

    /// Seconds per tile for a move speed (3 is walking, 4 running, 5 cycling).
    pub fn move_time_for_speed(speed: u8) -> f32 {
        match speed {
            6 => 0.05,
            5 => 0.1,
            s => 2.0 / 2f32.powi(s.clamp(1, 4) as i32),
        }
    }

    pub fn set_move_speed(&mut self, speed: u8) {
        self.move_speed = speed;
        self.move_time = Self::move_time_for_speed(speed);
    }

    /// Still travelling between tiles.
    pub fn is_moving(&self) -> bool {
        self.real_x != (self.x * REAL_RES_X) as f32 || self.real_y != (self.y * REAL_RES_Y) as f32
    }

    /// Snap to a tile, cancelling any step in progress.
    pub fn moveto(&mut self, x: i32, y: i32) {
        self.x = x;
        self.y = y;
        self.real_x = (x * REAL_RES_X) as f32;
        self.real_y = (y * REAL_RES_Y) as f32;
    }

    pub fn screen_x(&self, view: &MapView) -> f32 {
        view.to_screen_x(self.real_x) + (TILE_WIDTH / 2) as f32
    }

    /// Screen y of the character's feet.
    pub fn screen_y_ground(&self, view: &MapView) -> f32 {
        view.to_screen_y(self.real_y) + TILE_HEIGHT as f32
    }

    pub fn screen_y(&self, view: &MapView) -> f32 {
        self.screen_y_ground(view)
    }

    /// Draw order for a sprite of `height` pixels.
    pub fn screen_z(&self, view: &MapView, height: i32) -> i32 {
        if self.always_on_top {
            return 999;
        }
        let z = self.screen_y_ground(view) as i32;
        if height > TILE_HEIGHT {
            z + TILE_HEIGHT - 1
        } else {
            z
        }
    }

    pub fn has_tile_graphic(&self) -> bool {
        self.tile_id >= TILE_GRAPHIC_THRESHOLD
    }
}
