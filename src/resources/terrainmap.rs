//! Terrain tags of the current map.
//!
//! Only the per-tile terrain tag matters to the character systems: whether a
//! tile is walkable, water, ice or tall grass. Maps are described in JSON
//! with one string per row and one character per tile:
//!
//! | Char | Tag         |
//! |------|-------------|
//! | `.`  | `Normal`    |
//! | `"`  | `TallGrass` |
//! | `*`  | `Ice`       |
//! | `~`  | `Water`     |
//! | `#`  | `Wall`      |

use std::path::Path;

use bevy_ecs::prelude::Resource;
use serde::{Deserialize, Serialize};

use crate::resources::environment::Travel;

/// Rows of the character sprite hidden while standing in tall grass.
pub const BUSH_DEPTH: i32 = 12;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TerrainTag {
    #[default]
    Normal,
    TallGrass,
    Ice,
    Water,
    Wall,
}

impl TerrainTag {
    pub fn from_char(ch: char) -> TerrainTag {
        match ch {
            '"' => TerrainTag::TallGrass,
            '*' => TerrainTag::Ice,
            '~' => TerrainTag::Water,
            '#' => TerrainTag::Wall,
            _ => TerrainTag::Normal,
        }
    }

    pub fn is_water(self) -> bool {
        self == TerrainTag::Water
    }

    /// Ice forces walking and keeps the player sliding.
    pub fn is_ice(self) -> bool {
        self == TerrainTag::Ice
    }

    pub fn is_bush(self) -> bool {
        self == TerrainTag::TallGrass
    }

    /// Whether a character travelling as `travel` may enter this tile.
    pub fn passable(self, travel: &Travel) -> bool {
        match self {
            TerrainTag::Wall => false,
            TerrainTag::Water => travel.on_water(),
            _ => !travel.on_water(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize)]
struct TerrainMapFile {
    rows: Vec<String>,
}

#[derive(Resource, Debug, Clone, Default)]
pub struct TerrainMap {
    pub width: i32,
    pub height: i32,
    tags: Vec<TerrainTag>,
}

impl TerrainMap {
    /// Build from row strings; short rows are padded with `Normal`.
    pub fn from_rows<S: AsRef<str>>(rows: &[S]) -> Self {
        let height = rows.len() as i32;
        let width = rows
            .iter()
            .map(|r| r.as_ref().chars().count())
            .max()
            .unwrap_or(0) as i32;
        let mut tags = vec![TerrainTag::Normal; (width * height) as usize];
        for (y, row) in rows.iter().enumerate() {
            for (x, ch) in row.as_ref().chars().enumerate() {
                tags[y * width as usize + x] = TerrainTag::from_char(ch);
            }
        }
        Self {
            width,
            height,
            tags,
        }
    }

    /// Loads a terrain map from a JSON file.
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, Box<dyn std::error::Error>> {
        let file_content = std::fs::read_to_string(path)?;
        let file: TerrainMapFile = serde_json::from_str(&file_content)?;
        Ok(Self::from_rows(&file.rows))
    }

    pub fn valid(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && x < self.width && y < self.height
    }

    /// Tag at a tile; off-map tiles read as walls.
    pub fn tag_at(&self, x: i32, y: i32) -> TerrainTag {
        if !self.valid(x, y) {
            return TerrainTag::Wall;
        }
        self.tags[(y * self.width + x) as usize]
    }

    pub fn passable(&self, x: i32, y: i32, travel: &Travel) -> bool {
        self.tag_at(x, y).passable(travel)
    }
}
