//! Player charset metadata.
//!
//! Names the charset used for each way the player can travel. Every entry
//! except `walk_charset` is optional and falls back to the walking charset.
//!
//! ```json
//! {
//!   "walk_charset": "trainer_red",
//!   "run_charset": "trainer_red_run",
//!   "surf_charset": "trainer_red_surf"
//! }
//! ```

use std::path::Path;

use bevy_ecs::prelude::Resource;
use serde::{Deserialize, Serialize};

use crate::systems::movementtype::MovementType;

#[derive(Resource, Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlayerMetadata {
    pub walk_charset: String,
    #[serde(default)]
    pub run_charset: Option<String>,
    #[serde(default)]
    pub cycle_charset: Option<String>,
    #[serde(default)]
    pub surf_charset: Option<String>,
    #[serde(default)]
    pub dive_charset: Option<String>,
    #[serde(default)]
    pub slide_charset: Option<String>,
    #[serde(default)]
    pub fish_charset: Option<String>,
    #[serde(default)]
    pub surf_fish_charset: Option<String>,
}

impl PlayerMetadata {
    pub fn walking(walk_charset: impl Into<String>) -> Self {
        Self {
            walk_charset: walk_charset.into(),
            ..Default::default()
        }
    }

    /// Loads player metadata from a JSON file.
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, Box<dyn std::error::Error>> {
        let file_content = std::fs::read_to_string(path)?;
        let metadata: PlayerMetadata = serde_json::from_str(&file_content)?;
        Ok(metadata)
    }

    /// Charset for a movement type.
    pub fn charset_for(&self, movement: MovementType) -> &str {
        let specific = match movement {
            MovementType::Walking => None,
            MovementType::Running => self.run_charset.as_deref(),
            MovementType::Cycling => self.cycle_charset.as_deref(),
            MovementType::Surfing => self.surf_charset.as_deref(),
            MovementType::Diving => self.dive_charset.as_deref(),
            MovementType::IceSliding => self.slide_charset.as_deref(),
            MovementType::Fishing => self.fish_charset.as_deref(),
            MovementType::SurfFishing => self.surf_fish_charset.as_deref(),
        };
        specific.unwrap_or(&self.walk_charset)
    }
}
