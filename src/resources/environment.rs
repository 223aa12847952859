//! Environmental context read by the character systems.
//!
//! The weather system, map metadata, travel state and UI state are all owned
//! elsewhere in a full game. This crate only needs a read-only snapshot of a
//! few answers from them, gathered in the [`Environment`] resource and passed
//! explicitly to the idle selector.

use std::collections::HashSet;
use std::path::Path;

use bevy_ecs::prelude::Resource;
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::components::tint::Tint;

/// Map flag for maps that use cold idle sheets.
pub const FLAG_TEMP_COLD: &str = "TempCold";
/// Map flag for maps that use hot idle sheets.
pub const FLAG_TEMP_HOT: &str = "TempHot";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum WeatherCategory {
    #[default]
    None,
    Rain,
    HeavyRain,
    Storm,
    Snow,
    Blizzard,
    Hail,
    Sandstorm,
    Sun,
    HarshSun,
    Fog,
    Wind,
    StrongWinds,
}

impl WeatherCategory {
    pub const ALL: [WeatherCategory; 13] = [
        WeatherCategory::None,
        WeatherCategory::Rain,
        WeatherCategory::HeavyRain,
        WeatherCategory::Storm,
        WeatherCategory::Snow,
        WeatherCategory::Blizzard,
        WeatherCategory::Hail,
        WeatherCategory::Sandstorm,
        WeatherCategory::Sun,
        WeatherCategory::HarshSun,
        WeatherCategory::Fog,
        WeatherCategory::Wind,
        WeatherCategory::StrongWinds,
    ];

    pub fn is_rain(self) -> bool {
        matches!(
            self,
            WeatherCategory::Rain | WeatherCategory::HeavyRain | WeatherCategory::Storm
        )
    }

    pub fn is_sandstorm(self) -> bool {
        self == WeatherCategory::Sandstorm
    }

    pub fn is_cold(self) -> bool {
        matches!(
            self,
            WeatherCategory::Snow | WeatherCategory::Blizzard | WeatherCategory::Hail
        )
    }

    pub fn is_hot(self) -> bool {
        matches!(self, WeatherCategory::Sun | WeatherCategory::HarshSun)
    }

    pub fn is_windy(self) -> bool {
        matches!(self, WeatherCategory::Wind | WeatherCategory::StrongWinds)
    }

    /// The next category, wrapping around. Used by the demo weather key.
    pub fn cycle(self) -> WeatherCategory {
        let i = Self::ALL.iter().position(|w| *w == self).unwrap_or(0);
        Self::ALL[(i + 1) % Self::ALL.len()]
    }
}

/// Flags of the current map.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MapMetadata {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub flags: FxHashSet<String>,
    /// Base tone of the map (caves, interiors), stacked under the weather tone.
    #[serde(default)]
    pub tone: Option<Tint>,
}

impl MapMetadata {
    pub fn has_flag(&self, flag: &str) -> bool {
        self.flags.contains(flag)
    }

    pub fn with_flag(mut self, flag: impl Into<String>) -> Self {
        self.flags.insert(flag.into());
        self
    }

    /// Loads map metadata from a JSON file.
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, Box<dyn std::error::Error>> {
        let file_content = std::fs::read_to_string(path)?;
        let metadata: MapMetadata = serde_json::from_str(&file_content)?;
        Ok(metadata)
    }
}

/// Vehicle and terrain travel state of the player.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Travel {
    pub surfing: bool,
    pub diving: bool,
    pub bicycle: bool,
    pub ice_sliding: bool,
    pub fishing: bool,
}

impl Travel {
    /// Riding something: idle sheets are never used.
    pub fn in_vehicle(&self) -> bool {
        self.surfing || self.diving || self.bicycle
    }

    pub fn on_water(&self) -> bool {
        self.surfing || self.diving
    }
}

#[derive(Resource, Debug, Clone, Default)]
pub struct Environment {
    pub weather: WeatherCategory,
    pub map: MapMetadata,
    pub travel: Travel,
    pub has_running_shoes: bool,
    /// Player option: run without holding the run key.
    pub run_by_default: bool,
    /// A message box is blocking input.
    pub message_window_showing: bool,
    pub in_menu: bool,
}

impl Environment {
    pub fn has_map_flag(&self, flag: &str) -> bool {
        self.map.has_flag(flag)
    }

    /// Dialogs and menus both keep the player from acting.
    pub fn input_blocked(&self) -> bool {
        self.message_window_showing || self.in_menu
    }
}

/// Screen tone applied to character sprites (day/night, weather).
#[derive(Resource, Debug, Clone, Copy, Default)]
pub struct AmbientTone(pub Tint);

/// Keep only flags this crate knows about; handy for logging map loads.
pub fn known_flags(metadata: &MapMetadata) -> HashSet<&str> {
    [FLAG_TEMP_COLD, FLAG_TEMP_HOT]
        .into_iter()
        .filter(|f| metadata.has_flag(f))
        .collect()
}
