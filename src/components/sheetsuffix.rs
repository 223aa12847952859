//! Sheet suffix tags.
//!
//! A character's graphic is a base asset name plus one [`SheetSuffix`]. The
//! suffix decides the filename tag, how many frames each direction row holds
//! and how fast the pattern cycles. Every piece of code that needs one of
//! those numbers goes through this table, so adding a new sheet family means
//! adding one variant here.
//!
//! | Suffix          | Tag                | Frames / row | Pattern divisor |
//! |-----------------|--------------------|--------------|-----------------|
//! | `Movement`      | *(none)*           | 8            | 8               |
//! | `Stand`         | `_stand`           | 1            | 8               |
//! | `Idle`          | `_idle`            | 40           | 4.25            |
//! | `IdleRain`      | `_rain_idle`       | 40           | 4.25            |
//! | `IdleSandstorm` | `_sandstorm_idle`  | 40           | 4.25            |
//! | `IdleCold`      | `_cold_idle`       | 40           | 4.25            |
//! | `IdleHot`       | `_hot_idle`        | 40           | 4.25            |
//! | `IdleWind`      | `_wind_idle`       | 40           | 4.25            |

use serde::{Deserialize, Serialize};

/// Number of direction rows stacked vertically in every character sheet.
pub const DIRECTION_ROWS: i32 = 4;

/// Which sheet family of a character is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SheetSuffix {
    #[default]
    Movement,
    Stand,
    Idle,
    IdleRain,
    IdleSandstorm,
    IdleCold,
    IdleHot,
    IdleWind,
}

impl SheetSuffix {
    pub const ALL: [SheetSuffix; 8] = [
        SheetSuffix::Movement,
        SheetSuffix::Stand,
        SheetSuffix::Idle,
        SheetSuffix::IdleRain,
        SheetSuffix::IdleSandstorm,
        SheetSuffix::IdleCold,
        SheetSuffix::IdleHot,
        SheetSuffix::IdleWind,
    ];

    /// Filename tag appended to the base name.
    pub fn tag(self) -> &'static str {
        match self {
            SheetSuffix::Movement => "",
            SheetSuffix::Stand => "_stand",
            SheetSuffix::Idle => "_idle",
            SheetSuffix::IdleRain => "_rain_idle",
            SheetSuffix::IdleSandstorm => "_sandstorm_idle",
            SheetSuffix::IdleCold => "_cold_idle",
            SheetSuffix::IdleHot => "_hot_idle",
            SheetSuffix::IdleWind => "_wind_idle",
        }
    }

    /// Columns per direction row in the sheet (the width divisor).
    pub fn frames_per_direction(self) -> u32 {
        match self {
            SheetSuffix::Movement => 8,
            SheetSuffix::Stand => 1,
            _ => 40,
        }
    }

    /// Length of the pattern cycle the step animation wraps around.
    ///
    /// The standing sheet keeps the movement cycle; its single column is
    /// picked by wrapping the pattern into [`Self::frames_per_direction`].
    pub fn cycle_length(self) -> u32 {
        if self.is_idle() { 40 } else { 8 }
    }

    /// Divides the per-tile move time to get the time each pattern is shown.
    pub fn pattern_divisor(self) -> f32 {
        if self.is_idle() { 4.25 } else { 8.0 }
    }

    pub fn is_idle(self) -> bool {
        !matches!(self, SheetSuffix::Movement | SheetSuffix::Stand)
    }

    /// Full asset name for `base` with this suffix.
    pub fn asset_name(self, base: &str) -> String {
        format!("{}{}", base, self.tag())
    }

    /// Split an asset name into its base name and suffix.
    ///
    /// Themed idle tags are tried before the generic `_idle` tag so that
    /// `red_rain_idle` is not read as `red_rain` + `_idle`. A name that would
    /// leave an empty base is returned unchanged as a movement sheet.
    pub fn split(name: &str) -> (&str, SheetSuffix) {
        const ORDER: [SheetSuffix; 7] = [
            SheetSuffix::IdleRain,
            SheetSuffix::IdleSandstorm,
            SheetSuffix::IdleCold,
            SheetSuffix::IdleHot,
            SheetSuffix::IdleWind,
            SheetSuffix::Idle,
            SheetSuffix::Stand,
        ];
        for suffix in ORDER {
            if let Some(base) = name.strip_suffix(suffix.tag()) {
                if !base.is_empty() {
                    return (base, suffix);
                }
            }
        }
        (name, SheetSuffix::Movement)
    }
}

/// Frame size of a resolved sheet for one suffix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrameGeometry {
    pub frame_width: i32,
    pub frame_height: i32,
    pub frames_per_direction: u32,
}

impl FrameGeometry {
    /// Slice a `width` x `height` sheet according to `suffix`.
    pub fn of_sheet(width: i32, height: i32, suffix: SheetSuffix) -> Self {
        let frames = suffix.frames_per_direction();
        Self {
            frame_width: width / frames as i32,
            frame_height: height / DIRECTION_ROWS,
            frames_per_direction: frames,
        }
    }
}
