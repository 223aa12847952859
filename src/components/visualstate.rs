//! Per-character visual state.
//!
//! One [`CharacterVisualState`] per character entity holds everything that
//! decides which sheet is on screen and which column of it: the base asset
//! name, the active [`SheetSuffix`], the resolved sheet, the pattern cycle and
//! the move-time value saved while an idle speed multiplier is applied.

use bevy_ecs::prelude::Component;

use crate::components::sheetsuffix::SheetSuffix;
use crate::resources::sheetstore::SheetId;

#[derive(Component, Debug, Clone, PartialEq)]
pub struct CharacterVisualState {
    /// Charset name without any suffix tag.
    pub base_name: String,
    pub suffix: SheetSuffix,
    /// Sheet currently shown; refreshed by the graphic system whenever
    /// `base_name + suffix` changes.
    pub sheet: Option<SheetId>,
    pub frame_width: i32,
    pub frame_height: i32,
    /// Current column in the pattern cycle, always below `suffix.cycle_length()`.
    pub pattern: u32,
    /// Resting column shown when the character stops.
    pub original_pattern: u32,
    /// Time accumulated towards the next pattern advance, in seconds.
    pub anime_count: f32,
    /// Move time from before the idle speed multiplier was applied.
    pub move_time_override: Option<f32>,
    /// Animate even while standing still.
    pub step_anime: bool,
    /// Animate while walking.
    pub walk_anime: bool,
    /// Freeze the pattern entirely.
    pub lock_pattern: bool,
}

impl CharacterVisualState {
    /// State for `name`, which may already carry a suffix tag.
    pub fn new(name: impl AsRef<str>) -> Self {
        let (base, suffix) = SheetSuffix::split(name.as_ref());
        Self {
            base_name: base.to_string(),
            suffix,
            sheet: None,
            frame_width: 0,
            frame_height: 0,
            pattern: 0,
            original_pattern: 0,
            anime_count: 0.0,
            move_time_override: None,
            step_anime: suffix.is_idle(),
            walk_anime: true,
            lock_pattern: false,
        }
    }

    /// Full asset name of the active sheet.
    pub fn asset_name(&self) -> String {
        self.suffix.asset_name(&self.base_name)
    }

    /// Switch sheet family, restarting the pattern cycle.
    pub fn set_suffix(&mut self, suffix: SheetSuffix) {
        if self.suffix == suffix {
            return;
        }
        self.suffix = suffix;
        self.pattern = self.original_pattern % suffix.cycle_length();
        self.anime_count = 0.0;
    }

    /// Replace the charset.
    ///
    /// A new charset always starts on its movement sheet. Returns the move
    /// time saved by an idle multiplier, if any, so the caller can restore
    /// it; `None` when nothing changed.
    pub fn set_base_name(&mut self, name: &str) -> Option<Option<f32>> {
        let (base, _) = SheetSuffix::split(name);
        if self.base_name == base {
            return None;
        }
        self.base_name = base.to_string();
        self.set_suffix(SheetSuffix::Movement);
        self.step_anime = false;
        Some(self.move_time_override.take())
    }

    /// Return to the resting column, as when a character stops walking.
    pub fn straighten(&mut self) {
        if self.walk_anime || self.step_anime {
            self.pattern = 0;
        }
        self.anime_count = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_splits_suffix() {
        let v = CharacterVisualState::new("trainer_red_stand");
        assert_eq!(v.base_name, "trainer_red");
        assert_eq!(v.suffix, SheetSuffix::Stand);
        assert_eq!(v.asset_name(), "trainer_red_stand");
        assert!(!v.step_anime);

        let v = CharacterVisualState::new("trainer_red_hot_idle");
        assert_eq!(v.suffix, SheetSuffix::IdleHot);
        assert!(v.step_anime);
    }

    #[test]
    fn test_set_suffix_wraps_pattern() {
        let mut v = CharacterVisualState::new("npc");
        v.set_suffix(SheetSuffix::Idle);
        v.pattern = 37;
        v.anime_count = 0.02;
        v.set_suffix(SheetSuffix::Movement);
        assert_eq!(v.pattern, 0);
        assert_eq!(v.anime_count, 0.0);
    }

    #[test]
    fn test_set_base_name_resets_to_movement() {
        let mut v = CharacterVisualState::new("boy_walk");
        v.set_suffix(SheetSuffix::Idle);
        v.step_anime = true;
        v.move_time_override = Some(0.25);

        assert_eq!(v.set_base_name("boy_run"), Some(Some(0.25)));
        assert_eq!(v.base_name, "boy_run");
        assert_eq!(v.suffix, SheetSuffix::Movement);
        assert!(!v.step_anime);
        assert_eq!(v.move_time_override, None);
    }

    #[test]
    fn test_set_base_name_same_is_noop() {
        let mut v = CharacterVisualState::new("boy_walk");
        v.set_suffix(SheetSuffix::Stand);
        assert_eq!(v.set_base_name("boy_walk"), None);
        assert_eq!(v.suffix, SheetSuffix::Stand);
    }

    #[test]
    fn test_straighten() {
        let mut v = CharacterVisualState::new("boy_walk");
        v.pattern = 5;
        v.anime_count = 0.01;
        v.straighten();
        assert_eq!(v.pattern, 0);
        assert_eq!(v.anime_count, 0.0);
    }
}
