//! Idle sheet selection for the player.
//!
//! After the player stops, the character first swaps to its standing sheet
//! (`_stand`), and once it has been left alone for
//! [`IdleSettings::timer_frames`] frames to an idle sheet themed by the
//! weather and map temperature (`_rain_idle`, `_cold_idle`, ...), falling
//! back to the plain `_idle` sheet. Moving or pressing a direction puts the
//! movement sheet back.
//!
//! [`select_idle_mode`] is a pure transition over [`IdleState`]: it takes the
//! previous state and this tick's inputs and returns an [`IdleOutcome`]. The
//! system commits only [`IdleOutcome::Changed`]; a faulted pass leaves the
//! player exactly as it was so rendering and movement carry on.
//!
//! # Theme priority
//!
//! 1. rain, heavy rain, storm → `_rain_idle`
//! 2. sandstorm → `_sandstorm_idle`
//! 3. `TempCold` map flag, snow, blizzard, hail → `_cold_idle`
//! 4. `TempHot` map flag, sun, harsh sun → `_hot_idle`
//! 5. wind, strong winds → `_wind_idle`
//! 6. otherwise → `_idle`

use std::fmt;

use bevy_ecs::prelude::*;
use log::debug;

use crate::components::character::{MapCharacter, Player};
use crate::components::idletracker::IdleTracker;
use crate::components::sheetsuffix::SheetSuffix;
use crate::components::visualstate::CharacterVisualState;
use crate::resources::environment::{Environment, FLAG_TEMP_COLD, FLAG_TEMP_HOT};
use crate::resources::gameconfig::{GameConfig, IdleSettings};
use crate::resources::input::InputState;
use crate::resources::sheetstore::{SheetError, SheetStore};
use crate::resources::worldtime::WorldTime;

/// Everything the selector reads and may rewrite.
#[derive(Debug, Clone, PartialEq)]
pub struct IdleState {
    pub visual: CharacterVisualState,
    pub tracker: IdleTracker,
    /// Seconds per tile; stretched while the generic idle sheet plays.
    pub move_time: f32,
}

/// This tick's inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct IdleInputs {
    pub moving: bool,
    /// Pressed direction code, 0 for none.
    pub direction: u8,
}

#[derive(Debug, Clone, PartialEq)]
pub enum IdleFault {
    /// The sheet backend failed for a reason other than "not there".
    Lookup(SheetError),
    /// A sheet exists but is too small to slice.
    DegenerateSheet(String),
}

impl fmt::Display for IdleFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IdleFault::Lookup(e) => write!(f, "sheet lookup failed: {}", e),
            IdleFault::DegenerateSheet(name) => write!(f, "sheet '{}' has no frames", name),
        }
    }
}

impl std::error::Error for IdleFault {}

#[derive(Debug, Clone, PartialEq)]
pub enum IdleOutcome {
    Changed(IdleState),
    Unchanged,
    Faulted(IdleFault),
}

/// Idle sheet for the current weather and map, before existence checks.
pub fn idle_theme(env: &Environment) -> SheetSuffix {
    let weather = env.weather;
    if weather.is_rain() {
        SheetSuffix::IdleRain
    } else if weather.is_sandstorm() {
        SheetSuffix::IdleSandstorm
    } else if env.has_map_flag(FLAG_TEMP_COLD) || weather.is_cold() {
        SheetSuffix::IdleCold
    } else if env.has_map_flag(FLAG_TEMP_HOT) || weather.is_hot() {
        SheetSuffix::IdleHot
    } else if weather.is_windy() {
        SheetSuffix::IdleWind
    } else {
        SheetSuffix::Idle
    }
}

/// Run one selector pass.
pub fn select_idle_mode(
    prev: &IdleState,
    inputs: &IdleInputs,
    env: &Environment,
    sheets: &SheetStore,
    settings: &IdleSettings,
) -> IdleOutcome {
    if prev.visual.base_name.is_empty() {
        return IdleOutcome::Unchanged;
    }
    let mut next = prev.clone();
    if let Err(fault) = step(&mut next, inputs, env, sheets, settings) {
        return IdleOutcome::Faulted(fault);
    }
    if next == *prev {
        IdleOutcome::Unchanged
    } else {
        IdleOutcome::Changed(next)
    }
}

fn step(
    state: &mut IdleState,
    inputs: &IdleInputs,
    env: &Environment,
    sheets: &SheetStore,
    settings: &IdleSettings,
) -> Result<(), IdleFault> {
    let tracker = &mut state.tracker;
    if inputs.moving != tracker.was_moving || inputs.direction != tracker.last_direction {
        tracker.was_moving = inputs.moving;
        tracker.last_direction = inputs.direction;
        if inputs.moving {
            tracker.idle_timer = 0;
            if state.visual.suffix != SheetSuffix::Movement {
                switch_to_normal_sprite(state, env);
            }
        } else {
            tracker.idle_timer = tracker.idle_timer.saturating_add(1);
        }
    } else if !inputs.moving {
        tracker.idle_timer = tracker.idle_timer.saturating_add(1);
    }

    if !inputs.moving && inputs.direction == 0 {
        let timer = state.tracker.idle_timer;
        if timer > 0 && timer < settings.timer_frames {
            switch_to_stand_sprite(state, sheets)?;
        }
        if timer >= settings.timer_frames && !env.message_window_showing {
            switch_to_idle_sprite(state, env, sheets, settings)?;
        }
    }

    if state.visual.suffix != SheetSuffix::Movement
        && inputs.direction != 0
        && !env.message_window_showing
    {
        switch_to_normal_sprite(state, env);
    }
    Ok(())
}

/// Put the movement sheet back.
///
/// Clears the step animation flag and idle timer and restores a move time
/// saved by the idle speed multiplier. Calling it twice is the same as
/// calling it once. Does nothing while a menu is open.
pub fn switch_to_normal_sprite(state: &mut IdleState, env: &Environment) {
    if state.visual.base_name.is_empty() || env.in_menu {
        return;
    }
    if state.visual.suffix != SheetSuffix::Movement {
        state.visual.set_suffix(SheetSuffix::Movement);
        state.visual.step_anime = false;
        state.tracker.idle_timer = 0;
    }
    if let Some(original) = state.visual.move_time_override.take() {
        state.move_time = original;
    }
}

/// Swap to the standing sheet if the character has one.
pub fn switch_to_stand_sprite(state: &mut IdleState, sheets: &SheetStore) -> Result<(), IdleFault> {
    if state.visual.base_name.is_empty() || state.visual.suffix != SheetSuffix::Movement {
        return Ok(());
    }
    if sheet_available(sheets, &state.visual.base_name, SheetSuffix::Stand)? {
        state.visual.set_suffix(SheetSuffix::Stand);
        state.visual.step_anime = false;
    }
    Ok(())
}

/// Swap to the themed idle sheet, or the generic one, if either exists.
///
/// Never used while surfing, diving or cycling. The generic sheet plays
/// with the move time divided by [`IdleSettings::animation_speed`].
pub fn switch_to_idle_sprite(
    state: &mut IdleState,
    env: &Environment,
    sheets: &SheetStore,
    settings: &IdleSettings,
) -> Result<(), IdleFault> {
    if state.visual.base_name.is_empty() || state.visual.suffix.is_idle() {
        return Ok(());
    }
    if env.travel.in_vehicle() {
        return Ok(());
    }
    let base = state.visual.base_name.clone();
    let theme = idle_theme(env);
    let entered = if sheet_available(sheets, &base, theme)? {
        theme
    } else if theme != SheetSuffix::Idle && sheet_available(sheets, &base, SheetSuffix::Idle)? {
        SheetSuffix::Idle
    } else {
        return Ok(());
    };

    state.visual.set_suffix(entered);
    state.visual.step_anime = true;
    if entered == SheetSuffix::Idle {
        apply_idle_speed(state, settings.animation_speed);
    }
    Ok(())
}

fn apply_idle_speed(state: &mut IdleState, speed: f32) {
    if speed == 1.0 || speed <= 0.0 || state.visual.move_time_override.is_some() {
        return;
    }
    state.visual.move_time_override = Some(state.move_time);
    state.move_time /= speed;
}

fn sheet_available(sheets: &SheetStore, base: &str, suffix: SheetSuffix) -> Result<bool, IdleFault> {
    let name = suffix.asset_name(base);
    match sheets.lookup(&name) {
        Ok(info) => {
            let geometry_ok = info.width >= suffix.frames_per_direction() as i32 && info.height >= 4;
            if geometry_ok {
                Ok(true)
            } else {
                Err(IdleFault::DegenerateSheet(name))
            }
        }
        Err(SheetError::NotFound(_)) => Ok(false),
        Err(e) => Err(IdleFault::Lookup(e)),
    }
}

/// Run the idle selector for the player on every poll frame.
pub fn idle_selector_system(
    mut query: Query<
        (&mut CharacterVisualState, &mut IdleTracker, &mut MapCharacter),
        With<Player>,
    >,
    input: Res<InputState>,
    env: Res<Environment>,
    sheets: Res<SheetStore>,
    config: Res<GameConfig>,
    time: Res<WorldTime>,
) {
    if !config.idle.polls_on(time.frame_count) {
        return;
    }
    let inputs_direction = input.dir4();
    for (mut visual, mut tracker, mut character) in query.iter_mut() {
        let prev = IdleState {
            visual: visual.clone(),
            tracker: *tracker,
            move_time: character.move_time,
        };
        let inputs = IdleInputs {
            // Between two ice tiles the slide is still under way.
            moving: character.is_moving() || env.travel.ice_sliding,
            direction: inputs_direction,
        };
        match select_idle_mode(&prev, &inputs, &env, &sheets, &config.idle) {
            IdleOutcome::Changed(next) => {
                if next.visual.suffix != prev.visual.suffix {
                    debug!(
                        "Player sheet '{}' -> '{}' (idle timer {})",
                        prev.visual.asset_name(),
                        next.visual.asset_name(),
                        next.tracker.idle_timer
                    );
                }
                *visual = next.visual;
                *tracker = next.tracker;
                character.move_time = next.move_time;
            }
            IdleOutcome::Unchanged => {}
            IdleOutcome::Faulted(fault) => {
                debug!("Idle selection skipped: {}", fault);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::environment::{MapMetadata, WeatherCategory};
    use crate::resources::sheetstore::MemorySheetLoader;

    const MOVE_TIME: f32 = 0.25;

    fn state(name: &str) -> IdleState {
        IdleState {
            visual: CharacterVisualState::new(name),
            tracker: IdleTracker::default(),
            move_time: MOVE_TIME,
        }
    }

    fn sheets(names: &[&str]) -> SheetStore {
        let loader = names
            .iter()
            .fold(MemorySheetLoader::new(), |l, n| {
                let width = if n.ends_with("_idle") {
                    1280
                } else if n.ends_with("_stand") {
                    32
                } else {
                    256
                };
                l.with_sheet(*n, width, 192)
            });
        SheetStore::new(loader)
    }

    fn still() -> IdleInputs {
        IdleInputs::default()
    }

    fn run(
        s: &IdleState,
        inputs: IdleInputs,
        env: &Environment,
        store: &SheetStore,
        settings: &IdleSettings,
    ) -> IdleState {
        match select_idle_mode(s, &inputs, env, store, settings) {
            IdleOutcome::Changed(next) => next,
            IdleOutcome::Unchanged => s.clone(),
            IdleOutcome::Faulted(f) => panic!("unexpected fault: {}", f),
        }
    }

    fn at_threshold_minus_one(name: &str, settings: &IdleSettings) -> IdleState {
        let mut s = state(name);
        s.tracker.idle_timer = settings.timer_frames - 1;
        s
    }

    #[test]
    fn test_theme_priority() {
        let mut env = Environment::default();
        assert_eq!(idle_theme(&env), SheetSuffix::Idle);

        env.weather = WeatherCategory::Wind;
        assert_eq!(idle_theme(&env), SheetSuffix::IdleWind);

        env.map = MapMetadata::default().with_flag(FLAG_TEMP_HOT);
        assert_eq!(idle_theme(&env), SheetSuffix::IdleHot);

        env.map = env.map.clone().with_flag(FLAG_TEMP_COLD);
        assert_eq!(idle_theme(&env), SheetSuffix::IdleCold);

        env.weather = WeatherCategory::Sandstorm;
        assert_eq!(idle_theme(&env), SheetSuffix::IdleSandstorm);

        env.weather = WeatherCategory::Storm;
        assert_eq!(idle_theme(&env), SheetSuffix::IdleRain);
    }

    #[test]
    fn test_weather_alone_selects_theme() {
        let mut env = Environment::default();
        env.weather = WeatherCategory::Hail;
        assert_eq!(idle_theme(&env), SheetSuffix::IdleCold);
        env.weather = WeatherCategory::HarshSun;
        assert_eq!(idle_theme(&env), SheetSuffix::IdleHot);
        env.weather = WeatherCategory::Fog;
        assert_eq!(idle_theme(&env), SheetSuffix::Idle);
    }

    #[test]
    fn test_empty_name_is_unchanged() {
        let s = state("");
        let out = select_idle_mode(
            &s,
            &still(),
            &Environment::default(),
            &sheets(&[]),
            &IdleSettings::default(),
        );
        assert_eq!(out, IdleOutcome::Unchanged);
    }

    #[test]
    fn test_timer_counts_while_still() {
        let store = sheets(&["trainer_red"]);
        let env = Environment::default();
        let settings = IdleSettings::default();
        let mut s = state("trainer_red");
        for _ in 0..5 {
            s = run(&s, still(), &env, &store, &settings);
        }
        assert_eq!(s.tracker.idle_timer, 5);
        assert_eq!(s.visual.suffix, SheetSuffix::Movement);
    }

    #[test]
    fn test_timer_resets_when_movement_starts() {
        let store = sheets(&["trainer_red"]);
        let env = Environment::default();
        let settings = IdleSettings::default();
        let mut s = state("trainer_red");
        s.tracker.idle_timer = 500;
        let moving = IdleInputs {
            moving: true,
            direction: 6,
        };
        let s = run(&s, moving, &env, &store, &settings);
        assert_eq!(s.tracker.idle_timer, 0);
        assert!(s.tracker.was_moving);
        assert_eq!(s.tracker.last_direction, 6);
    }

    #[test]
    fn test_timer_does_not_count_while_moving() {
        let store = sheets(&["trainer_red"]);
        let env = Environment::default();
        let settings = IdleSettings::default();
        let moving = IdleInputs {
            moving: true,
            direction: 2,
        };
        let mut s = run(&state("trainer_red"), moving, &env, &store, &settings);
        s = run(&s, moving, &env, &store, &settings);
        assert_eq!(s.tracker.idle_timer, 0);
    }

    #[test]
    fn test_enters_stand_on_first_still_tick() {
        let store = sheets(&["trainer_red", "trainer_red_stand"]);
        let env = Environment::default();
        let settings = IdleSettings::default();
        let s = run(&state("trainer_red"), still(), &env, &store, &settings);
        assert_eq!(s.visual.suffix, SheetSuffix::Stand);
        assert_eq!(s.visual.asset_name(), "trainer_red_stand");
        assert!(!s.visual.step_anime);
        assert_eq!(s.visual.move_time_override, None);
        assert_eq!(s.move_time, MOVE_TIME);
    }

    #[test]
    fn test_stand_missing_stays_silently() {
        let store = sheets(&["trainer_red"]);
        let env = Environment::default();
        let settings = IdleSettings::default();
        let s = run(&state("trainer_red"), still(), &env, &store, &settings);
        assert_eq!(s.visual.suffix, SheetSuffix::Movement);
        assert_eq!(s.tracker.idle_timer, 1);
    }

    #[test]
    fn test_stand_then_revert_restores_name() {
        let store = sheets(&["trainer_red", "trainer_red_stand"]);
        let env = Environment::default();
        let settings = IdleSettings::default();
        let s = run(&state("trainer_red"), still(), &env, &store, &settings);
        assert_eq!(s.visual.suffix, SheetSuffix::Stand);
        let pressed = IdleInputs {
            moving: false,
            direction: 8,
        };
        let s = run(&s, pressed, &env, &store, &settings);
        assert_eq!(s.visual.asset_name(), "trainer_red");
        assert_eq!(s.visual.base_name, "trainer_red");
        assert_eq!(s.tracker.idle_timer, 0);
    }

    #[test]
    fn test_idle_at_exact_threshold() {
        let store = sheets(&["trainer_red", "trainer_red_stand", "trainer_red_idle"]);
        let env = Environment::default();
        let settings = IdleSettings::default();
        let mut s = at_threshold_minus_one("trainer_red", &settings);
        s.visual.set_suffix(SheetSuffix::Stand);
        s.tracker.idle_timer -= 1;

        // timer -> threshold - 1: still standing
        let s = run(&s, still(), &env, &store, &settings);
        assert_eq!(s.tracker.idle_timer, settings.timer_frames - 1);
        assert_eq!(s.visual.suffix, SheetSuffix::Stand);

        // timer -> threshold: idle on this exact tick
        let s = run(&s, still(), &env, &store, &settings);
        assert_eq!(s.tracker.idle_timer, settings.timer_frames);
        assert_eq!(s.visual.suffix, SheetSuffix::Idle);
        assert_eq!(s.visual.asset_name(), "trainer_red_idle");
    }

    #[test]
    fn test_threshold_without_idle_sheet_stays_on_stand() {
        let store = sheets(&["trainer_red", "trainer_red_stand"]);
        let env = Environment::default();
        let settings = IdleSettings::default();
        let mut s = at_threshold_minus_one("trainer_red", &settings);
        s.visual.set_suffix(SheetSuffix::Stand);
        let s = run(&s, still(), &env, &store, &settings);
        assert_eq!(s.visual.suffix, SheetSuffix::Stand);
    }

    #[test]
    fn test_no_idle_assets_keeps_base() {
        let store = sheets(&["trainer_red"]);
        let env = Environment::default();
        let settings = IdleSettings::default();
        let s = at_threshold_minus_one("trainer_red", &settings);
        let s = run(&s, still(), &env, &store, &settings);
        assert_eq!(s.visual.asset_name(), "trainer_red");
        assert_eq!(s.visual.move_time_override, None);
        assert_eq!(s.move_time, MOVE_TIME);
        assert!(!s.visual.step_anime);
    }

    #[test]
    fn test_generic_idle_doubles_move_time() {
        let store = sheets(&["trainer_red", "trainer_red_idle"]);
        let env = Environment::default();
        let settings = IdleSettings::default();
        let s = at_threshold_minus_one("trainer_red", &settings);
        let s = run(&s, still(), &env, &store, &settings);
        assert_eq!(s.visual.asset_name(), "trainer_red_idle");
        assert!(s.visual.step_anime);
        assert_eq!(s.visual.move_time_override, Some(MOVE_TIME));
        assert_eq!(s.move_time, MOVE_TIME * 2.0);
    }

    #[test]
    fn test_themed_idle_keeps_move_time() {
        let store = sheets(&["trainer_red", "trainer_red_rain_idle", "trainer_red_idle"]);
        let env = Environment {
            weather: WeatherCategory::Rain,
            ..Default::default()
        };
        let settings = IdleSettings::default();
        let s = at_threshold_minus_one("trainer_red", &settings);
        let s = run(&s, still(), &env, &store, &settings);
        assert_eq!(s.visual.asset_name(), "trainer_red_rain_idle");
        assert!(s.visual.step_anime);
        assert_eq!(s.visual.move_time_override, None);
        assert_eq!(s.move_time, MOVE_TIME);
    }

    #[test]
    fn test_themed_missing_falls_back_to_generic() {
        let store = sheets(&["trainer_red", "trainer_red_idle"]);
        let env = Environment {
            weather: WeatherCategory::Snow,
            ..Default::default()
        };
        let settings = IdleSettings::default();
        let s = at_threshold_minus_one("trainer_red", &settings);
        let s = run(&s, still(), &env, &store, &settings);
        assert_eq!(s.visual.suffix, SheetSuffix::Idle);
        assert_eq!(s.move_time, MOVE_TIME * 2.0);
    }

    #[test]
    fn test_speed_multiplier_of_one_is_noop() {
        let store = sheets(&["trainer_red", "trainer_red_idle"]);
        let env = Environment::default();
        let settings = IdleSettings {
            animation_speed: 1.0,
            ..Default::default()
        };
        let s = at_threshold_minus_one("trainer_red", &settings);
        let s = run(&s, still(), &env, &store, &settings);
        assert_eq!(s.visual.suffix, SheetSuffix::Idle);
        assert_eq!(s.visual.move_time_override, None);
        assert_eq!(s.move_time, MOVE_TIME);
    }

    #[test]
    fn test_never_idle_in_vehicle() {
        let store = sheets(&["trainer_red", "trainer_red_idle"]);
        let settings = IdleSettings::default();
        for travel in [
            crate::resources::environment::Travel {
                surfing: true,
                ..Default::default()
            },
            crate::resources::environment::Travel {
                diving: true,
                ..Default::default()
            },
            crate::resources::environment::Travel {
                bicycle: true,
                ..Default::default()
            },
        ] {
            let env = Environment {
                travel,
                ..Default::default()
            };
            let mut s = state("trainer_red");
            s.tracker.idle_timer = 100_000;
            let s = run(&s, still(), &env, &store, &settings);
            assert_eq!(s.visual.suffix, SheetSuffix::Movement, "{:?}", travel);
        }
    }

    #[test]
    fn test_dialog_blocks_idle_entry() {
        let store = sheets(&["trainer_red", "trainer_red_idle"]);
        let env = Environment {
            message_window_showing: true,
            ..Default::default()
        };
        let settings = IdleSettings::default();
        let s = at_threshold_minus_one("trainer_red", &settings);
        let s = run(&s, still(), &env, &store, &settings);
        assert_eq!(s.visual.suffix, SheetSuffix::Movement);
        assert_eq!(s.tracker.idle_timer, settings.timer_frames);
    }

    #[test]
    fn test_dialog_blocks_revert_on_input() {
        let store = sheets(&["trainer_red", "trainer_red_stand"]);
        let env = Environment {
            message_window_showing: true,
            ..Default::default()
        };
        let settings = IdleSettings::default();
        let mut s = state("trainer_red");
        s.visual.set_suffix(SheetSuffix::Stand);
        s.tracker.idle_timer = 10;
        let pressed = IdleInputs {
            moving: false,
            direction: 4,
        };
        let s = run(&s, pressed, &env, &store, &settings);
        assert_eq!(s.visual.suffix, SheetSuffix::Stand);
    }

    #[test]
    fn test_movement_reverts_idle_and_restores_move_time() {
        let store = sheets(&["trainer_red", "trainer_red_idle"]);
        let env = Environment::default();
        let settings = IdleSettings::default();
        let s = at_threshold_minus_one("trainer_red", &settings);
        let s = run(&s, still(), &env, &store, &settings);
        assert_eq!(s.move_time, MOVE_TIME * 2.0);

        let moving = IdleInputs {
            moving: true,
            direction: 2,
        };
        let s = run(&s, moving, &env, &store, &settings);
        assert_eq!(s.visual.suffix, SheetSuffix::Movement);
        assert!(!s.visual.step_anime);
        assert_eq!(s.move_time, MOVE_TIME);
        assert_eq!(s.visual.move_time_override, None);
        assert_eq!(s.visual.pattern, 0);
    }

    #[test]
    fn test_switch_to_normal_is_idempotent() {
        let env = Environment::default();
        let mut s = state("trainer_red");
        s.visual.set_suffix(SheetSuffix::IdleWind);
        s.visual.step_anime = true;
        s.visual.move_time_override = Some(0.1);
        s.move_time = 0.2;

        switch_to_normal_sprite(&mut s, &env);
        let once = s.clone();
        switch_to_normal_sprite(&mut s, &env);
        assert_eq!(s, once);
        assert_eq!(s.visual.asset_name(), "trainer_red");
        assert_eq!(s.move_time, 0.1);
    }

    #[test]
    fn test_menu_blocks_revert() {
        let env = Environment {
            in_menu: true,
            ..Default::default()
        };
        let mut s = state("trainer_red");
        s.visual.set_suffix(SheetSuffix::Stand);
        switch_to_normal_sprite(&mut s, &env);
        assert_eq!(s.visual.suffix, SheetSuffix::Stand);
    }

    #[test]
    fn test_lookup_fault_is_reported() {
        let store = SheetStore::new(
            MemorySheetLoader::new()
                .with_sheet("trainer_red", 256, 192)
                .with_fault("trainer_red_stand", "read error"),
        );
        let out = select_idle_mode(
            &state("trainer_red"),
            &still(),
            &Environment::default(),
            &store,
            &IdleSettings::default(),
        );
        assert!(matches!(out, IdleOutcome::Faulted(IdleFault::Lookup(SheetError::Io(_)))));
    }

    #[test]
    fn test_degenerate_sheet_is_reported() {
        let store = SheetStore::new(
            MemorySheetLoader::new()
                .with_sheet("trainer_red", 256, 192)
                .with_sheet("trainer_red_idle", 8, 192),
        );
        let settings = IdleSettings::default();
        let out = select_idle_mode(
            &at_threshold_minus_one("trainer_red", &settings),
            &still(),
            &Environment::default(),
            &store,
            &settings,
        );
        assert_eq!(
            out,
            IdleOutcome::Faulted(IdleFault::DegenerateSheet("trainer_red_idle".into()))
        );
    }

    #[test]
    fn test_moving_steady_state_is_unchanged() {
        let store = sheets(&["trainer_red"]);
        let env = Environment::default();
        let settings = IdleSettings::default();
        let moving = IdleInputs {
            moving: true,
            direction: 2,
        };
        let s = run(&state("trainer_red"), moving, &env, &store, &settings);
        assert_eq!(
            select_idle_mode(&s, &moving, &env, &store, &settings),
            IdleOutcome::Unchanged
        );
    }

    #[test]
    fn test_direction_held_while_blocked_keeps_timer_running() {
        let store = sheets(&["trainer_red", "trainer_red_stand"]);
        let env = Environment::default();
        let settings = IdleSettings::default();
        // Facing a wall: direction held, not moving.
        let pushing = IdleInputs {
            moving: false,
            direction: 8,
        };
        let mut s = run(&state("trainer_red"), pushing, &env, &store, &settings);
        s = run(&s, pushing, &env, &store, &settings);
        assert_eq!(s.tracker.idle_timer, 2);
        assert_eq!(s.visual.suffix, SheetSuffix::Movement);
    }
}
