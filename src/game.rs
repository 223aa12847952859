//! Overworld setup and demo glue.
//!
//! Builds the world (resources plus the player), the per-frame schedule in
//! its fixed order, and a handful of demo systems: keyboard toggles for
//! travel and weather, a camera that follows the player, and an ambient
//! tone that follows the weather.

use bevy_ecs::prelude::*;
use log::info;

use crate::components::character::{MapCharacter, Player, RegularTone};
use crate::components::companion::SurfBase;
use crate::components::graphiccache::GraphicCache;
use crate::components::idletracker::IdleTracker;
use crate::components::sprite::Sprite;
use crate::components::tint::Tint;
use crate::components::visualstate::CharacterVisualState;
use crate::events::animation::character_animation_observer;
use crate::resources::environment::{AmbientTone, Environment, MapMetadata, WeatherCategory};
use crate::resources::gameconfig::GameConfig;
use crate::resources::input::InputState;
use crate::resources::mapview::MapView;
use crate::resources::playermetadata::PlayerMetadata;
use crate::resources::screensize::ScreenSize;
use crate::resources::sheetstore::SheetStore;
use crate::resources::terrainmap::TerrainMap;
use crate::resources::worldtime::WorldTime;
use crate::systems::companion::{
    companion_sprite_system, despawn_base_with_host, release_base_on_remove,
};
use crate::systems::graphic::{character_graphic_system, release_sheet_on_remove};
use crate::systems::idle::idle_selector_system;
use crate::systems::movement::player_movement_system;
use crate::systems::movementtype::movement_type_system;
use crate::systems::stepanimation::step_animation_system;

/// Tile the player starts on in the demo map.
pub const DEMO_START: (i32, i32) = (4, 4);

/// Small map with every terrain tag, used when no map file is given.
pub fn demo_terrain() -> TerrainMap {
    TerrainMap::from_rows(&[
        "################",
        "#......\"\"\"\"....#",
        "#......\"\"\"\"....#",
        "#..............#",
        "#.......****...#",
        "#.......****...#",
        "#..............#",
        "#~~~~~~~~~~~~~~#",
        "#~~~~~~~~~~~~~~#",
        "################",
    ])
}

/// Components every map character carries.
pub fn character_bundle(
    x: i32,
    y: i32,
    charset: &str,
) -> (MapCharacter, CharacterVisualState, GraphicCache, Sprite) {
    (
        MapCharacter::new(x, y),
        CharacterVisualState::new(charset),
        GraphicCache::default(),
        Sprite::default(),
    )
}

/// Spawn the player at tile (`x`, `y`).
pub fn spawn_player(world: &mut World, x: i32, y: i32, charset: &str) -> Entity {
    world
        .spawn((
            character_bundle(x, y, charset),
            Player,
            IdleTracker::default(),
            SurfBase::default(),
        ))
        .id()
}

/// Spawn a non-player character that ignores the ambient tone.
pub fn spawn_npc(world: &mut World, x: i32, y: i32, charset: &str) -> Entity {
    let mut visual = CharacterVisualState::new(charset);
    visual.step_anime = true;
    world
        .spawn((
            MapCharacter::new(x, y),
            visual,
            GraphicCache::default(),
            Sprite::default(),
            RegularTone,
        ))
        .id()
}

/// World with every resource the character systems read.
pub fn build_world(
    config: GameConfig,
    sheets: SheetStore,
    metadata: PlayerMetadata,
    terrain: TerrainMap,
    map: MapMetadata,
) -> World {
    let mut world = World::new();
    let screen = ScreenSize {
        w: config.render_width as i32,
        h: config.render_height as i32,
    };
    world.insert_resource(MapView::default().with_zoom(config.zoom));
    world.insert_resource(screen);
    world.insert_resource(config);
    world.insert_resource(WorldTime::default());
    world.insert_resource(InputState::default());
    world.insert_resource(Environment {
        map,
        ..Default::default()
    });
    world.insert_resource(AmbientTone::default());
    world.insert_resource(sheets);
    world.insert_resource(metadata);
    world.insert_resource(terrain);
    world.add_observer(character_animation_observer);
    world.add_observer(release_sheet_on_remove);
    world.add_observer(release_base_on_remove);
    world.add_observer(despawn_base_with_host);
    world.flush();
    world
}

/// The per-frame character pipeline, in order. Input polling and drawing
/// are added around it by the binary.
pub fn character_schedule() -> Schedule {
    let mut schedule = Schedule::default();
    schedule.add_systems(
        (
            weather_tone_system,
            movement_type_system,
            player_movement_system,
            camera_follow_system,
            idle_selector_system,
            step_animation_system,
            character_graphic_system,
            companion_sprite_system,
        )
            .chain(),
    );
    schedule
}

/// Tone applied to characters for a weather.
pub fn weather_tone(weather: WeatherCategory) -> Tint {
    match weather {
        WeatherCategory::Rain | WeatherCategory::HeavyRain => Tint::new(200, 200, 230, 255),
        WeatherCategory::Storm => Tint::new(160, 160, 200, 255),
        WeatherCategory::Snow | WeatherCategory::Blizzard | WeatherCategory::Hail => {
            Tint::new(220, 230, 255, 255)
        }
        WeatherCategory::Sandstorm => Tint::new(255, 220, 170, 255),
        WeatherCategory::Sun | WeatherCategory::HarshSun => Tint::new(255, 245, 220, 255),
        WeatherCategory::Fog => Tint::new(220, 220, 220, 255),
        _ => Tint::NEUTRAL,
    }
}

/// Keyboard toggles for travel, weather, dialog and menu.
pub fn demo_controls_system(input: Res<InputState>, mut env: ResMut<Environment>) {
    if input.toggle_surf.just_pressed {
        env.travel.surfing = !env.travel.surfing;
        env.travel.diving = false;
        info!("Surfing: {}", env.travel.surfing);
    }
    if input.toggle_dive.just_pressed {
        env.travel.diving = !env.travel.diving;
        env.travel.surfing = false;
        info!("Diving: {}", env.travel.diving);
    }
    if input.toggle_bicycle.just_pressed && !env.travel.on_water() {
        env.travel.bicycle = !env.travel.bicycle;
        info!("Bicycle: {}", env.travel.bicycle);
    }
    if input.cycle_weather.just_pressed {
        env.weather = env.weather.cycle();
        info!("Weather: {:?}", env.weather);
    }
    if input.toggle_message.just_pressed {
        env.message_window_showing = !env.message_window_showing;
        info!("Message window: {}", env.message_window_showing);
    }
    if input.toggle_menu.just_pressed {
        env.in_menu = !env.in_menu;
        info!("Menu: {}", env.in_menu);
    }
}

/// Keep the ambient tone in step with the map and the weather.
pub fn weather_tone_system(env: Res<Environment>, mut tone: ResMut<AmbientTone>) {
    let weather = weather_tone(env.weather);
    let wanted = env.map.tone.map_or(weather, |map| map.multiply(weather));
    if tone.0 != wanted {
        tone.0 = wanted;
    }
}

/// Centre the view on the player.
pub fn camera_follow_system(
    query: Query<&MapCharacter, With<Player>>,
    mut view: ResMut<MapView>,
    screen: Res<ScreenSize>,
) {
    if let Ok(player) = query.single() {
        view.center_on(player.real_x, player.real_y, &screen);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::sheetstore::MemorySheetLoader;

    #[test]
    fn test_build_world_and_spawn() {
        let mut world = build_world(
            GameConfig::new(),
            SheetStore::new(MemorySheetLoader::new()),
            PlayerMetadata::walking("trainer_red"),
            TerrainMap::from_rows(&["..."]),
            MapMetadata::default(),
        );
        let player = spawn_player(&mut world, 1, 0, "trainer_red");
        let visual = world.get::<CharacterVisualState>(player).unwrap();
        assert_eq!(visual.base_name, "trainer_red");
        assert!(world.get::<SurfBase>(player).is_some());
        assert!(world.contains_resource::<AmbientTone>());
    }

    #[test]
    fn test_demo_terrain_start_is_walkable() {
        let terrain = demo_terrain();
        let (x, y) = DEMO_START;
        assert!(terrain.passable(x, y, &Default::default()));
        assert!(terrain.tag_at(8, 4).is_ice());
        assert!(terrain.tag_at(3, 7).is_water());
    }

    #[test]
    fn test_weather_tone() {
        assert_eq!(weather_tone(WeatherCategory::None), Tint::NEUTRAL);
        assert_ne!(weather_tone(WeatherCategory::Storm), Tint::NEUTRAL);
    }
}
