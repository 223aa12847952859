//! Overworld demo entry point.
//!
//! Opens a window and walks a player character around a small tile map
//! using:
//! - **raylib** for windowing, textures and drawing
//! - **bevy_ecs** for the entity-component-system architecture
//!
//! # Controls
//!
//! - Arrows / WASD: walk (hold X to run with running shoes, Ctrl stops ice sliding)
//! - 1 / 2 / 3: toggle surfing / diving / bicycle
//! - 4: cycle weather
//! - M / Enter: toggle the message window / menu
//! - F11: debug overlay
//!
//! Character sheets are read from `<assets>/Graphics/Characters/<name>.png`.
//! Leave the player alone for a while to see the idle sheets.
//!
//! # Running
//!
//! ```sh
//! cargo run --release -- --character trainer_red
//! ```

// Do not create console on Windows
#![cfg_attr(target_os = "windows", windows_subsystem = "windows")]

mod components;
mod events;
mod game;
mod resources;
mod systems;

use std::path::PathBuf;

use bevy_ecs::prelude::*;
use clap::Parser;
use log::{error, info, warn};

use crate::events::switchdebug::switch_debug_observer;
use crate::game::{
    DEMO_START, build_world, character_schedule, demo_controls_system, demo_terrain, spawn_npc,
    spawn_player, weather_tone_system,
};
use crate::resources::environment::{Environment, MapMetadata, known_flags};
use crate::resources::gameconfig::GameConfig;
use crate::resources::playermetadata::PlayerMetadata;
use crate::resources::rendertarget::RenderTarget;
use crate::resources::sheetstore::{DirectorySheetLoader, SheetStore};
use crate::resources::terrainmap::TerrainMap;
use crate::resources::texturestore::SheetTextures;
use crate::systems::companion::companion_sprite_system;
use crate::systems::input::update_input_state;
use crate::systems::render::render_system;
use crate::systems::time::update_world_time;

const DEFAULT_CHARACTER: &str = "trainer_red";

/// Overworld character animation demo
#[derive(Parser)]
#[command(version, about = "Walk a character sprite around a tile map")]
struct Cli {
    /// Configuration file (INI).
    #[arg(long, value_name = "PATH", default_value = "./config.ini")]
    config: PathBuf,

    /// Asset root holding Graphics/Characters; overrides the config file.
    #[arg(long, value_name = "DIR")]
    assets: Option<PathBuf>,

    /// Walking charset of the player; overrides the player metadata.
    #[arg(long, value_name = "NAME")]
    character: Option<String>,

    /// Map metadata JSON (name, flags, tone).
    #[arg(long, value_name = "PATH")]
    map: Option<PathBuf>,

    /// Terrain JSON (rows of tile tags).
    #[arg(long, value_name = "PATH")]
    terrain: Option<PathBuf>,

    /// Player charset metadata JSON.
    #[arg(long, value_name = "PATH")]
    player_meta: Option<PathBuf>,

    /// Write the effective settings back to the config file and exit.
    #[arg(long)]
    save_config: bool,
}

fn load_player_metadata(cli: &Cli) -> PlayerMetadata {
    let mut metadata = match &cli.player_meta {
        Some(path) => PlayerMetadata::load_from_file(path).unwrap_or_else(|e| {
            warn!("Failed to load player metadata {:?}: {}", path, e);
            PlayerMetadata::walking(DEFAULT_CHARACTER)
        }),
        None => PlayerMetadata::walking(DEFAULT_CHARACTER),
    };
    if let Some(character) = &cli.character {
        metadata.walk_charset = character.clone();
    }
    metadata
}

fn load_terrain(cli: &Cli) -> TerrainMap {
    let Some(path) = &cli.terrain else {
        return demo_terrain();
    };
    TerrainMap::load_from_file(path).unwrap_or_else(|e| {
        warn!("Failed to load terrain {:?}: {}", path, e);
        demo_terrain()
    })
}

fn load_map(cli: &Cli) -> MapMetadata {
    let Some(path) = &cli.map else {
        return MapMetadata::default();
    };
    MapMetadata::load_from_file(path).unwrap_or_else(|e| {
        warn!("Failed to load map metadata {:?}: {}", path, e);
        MapMetadata::default()
    })
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let mut config = GameConfig::with_path(&cli.config);
    if let Err(e) = config.load_from_file() {
        warn!("{}; using defaults", e);
    }
    if let Some(assets) = &cli.assets {
        config.asset_root = assets.clone();
    }
    if cli.save_config {
        if let Err(e) = config.save_to_file() {
            error!("{}", e);
            std::process::exit(1);
        }
        return;
    }

    let metadata = load_player_metadata(&cli);
    let terrain = load_terrain(&cli);
    let map = load_map(&cli);
    info!(
        "Map '{}' {}x{}, flags {:?}",
        map.name,
        terrain.width,
        terrain.height,
        known_flags(&map)
    );

    // --------------- Raylib window ---------------
    let (mut rl, thread) = raylib::init()
        .size(config.window_width as i32, config.window_height as i32)
        .resizable()
        .title("Overworld")
        .build();
    rl.set_target_fps(config.target_fps);
    rl.set_exit_key(None);

    let render_target =
        match RenderTarget::new(&mut rl, &thread, config.render_width, config.render_height) {
            Ok(target) => Some(target),
            Err(e) => {
                warn!("{}; drawing straight to the window", e);
                None
            }
        };

    // --------------- ECS world ---------------
    let asset_root = config.asset_root.clone();
    let walk_charset = metadata.walk_charset.clone();
    let sheets = SheetStore::new(DirectorySheetLoader::new(&asset_root));
    let mut world = build_world(config, sheets, metadata, terrain, map);
    world.resource_mut::<Environment>().has_running_shoes = true;

    let (x, y) = DEMO_START;
    spawn_player(&mut world, x, y, &walk_charset);
    spawn_npc(&mut world, x + 3, y - 1, &walk_charset);

    world.add_observer(switch_debug_observer);
    world.insert_non_send_resource(SheetTextures::new(&asset_root));
    if let Some(target) = render_target {
        world.insert_non_send_resource(target);
    }
    world.insert_non_send_resource(rl);
    world.insert_non_send_resource(thread);
    world.flush();

    let mut update = character_schedule();
    update.add_systems(
        (update_input_state, demo_controls_system)
            .chain()
            .before(weather_tone_system),
    );
    update.add_systems(render_system.after(companion_sprite_system));

    info!("Overworld running with charset '{}'", walk_charset);

    // --------------- Main loop ---------------
    while !world
        .non_send_resource::<raylib::RaylibHandle>()
        .window_should_close()
    {
        let dt = world
            .non_send_resource::<raylib::RaylibHandle>()
            .get_frame_time();
        update_world_time(&mut world, dt);

        update.run(&mut world);

        world.clear_trackers();
    }
}
