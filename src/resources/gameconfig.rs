//! Game configuration resource.
//!
//! Window, render and idle-selector settings read from an INI file. Every
//! value has a default, so a missing file only costs a warning at startup.
//!
//! # Configuration File Format
//!
//! ```ini
//! [render]
//! width = 512
//! height = 384
//!
//! [window]
//! width = 1024
//! height = 768
//! target_fps = 60
//!
//! [view]
//! zoom = 1.0
//!
//! [assets]
//! root = ./assets
//!
//! [idle]
//! timer_frames = 1800
//! update_frequency = 1
//! animation_speed = 0.5
//! ```

use bevy_ecs::prelude::*;
use configparser::ini::Ini;
use log::info;
use std::path::PathBuf;

/// Default safe values for startup
const DEFAULT_RENDER_WIDTH: u32 = 512;
const DEFAULT_RENDER_HEIGHT: u32 = 384;
const DEFAULT_WINDOW_WIDTH: u32 = 1024;
const DEFAULT_WINDOW_HEIGHT: u32 = 768;
const DEFAULT_TARGET_FPS: u32 = 60;
const DEFAULT_ZOOM: f32 = 1.0;
const DEFAULT_ASSET_ROOT: &str = "./assets";
const DEFAULT_CONFIG_PATH: &str = "./config.ini";

/// Frames the player must stand still before an idle sheet is used.
pub const IDLE_TIMER_FRAMES: u32 = 1800;
/// Run the idle selector every this many frames.
pub const IDLE_UPDATE_FREQUENCY: u32 = 1;
/// Move time is divided by this while the generic idle sheet plays.
pub const IDLE_ANIMATION_SPEED: f32 = 0.5;

/// Tunables of the idle sheet selector.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IdleSettings {
    pub timer_frames: u32,
    pub update_frequency: u32,
    pub animation_speed: f32,
}

impl Default for IdleSettings {
    fn default() -> Self {
        Self {
            timer_frames: IDLE_TIMER_FRAMES,
            update_frequency: IDLE_UPDATE_FREQUENCY,
            animation_speed: IDLE_ANIMATION_SPEED,
        }
    }
}

impl IdleSettings {
    /// Whether the selector runs on `frame`.
    pub fn polls_on(&self, frame: u64) -> bool {
        frame % self.update_frequency.max(1) as u64 == 0
    }
}

#[derive(Resource, Debug, Clone)]
pub struct GameConfig {
    /// Internal render width in pixels.
    pub render_width: u32,
    /// Internal render height in pixels.
    pub render_height: u32,
    /// Window width in pixels.
    pub window_width: u32,
    /// Window height in pixels.
    pub window_height: u32,
    /// Target frames per second.
    pub target_fps: u32,
    /// Tilemap zoom, shared by character sprites.
    pub zoom: f32,
    /// Directory holding `Graphics/Characters`.
    pub asset_root: PathBuf,
    pub idle: IdleSettings,
    /// Path to the configuration file.
    pub config_path: PathBuf,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl GameConfig {
    /// Create a new configuration with safe default values.
    pub fn new() -> Self {
        Self {
            render_width: DEFAULT_RENDER_WIDTH,
            render_height: DEFAULT_RENDER_HEIGHT,
            window_width: DEFAULT_WINDOW_WIDTH,
            window_height: DEFAULT_WINDOW_HEIGHT,
            target_fps: DEFAULT_TARGET_FPS,
            zoom: DEFAULT_ZOOM,
            asset_root: PathBuf::from(DEFAULT_ASSET_ROOT),
            idle: IdleSettings::default(),
            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
        }
    }

    /// Create a new configuration with a custom config file path.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: path.into(),
            ..Self::new()
        }
    }

    /// Overlay the INI file on the current values. Keys that are missing or
    /// unparsable keep what was there.
    pub fn load_from_file(&mut self) -> Result<(), String> {
        let mut config = Ini::new();
        config
            .load(&self.config_path)
            .map_err(|e| format!("Failed to load config file: {}", e))?;

        if let Some(v) = uint(&config, "render", "width") {
            self.render_width = v;
        }
        if let Some(v) = uint(&config, "render", "height") {
            self.render_height = v;
        }
        if let Some(v) = uint(&config, "window", "width") {
            self.window_width = v;
        }
        if let Some(v) = uint(&config, "window", "height") {
            self.window_height = v;
        }
        if let Some(v) = uint(&config, "window", "target_fps") {
            self.target_fps = v;
        }
        if let Some(zoom) = positive_float(&config, "view", "zoom") {
            self.zoom = zoom;
        }
        if let Some(root) = config.get("assets", "root") {
            self.asset_root = PathBuf::from(root);
        }

        if let Some(v) = uint(&config, "idle", "timer_frames") {
            self.idle.timer_frames = v;
        }
        if let Some(v) = uint(&config, "idle", "update_frequency") {
            // 0 would never poll.
            self.idle.update_frequency = v.max(1);
        }
        if let Some(speed) = positive_float(&config, "idle", "animation_speed") {
            self.idle.animation_speed = speed;
        }

        info!(
            "Loaded config: {}x{} render, {}x{} window, fps={}, zoom={}, assets={:?}, idle={:?}",
            self.render_width,
            self.render_height,
            self.window_width,
            self.window_height,
            self.target_fps,
            self.zoom,
            self.asset_root,
            self.idle
        );

        Ok(())
    }

    /// Write every setting to the INI file, creating it if needed.
    pub fn save_to_file(&self) -> Result<(), String> {
        let mut config = Ini::new();

        let entries = [
            ("render", "width", self.render_width.to_string()),
            ("render", "height", self.render_height.to_string()),
            ("window", "width", self.window_width.to_string()),
            ("window", "height", self.window_height.to_string()),
            ("window", "target_fps", self.target_fps.to_string()),
            ("view", "zoom", self.zoom.to_string()),
            ("assets", "root", self.asset_root.to_string_lossy().into_owned()),
            ("idle", "timer_frames", self.idle.timer_frames.to_string()),
            ("idle", "update_frequency", self.idle.update_frequency.to_string()),
            ("idle", "animation_speed", self.idle.animation_speed.to_string()),
        ];
        for (section, key, value) in entries {
            config.set(section, key, Some(value));
        }

        config
            .write(&self.config_path)
            .map_err(|e| format!("Failed to save config file: {}", e))?;

        info!("Saved config to {:?}", self.config_path);

        Ok(())
    }
}

fn uint(config: &Ini, section: &str, key: &str) -> Option<u32> {
    config
        .getuint(section, key)
        .ok()
        .flatten()
        .and_then(|v| u32::try_from(v).ok())
}

fn positive_float(config: &Ini, section: &str, key: &str) -> Option<f32> {
    config
        .getfloat(section, key)
        .ok()
        .flatten()
        .filter(|v| *v > 0.0)
        .map(|v| v as f32)
}
