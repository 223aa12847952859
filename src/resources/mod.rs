//! ECS resources made available to systems.
//!
//! Overview
//! - `debugmode` – presence toggles the debug overlay and extra logs
//! - `environment` – weather, travel mode, dialog/menu flags and map metadata
//! - `gameconfig` – INI-backed settings (window, render size, idle tuning)
//! - `input` – per-frame keyboard state of keys relevant to the demo
//! - `mapview` – map scroll position, zoom and tile constants
//! - `playermetadata` – charset names for walking, running, cycling, surfing and diving
//! - `rendertarget` – fixed-resolution framebuffer scaled onto the window
//! - `screensize` – internal render resolution in pixels
//! - `sheetstore` – reference-counted sheet metadata cache
//! - `terrainmap` – per-tile terrain tags
//! - `texturestore` – GPU textures mirroring the sheet cache
//! - `worldtime` – simulation time, delta and frame count
pub mod debugmode;
pub mod environment;
pub mod gameconfig;
pub mod input;
pub mod mapview;
pub mod playermetadata;
pub mod rendertarget;
pub mod screensize;
pub mod sheetstore;
pub mod terrainmap;
pub mod texturestore;
pub mod worldtime;
