//! GPU textures for cached sheets.
//!
//! [`SheetTextures`] mirrors the [`SheetStore`]: every sheet the store holds
//! gets a texture, and textures of evicted sheets are dropped. It is kept as
//! a NonSend resource and synced by the draw pass, the only place a GPU
//! context is guaranteed.

use std::path::PathBuf;

use log::{debug, warn};
use raylib::prelude::{RaylibHandle, RaylibThread, Texture2D};
use rustc_hash::{FxHashMap, FxHashSet};

use crate::resources::sheetstore::{SheetStore, sheet_path};

pub struct SheetTextures {
    root: PathBuf,
    map: FxHashMap<String, Texture2D>,
    /// Sheets whose texture failed to load; not retried until evicted.
    failed: FxHashSet<String>,
}

impl SheetTextures {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            map: FxHashMap::default(),
            failed: FxHashSet::default(),
        }
    }

    pub fn get(&self, name: &str) -> Option<&Texture2D> {
        self.map.get(name)
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Load textures for new sheets and drop those of evicted ones.
    pub fn sync(&mut self, rl: &mut RaylibHandle, thread: &RaylibThread, sheets: &SheetStore) {
        let wanted: FxHashSet<&str> = sheets.names().collect();
        let (to_load, to_drop) = plan_sync(self.map.keys().map(String::as_str), &wanted);
        for name in to_drop {
            self.map.remove(&name);
            debug!("Dropped texture '{}'", name);
        }
        self.failed.retain(|name| wanted.contains(name.as_str()));

        for name in to_load {
            if self.failed.contains(&name) {
                continue;
            }
            let path = sheet_path(&self.root, &name);
            let Some(path_str) = path.to_str() else {
                self.failed.insert(name);
                continue;
            };
            match rl.load_texture(thread, path_str) {
                Ok(texture) => {
                    debug!("Loaded texture '{}'", name);
                    self.map.insert(name, texture);
                }
                Err(e) => {
                    warn!("Failed to load texture '{}': {}", path.display(), e);
                    self.failed.insert(name);
                }
            }
        }
    }
}

/// Names to load and names to drop to go from `loaded` to `wanted`.
fn plan_sync<'a>(
    loaded: impl Iterator<Item = &'a str>,
    wanted: &FxHashSet<&str>,
) -> (Vec<String>, Vec<String>) {
    let loaded: FxHashSet<&str> = loaded.collect();
    let mut to_load: Vec<String> = wanted
        .iter()
        .filter(|n| !loaded.contains(*n))
        .map(|n| n.to_string())
        .collect();
    let mut to_drop: Vec<String> = loaded
        .iter()
        .filter(|n| !wanted.contains(*n))
        .map(|n| n.to_string())
        .collect();
    to_load.sort();
    to_drop.sort();
    (to_load, to_drop)
}
