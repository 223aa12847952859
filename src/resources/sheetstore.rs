//! Character sheet resolver and reference-counted cache.
//!
//! [`SheetStore`] answers two questions for the rest of the crate: "does the
//! sheet `<base><suffix>` exist?" and "give me a handle to it and keep it
//! alive". Lookups go through a [`SheetLoader`] so the store works the same
//! against a directory of PNG files and an in-memory table used by tests.
//!
//! Every character that displays a sheet holds one reference on it. The entry
//! is only evicted when the last holder releases it, so two characters sharing
//! a charset never invalidate each other.
//!
//! Only image dimensions live here. GPU textures are owned by the render side
//! ([`crate::resources::texturestore::SheetTextures`]) and follow this store's
//! contents.

use std::fmt;
use std::path::{Path, PathBuf};

use bevy_ecs::prelude::Resource;
use log::{debug, warn};
use rustc_hash::FxHashMap;

use crate::components::sheetsuffix::SheetSuffix;

/// Directory (relative to the asset root) holding character sheets.
pub const CHARACTERS_DIR: &str = "Graphics/Characters";

/// Pixel dimensions of a sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SheetInfo {
    pub width: i32,
    pub height: i32,
}

/// Opaque id of a cached sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SheetId(u32);

/// A retained sheet: id plus its dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SheetHandle {
    pub id: SheetId,
    pub info: SheetInfo,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SheetError {
    /// No sheet with that name.
    NotFound(String),
    /// The sheet exists but could not be read.
    Io(String),
    /// The name can never be a sheet (empty, path separators, ...).
    Malformed(String),
}

impl fmt::Display for SheetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SheetError::NotFound(name) => write!(f, "sheet '{}' not found", name),
            SheetError::Io(msg) => write!(f, "sheet read failed: {}", msg),
            SheetError::Malformed(name) => write!(f, "malformed sheet name '{}'", name),
        }
    }
}

impl std::error::Error for SheetError {}

/// Backend that knows whether a sheet exists and how big it is.
///
/// Implementations must not block on anything slower than a local file
/// header read.
pub trait SheetLoader: Send + Sync {
    fn inspect(&self, name: &str) -> Result<SheetInfo, SheetError>;
}

/// Path of the PNG for sheet `name` under `root`.
pub fn sheet_path(root: &Path, name: &str) -> PathBuf {
    root.join(CHARACTERS_DIR).join(format!("{}.png", name))
}

/// Loads sheet dimensions from `<root>/Graphics/Characters/<name>.png`.
pub struct DirectorySheetLoader {
    root: PathBuf,
}

impl DirectorySheetLoader {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl SheetLoader for DirectorySheetLoader {
    fn inspect(&self, name: &str) -> Result<SheetInfo, SheetError> {
        let path = sheet_path(&self.root, name);
        if !path.is_file() {
            return Err(SheetError::NotFound(name.to_string()));
        }
        let path_str = path
            .to_str()
            .ok_or_else(|| SheetError::Malformed(name.to_string()))?;
        // CPU-side decode only, no window or GPU context needed.
        let image = raylib::prelude::Image::load_image(path_str)
            .map_err(|e| SheetError::Io(format!("{}: {:?}", path.display(), e)))?;
        Ok(SheetInfo {
            width: image.width,
            height: image.height,
        })
    }
}

/// Fixed table of sheets, for tests and scripted setups.
#[derive(Default)]
pub struct MemorySheetLoader {
    sheets: FxHashMap<String, SheetInfo>,
    faults: FxHashMap<String, String>,
}

impl MemorySheetLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_sheet(mut self, name: impl Into<String>, width: i32, height: i32) -> Self {
        self.sheets.insert(name.into(), SheetInfo { width, height });
        self
    }

    /// Make inspecting `name` fail with an I/O error.
    pub fn with_fault(mut self, name: impl Into<String>, message: impl Into<String>) -> Self {
        self.faults.insert(name.into(), message.into());
        self
    }
}

impl SheetLoader for MemorySheetLoader {
    fn inspect(&self, name: &str) -> Result<SheetInfo, SheetError> {
        if let Some(msg) = self.faults.get(name) {
            return Err(SheetError::Io(msg.clone()));
        }
        self.sheets
            .get(name)
            .copied()
            .ok_or_else(|| SheetError::NotFound(name.to_string()))
    }
}

struct SheetEntry {
    name: String,
    info: SheetInfo,
    refs: usize,
}

/// Shared sheet resolver and cache.
#[derive(Resource)]
pub struct SheetStore {
    loader: Box<dyn SheetLoader>,
    entries: FxHashMap<SheetId, SheetEntry>,
    by_name: FxHashMap<String, SheetId>,
    next_id: u32,
}

impl SheetStore {
    pub fn new(loader: impl SheetLoader + 'static) -> Self {
        Self {
            loader: Box::new(loader),
            entries: FxHashMap::default(),
            by_name: FxHashMap::default(),
            next_id: 1,
        }
    }

    /// Look up a sheet by full asset name without retaining it.
    ///
    /// Cached sheets answer from the cache. This is the only method that
    /// reports *why* a sheet is unavailable.
    pub fn lookup(&self, name: &str) -> Result<SheetInfo, SheetError> {
        validate_name(name)?;
        if let Some(id) = self.by_name.get(name) {
            return Ok(self.entries[id].info);
        }
        self.loader.inspect(name)
    }

    /// Resolve `<base><suffix>` and take a reference on it.
    ///
    /// Never fails loudly: a missing sheet, an unreadable file or a bad
    /// name all come back as `None`.
    pub fn resolve(&mut self, base: &str, suffix: SheetSuffix) -> Option<SheetHandle> {
        self.retain(&suffix.asset_name(base))
    }

    /// Take a reference on the sheet with full asset name `name`.
    pub fn retain(&mut self, name: &str) -> Option<SheetHandle> {
        if let Some(&id) = self.by_name.get(name) {
            let entry = self.entries.get_mut(&id)?;
            entry.refs += 1;
            return Some(SheetHandle {
                id,
                info: entry.info,
            });
        }
        let info = match self.lookup(name) {
            Ok(info) => info,
            Err(SheetError::NotFound(_)) => return None,
            Err(e) => {
                warn!("Could not resolve sheet '{}': {}", name, e);
                return None;
            }
        };
        let id = SheetId(self.next_id);
        self.next_id += 1;
        self.entries.insert(
            id,
            SheetEntry {
                name: name.to_string(),
                info,
                refs: 1,
            },
        );
        self.by_name.insert(name.to_string(), id);
        debug!("Cached sheet '{}' ({}x{})", name, info.width, info.height);
        Some(SheetHandle { id, info })
    }

    /// Drop one reference. Returns `true` if the sheet was evicted.
    pub fn release(&mut self, id: SheetId) -> bool {
        let Some(entry) = self.entries.get_mut(&id) else {
            return false;
        };
        entry.refs = entry.refs.saturating_sub(1);
        if entry.refs > 0 {
            return false;
        }
        if let Some(entry) = self.entries.remove(&id) {
            self.by_name.remove(&entry.name);
            debug!("Evicted sheet '{}'", entry.name);
        }
        true
    }

    pub fn name(&self, id: SheetId) -> Option<&str> {
        self.entries.get(&id).map(|e| e.name.as_str())
    }

    pub fn ref_count(&self, id: SheetId) -> usize {
        self.entries.get(&id).map_or(0, |e| e.refs)
    }

    /// Names of every cached sheet.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.by_name.keys().map(|s| s.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn validate_name(name: &str) -> Result<(), SheetError> {
    if name.is_empty()
        || name.contains(['/', '\\', '\0'])
        || name.contains("..")
    {
        return Err(SheetError::Malformed(name.to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> SheetStore {
        SheetStore::new(
            MemorySheetLoader::new()
                .with_sheet("trainer_red", 256, 192)
                .with_sheet("trainer_red_stand", 32, 192)
                .with_fault("trainer_red_idle", "disk on fire"),
        )
    }

    #[test]
    fn test_resolve_existing() {
        let mut s = store();
        let h = s.resolve("trainer_red", SheetSuffix::Movement).unwrap();
        assert_eq!(h.info, SheetInfo { width: 256, height: 192 });
        assert_eq!(s.name(h.id), Some("trainer_red"));
        assert_eq!(s.ref_count(h.id), 1);
    }

    #[test]
    fn test_resolve_missing_is_none() {
        let mut s = store();
        assert!(s.resolve("trainer_red", SheetSuffix::IdleHot).is_none());
        assert!(s.is_empty());
    }

    #[test]
    fn test_resolve_fault_collapses_to_none() {
        let mut s = store();
        assert!(s.resolve("trainer_red", SheetSuffix::Idle).is_none());
        assert!(matches!(
            s.lookup("trainer_red_idle"),
            Err(SheetError::Io(_))
        ));
    }

    #[test]
    fn test_malformed_names() {
        let s = store();
        for bad in ["", "../trainer_red", "a/b", "a\\b"] {
            assert!(matches!(s.lookup(bad), Err(SheetError::Malformed(_))), "{bad}");
        }
        assert!(s.resolve("", SheetSuffix::Movement).is_none());
    }

    #[test]
    fn test_shared_reference_survives_one_release() {
        let mut s = store();
        let a = s.resolve("trainer_red", SheetSuffix::Movement).unwrap();
        let b = s.resolve("trainer_red", SheetSuffix::Movement).unwrap();
        assert_eq!(a.id, b.id);
        assert_eq!(s.ref_count(a.id), 2);

        assert!(!s.release(a.id));
        assert_eq!(s.name(b.id), Some("trainer_red"));
        assert!(s.release(b.id));
        assert_eq!(s.name(b.id), None);
        assert!(s.is_empty());
    }

    #[test]
    fn test_release_unknown_id() {
        let mut s = store();
        let h = s.resolve("trainer_red_stand", SheetSuffix::Movement).unwrap();
        assert!(s.release(h.id));
        assert!(!s.release(h.id));
    }

    #[test]
    fn test_lookup_uses_cache() {
        let mut s = store();
        s.resolve("trainer_red", SheetSuffix::Stand).unwrap();
        assert!(s.lookup("trainer_red_stand").is_ok());
        assert_eq!(s.names().collect::<Vec<_>>(), vec!["trainer_red_stand"]);
    }

    #[test]
    fn test_sheet_path_layout() {
        let p = sheet_path(Path::new("assets"), "trainer_red_idle");
        assert_eq!(
            p,
            Path::new("assets/Graphics/Characters/trainer_red_idle.png")
        );
    }
}
