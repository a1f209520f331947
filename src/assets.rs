//! Name-keyed asset registries
//!
//! The platform layer starts loads and registers handles as they finish. A
//! missing asset is never fatal: lookups log and return `None`, and drawing
//! code skips whatever it could not find.

use std::collections::{HashMap, HashSet};

use crate::renderer::ImageHandle;

/// Name → handle map that also tracks loads still in flight
#[derive(Debug)]
pub struct AssetRegistry<T> {
    kind: &'static str,
    assets: HashMap<String, T>,
    pending: HashSet<String>,
}

impl<T> AssetRegistry<T> {
    pub fn new(kind: &'static str) -> Self {
        Self {
            kind,
            assets: HashMap::new(),
            pending: HashSet::new(),
        }
    }

    /// Record that a load for `name` has started
    pub fn begin_load(&mut self, name: &str) {
        self.pending.insert(name.to_string());
    }

    /// Store a loaded asset, replacing (with a warning) any previous one
    pub fn insert(&mut self, name: &str, asset: T) {
        self.pending.remove(name);
        if self.assets.insert(name.to_string(), asset).is_some() {
            log::warn!("{} \"{}\" already exists. Overwriting.", self.kind, name);
        } else {
            log::info!("{} \"{}\" loaded", self.kind, name);
        }
    }

    /// A load finished without producing an asset
    pub fn fail(&mut self, name: &str, reason: &str) {
        self.pending.remove(name);
        log::warn!("{} \"{}\" load failed: {}", self.kind, name, reason);
    }

    /// Look up an asset, logging when it is missing
    pub fn get(&self, name: &str) -> Option<&T> {
        let found = self.assets.get(name);
        if found.is_none() {
            log::error!("{} \"{}\" does not exist.", self.kind, name);
        }
        found
    }

    pub fn contains(&self, name: &str) -> bool {
        self.assets.contains_key(name)
    }

    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.assets.values()
    }

    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    pub fn len(&self) -> usize {
        self.assets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }
}

/// Loaded images by file name
pub type ImageManager = AssetRegistry<ImageHandle>;

impl ImageManager {
    pub fn images() -> Self {
        Self::new("Image")
    }

    pub fn handle(&self, name: &str) -> Option<ImageHandle> {
        self.get(name).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pending_loads() {
        let mut images = ImageManager::images();
        images.begin_load("a.png");
        images.begin_load("b.png");
        assert_eq!(images.pending(), 2);

        images.insert("a.png", ImageHandle(0));
        images.fail("b.png", "404");
        assert_eq!(images.pending(), 0);
        assert_eq!(images.handle("a.png"), Some(ImageHandle(0)));
        assert_eq!(images.handle("b.png"), None);
    }

    #[test]
    fn test_overwrite_keeps_one_entry() {
        let mut images = ImageManager::images();
        images.insert("a.png", ImageHandle(0));
        images.insert("a.png", ImageHandle(7));
        assert_eq!(images.len(), 1);
        assert_eq!(images.handle("a.png"), Some(ImageHandle(7)));

        assert!(!images.is_empty());
    }
}
