//! Hot-swappable override snapshot.

use super::loader::ConfigLoader;
use super::store::{ConfigStore, ModelOverride, RouterConfig};
use crate::Result;
use arc_swap::ArcSwap;
use std::path::Path;
use std::sync::Arc;

/// A [`RouterConfig`] that can be replaced while resolvers are reading it.
///
/// Readers see either the old or the new document, never a mix.
pub struct SharedConfig {
    current: ArcSwap<RouterConfig>,
}

impl SharedConfig {
    pub fn new(config: RouterConfig) -> Self {
        Self {
            current: ArcSwap::from_pointee(config),
        }
    }

    /// Current snapshot.
    pub fn snapshot(&self) -> Arc<RouterConfig> {
        self.current.load_full()
    }

    pub fn replace(&self, config: RouterConfig) {
        self.current.store(Arc::new(config));
    }

    /// Load `path` and swap it in. On error the previous snapshot stays.
    pub fn reload_from(&self, path: impl AsRef<Path>) -> Result<usize> {
        let config = ConfigLoader::new(path).load()?;
        let count = config.len();
        self.replace(config);
        Ok(count)
    }
}

impl Default for SharedConfig {
    fn default() -> Self {
        Self::new(RouterConfig::default())
    }
}

impl ConfigStore for SharedConfig {
    fn model_override(&self, model_identifier: &str) -> Option<ModelOverride> {
        self.current.load().models.get(model_identifier).cloned()
    }
}
