//! Reload the override file when it changes on disk.

use super::shared::SharedConfig;
use crate::Result;
use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Keeps a [`SharedConfig`] in sync with a file. Dropping it stops watching.
pub struct ConfigWatcher {
    _watcher: RecommendedWatcher,
    path: PathBuf,
}

impl ConfigWatcher {
    /// Watch `path` and reload `shared` whenever it is written or replaced.
    ///
    /// The parent directory is watched rather than the file itself so that
    /// editors which save through rename keep triggering reloads.
    pub fn watch(shared: Arc<SharedConfig>, path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let dir = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));
        let target = path.clone();

        let mut watcher = notify::recommended_watcher(move |res: notify::Result<Event>| {
            let event = match res {
                Ok(event) => event,
                Err(e) => {
                    tracing::warn!(error = %e, "override file watch error");
                    return;
                }
            };
            if !matches!(event.kind, EventKind::Create(_) | EventKind::Modify(_)) {
                return;
            }
            if !event
                .paths
                .iter()
                .any(|p| p.file_name() == target.file_name())
            {
                return;
            }
            match shared.reload_from(&target) {
                Ok(count) => {
                    tracing::info!(path = %target.display(), overrides = count, "reloaded model overrides")
                }
                Err(e) => tracing::warn!(
                    path = %target.display(),
                    error = %e,
                    "override reload failed; keeping previous snapshot"
                ),
            }
        })?;
        watcher.watch(&dir, RecursiveMode::NonRecursive)?;

        Ok(Self {
            _watcher: watcher,
            path,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
