//! Override file loading (JSON or YAML, picked by extension).

use super::store::RouterConfig;
use crate::{Error, ErrorContext, Result};
use std::path::{Path, PathBuf};

/// Environment variable naming the override file.
pub const CONFIG_PATH_ENV: &str = "MODEL_ROUTER_CONFIG";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    Json,
    Yaml,
}

impl Format {
    fn for_path(path: &Path) -> Self {
        match path.extension().and_then(|s| s.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Format::Json,
            _ => Format::Yaml,
        }
    }
}

/// Loads and validates a [`RouterConfig`] from disk.
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    path: PathBuf,
}

impl ConfigLoader {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Loader for the file named by `MODEL_ROUTER_CONFIG`, if set.
    pub fn from_env() -> Option<Self> {
        std::env::var(CONFIG_PATH_ENV)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .map(Self::new)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> Result<RouterConfig> {
        let bytes = std::fs::read(&self.path)?;
        let content = decode(&bytes).map_err(|details| {
            Error::configuration_with_context(
                "Override file is not valid UTF-8",
                ErrorContext::new()
                    .with_field_path(self.path.to_string_lossy())
                    .with_details(details)
                    .with_source("config_loader"),
            )
        })?;

        let config = match Format::for_path(&self.path) {
            Format::Json => RouterConfig::from_json_str(content)?,
            Format::Yaml => RouterConfig::from_yaml_str(content)?,
        };
        config.validate()?;
        tracing::debug!(
            path = %self.path.display(),
            overrides = config.len(),
            "loaded model overrides"
        );
        Ok(config)
    }
}

fn decode(bytes: &[u8]) -> std::result::Result<&str, String> {
    let body = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes);
    std::str::from_utf8(body).map_err(|e| e.to_string())
}
