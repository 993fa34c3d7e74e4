//! Per-model override configuration.
//!
//! # Configuration Module
//!
//! Operators can redirect any exact model identifier to an arbitrary
//! provider/model combination without touching fallback routing. Overrides
//! live in a YAML or JSON document:
//!
//! ```yaml
//! models:
//!   custom-model:
//!     provider: openrouter
//!     apiKey: sk-or-...
//!     baseURL: https://openrouter.ai/api/v1
//!     model: vendor/real-name
//! ```
//!
//! ## Key Components
//!
//! | Component | Description |
//! |-----------|-------------|
//! | [`ModelOverride`] | One override entry |
//! | [`RouterConfig`] | The parsed document; also a [`ConfigStore`] |
//! | [`ConfigStore`] | Read-only lookup the resolver consults |
//! | [`ConfigLoader`] | File loading with format detection and validation |
//! | [`SharedConfig`] | Atomically replaceable snapshot for live reloads |

mod loader;
mod shared;
mod store;
#[cfg(feature = "hot_reload")]
mod watcher;

pub use loader::{ConfigLoader, CONFIG_PATH_ENV};
pub use shared::SharedConfig;
pub use store::{ConfigStore, ModelOverride, RouterConfig};
#[cfg(feature = "hot_reload")]
pub use watcher::ConfigWatcher;
