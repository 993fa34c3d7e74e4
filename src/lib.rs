//! # model-router
//!
//! Resolves a model identifier to a ready-to-use backend API client and the
//! model name to send to it.
//!
//! ## Overview
//!
//! Request-serving code receives a model identifier per request (for example
//! `"openrouter/vendor/model"` or `"gpt-x"`) and needs a client plus the name
//! the backend expects. [`ProviderResolver::resolve`] answers that in two
//! steps:
//!
//! 1. an exact per-model override from a [`ConfigStore`] wins, redirecting the
//!    identifier to any provider, credentials and target model;
//! 2. otherwise the identifier is routed to the default provider, with the
//!    `"openrouter/"` routing prefix stripped once if present.
//!
//! Clients are memoized by (provider, API key, base URL), so each distinct
//! credential combination is constructed exactly once per resolver.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use model_router::{ModelOverride, ProviderName, ProviderResolver, RouterConfig};
//! use std::sync::Arc;
//!
//! # fn main() -> model_router::Result<()> {
//! let config = RouterConfig::new().with_override(
//!     "fast",
//!     ModelOverride::new(ProviderName::OpenRouter, "vendor/fast-model"),
//! );
//! let resolver = ProviderResolver::builder()
//!     .config(Arc::new(config))
//!     .build();
//!
//! let resolution = resolver.resolve("fast")?;
//! assert_eq!(resolution.actual_model, "vendor/fast-model");
//! # Ok(())
//! # }
//! ```
//!
//! ## Module Organization
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`resolver`] | Resolution rules, builder, results |
//! | [`config`] | Override entries, file loading, live reload |
//! | [`credentials`] | Credential pairs and default sources |
//! | [`cache`] | Client cache and its key |
//! | [`transport`] | Backend clients and their constructor |
//! | [`provider`] | Provider names and per-provider constants |
//! | [`types`] | Chat request payload types |

pub mod cache;
pub mod config;
pub mod credentials;
pub mod provider;
pub mod resolver;
pub mod transport;
pub mod types;

pub use cache::{CacheStats, ClientCache, ClientKey};
pub use config::{ConfigLoader, ConfigStore, ModelOverride, RouterConfig, SharedConfig};
pub use credentials::{CredentialSource, Credentials, EnvCredentials, StaticCredentials};
pub use provider::ProviderName;
pub use resolver::{ProviderResolver, Resolution, ResolutionSource, ResolverBuilder};
pub use transport::{BackendClient, ClientConstructor, ClientOptions, HttpClientConstructor};
pub use types::{ChatMessage, MessageRole};

#[cfg(feature = "hot_reload")]
pub use config::ConfigWatcher;

/// Result type alias for the library
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for the library
pub mod error;
pub use error::{Error, ErrorContext};
