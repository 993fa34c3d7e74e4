//! Model identifier → (backend client, actual model name).
//!
//! Resolution order, first match wins:
//!
//! 1. **Override**: the [`ConfigStore`] has an entry keyed exactly by the
//!    identifier. Its provider/credentials pick the client and its `model` is
//!    returned verbatim.
//! 2. **Fallback**: strip the routing prefix (`"openrouter/"`) once if present
//!    and route to that provider, otherwise to [`ProviderName::DEFAULT`], using
//!    the credential source's defaults.
//!
//! Fallback is total: identifiers that match nothing are forwarded unchanged
//! and the backend decides whether the model exists.

use crate::cache::{CacheStats, ClientCache, ClientKey};
use crate::config::{ConfigStore, RouterConfig};
use crate::credentials::{CredentialSource, Credentials, EnvCredentials};
use crate::provider::ProviderName;
use crate::transport::{ClientConstructor, ClientOptions, HttpClientConstructor};
use crate::Result;
use serde::Serialize;
use std::fmt;
use std::sync::Arc;

/// Which rule produced a [`Resolution`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ResolutionSource {
    Override,
    Fallback,
}

/// A ready-to-use client and the model name to send with it.
#[derive(Debug)]
pub struct Resolution<C> {
    pub client: Arc<C>,
    pub actual_model: String,
    pub provider: ProviderName,
    pub source: ResolutionSource,
}

impl<C> Clone for Resolution<C> {
    fn clone(&self) -> Self {
        Self {
            client: Arc::clone(&self.client),
            actual_model: self.actual_model.clone(),
            provider: self.provider,
            source: self.source,
        }
    }
}

/// Maps model identifiers to cached backend clients.
///
/// Owns its client cache; share the resolver (e.g. behind an `Arc`) to share
/// the cache. Safe to call from many threads at once.
pub struct ProviderResolver<F: ClientConstructor = HttpClientConstructor> {
    config: Arc<dyn ConfigStore>,
    credentials: Arc<dyn CredentialSource>,
    constructor: F,
    cache: ClientCache<F::Client>,
}

impl ProviderResolver<HttpClientConstructor> {
    pub fn builder() -> ResolverBuilder {
        ResolverBuilder::new()
    }
}

impl<F: ClientConstructor> ProviderResolver<F> {
    pub fn new(
        config: Arc<dyn ConfigStore>,
        credentials: Arc<dyn CredentialSource>,
        constructor: F,
    ) -> Self {
        Self {
            config,
            credentials,
            constructor,
            cache: ClientCache::new(),
        }
    }

    /// Resolve `model_identifier` to a client and the model name to use with it.
    ///
    /// The only errors are those returned by the client constructor (e.g. no
    /// API key anywhere, malformed base URL); they are passed through as is.
    pub fn resolve(&self, model_identifier: &str) -> Result<Resolution<F::Client>> {
        if let Some(entry) = self.config.model_override(model_identifier) {
            let client = self.client_for(
                entry.provider,
                entry.api_key.as_deref(),
                entry.base_url.as_deref(),
            )?;
            tracing::debug!(
                model = model_identifier,
                provider = %entry.provider,
                actual_model = %entry.model,
                "resolved via override"
            );
            return Ok(Resolution {
                client,
                actual_model: entry.model,
                provider: entry.provider,
                source: ResolutionSource::Override,
            });
        }

        let (provider, actual_model) = ProviderName::strip_routing_prefix(model_identifier)
            .unwrap_or((ProviderName::DEFAULT, model_identifier));
        let client = self.client_for(provider, None, None)?;
        tracing::debug!(
            model = model_identifier,
            provider = %provider,
            actual_model,
            "resolved via fallback"
        );
        Ok(Resolution {
            client,
            actual_model: actual_model.to_string(),
            provider,
            source: ResolutionSource::Fallback,
        })
    }

    /// Get or create the client for `provider` with the given credentials.
    ///
    /// Each absent (or empty) value is taken from the credential source's
    /// defaults for `provider`; a base URL still missing after that is the
    /// provider's built-in endpoint. Identical effective triples always yield
    /// the same `Arc`.
    pub fn client_for(
        &self,
        provider: ProviderName,
        api_key: Option<&str>,
        base_url: Option<&str>,
    ) -> Result<Arc<F::Client>> {
        let explicit = Credentials::new(non_empty(api_key), non_empty(base_url));
        let mut effective = explicit.or(self.credentials.defaults(provider));
        // The key must see the same base URL the constructor will use.
        if effective.base_url.is_none() {
            effective.base_url = provider.default_base_url().map(str::to_string);
        }
        let key = ClientKey::new(
            provider,
            effective.api_key.as_deref(),
            effective.base_url.as_deref(),
        );
        self.cache
            .get_or_try_insert_with(key, |_| self.constructor.construct(provider, &effective))
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    pub fn cached_clients(&self) -> usize {
        self.cache.len()
    }

    pub fn config(&self) -> &Arc<dyn ConfigStore> {
        &self.config
    }

    pub fn constructor(&self) -> &F {
        &self.constructor
    }
}

impl<F: ClientConstructor> fmt::Debug for ProviderResolver<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderResolver")
            .field("cache", &self.cache.stats())
            .finish_non_exhaustive()
    }
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value.filter(|v| !v.is_empty()).map(str::to_string)
}

/// Builder for [`ProviderResolver`].
///
/// Defaults: no overrides, credentials from the process environment, HTTP
/// options from `MODEL_ROUTER_HTTP_*`.
#[derive(Default)]
pub struct ResolverBuilder {
    config: Option<Arc<dyn ConfigStore>>,
    credentials: Option<Arc<dyn CredentialSource>>,
    client_options: Option<ClientOptions>,
}

impl ResolverBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn config(mut self, config: Arc<dyn ConfigStore>) -> Self {
        self.config = Some(config);
        self
    }

    pub fn credentials(mut self, credentials: Arc<dyn CredentialSource>) -> Self {
        self.credentials = Some(credentials);
        self
    }

    /// Only used by [`ResolverBuilder::build`].
    pub fn client_options(mut self, options: ClientOptions) -> Self {
        self.client_options = Some(options);
        self
    }

    pub fn build(self) -> ProviderResolver<HttpClientConstructor> {
        let constructor = self
            .client_options
            .clone()
            .map(HttpClientConstructor::new)
            .unwrap_or_else(HttpClientConstructor::from_env);
        self.build_with(constructor)
    }

    pub fn build_with<F: ClientConstructor>(self, constructor: F) -> ProviderResolver<F> {
        let config = self
            .config
            .unwrap_or_else(|| Arc::new(RouterConfig::default()));
        let credentials = self
            .credentials
            .unwrap_or_else(|| Arc::new(EnvCredentials::new()));
        ProviderResolver::new(config, credentials, constructor)
    }
}
