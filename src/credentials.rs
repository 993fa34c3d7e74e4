//! Client credentials and where their defaults come from.

use crate::provider::ProviderName;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// API key + base URL pair. Either half may be absent.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    pub api_key: Option<String>,
    pub base_url: Option<String>,
}

impl Credentials {
    pub fn new(api_key: Option<String>, base_url: Option<String>) -> Self {
        Self { api_key, base_url }
    }

    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Fill each missing field from `defaults`. Explicit values always win.
    pub fn or(self, defaults: Credentials) -> Credentials {
        Credentials {
            api_key: self.api_key.or(defaults.api_key),
            base_url: self.base_url.or(defaults.base_url),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("base_url", &self.base_url)
            .finish()
    }
}

/// Supplies provider-level default credentials.
pub trait CredentialSource: Send + Sync {
    fn defaults(&self, provider: ProviderName) -> Credentials;
}

type Lookup = Arc<dyn Fn(&str) -> Option<String> + Send + Sync>;

/// Reads `<PROVIDER>_API_KEY` / `<PROVIDER>_BASE_URL`.
///
/// Blank values count as unset.
#[derive(Clone)]
pub struct EnvCredentials {
    lookup: Lookup,
}

impl EnvCredentials {
    /// Read from the process environment.
    pub fn new() -> Self {
        Self {
            lookup: Arc::new(|name| std::env::var(name).ok()),
        }
    }

    /// Read variables through `lookup` instead of the process environment.
    pub fn with_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String> + Send + Sync + 'static,
    {
        Self {
            lookup: Arc::new(lookup),
        }
    }

    /// Convenience over [`EnvCredentials::with_lookup`] for a fixed variable set.
    pub fn from_vars<I, K, V>(vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let vars: HashMap<String, String> = vars
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Self::with_lookup(move |name| vars.get(name).cloned())
    }

    fn var(&self, name: &str) -> Option<String> {
        (self.lookup)(name)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }
}

impl Default for EnvCredentials {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for EnvCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EnvCredentials").finish_non_exhaustive()
    }
}

impl CredentialSource for EnvCredentials {
    fn defaults(&self, provider: ProviderName) -> Credentials {
        let api_key = self.var(provider.api_key_env());
        let base_url = self.var(provider.base_url_env());
        Credentials { api_key, base_url }
    }
}

/// Fixed per-provider defaults held in memory.
#[derive(Debug, Clone, Default)]
pub struct StaticCredentials {
    entries: HashMap<ProviderName, Credentials>,
}

impl StaticCredentials {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, provider: ProviderName, credentials: Credentials) -> Self {
        self.entries.insert(provider, credentials);
        self
    }
}

impl CredentialSource for StaticCredentials {
    fn defaults(&self, provider: ProviderName) -> Credentials {
        self.entries.get(&provider).cloned().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_defaults_leave_unset_base_url_absent() {
        let source = EnvCredentials::from_vars([("OPENROUTER_API_KEY", "ENV_KEY")]);
        let creds = source.defaults(ProviderName::OpenRouter);
        assert_eq!(creds.api_key.as_deref(), Some("ENV_KEY"));
        assert_eq!(creds.base_url, None);
    }

    #[test]
    fn test_env_base_url_override_and_blank_key() {
        let source = EnvCredentials::from_vars([
            ("OPENROUTER_API_KEY", "   "),
            ("OPENROUTER_BASE_URL", "http://localhost:8080/v1"),
        ]);
        let creds = source.defaults(ProviderName::OpenRouter);
        assert_eq!(creds.api_key, None);
        assert_eq!(creds.base_url.as_deref(), Some("http://localhost:8080/v1"));
    }

    #[test]
    fn test_explicit_fields_win_per_field() {
        let explicit = Credentials::default().with_api_key("K1");
        let merged = explicit.or(Credentials::new(
            Some("ENV".into()),
            Some("https://env".into()),
        ));
        assert_eq!(merged.api_key.as_deref(), Some("K1"));
        assert_eq!(merged.base_url.as_deref(), Some("https://env"));
    }

    #[test]
    fn test_debug_redacts_key() {
        let creds = Credentials::default().with_api_key("sk-secret");
        let rendered = format!("{:?}", creds);
        assert!(!rendered.contains("sk-secret"));
        assert!(rendered.contains("<redacted>"));
    }

    #[test]
    fn test_static_credentials_missing_provider_is_empty() {
        let source = StaticCredentials::new();
        assert_eq!(
            source.defaults(ProviderName::OpenRouter),
            Credentials::default()
        );
    }
}
