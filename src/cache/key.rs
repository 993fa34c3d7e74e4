//! Cache key for constructed clients.

use crate::provider::ProviderName;
use std::fmt;

/// Separator used by the textual form of a [`ClientKey`].
///
/// ASCII unit separator: never part of a provider id, an API key or a URL.
pub const KEY_SEPARATOR: char = '\u{1f}';

/// Identity of a constructed client.
///
/// Absent credentials are stored as empty strings, so "no key" and an empty
/// key share a client. Equality is field-wise; the `Display` form exists for
/// logs and never shows the API key.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct ClientKey {
    provider: ProviderName,
    api_key: String,
    base_url: String,
}

impl ClientKey {
    pub fn new(provider: ProviderName, api_key: Option<&str>, base_url: Option<&str>) -> Self {
        Self {
            provider,
            api_key: api_key.unwrap_or_default().to_string(),
            base_url: base_url.unwrap_or_default().to_string(),
        }
    }

    pub fn provider(&self) -> ProviderName {
        self.provider
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn has_api_key(&self) -> bool {
        !self.api_key.is_empty()
    }

    /// Joined form `provider SEP api_key SEP base_url`.
    pub fn canonical(&self) -> String {
        format!(
            "{}{sep}{}{sep}{}",
            self.provider.id(),
            self.api_key,
            self.base_url,
            sep = KEY_SEPARATOR
        )
    }
}

impl fmt::Debug for ClientKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientKey")
            .field("provider", &self.provider)
            .field("api_key", &if self.has_api_key() { "<redacted>" } else { "" })
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl fmt::Display for ClientKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}@{}{}",
            self.provider,
            self.base_url,
            if self.has_api_key() { " (keyed)" } else { "" }
        )
    }
}
