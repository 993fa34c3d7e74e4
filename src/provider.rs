//! Provider identifiers.
//!
//! A [`ProviderName`] names a backend family. Everything that varies per
//! provider (routing prefix, environment variable names, default endpoint,
//! client construction) is an exhaustive `match` on this enum, so adding a
//! variant makes the compiler point at every place that needs a handler.

use crate::{Error, ErrorContext};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Backend family a model request is routed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderName {
    OpenRouter,
}

impl ProviderName {
    /// Provider used for every identifier that has no explicit override.
    pub const DEFAULT: ProviderName = ProviderName::OpenRouter;

    pub const ALL: &'static [ProviderName] = &[ProviderName::OpenRouter];

    pub fn id(&self) -> &'static str {
        match self {
            ProviderName::OpenRouter => "openrouter",
        }
    }

    /// Literal prefix that selects this provider during fallback routing and
    /// is stripped before the model name is forwarded.
    pub fn routing_prefix(&self) -> &'static str {
        match self {
            ProviderName::OpenRouter => "openrouter/",
        }
    }

    /// Environment variable holding the default API key (`<PROVIDER>_API_KEY`).
    pub fn api_key_env(&self) -> &'static str {
        match self {
            ProviderName::OpenRouter => "OPENROUTER_API_KEY",
        }
    }

    /// Environment variable overriding the default base URL.
    pub fn base_url_env(&self) -> &'static str {
        match self {
            ProviderName::OpenRouter => "OPENROUTER_BASE_URL",
        }
    }

    /// Built-in endpoint used when neither configuration nor environment names one.
    pub fn default_base_url(&self) -> Option<&'static str> {
        match self {
            ProviderName::OpenRouter => Some("https://openrouter.ai/api/v1"),
        }
    }

    /// Split a model identifier into the provider whose routing prefix it
    /// carries and the remainder. Only the first occurrence is stripped.
    pub fn strip_routing_prefix(model_identifier: &str) -> Option<(ProviderName, &str)> {
        Self::ALL.iter().find_map(|p| {
            model_identifier
                .strip_prefix(p.routing_prefix())
                .map(|rest| (*p, rest))
        })
    }
}

impl Default for ProviderName {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for ProviderName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for ProviderName {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|p| p.id().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| {
                Error::validation_with_context(
                    format!("Unknown provider '{}'", wanted),
                    ErrorContext::new().with_details(format!(
                        "known providers: {}",
                        Self::ALL
                            .iter()
                            .map(|p| p.id())
                            .collect::<Vec<_>>()
                            .join(", ")
                    )),
                )
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!(
            "OpenRouter".parse::<ProviderName>().unwrap(),
            ProviderName::OpenRouter
        );
        assert_eq!(
            " openrouter ".parse::<ProviderName>().unwrap(),
            ProviderName::OpenRouter
        );
    }

    #[test]
    fn test_parse_unknown_provider() {
        let err = "anthropic".parse::<ProviderName>().unwrap_err();
        assert!(matches!(err, Error::Validation { .. }));
        assert!(err.to_string().contains("known providers: openrouter"));
    }

    #[test]
    fn test_serde_uses_lowercase_id() {
        let json = serde_json::to_string(&ProviderName::OpenRouter).unwrap();
        assert_eq!(json, "\"openrouter\"");
        let back: ProviderName = serde_json::from_str("\"openrouter\"").unwrap();
        assert_eq!(back, ProviderName::OpenRouter);
    }

    #[test]
    fn test_strip_routing_prefix_once() {
        assert_eq!(
            ProviderName::strip_routing_prefix("openrouter/openrouter/x"),
            Some((ProviderName::OpenRouter, "openrouter/x"))
        );
        assert_eq!(ProviderName::strip_routing_prefix("gpt-x"), None);
        assert_eq!(ProviderName::strip_routing_prefix("OpenRouter/x"), None);
    }
}
