//! Override entries and the lookup trait.

use crate::provider::ProviderName;
use crate::{Error, ErrorContext, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Explicit routing for one model identifier.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelOverride {
    pub provider: ProviderName,
    #[serde(default, alias = "apiKey", skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    #[serde(
        default,
        alias = "baseURL",
        alias = "baseUrl",
        skip_serializing_if = "Option::is_none"
    )]
    pub base_url: Option<String>,
    /// Model name sent to the backend, verbatim.
    pub model: String,
}

impl ModelOverride {
    pub fn new(provider: ProviderName, model: impl Into<String>) -> Self {
        Self {
            provider,
            api_key: None,
            base_url: None,
            model: model.into(),
        }
    }

    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }
}

impl fmt::Debug for ModelOverride {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModelOverride")
            .field("provider", &self.provider)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .finish()
    }
}

/// Read-only source of per-model overrides, keyed by exact identifier.
pub trait ConfigStore: Send + Sync {
    fn model_override(&self, model_identifier: &str) -> Option<ModelOverride>;
}

/// Override document as stored on disk.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouterConfig {
    #[serde(default)]
    pub models: HashMap<String, ModelOverride>,
}

impl RouterConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_override(mut self, model_identifier: impl Into<String>, entry: ModelOverride) -> Self {
        self.models.insert(model_identifier.into(), entry);
        self
    }

    pub fn from_yaml_str(content: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(content)?)
    }

    pub fn from_json_str(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }

    /// Identifiers in sorted order.
    pub fn identifiers(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.models.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }

    /// Reject entries that could never produce a usable resolution.
    ///
    /// Entries are checked in identifier order so the reported error is stable.
    pub fn validate(&self) -> Result<()> {
        for id in self.identifiers() {
            let entry = &self.models[id];
            if id.trim().is_empty() {
                return Err(Error::validation_with_context(
                    "model identifier must not be empty",
                    ErrorContext::new().with_field_path("models"),
                ));
            }
            if entry.model.trim().is_empty() {
                return Err(Error::validation_with_context(
                    format!("override '{}' has an empty target model", id),
                    ErrorContext::new().with_field_path(format!("models.{}.model", id)),
                ));
            }
            if let Some(ref raw) = entry.base_url {
                let parsed = url::Url::parse(raw).map_err(|e| {
                    Error::validation_with_context(
                        format!("override '{}' has an invalid base URL", id),
                        ErrorContext::new()
                            .with_field_path(format!("models.{}.base_url", id))
                            .with_details(e.to_string()),
                    )
                })?;
                if !matches!(parsed.scheme(), "http" | "https") {
                    return Err(Error::validation_with_context(
                        format!("override '{}' base URL must be http or https", id),
                        ErrorContext::new()
                            .with_field_path(format!("models.{}.base_url", id))
                            .with_details(format!("scheme: {}", parsed.scheme())),
                    ));
                }
            }
        }
        Ok(())
    }
}

impl ConfigStore for RouterConfig {
    fn model_override(&self, model_identifier: &str) -> Option<ModelOverride> {
        self.models.get(model_identifier).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_camel_case_fields() {
        let cfg = RouterConfig::from_json_str(
            r#"{"models": {"custom-model": {"provider": "openrouter", "apiKey": "K1", "baseURL": "https://x", "model": "real-name"}}}"#,
        )
        .unwrap();
        let o = cfg.model_override("custom-model").unwrap();
        assert_eq!(o.provider, ProviderName::OpenRouter);
        assert_eq!(o.api_key.as_deref(), Some("K1"));
        assert_eq!(o.base_url.as_deref(), Some("https://x"));
        assert_eq!(o.model, "real-name");
    }

    #[test]
    fn test_parse_snake_case_yaml() {
        let cfg = RouterConfig::from_yaml_str(
            "models:\n  fast:\n    provider: openrouter\n    base_url: http://localhost:9000/v1\n    model: vendor/fast-1\n",
        )
        .unwrap();
        let o = cfg.model_override("fast").unwrap();
        assert_eq!(o.api_key, None);
        assert_eq!(o.base_url.as_deref(), Some("http://localhost:9000/v1"));
        cfg.validate().unwrap();
    }

    #[test]
    fn test_lookup_is_exact() {
        let cfg = RouterConfig::new().with_override(
            "custom-model",
            ModelOverride::new(ProviderName::OpenRouter, "real-name"),
        );
        assert!(cfg.model_override("custom-model").is_some());
        assert!(cfg.model_override("Custom-Model").is_none());
        assert!(cfg.model_override("openrouter/custom-model").is_none());
    }

    #[test]
    fn test_missing_models_key_is_empty() {
        let cfg = RouterConfig::from_yaml_str("{}").unwrap();
        assert!(cfg.is_empty());
    }

    #[test]
    fn test_unknown_provider_rejected() {
        let err = RouterConfig::from_json_str(
            r#"{"models": {"x": {"provider": "nope", "model": "y"}}}"#,
        )
        .unwrap_err();
        assert!(matches!(err, Error::Serialization(_)));
    }

    #[test]
    fn test_validate_empty_target_model() {
        let cfg = RouterConfig::new()
            .with_override("a", ModelOverride::new(ProviderName::OpenRouter, "  "));
        let err = cfg.validate().unwrap_err();
        assert_eq!(
            err.context().and_then(|c| c.field_path.as_deref()),
            Some("models.a.model")
        );
    }

    #[test]
    fn test_validate_rejects_non_http_base_url() {
        let cfg = RouterConfig::new().with_override(
            "a",
            ModelOverride::new(ProviderName::OpenRouter, "m").with_base_url("ftp://host"),
        );
        assert!(matches!(cfg.validate(), Err(Error::Validation { .. })));

        let cfg = RouterConfig::new().with_override(
            "a",
            ModelOverride::new(ProviderName::OpenRouter, "m").with_base_url("not a url"),
        );
        assert!(matches!(cfg.validate(), Err(Error::Validation { .. })));
    }

    #[test]
    fn test_debug_redacts_key() {
        let o = ModelOverride::new(ProviderName::OpenRouter, "m").with_api_key("sk-secret");
        assert!(!format!("{:?}", o).contains("sk-secret"));
    }
}
