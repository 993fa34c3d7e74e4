use super::http::{BackendClient, ClientOptions};
use crate::credentials::Credentials;
use crate::provider::ProviderName;
use crate::{Error, ErrorContext, Result};

/// Builds a backend client from a provider and its effective credentials.
///
/// Implementations must not perform network I/O: construction runs while the
/// client cache holds its lock.
pub trait ClientConstructor: Send + Sync {
    type Client: Send + Sync;

    fn construct(&self, provider: ProviderName, credentials: &Credentials) -> Result<Self::Client>;
}

/// Default constructor producing reqwest-backed [`BackendClient`]s.
#[derive(Debug, Clone, Default)]
pub struct HttpClientConstructor {
    options: ClientOptions,
}

impl HttpClientConstructor {
    pub fn new(options: ClientOptions) -> Self {
        Self { options }
    }

    pub fn from_env() -> Self {
        Self::new(ClientOptions::from_env())
    }

    pub fn options(&self) -> &ClientOptions {
        &self.options
    }
}

impl ClientConstructor for HttpClientConstructor {
    type Client = BackendClient;

    fn construct(&self, provider: ProviderName, credentials: &Credentials) -> Result<BackendClient> {
        match provider {
            ProviderName::OpenRouter => openrouter(credentials, &self.options),
        }
    }
}

fn openrouter(credentials: &Credentials, options: &ClientOptions) -> Result<BackendClient> {
    let provider = ProviderName::OpenRouter;
    let api_key = credentials.api_key.clone().ok_or_else(|| {
        Error::configuration_with_context(
            format!("No API key configured for provider '{}'", provider),
            ErrorContext::new()
                .with_field_path("api_key")
                .with_details(format!(
                    "set {} or give the model override an apiKey",
                    provider.api_key_env()
                ))
                .with_source("openrouter_handler"),
        )
    })?;
    let base_url = checked_base_url(provider, credentials.base_url.as_deref())?;
    let http = options.build_http()?;
    Ok(BackendClient::new(provider, base_url, Some(api_key), http))
}

fn checked_base_url(provider: ProviderName, raw: Option<&str>) -> Result<String> {
    let raw = raw.ok_or_else(|| {
        Error::configuration_with_context(
            format!("No base URL configured for provider '{}'", provider),
            ErrorContext::new()
                .with_field_path("base_url")
                .with_details(format!("set {}", provider.base_url_env())),
        )
    })?;
    let parsed = url::Url::parse(raw).map_err(|e| {
        Error::configuration_with_context(
            format!("Invalid base URL '{}'", raw),
            ErrorContext::new()
                .with_field_path("base_url")
                .with_details(e.to_string())
                .with_source(format!("{}_handler", provider.id())),
        )
    })?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(Error::configuration_with_context(
            format!("Invalid base URL '{}'", raw),
            ErrorContext::new()
                .with_field_path("base_url")
                .with_details(format!("unsupported scheme '{}'", parsed.scheme()))
                .with_source(format!("{}_handler", provider.id())),
        ));
    }
    Ok(raw.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn construct(creds: Credentials) -> Result<BackendClient> {
        HttpClientConstructor::default().construct(ProviderName::OpenRouter, &creds)
    }

    const BASE: &str = "https://openrouter.ai/api/v1";

    #[test]
    fn test_builds_with_explicit_credentials() {
        let client = construct(
            Credentials::default()
                .with_api_key("K1")
                .with_base_url("https://x"),
        )
        .unwrap();
        assert_eq!(client.provider(), ProviderName::OpenRouter);
        assert_eq!(client.base_url(), "https://x");
        assert!(client.uses_api_key("K1"));
    }

    #[test]
    fn test_missing_base_url_is_rejected() {
        let err = construct(Credentials::default().with_api_key("K1")).unwrap_err();
        assert_eq!(
            err.context().and_then(|c| c.field_path.as_deref()),
            Some("base_url")
        );
    }

    #[test]
    fn test_missing_key_names_env_variable() {
        let err = construct(Credentials::default().with_base_url(BASE)).unwrap_err();
        match err {
            Error::Configuration { context, .. } => {
                assert_eq!(context.field_path.as_deref(), Some("api_key"));
                assert!(context.details.unwrap().contains("OPENROUTER_API_KEY"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_malformed_base_url() {
        let err = construct(
            Credentials::default()
                .with_api_key("K1")
                .with_base_url("not a url"),
        )
        .unwrap_err();
        assert_eq!(
            err.context().and_then(|c| c.field_path.as_deref()),
            Some("base_url")
        );

        let err = construct(
            Credentials::default()
                .with_api_key("K1")
                .with_base_url("file:///etc/passwd"),
        )
        .unwrap_err();
        assert!(matches!(err, Error::Configuration { .. }));
    }
}
