use super::TransportError;
use crate::provider::ProviderName;
use crate::types::ChatMessage;
use crate::{Error, ErrorContext, Result};
use reqwest::Proxy;
use std::env;
use std::fmt;
use std::time::Duration;

/// HTTP tuning shared by every client a constructor builds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientOptions {
    pub timeout: Duration,
    pub pool_max_idle_per_host: usize,
    pub pool_idle_timeout: Duration,
    pub proxy_url: Option<String>,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            pool_max_idle_per_host: 32,
            pool_idle_timeout: Duration::from_secs(90),
            proxy_url: None,
        }
    }
}

impl ClientOptions {
    /// Defaults, overridable through `MODEL_ROUTER_HTTP_TIMEOUT_SECS`,
    /// `MODEL_ROUTER_HTTP_POOL_MAX_IDLE_PER_HOST`,
    /// `MODEL_ROUTER_HTTP_POOL_IDLE_TIMEOUT_SECS` and `MODEL_ROUTER_PROXY_URL`.
    /// Unparseable values are ignored.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Same as [`ClientOptions::from_env`], reading variables through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let parse = |name: &str| lookup(name).and_then(|s| s.trim().parse::<u64>().ok());
        let defaults = Self::default();
        Self {
            timeout: parse("MODEL_ROUTER_HTTP_TIMEOUT_SECS")
                .filter(|s| *s > 0)
                .map(Duration::from_secs)
                .unwrap_or(defaults.timeout),
            pool_max_idle_per_host: parse("MODEL_ROUTER_HTTP_POOL_MAX_IDLE_PER_HOST")
                .and_then(|n| usize::try_from(n).ok())
                .unwrap_or(defaults.pool_max_idle_per_host),
            pool_idle_timeout: parse("MODEL_ROUTER_HTTP_POOL_IDLE_TIMEOUT_SECS")
                .map(Duration::from_secs)
                .unwrap_or(defaults.pool_idle_timeout),
            proxy_url: lookup("MODEL_ROUTER_PROXY_URL")
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_proxy(mut self, url: impl Into<String>) -> Self {
        self.proxy_url = Some(url.into());
        self
    }

    pub(crate) fn build_http(&self) -> Result<reqwest::Client> {
        let mut builder = reqwest::Client::builder()
            .timeout(self.timeout)
            .pool_max_idle_per_host(self.pool_max_idle_per_host)
            .pool_idle_timeout(Some(self.pool_idle_timeout));

        if let Some(ref proxy_url) = self.proxy_url {
            let proxy = Proxy::all(proxy_url).map_err(|e| {
                Error::configuration_with_context(
                    "Invalid proxy URL",
                    ErrorContext::new()
                        .with_field_path("proxy_url")
                        .with_details(e.to_string()),
                )
            })?;
            builder = builder.proxy(proxy);
        }

        builder
            .build()
            .map_err(|e| Error::Transport(TransportError::Http(e)))
    }
}

/// A provider endpoint bound to one set of credentials.
///
/// Cheap to share: the underlying reqwest client is a pooled handle.
pub struct BackendClient {
    provider: ProviderName,
    base_url: String,
    api_key: Option<String>,
    http: reqwest::Client,
}

impl BackendClient {
    pub(crate) fn new(
        provider: ProviderName,
        base_url: String,
        api_key: Option<String>,
        http: reqwest::Client,
    ) -> Self {
        Self {
            provider,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            http,
        }
    }

    pub fn provider(&self) -> ProviderName {
        self.provider
    }

    /// Base URL without a trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// Returns true when this client authenticates with `key`.
    pub fn uses_api_key(&self, key: &str) -> bool {
        self.api_key.as_deref() == Some(key)
    }

    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// `POST {base}/chat/completions` with an OpenAI-compatible body.
    pub async fn chat_completion(
        &self,
        model: &str,
        messages: &[ChatMessage],
    ) -> Result<serde_json::Value> {
        let body = serde_json::json!({
            "model": model,
            "messages": messages,
        });
        self.post_json("chat/completions", &body).await
    }

    /// `GET {base}/models`.
    pub async fn list_models(&self) -> Result<serde_json::Value> {
        let mut req = self.http.get(self.endpoint("models"));
        if let Some(key) = &self.api_key {
            req = req.bearer_auth(key);
        }
        let resp = req.send().await.map_err(TransportError::Http)?;
        Self::into_json(resp).await
    }

    pub async fn post_json(&self, path: &str, body: &serde_json::Value) -> Result<serde_json::Value> {
        let mut req = self.http.post(self.endpoint(path)).json(body);
        if let Some(key) = &self.api_key {
            req = req.bearer_auth(key);
        }
        let resp = req.send().await.map_err(TransportError::Http)?;
        Self::into_json(resp).await
    }

    async fn into_json(resp: reqwest::Response) -> Result<serde_json::Value> {
        let status = resp.status();
        if status.is_success() {
            return Ok(resp.json().await.map_err(TransportError::Http)?);
        }
        let text = resp.text().await.unwrap_or_default();
        Err(Error::Remote {
            status: status.as_u16(),
            message: remote_message(&text),
        })
    }
}

impl fmt::Debug for BackendClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BackendClient")
            .field("provider", &self.provider)
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

// Providers answer `{"error": {"message": ...}}`; fall back to the raw body.
fn remote_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| {
            v.pointer("/error/message")
                .and_then(|m| m.as_str())
                .map(str::to_string)
        })
        .unwrap_or_else(|| body.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_joins_single_slash() {
        let client = BackendClient::new(
            ProviderName::OpenRouter,
            "https://openrouter.ai/api/v1/".into(),
            None,
            reqwest::Client::new(),
        );
        assert_eq!(client.base_url(), "https://openrouter.ai/api/v1");
        assert_eq!(
            client.endpoint("/chat/completions"),
            "https://openrouter.ai/api/v1/chat/completions"
        );
    }

    #[test]
    fn test_remote_message_extraction() {
        assert_eq!(
            remote_message(r#"{"error": {"message": "model not found", "code": 404}}"#),
            "model not found"
        );
        assert_eq!(remote_message(" bad gateway \n"), "bad gateway");
    }

    fn options_from(vars: &[(&str, &str)]) -> ClientOptions {
        let vars: std::collections::HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ClientOptions::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn test_options_read_all_variables() {
        let options = options_from(&[
            ("MODEL_ROUTER_HTTP_TIMEOUT_SECS", "5"),
            ("MODEL_ROUTER_HTTP_POOL_MAX_IDLE_PER_HOST", " 4 "),
            ("MODEL_ROUTER_HTTP_POOL_IDLE_TIMEOUT_SECS", "10"),
            ("MODEL_ROUTER_PROXY_URL", "http://proxy.internal:3128"),
        ]);
        assert_eq!(options.timeout, Duration::from_secs(5));
        assert_eq!(options.pool_max_idle_per_host, 4);
        assert_eq!(options.pool_idle_timeout, Duration::from_secs(10));
        assert_eq!(options.proxy_url.as_deref(), Some("http://proxy.internal:3128"));
    }

    #[test]
    fn test_options_ignore_unparseable_values() {
        let options = options_from(&[
            ("MODEL_ROUTER_HTTP_TIMEOUT_SECS", "0"),
            ("MODEL_ROUTER_HTTP_POOL_MAX_IDLE_PER_HOST", "lots"),
            ("MODEL_ROUTER_HTTP_POOL_IDLE_TIMEOUT_SECS", "-1"),
            ("MODEL_ROUTER_PROXY_URL", "   "),
        ]);
        assert_eq!(options, ClientOptions::default());
        assert_eq!(options_from(&[]), ClientOptions::default());
    }

    #[test]
    fn test_invalid_proxy_is_configuration_error() {
        let err = ClientOptions::default()
            .with_proxy("http://exa mple.com")
            .build_http()
            .unwrap_err();
        assert!(matches!(err, Error::Configuration { .. }));
    }

    #[test]
    fn test_debug_redacts_key() {
        let client = BackendClient::new(
            ProviderName::OpenRouter,
            "https://x".into(),
            Some("sk-secret".into()),
            reqwest::Client::new(),
        );
        assert!(!format!("{:?}", client).contains("sk-secret"));
        assert!(client.uses_api_key("sk-secret"));
    }
}
