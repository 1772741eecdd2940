//! Configuration management for the AudioSalad client

use std::{path::PathBuf, time::Duration};

use compact_str::{CompactString, format_compact};

use super::error::{ClientError, Result};

/// Placeholder segment in [`DEFAULT_BASE_URL`] that names the tenant
pub const NAMESPACE_PLACEHOLDER: &str = "<client-namespace>";

/// Templated tenant base URL
pub const DEFAULT_BASE_URL: &str =
    "https://<client-namespace>.dashboard.audiosalad.com/client-api";

pub const ENV_ACCESS_ID: &str = "AUDIOSALAD_ACCESS_ID";
pub const ENV_REFRESH_TOKEN: &str = "AUDIOSALAD_REFRESH_TOKEN";
pub const ENV_BASE_URL: &str = "AUDIOSALAD_BASE_URL";
pub const ENV_NAMESPACE: &str = "AUDIOSALAD_NAMESPACE";

/// Main configuration for the AudioSalad client
#[derive(Clone)]
pub struct ClientConfig {
    /// Tenant base URL, without trailing slash
    pub base_url: CompactString,
    /// Stable credential identifier
    pub access_id: CompactString,
    /// Long-lived secret exchanged for access tokens
    pub refresh_token: CompactString,
    pub request: RequestConfig,
    pub debug: DebugConfig,
}

/// HTTP request configuration
#[derive(Debug, Clone)]
pub struct RequestConfig {
    /// Per-request timeout; `None` leaves it to the transport
    pub timeout: Option<Duration>,
    pub user_agent: CompactString,
}

/// Debug and logging configuration
#[derive(Debug, Clone)]
pub struct DebugConfig {
    /// Write every response body to `log_directory`
    pub log_responses: bool,
    pub log_directory: Option<PathBuf>,
}

impl Default for RequestConfig {
    fn default() -> Self {
        Self {
            timeout: None,
            user_agent: format_compact!("audiosalad-sdk/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_responses: false,
            log_directory: Some(PathBuf::from("audiosalad-logs")),
        }
    }
}

// Secrets stay out of Debug output.
impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url)
            .field("access_id", &self.access_id)
            .field("refresh_token", &"<redacted>")
            .field("request", &self.request)
            .field("debug", &self.debug)
            .finish()
    }
}

impl ClientConfig {
    /// Create a configuration against the templated default base URL
    pub fn new(
        access_id: impl Into<CompactString>,
        refresh_token: impl Into<CompactString>,
    ) -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.into(),
            access_id: access_id.into(),
            refresh_token: refresh_token.into(),
            request: RequestConfig::default(),
            debug: DebugConfig::default(),
        }
    }

    /// Create a configuration for the given tenant namespace
    pub fn for_namespace(
        namespace: &str,
        access_id: impl Into<CompactString>,
        refresh_token: impl Into<CompactString>,
    ) -> Self {
        Self::new(access_id, refresh_token)
            .with_base_url(DEFAULT_BASE_URL.replace(NAMESPACE_PLACEHOLDER, namespace))
    }

    /// Load configuration from `AUDIOSALAD_*` environment variables
    ///
    /// `AUDIOSALAD_BASE_URL` takes precedence over `AUDIOSALAD_NAMESPACE`.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let required = |key: &'static str| {
            lookup(key)
                .filter(|value| !value.is_empty())
                .ok_or_else(|| ClientError::config(format_compact!("{key} is not set")))
        };

        let access_id = required(ENV_ACCESS_ID)?;
        let refresh_token = required(ENV_REFRESH_TOKEN)?;

        let config = match (lookup(ENV_BASE_URL), lookup(ENV_NAMESPACE)) {
            (Some(base_url), _) if !base_url.is_empty() => {
                Self::new(access_id, refresh_token).with_base_url(base_url)
            },
            (_, Some(namespace)) if !namespace.is_empty() => {
                Self::for_namespace(&namespace, access_id, refresh_token)
            },
            _ => Self::new(access_id, refresh_token),
        };

        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.access_id.is_empty() {
            return Err(ClientError::config_validation(
                "access_id",
                "Access id cannot be empty",
            ));
        }

        if self.refresh_token.is_empty() {
            return Err(ClientError::config_validation(
                "refresh_token",
                "Refresh token cannot be empty",
            ));
        }

        if self.base_url.is_empty() {
            return Err(ClientError::config_validation(
                "base_url",
                "Base URL cannot be empty",
            ));
        }

        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(ClientError::config_validation(
                "base_url",
                "Base URL must start with http:// or https://",
            ));
        }

        if url::Url::parse(&self.base_url).is_err() {
            return Err(ClientError::invalid_url(self.base_url.clone()));
        }

        Ok(())
    }

    /// Set base URL; trailing slashes are dropped
    pub fn with_base_url(mut self, base_url: impl AsRef<str>) -> Self {
        self.base_url = base_url.as_ref().trim_end_matches('/').into();
        self
    }

    /// Set request configuration
    pub fn with_request(mut self, request: RequestConfig) -> Self {
        self.request = request;
        self
    }

    /// Set request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.request.timeout = Some(timeout);
        self
    }

    /// Set debug configuration
    pub fn with_debug(mut self, debug: DebugConfig) -> Self {
        self.debug = debug;
        self
    }

    /// Enable debug logging of response bodies
    pub fn with_debug_logging(mut self, enabled: bool) -> Self {
        self.debug.log_responses = enabled;
        self
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn new_uses_templated_base_url() {
        let config = ClientConfig::new("mock_access_id", "mock_refresh_token");
        assert_eq!(config.access_id, "mock_access_id");
        assert_eq!(config.refresh_token, "mock_refresh_token");
        assert_eq!(
            config.base_url,
            "https://<client-namespace>.dashboard.audiosalad.com/client-api"
        );
        assert!(config.request.timeout.is_none());
        assert!(!config.debug.log_responses);
    }

    #[test]
    fn for_namespace_substitutes_tenant() {
        let config = ClientConfig::for_namespace("nebula", "id", "secret");
        assert_eq!(
            config.base_url,
            "https://nebula.dashboard.audiosalad.com/client-api"
        );
        assert!(config.validate().is_ok());
    }

    #[test]
    fn with_base_url_trims_trailing_slashes() {
        let config = ClientConfig::new("id", "secret").with_base_url("http://localhost:8080//");
        assert_eq!(config.base_url, "http://localhost:8080");
    }

    #[test]
    fn validate_rejects_empty_credentials() {
        let err = ClientConfig::for_namespace("nebula", "", "secret")
            .validate()
            .unwrap_err();
        assert!(matches!(err, ClientError::ConfigValidation { field, .. } if field == "access_id"));

        let err = ClientConfig::for_namespace("nebula", "id", "")
            .validate()
            .unwrap_err();
        assert!(
            matches!(err, ClientError::ConfigValidation { field, .. } if field == "refresh_token")
        );
    }

    #[test]
    fn validate_rejects_non_http_scheme() {
        let err = ClientConfig::new("id", "secret")
            .with_base_url("ftp://example.com")
            .validate()
            .unwrap_err();
        assert!(matches!(err, ClientError::ConfigValidation { field, .. } if field == "base_url"));
    }

    #[test]
    fn validate_rejects_unresolved_template() {
        let err = ClientConfig::new("id", "secret").validate().unwrap_err();
        assert!(matches!(err, ClientError::InvalidUrl { .. }));
    }

    #[test]
    fn debug_output_redacts_refresh_token() {
        let rendered = format!("{:?}", ClientConfig::new("id", "super-secret"));
        assert!(!rendered.contains("super-secret"));
        assert!(rendered.contains("<redacted>"));
    }

    #[test]
    fn env_base_url_wins_over_namespace() {
        let config = ClientConfig::from_lookup(lookup(&[
            (ENV_ACCESS_ID, "id"),
            (ENV_REFRESH_TOKEN, "secret"),
            (ENV_BASE_URL, "http://127.0.0.1:9000/client-api/"),
            (ENV_NAMESPACE, "nebula"),
        ]))
        .unwrap();
        assert_eq!(config.base_url, "http://127.0.0.1:9000/client-api");
    }

    #[test]
    fn env_namespace_builds_tenant_url() {
        let config = ClientConfig::from_lookup(lookup(&[
            (ENV_ACCESS_ID, "id"),
            (ENV_REFRESH_TOKEN, "secret"),
            (ENV_NAMESPACE, "nebula"),
        ]))
        .unwrap();
        assert_eq!(
            config.base_url,
            "https://nebula.dashboard.audiosalad.com/client-api"
        );
    }

    #[test]
    fn env_requires_credentials() {
        let err = ClientConfig::from_lookup(lookup(&[(ENV_ACCESS_ID, "id")])).unwrap_err();
        assert!(err.to_string().contains(ENV_REFRESH_TOKEN));
    }
}
