//! Error types for the AudioSalad client

use compact_str::CompactString;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    /// Transport failure or non-2xx status, exactly as reqwest reported it
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Failed to parse response from {endpoint}: {message}: {source}")]
    JsonParse {
        endpoint: CompactString,
        message: CompactString,
        #[source]
        source: serde_json::Error,
    },

    #[error("Configuration error: {0}")]
    Config(CompactString),

    #[error("Invalid configuration for {field}: {message}")]
    ConfigValidation {
        field: CompactString,
        message: CompactString,
    },

    #[error("Invalid URL: {url}")]
    InvalidUrl { url: CompactString },
}

pub type Result<T> = std::result::Result<T, ClientError>;

impl ClientError {
    pub fn json_parse(
        endpoint: impl Into<CompactString>,
        message: impl Into<CompactString>,
        source: serde_json::Error,
    ) -> Self {
        Self::JsonParse {
            endpoint: endpoint.into(),
            message: message.into(),
            source,
        }
    }

    pub fn config(message: impl Into<CompactString>) -> Self {
        Self::Config(message.into())
    }

    pub fn config_validation(
        field: impl Into<CompactString>,
        message: impl Into<CompactString>,
    ) -> Self {
        Self::ConfigValidation {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn invalid_url(url: impl Into<CompactString>) -> Self {
        Self::InvalidUrl { url: url.into() }
    }

    /// HTTP status of the failed response, if the server answered at all
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}
