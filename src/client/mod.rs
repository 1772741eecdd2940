//! AudioSalad client modules
//!
//! `api` talks HTTP and owns the token pair, `service` is the facade that
//! applications call and that records failures as system events.

pub mod api;
pub mod config;
pub mod endpoint;
pub mod error;
pub mod service;
pub mod token;

// Re-export main types for convenience
pub use api::AudioSaladApi;
pub use config::{ClientConfig, DebugConfig, RequestConfig};
pub use endpoint::Endpoint;
pub use error::{ClientError, Result};
pub use service::AudioSaladService;
pub use token::{RefreshResponse, TokenState};
