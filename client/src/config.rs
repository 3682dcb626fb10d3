//! Client configuration loaded via OrthoConfig.

use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use thiserror::Error;
use url::Url;

const DEFAULT_BASE_URL: &str = "http://localhost:5000";
const DEFAULT_REQUEST_TIMEOUT_SECONDS: u64 = 30;

/// Settings for reaching the coupon service.
///
/// Values resolve from CLI overrides, the `COUPON_*` environment, or a
/// configuration file, falling back to the local development service.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "COUPON")]
pub struct ApiSettings {
    /// Base URL of the coupon service.
    pub base_url: Option<String>,
    /// Request timeout applied by the transport adapter, in seconds.
    pub request_timeout_seconds: Option<u64>,
}

/// Errors raised while interpreting settings.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// The configured base URL failed to parse.
    #[error("invalid base URL {value}: {source}")]
    InvalidBaseUrl {
        /// The rejected value.
        value: String,
        /// Parser diagnostics.
        source: url::ParseError,
    },
}

impl ApiSettings {
    /// Parsed base URL, falling back to the local development service.
    ///
    /// # Errors
    ///
    /// Returns an error when the configured value is not a valid URL.
    pub fn base_url(&self) -> Result<Url, SettingsError> {
        let raw = self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL);
        Url::parse(raw).map_err(|source| SettingsError::InvalidBaseUrl {
            value: raw.to_owned(),
            source,
        })
    }

    /// Request timeout for the transport adapter.
    #[must_use]
    pub const fn request_timeout(&self) -> Duration {
        match self.request_timeout_seconds {
            Some(seconds) => Duration::from_secs(seconds),
            None => Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECONDS),
        }
    }
}
