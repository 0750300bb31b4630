//! Application configuration
//!
//! Centralized configuration management with environment variable support
//! and sensible defaults. The service credential is an explicit value that
//! callers hand to the orchestrator at construction time.

use crate::error::ConfigError;
use crate::orchestrator::constants::DEFAULT_BASE_URL;
use std::env;
use std::fmt;

/// Default JPEG quality used when re-encoding captured images
pub const DEFAULT_JPEG_QUALITY: u8 = 50;

/// Default per-request timeout (in seconds)
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Remote tagging service configuration
    pub service: ServiceConfig,
    /// Image capture configuration
    pub capture: CaptureConfig,
}

/// Remote tagging service configuration
#[derive(Clone)]
pub struct ServiceConfig {
    /// Base URL of the service, without a trailing slash
    pub base_url: String,
    /// Value sent verbatim in the `Authorization` header
    pub authorization: String,
    /// Per-request timeout (in seconds)
    pub request_timeout_secs: u64,
}

/// Image capture configuration
#[derive(Debug, Clone)]
pub struct CaptureConfig {
    /// JPEG quality (1-100) used when re-encoding images before upload
    pub jpeg_quality: u8,
}

impl ServiceConfig {
    /// Create a service configuration with the default timeout
    pub fn new(base_url: impl Into<String>, authorization: impl Into<String>) -> Self {
        Self {
            base_url: normalize_base_url(base_url.into()),
            authorization: authorization.into(),
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl fmt::Debug for ServiceConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceConfig")
            .field("base_url", &self.base_url)
            .field("authorization", &"***")
            .field("request_timeout_secs", &self.request_timeout_secs)
            .finish()
    }
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            jpeg_quality: DEFAULT_JPEG_QUALITY,
        }
    }
}

impl Config {
    /// Load configuration from environment variables with defaults
    ///
    /// Unparseable numeric values are reported as `ConfigError::Invalid`
    /// rather than silently replaced by the default.
    pub fn from_env() -> Result<Self, ConfigError> {
        let base_url = env::var("IMAGGA_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        let authorization = env::var("IMAGGA_AUTHORIZATION").unwrap_or_default();

        let request_timeout_secs = match env::var("IMAGGA_TIMEOUT_SECS") {
            Ok(raw) => raw.parse().map_err(|_| ConfigError::Invalid {
                key: "IMAGGA_TIMEOUT_SECS",
                value: raw,
            })?,
            Err(_) => DEFAULT_TIMEOUT_SECS,
        };

        let jpeg_quality = match env::var("PHOTO_TAGGER_JPEG_QUALITY") {
            Ok(raw) => raw.parse().map_err(|_| ConfigError::Invalid {
                key: "PHOTO_TAGGER_JPEG_QUALITY",
                value: raw,
            })?,
            Err(_) => DEFAULT_JPEG_QUALITY,
        };

        Ok(Self {
            service: ServiceConfig {
                base_url: normalize_base_url(base_url),
                authorization,
                request_timeout_secs,
            },
            capture: CaptureConfig { jpeg_quality },
        })
    }

    /// Check that the configuration is usable
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.service.authorization.trim().is_empty() {
            return Err(ConfigError::Missing("IMAGGA_AUTHORIZATION"));
        }
        if self.service.base_url.is_empty() {
            return Err(ConfigError::Missing("IMAGGA_BASE_URL"));
        }
        if self.service.request_timeout_secs == 0 {
            return Err(ConfigError::Invalid {
                key: "IMAGGA_TIMEOUT_SECS",
                value: "0".to_string(),
            });
        }
        if !(1..=100).contains(&self.capture.jpeg_quality) {
            return Err(ConfigError::Invalid {
                key: "PHOTO_TAGGER_JPEG_QUALITY",
                value: self.capture.jpeg_quality.to_string(),
            });
        }
        Ok(())
    }

    /// Replace the base URL, normalizing it the same way `from_env` does
    pub fn set_base_url(&mut self, base_url: impl Into<String>) {
        self.service.base_url = normalize_base_url(base_url.into());
    }
}

fn normalize_base_url(base_url: String) -> String {
    base_url.trim_end_matches('/').to_string()
}
