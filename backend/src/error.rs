//! Error types for the annotation pipeline
//!
//! `AnnotateError` covers the three ways a single leg (upload, tag fetch,
//! color fetch) can fail. None of them are fatal to the process: the
//! orchestrator logs them and degrades the affected leg to "absent".

use thiserror::Error;

/// Errors that can occur while talking to the tagging service
#[derive(Error, Debug)]
pub enum AnnotateError {
    /// Network or connection failure (includes request timeouts)
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The image payload or multipart body could not be built
    #[error("Encoding error: {0}")]
    Encoding(String),

    /// Non-success HTTP status, unparseable body, or a missing expected field
    #[error("Service error: {0}")]
    Service(String),
}

impl AnnotateError {
    /// Short label used in structured log fields
    pub fn kind(&self) -> &'static str {
        match self {
            AnnotateError::Transport(_) => "transport",
            AnnotateError::Encoding(_) => "encoding",
            AnnotateError::Service(_) => "service",
        }
    }
}

/// Errors raised while loading or validating configuration
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// A required setting was not provided
    #[error("Missing required setting: {0}")]
    Missing(&'static str),

    /// A setting was provided but could not be used
    #[error("Invalid value for {key}: {value}")]
    Invalid {
        /// Name of the offending setting
        key: &'static str,
        /// The rejected value
        value: String,
    },
}
