//! Error types for upstream access and normalization

use thiserror::Error;

/// Failure talking to a cricket data provider
#[derive(Error, Debug)]
pub enum UpstreamError {
    /// No API key configured for the selected provider
    #[error("{0}")]
    Configuration(String),

    /// Non-2xx HTTP status
    #[error("API error: {status} - {message}")]
    Http { status: u16, message: String },

    /// The provider's own payload flagged a failure
    #[error("API failure: {reason}")]
    Api { reason: String },

    /// Match id could not be resolved
    #[error("Match not found: {match_id}")]
    NotFound { match_id: String },

    /// Connection, TLS or timeout failure
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Response body did not have the expected shape
    #[error("Failed to parse {endpoint} response: {source}")]
    Decode {
        endpoint: String,
        #[source]
        source: serde_json::Error,
    },
}

impl UpstreamError {
    pub fn missing_key(var: &str) -> Self {
        UpstreamError::Configuration(format!("{} is not defined", var))
    }

    /// HTTP status code, when the failure came from one
    pub fn status_code(&self) -> Option<u16> {
        match self {
            UpstreamError::Http { status, .. } => Some(*status),
            UpstreamError::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Provider supplied failure reason
    pub fn reason(&self) -> Option<&str> {
        match self {
            UpstreamError::Api { reason } => Some(reason),
            _ => None,
        }
    }
}

/// Failure mapping raw provider data into the canonical model
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NormalizeError {
    #[error("Cannot combine {match_provider} match with {scorecard_provider} scorecard")]
    ProviderMismatch {
        match_provider: &'static str,
        scorecard_provider: &'static str,
    },
}

/// Any failure on the fetch-then-normalize path
#[derive(Error, Debug)]
pub enum DataError {
    #[error(transparent)]
    Upstream(#[from] UpstreamError),

    #[error(transparent)]
    Normalize(#[from] NormalizeError),

    /// Provider answered with nothing usable
    #[error("{0}")]
    Unavailable(&'static str),
}
