//! Error types shared by every stage of the mirroring pipeline.
//!
//! Each poll cycle either completes or fails with exactly one of these
//! variants. None of them are fatal for the process: the poll loop logs the
//! failure and waits for the next tick.

/// Result type alias for radiolist operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while mirroring the radio channel
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Transport-level failure talking to a remote API
    #[error("network failure: {0}")]
    Network(reqwest::Error),

    /// Outbound call exceeded the configured timeout
    #[error("request timed out")]
    Timeout,

    /// Remote API answered with a non-success status
    #[error("{service} returned HTTP {status}")]
    Status {
        service: &'static str,
        status: reqwest::StatusCode,
    },

    /// Upstream payload was missing required fields
    #[error("malformed upstream payload: {0}")]
    MalformedPayload(String),

    /// Resolver exhausted every search tier
    #[error("no catalog match for \"{0}\"")]
    NotFound(String),

    /// Track is already present in the dedup cache
    #[error("track {0} was already added")]
    DuplicateTrack(String),

    /// Re-fetching the playlist size or creating the successor failed
    #[error("capacity check failed: {0}")]
    CapacityCheck(Box<Error>),

    /// Authorization handshake or token refresh failed
    #[error("authorization failed: {0}")]
    Auth(String),

    /// Missing or invalid configuration value
    #[error("configuration error: {0}")]
    Config(String),

    /// JSON parsing failed
    #[error("JSON parsing failed: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Error::Timeout
        } else if err.is_decode() {
            Error::MalformedPayload(err.to_string())
        } else {
            Error::Network(err)
        }
    }
}

impl Error {
    /// Create a malformed payload error
    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::MalformedPayload(msg.into())
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Wrap an error raised while checking playlist capacity
    pub fn capacity(err: Error) -> Self {
        Self::CapacityCheck(Box::new(err))
    }

    /// Whether a later poll has a reasonable chance of succeeding
    pub fn is_transient(&self) -> bool {
        match self {
            Error::Network(_) | Error::Timeout => true,
            Error::Status { status, .. } => {
                status.is_server_error() || *status == reqwest::StatusCode::TOO_MANY_REQUESTS
            }
            Error::CapacityCheck(inner) => inner.is_transient(),
            _ => false,
        }
    }

    /// Short machine-readable name of the failure kind
    pub fn kind(&self) -> &'static str {
        match self {
            Error::Network(_) => "transient_network_failure",
            Error::Status { .. } => "upstream_status",
            Error::Timeout => "timeout",
            Error::MalformedPayload(_) | Error::Json(_) => "malformed_upstream_payload",
            Error::NotFound(_) => "not_found",
            Error::DuplicateTrack(_) => "duplicate_track",
            Error::CapacityCheck(_) => "capacity_check_failure",
            Error::Auth(_) => "auth",
            Error::Config(_) => "config",
            Error::Io(_) => "io",
        }
    }
}
