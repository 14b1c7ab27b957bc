//! Error handling for the SignDetect client

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Error types
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Client has no authenticated connection
    #[error("Not connected: call initialize() first")]
    NotConnected,

    /// Detection session could not be opened
    #[error("Session start failed: {0}")]
    SessionStart(String),

    /// HTTP client error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Frame capture error (from a video source)
    #[error("Capture error: {0}")]
    Capture(String),

    /// Frame encoding error
    #[error("Encode error: {0}")]
    Encode(String),
}
