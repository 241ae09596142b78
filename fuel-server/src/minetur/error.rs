//! Fuel price API error types.

/// Errors that can occur when fetching data from the fuel price API.
#[derive(Debug, thiserror::Error)]
pub enum MineturError {
    /// HTTP request failed (network error, timeout, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Rate limited by the API
    #[error("rate limited by the fuel price API")]
    RateLimited,

    /// API returned an error status code
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Failed to parse response JSON
    #[error("JSON parse error: {message}")]
    Json {
        message: String,
        body: Option<String>,
    },

    /// The API answered but reported the query as failed
    #[error("query rejected by the API: {0}")]
    Rejected(String),

    /// Mock fixture data could not be loaded or has no entry
    #[error("mock data error: {message}")]
    Mock { message: String },
}

impl MineturError {
    /// Whether the failure came from the remote service rather than from
    /// local fixtures.
    pub fn is_upstream(&self) -> bool {
        !matches!(self, MineturError::Mock { .. })
    }
}
