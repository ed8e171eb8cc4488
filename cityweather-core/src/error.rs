use reqwest::StatusCode;
use thiserror::Error;

/// Why a lookup did not produce a report.
#[derive(Debug, Error)]
pub enum LookupError {
    /// The input was empty after trimming; no request was made.
    #[error("Please enter a city name!")]
    Validation,

    #[error(transparent)]
    Fetch(#[from] FetchError),
}

/// Failures talking to the provider. All of them render the same way.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The request URL carries the API key, so it is stripped before wrapping.
    #[error("Failed to reach weather provider: {0}")]
    Network(reqwest::Error),

    #[error("City not found or API error (status {status}): {body}")]
    Status { status: StatusCode, body: String },

    #[error("Malformed weather response: {0}")]
    Malformed(String),
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        FetchError::Network(err.without_url())
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(err: serde_json::Error) -> Self {
        FetchError::Malformed(err.to_string())
    }
}
