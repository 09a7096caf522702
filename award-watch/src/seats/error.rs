//! Seats API error types.

/// Errors from the seats.aero partner API client.
#[derive(Debug, thiserror::Error)]
pub enum SeatsError {
    /// HTTP request failed (network error, timeout, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Partner key rejected
    #[error("unauthorized: check SEATS_API_KEY")]
    Unauthorized,

    /// Rate limited by the API
    #[error("rate limited by seats.aero")]
    RateLimited,

    /// API returned an error status code
    #[error("API error {status}: {message}")]
    ApiError { status: u16, message: String },

    /// JSON deserialization failed
    #[error("JSON parse error: {message}{}", body_suffix(.body))]
    Json {
        message: String,
        body: Option<String>,
    },
}

fn body_suffix(body: &Option<String>) -> String {
    body.as_ref()
        .map(|b| format!(" (body: {b})"))
        .unwrap_or_default()
}
