//! Notification error types.

/// Errors from delivering a message.
#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Bot token rejected
    #[error("unauthorized: check TELEGRAM_BOT_TOKEN")]
    Unauthorized,

    /// API returned an error status
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = NotifyError::Api {
            status: 400,
            message: "Bad Request: chat not found".into(),
        };
        assert_eq!(err.to_string(), "API error 400: Bad Request: chat not found");
        assert_eq!(
            NotifyError::Unauthorized.to_string(),
            "unauthorized: check TELEGRAM_BOT_TOKEN"
        );
    }
}
