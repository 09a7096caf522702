//! Throttle state error types.

use super::store::Slot;

/// Errors reading, writing or locking throttle state.
///
/// The gate turns every one of these into "do not send".
#[derive(Debug, thiserror::Error)]
pub enum ThrottleError {
    /// Lock or marker file operation failed
    #[error("{slot} marker I/O failed: {source}")]
    Io {
        slot: Slot,
        #[source]
        source: std::io::Error,
    },

    /// Stored timestamp could not be parsed
    #[error("{slot} marker holds unreadable timestamp {value:?}")]
    Parse { slot: Slot, value: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = ThrottleError::Parse {
            slot: Slot::Daily,
            value: "yesterday".into(),
        };
        assert_eq!(err.to_string(), "daily marker holds unreadable timestamp \"yesterday\"");

        let err = ThrottleError::Io {
            slot: Slot::Startup,
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        assert_eq!(err.to_string(), "startup marker I/O failed: denied");
    }
}
