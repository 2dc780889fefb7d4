/// Main error type for the analytics layer
#[derive(Debug, thiserror::Error)]
pub enum TelemetryError {
    // === Delivery Errors ===
    #[error("Delivery failed during {operation}: {reason}")]
    Delivery { operation: String, reason: String },

    #[error("Delivery backend rejected the message: status {status}")]
    DeliveryRejected { status: u16 },

    // === Configuration Errors ===
    #[error("Invalid configuration for '{field}': {reason}")]
    InvalidConfiguration { field: String, reason: String },

    // === Serialization Errors ===
    #[error("Failed to serialize event payload: {source}")]
    Serialization {
        #[from]
        source: serde_json::Error,
    },
}

/// Result type alias used throughout the crate
pub type TelemetryResult<T> = Result<T, TelemetryError>;

impl From<reqwest::Error> for TelemetryError {
    fn from(error: reqwest::Error) -> Self {
        Self::Delivery {
            operation: "http_request".to_string(),
            reason: error.to_string(),
        }
    }
}

/// Error returned by the lifecycle wrapper around an instrumented operation.
///
/// Distinguishes a failure of the wrapped operation itself (re-raised after
/// the `.error` event is emitted) from a failure of the wrapper's own event
/// emission, which is unguarded and surfaces as `Transport`.
#[derive(Debug, thiserror::Error)]
pub enum WrappedError<E> {
    #[error(transparent)]
    Operation(E),

    #[error(transparent)]
    Transport(TelemetryError),
}

impl<E> WrappedError<E> {
    /// Returns the original operation error, if that is what this is.
    pub fn into_operation(self) -> Option<E> {
        match self {
            Self::Operation(error) => Some(error),
            Self::Transport(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delivery_error_formats_operation_and_reason() {
        let error = TelemetryError::Delivery {
            operation: "track".to_string(),
            reason: "connection refused".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Delivery failed during track: connection refused"
        );
    }

    #[test]
    fn wrapped_error_exposes_operation_failure() {
        let wrapped: WrappedError<&str> = WrappedError::Operation("boom");
        assert_eq!(wrapped.into_operation(), Some("boom"));

        let transport: WrappedError<&str> =
            WrappedError::Transport(TelemetryError::DeliveryRejected { status: 503 });
        assert!(transport.into_operation().is_none());
    }
}
