use thiserror::Error;

/// Signaturit SDK error types
///
/// Marshaling and validation failures (`InvalidInput`, `Schema`) are raised
/// before any network I/O. Remote failures are normally delivered as an
/// [`Outcome`](crate::types::Outcome) value; the `Api` and `Transport`
/// variants only appear when a caller converts an outcome with
/// [`Outcome::into_json`](crate::types::Outcome::into_json) and friends.
#[derive(Debug, Error)]
pub enum SignaturitError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Invalid option '{field}': {reason}")]
    Schema { field: String, reason: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Signaturit API error (status={status}): {message}")]
    Api { status: u16, message: String },

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Unexpected payload: expected {expected}, got {actual}")]
    UnexpectedPayload {
        expected: &'static str,
        actual: &'static str,
    },
}

impl SignaturitError {
    pub(crate) fn schema(field: impl Into<String>, reason: impl Into<String>) -> Self {
        SignaturitError::Schema {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Returns `true` for errors raised locally, before a request was sent.
    pub fn is_local(&self) -> bool {
        matches!(
            self,
            SignaturitError::InvalidInput(_)
                | SignaturitError::Schema { .. }
                | SignaturitError::Config(_)
                | SignaturitError::Io(_)
        )
    }

    /// Returns the HTTP status code if available.
    pub fn status(&self) -> Option<u16> {
        match self {
            SignaturitError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_error_display() {
        let err = SignaturitError::schema("secret", "missing required option");
        assert_eq!(
            err.to_string(),
            "Invalid option 'secret': missing required option"
        );
    }

    #[test]
    fn test_is_local() {
        assert!(SignaturitError::InvalidInput("x".into()).is_local());
        assert!(SignaturitError::schema("type", "unsupported").is_local());
        assert!(!SignaturitError::Transport("refused".into()).is_local());
        assert!(!SignaturitError::Api {
            status: 404,
            message: "Not Found".into()
        }
        .is_local());
    }

    #[test]
    fn test_status() {
        let err = SignaturitError::Api {
            status: 422,
            message: "Unprocessable".into(),
        };
        assert_eq!(err.status(), Some(422));
        assert_eq!(SignaturitError::Transport("x".into()).status(), None);
    }
}
