use std::path::Path;

use serde::de::DeserializeOwned;

use crate::error::SignaturitError;

/// Result of one API call.
///
/// Every endpoint returns an `Outcome` rather than failing on remote errors;
/// callers inspect the variant they received.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// `200 OK` with a decoded JSON body.
    Success(serde_json::Value),
    /// `204 No Content`.
    SuccessEmpty,
    /// `200 OK` on a download endpoint, body untouched.
    Binary(Vec<u8>),
    /// Any other status, or a `200 OK` whose JSON body could not be decoded.
    ApiError { status: u16, message: String },
    /// The request never produced a response.
    TransportError(String),
}

impl Outcome {
    pub fn is_success(&self) -> bool {
        matches!(
            self,
            Outcome::Success(_) | Outcome::SuccessEmpty | Outcome::Binary(_)
        )
    }

    pub fn is_error(&self) -> bool {
        !self.is_success()
    }

    fn variant_name(&self) -> &'static str {
        match self {
            Outcome::Success(_) => "json",
            Outcome::SuccessEmpty => "empty",
            Outcome::Binary(_) => "binary",
            Outcome::ApiError { .. } => "api error",
            Outcome::TransportError(_) => "transport error",
        }
    }

    fn into_error(self, expected: &'static str) -> SignaturitError {
        match self {
            Outcome::ApiError { status, message } => SignaturitError::Api { status, message },
            Outcome::TransportError(message) => SignaturitError::Transport(message),
            other => SignaturitError::UnexpectedPayload {
                expected,
                actual: other.variant_name(),
            },
        }
    }

    /// Turn remote failures into `Err`, keeping successes as they are.
    pub fn into_result(self) -> Result<Outcome, SignaturitError> {
        match self {
            Outcome::ApiError { status, message } => Err(SignaturitError::Api { status, message }),
            Outcome::TransportError(message) => Err(SignaturitError::Transport(message)),
            success => Ok(success),
        }
    }

    /// Decoded JSON payload. An empty success becomes `true`.
    pub fn into_json(self) -> Result<serde_json::Value, SignaturitError> {
        match self {
            Outcome::Success(value) => Ok(value),
            Outcome::SuccessEmpty => Ok(serde_json::Value::Bool(true)),
            other => Err(other.into_error("json")),
        }
    }

    /// Deserialize the JSON payload into `T`.
    pub fn deserialize<T: DeserializeOwned>(self) -> Result<T, SignaturitError> {
        Ok(serde_json::from_value(self.into_json()?)?)
    }

    pub fn into_bytes(self) -> Result<Vec<u8>, SignaturitError> {
        match self {
            Outcome::Binary(bytes) => Ok(bytes),
            other => Err(other.into_error("binary")),
        }
    }

    /// Write a binary payload to `path`, replacing any existing file.
    pub async fn save_to(self, path: impl AsRef<Path>) -> Result<(), SignaturitError> {
        let bytes = self.into_bytes()?;
        tokio::fs::write(path, bytes).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[test]
    fn test_success_predicates() {
        assert!(Outcome::SuccessEmpty.is_success());
        assert!(Outcome::Binary(vec![]).is_success());
        assert!(Outcome::TransportError("refused".into()).is_error());
        assert!(Outcome::ApiError {
            status: 404,
            message: "Not Found".into()
        }
        .is_error());
    }

    #[test]
    fn test_empty_success_is_true() {
        assert_eq!(
            Outcome::SuccessEmpty.into_json().unwrap(),
            serde_json::Value::Bool(true)
        );
    }

    #[test]
    fn test_api_error_converts() {
        let outcome = Outcome::ApiError {
            status: 422,
            message: "Unprocessable".into(),
        };
        match outcome.into_json() {
            Err(SignaturitError::Api { status, message }) => {
                assert_eq!(status, 422);
                assert_eq!(message, "Unprocessable");
            }
            other => panic!("Expected Api error, got {:?}", other),
        }
    }

    #[test]
    fn test_into_result() {
        assert_eq!(
            Outcome::SuccessEmpty.into_result().unwrap(),
            Outcome::SuccessEmpty
        );
        let err = Outcome::TransportError("connection refused".into())
            .into_result()
            .unwrap_err();
        assert!(matches!(err, SignaturitError::Transport(_)));
    }

    #[test]
    fn test_deserialize() {
        #[derive(Deserialize)]
        struct Count {
            count: u32,
        }

        let outcome = Outcome::Success(serde_json::json!({"count": 3}));
        let count: Count = outcome.deserialize().unwrap();
        assert_eq!(count.count, 3);
    }

    #[test]
    fn test_into_bytes_on_json_is_unexpected() {
        let err = Outcome::Success(serde_json::json!({})).into_bytes().unwrap_err();
        assert!(matches!(
            err,
            SignaturitError::UnexpectedPayload {
                expected: "binary",
                actual: "json"
            }
        ));
    }

    #[tokio::test]
    async fn test_save_to_writes_bytes() {
        let path = std::env::temp_dir().join("signaturit_sdk_save_to_test.bin");
        Outcome::Binary(b"binary_content".to_vec())
            .save_to(&path)
            .await
            .unwrap();

        assert_eq!(std::fs::read(&path).unwrap(), b"binary_content");
        let _ = std::fs::remove_file(&path);
    }
}
