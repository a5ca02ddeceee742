//! Response interpretation
//!
//! Maps a status code and body to an [`Outcome`]. Non-success statuses are
//! returned as values, never raised.

use http::StatusCode;

use crate::types::Outcome;

fn error_message(status: u16, body: &[u8]) -> String {
    let text = String::from_utf8_lossy(body);
    let text = text.trim();
    if !text.is_empty() {
        return text.to_string();
    }
    StatusCode::from_u16(status)
        .ok()
        .and_then(|s| s.canonical_reason())
        .unwrap_or("Unknown Status")
        .to_string()
}

/// Classify a response.
///
/// - `200` with `expect_json`: decoded JSON, or `ApiError` if the body is not
///   valid JSON. An empty body is not valid JSON.
/// - `200` without `expect_json`: the body as-is.
/// - `204`: `SuccessEmpty`.
/// - anything else: `ApiError` with the body text, or the canonical reason
///   phrase when the body is empty.
pub fn interpret(status: u16, body: &[u8], expect_json: bool) -> Outcome {
    match status {
        200 if !expect_json => Outcome::Binary(body.to_vec()),
        200 => match serde_json::from_slice(body) {
            Ok(value) => Outcome::Success(value),
            Err(e) => Outcome::ApiError {
                status,
                message: format!("invalid JSON response: {e}"),
            },
        },
        204 => Outcome::SuccessEmpty,
        _ => Outcome::ApiError {
            status,
            message: error_message(status, body),
        },
    }
}

/// Outcome for a request that produced no response.
pub fn transport_error(err: &reqwest::Error) -> Outcome {
    Outcome::TransportError(err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_no_content() {
        assert_eq!(interpret(204, b"", true), Outcome::SuccessEmpty);
    }

    #[test]
    fn test_json_success() {
        assert_eq!(
            interpret(200, br#"{"id":"x"}"#, true),
            Outcome::Success(json!({"id": "x"}))
        );
    }

    #[test]
    fn test_api_error_uses_body() {
        assert_eq!(
            interpret(422, b"Unprocessable", true),
            Outcome::ApiError {
                status: 422,
                message: "Unprocessable".to_string()
            }
        );
    }

    #[test]
    fn test_api_error_falls_back_to_reason_phrase() {
        assert_eq!(
            interpret(404, b"", true),
            Outcome::ApiError {
                status: 404,
                message: "Not Found".to_string()
            }
        );
    }

    #[test]
    fn test_binary_is_untouched() {
        let body = [0u8, 159, 146, 150];
        assert_eq!(interpret(200, &body, false), Outcome::Binary(body.to_vec()));
    }

    #[test]
    fn test_invalid_json_is_api_error() {
        match interpret(200, b"not json", true) {
            Outcome::ApiError { status, message } => {
                assert_eq!(status, 200);
                assert!(message.starts_with("invalid JSON response"));
            }
            other => panic!("Expected ApiError, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_200_is_api_error() {
        for body in [&b""[..], &b"  \n"[..]] {
            assert!(matches!(
                interpret(200, body, true),
                Outcome::ApiError { status: 200, .. }
            ));
        }
    }

    #[test]
    fn test_other_2xx_is_api_error() {
        assert!(matches!(
            interpret(201, b"{}", true),
            Outcome::ApiError { status: 201, .. }
        ));
    }
}
