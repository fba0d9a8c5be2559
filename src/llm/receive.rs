use crate::error::{InterpretError, InterpretResult};
use reqwest::StatusCode;
use serde_json::Value;
use tracing::{debug, warn};

const PREVIEW_CHARS: usize = 100;

/// Maps a raw HTTP status and body onto the model's answer text.
///
/// Non-success statuses surface the payload's `message` or `error`. A
/// success without a non-empty string `answer` is a shape error, distinct
/// from transport failures.
pub fn decode_response(status: StatusCode, body: &str) -> InterpretResult<String> {
    if !status.is_success() {
        let message = remote_message(body).unwrap_or_else(|| {
            status
                .canonical_reason()
                .unwrap_or("Unknown error")
                .to_string()
        });
        warn!(status = status.as_u16(), message = %message, "Completion API returned an error");
        return Err(InterpretError::Remote {
            status: status.as_u16(),
            message,
        });
    }

    let value: Value = serde_json::from_str(body).map_err(|e| InterpretError::ResponseShape {
        reason: format!("Failed to parse API response as JSON: {}", e),
    })?;

    let answer = value
        .get("answer")
        .and_then(Value::as_str)
        .filter(|answer| !answer.is_empty())
        .ok_or_else(|| {
            warn!("Completion response has no `answer` field");
            InterpretError::ResponseShape {
                reason: "Response is missing the `answer` field".to_string(),
            }
        })?;

    debug!(preview = %preview(answer), "Received model answer");
    Ok(answer.to_string())
}

fn remote_message(body: &str) -> Option<String> {
    match serde_json::from_str::<Value>(body) {
        Ok(payload) => payload
            .get("message")
            .and_then(Value::as_str)
            .or_else(|| match payload.get("error") {
                Some(Value::String(error)) => Some(error.as_str()),
                Some(Value::Object(error)) => error.get("message").and_then(Value::as_str),
                _ => None,
            })
            .map(str::to_string),
        Err(_) => {
            let trimmed = body.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        }
    }
}

fn preview(text: &str) -> String {
    let mut preview: String = text.chars().take(PREVIEW_CHARS).collect();
    if text.chars().count() > PREVIEW_CHARS {
        preview.push_str("...");
    }
    preview
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_answer_is_returned() {
        let answer = decode_response(StatusCode::OK, r#"{"answer": "{}", "id": "1"}"#).unwrap();
        assert_eq!(answer, "{}");
    }

    #[test]
    fn test_missing_or_empty_answer_is_a_shape_error() {
        for body in [r#"{"id": "1"}"#, r#"{"answer": ""}"#, r#"{"answer": 3}"#, "not json"] {
            let err = decode_response(StatusCode::OK, body).unwrap_err();
            assert!(
                matches!(err, InterpretError::ResponseShape { .. }),
                "body {:?} gave {:?}",
                body,
                err
            );
        }
    }

    #[test]
    fn test_remote_message_extraction() {
        let err = decode_response(
            StatusCode::UNAUTHORIZED,
            r#"{"code": "unauthorized", "message": "Access token is invalid"}"#,
        )
        .unwrap_err();
        match err {
            InterpretError::Remote { status, message } => {
                assert_eq!(status, 401);
                assert_eq!(message, "Access token is invalid");
            }
            other => panic!("unexpected error: {:?}", other),
        }

        let err = decode_response(StatusCode::BAD_REQUEST, r#"{"error": "bad input"}"#).unwrap_err();
        assert!(matches!(err, InterpretError::Remote { ref message, .. } if message == "bad input"));

        let err = decode_response(
            StatusCode::TOO_MANY_REQUESTS,
            r#"{"error": {"message": "slow down"}}"#,
        )
        .unwrap_err();
        assert!(matches!(err, InterpretError::Remote { ref message, .. } if message == "slow down"));
    }

    #[test]
    fn test_remote_message_falls_back_to_status_reason() {
        let err = decode_response(StatusCode::BAD_GATEWAY, "").unwrap_err();
        assert!(matches!(err, InterpretError::Remote { ref message, .. } if message == "Bad Gateway"));

        let err = decode_response(StatusCode::BAD_GATEWAY, "upstream down").unwrap_err();
        assert!(matches!(err, InterpretError::Remote { ref message, .. } if message == "upstream down"));

        let err = decode_response(StatusCode::BAD_GATEWAY, r#"{"detail": "x"}"#).unwrap_err();
        assert!(matches!(err, InterpretError::Remote { ref message, .. } if message == "Bad Gateway"));
    }

    #[test]
    fn test_preview_truncates_on_char_boundaries() {
        let long = "棱".repeat(150);
        let short = preview(&long);
        assert_eq!(short.chars().count(), PREVIEW_CHARS + 3);
        assert!(short.ends_with("..."));
        assert_eq!(preview("short"), "short");
    }
}
