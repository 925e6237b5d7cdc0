//! Upstream response types and error definitions.

use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

use crate::filtering::Submission;

/// Errors that can occur while fetching submissions.
#[derive(Debug, Error)]
pub enum UpstreamError {
    /// The forms API answered with a non-200 status.
    #[error("{message}")]
    Status { status: StatusCode, message: String },

    /// Connection, TLS or body transfer failed.
    #[error("Upstream transport error: {0}")]
    Transport(#[source] reqwest::Error),

    /// The call exceeded the configured timeout.
    #[error("Upstream request timed out after {0} seconds")]
    Timeout(u64),

    /// The 200 body did not hold a `responses` array of submissions.
    #[error("Malformed upstream payload: {0}")]
    MalformedPayload(String),

    /// The request URL could not be built.
    #[error("Invalid upstream URL: {0}")]
    InvalidUrl(String),
}

/// Result type for upstream operations.
pub type UpstreamResult<T> = Result<T, UpstreamError>;

/// Submissions listing as returned by the forms API.
///
/// Only `responses` is read; upstream paging totals describe the unfiltered
/// set and are discarded.
#[derive(Debug, Deserialize)]
pub struct SubmissionsPage {
    pub responses: Vec<Submission>,
}

impl SubmissionsPage {
    /// Decode a 200 body, requiring `responses` to be an array.
    pub fn from_value(body: Value) -> UpstreamResult<Self> {
        match body.get("responses") {
            Some(Value::Array(_)) => serde_json::from_value(body)
                .map_err(|e| UpstreamError::MalformedPayload(e.to_string())),
            Some(_) => Err(UpstreamError::MalformedPayload(
                "`responses` is not an array".to_string(),
            )),
            None => Err(UpstreamError::MalformedPayload(
                "missing `responses` field".to_string(),
            )),
        }
    }
}

/// Best-effort human message from an error body.
///
/// Prefers a JSON `message` or `error` string, then the raw text, then the
/// canonical reason phrase.
pub fn error_message(status: StatusCode, body: &str) -> String {
    if let Ok(Value::Object(map)) = serde_json::from_str::<Value>(body) {
        for key in ["message", "error"] {
            if let Some(Value::String(message)) = map.get(key) {
                return message.clone();
            }
        }
    }

    let text = body.trim();
    if !text.is_empty() {
        return text.to_string();
    }

    status
        .canonical_reason()
        .unwrap_or("Upstream request failed")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decodes_responses_array() {
        let page = SubmissionsPage::from_value(json!({
            "responses": [{"submissionId": "a", "questions": []}],
            "totalResponses": 1,
            "pageCount": 1
        }))
        .unwrap();
        assert_eq!(page.responses.len(), 1);
        assert_eq!(page.responses[0].submission_id, "a");
    }

    #[test]
    fn rejects_non_array_responses() {
        let err = SubmissionsPage::from_value(json!({"responses": {"a": 1}})).unwrap_err();
        assert!(matches!(err, UpstreamError::MalformedPayload(_)));

        let err = SubmissionsPage::from_value(json!({"items": []})).unwrap_err();
        assert!(matches!(err, UpstreamError::MalformedPayload(_)));
    }

    #[test]
    fn rejects_malformed_submission() {
        let err = SubmissionsPage::from_value(json!({"responses": [{"questions": []}]})).unwrap_err();
        assert!(matches!(err, UpstreamError::MalformedPayload(_)));
    }

    #[test]
    fn error_message_sources() {
        assert_eq!(
            error_message(StatusCode::NOT_FOUND, r#"{"statusCode":404,"message":"Form not found"}"#),
            "Form not found"
        );
        assert_eq!(error_message(StatusCode::UNAUTHORIZED, r#"{"error":"bad key"}"#), "bad key");
        assert_eq!(error_message(StatusCode::BAD_GATEWAY, "  gateway down \n"), "gateway down");
        assert_eq!(error_message(StatusCode::NOT_FOUND, ""), "Not Found");
    }
}
