//! Error type returned by every [`crate::ApiClient`] call.
//!
//! The backend reports failures as JSON bodies of the form
//! `{"detail": "..."}`, or, for request validation failures, as
//! `{"detail": [{"msg": "...", ...}, ...]}`. [`ApiError::from_status`] folds
//! both shapes (and anything else) into a single human-readable `detail`
//! string so views can display it verbatim.

use serde::Deserialize;

/// A failed backend call.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ApiError {
    /// The request never produced a response.
    #[error("network error: {0}")]
    Network(String),

    /// The token is missing, expired, or rejected. `detail` is the
    /// backend's reason when it sent one (e.g. a failed login).
    #[error("not signed in")]
    Unauthorized { detail: Option<String> },

    /// The backend answered with a non-success status.
    #[error("{detail} ({status})")]
    Status { status: u16, detail: String },

    /// The response body did not match the expected shape.
    #[error("unexpected response: {0}")]
    Decode(String),
}

#[derive(Deserialize)]
struct ErrorBody {
    detail: Detail,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Detail {
    Message(String),
    Validation(Vec<ValidationItem>),
}

#[derive(Deserialize)]
struct ValidationItem {
    msg: String,
}

impl ApiError {
    /// Build an error from a non-success status and its raw body.
    pub fn from_status(status: u16, body: &str) -> Self {
        if status == 401 {
            return ApiError::Unauthorized {
                detail: message_detail(body),
            };
        }
        ApiError::Status {
            status,
            detail: extract_detail(status, body),
        }
    }

    /// The message a view should show for this error.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Network(_) => "Could not reach the server. Please try again.".to_string(),
            ApiError::Unauthorized { detail: Some(detail) } => detail.clone(),
            ApiError::Unauthorized { detail: None } => {
                "Your session has expired. Please sign in again.".to_string()
            }
            ApiError::Status { detail, .. } => detail.clone(),
            ApiError::Decode(_) => "The server sent an unexpected response.".to_string(),
        }
    }

    /// Whether the caller should drop its session.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized { .. })
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ApiError::Decode(err.to_string())
        } else if let Some(status) = err.status() {
            ApiError::from_status(status.as_u16(), "")
        } else {
            ApiError::Network(err.to_string())
        }
    }
}

/// The `detail` carried by a JSON error body, if any.
fn message_detail(body: &str) -> Option<String> {
    let parsed = serde_json::from_str::<ErrorBody>(body).ok()?;
    match parsed.detail {
        Detail::Message(msg) if !msg.trim().is_empty() => Some(msg),
        Detail::Validation(items) => items.into_iter().next().map(|item| item.msg),
        _ => None,
    }
}

fn extract_detail(status: u16, body: &str) -> String {
    if let Some(detail) = message_detail(body) {
        return detail;
    }

    let trimmed = body.trim();
    if !trimmed.is_empty() && !trimmed.starts_with('{') && !trimmed.starts_with('<') {
        return trimmed.to_string();
    }

    reqwest::StatusCode::from_u16(status)
        .ok()
        .and_then(|code| code.canonical_reason())
        .unwrap_or("Request failed")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detail_string() {
        let err = ApiError::from_status(400, r#"{"detail":"Maximum attempts (3) reached"}"#);
        assert_eq!(
            err,
            ApiError::Status {
                status: 400,
                detail: "Maximum attempts (3) reached".to_string()
            }
        );
        assert_eq!(err.user_message(), "Maximum attempts (3) reached");
    }

    #[test]
    fn test_detail_validation_array() {
        let body = r#"{"detail":[{"loc":["body","email"],"msg":"value is not a valid email address","type":"value_error"}]}"#;
        let err = ApiError::from_status(422, body);
        assert_eq!(err.user_message(), "value is not a valid email address");
    }

    #[test]
    fn test_plain_text_body() {
        let err = ApiError::from_status(500, "Internal Server Error\n");
        assert_eq!(err.user_message(), "Internal Server Error");
    }

    #[test]
    fn test_empty_body_falls_back_to_reason() {
        let err = ApiError::from_status(404, "");
        assert_eq!(err.user_message(), "Not Found");

        let err = ApiError::from_status(403, "<html>nope</html>");
        assert_eq!(err.user_message(), "Forbidden");
    }

    #[test]
    fn test_unauthorized() {
        let err = ApiError::from_status(401, r#"{"detail":"Could not validate credentials"}"#);
        assert!(err.is_unauthorized());
        assert!(!ApiError::Network("down".into()).is_unauthorized());
    }

    #[test]
    fn test_unauthorized_keeps_backend_reason() {
        let err = ApiError::from_status(401, r#"{"detail":"Incorrect username or password"}"#);
        assert!(err.is_unauthorized());
        assert_eq!(err.user_message(), "Incorrect username or password");

        let err = ApiError::from_status(401, "");
        assert_eq!(
            err.user_message(),
            "Your session has expired. Please sign in again."
        );
    }
}
