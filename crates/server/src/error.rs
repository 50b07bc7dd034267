//! HTTP mapping for quiz errors.
//!
//! Bad requests are 400, upstream fetch problems are 502 and everything else
//! is 500. The body is the error's code-prefixed message as plain text.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use stanza_core::Error;

#[derive(Debug, thiserror::Error)]
pub enum WebError {
    /// Malformed query parameter.
    #[error("INVALID_INPUT: {0}")]
    InvalidInput(String),

    #[error(transparent)]
    Core(#[from] Error),
}

impl WebError {
    pub fn status(&self) -> StatusCode {
        match self {
            WebError::InvalidInput(_) | WebError::Core(Error::InvalidInput(_)) => StatusCode::BAD_REQUEST,
            WebError::Core(e) if e.is_upstream() => StatusCode::BAD_GATEWAY,
            WebError::Core(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(%status, error = %self, "request failed");
        } else {
            tracing::warn!(%status, error = %self, "rejected request");
        }
        (status, self.to_string()).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stanza_core::ExtractStage;

    #[test]
    fn test_status_mapping() {
        assert_eq!(WebError::InvalidInput("q".into()).status(), StatusCode::BAD_REQUEST);
        assert_eq!(WebError::from(Error::InvalidInput("q".into())).status(), StatusCode::BAD_REQUEST);
        assert_eq!(WebError::from(Error::HttpError("404".into())).status(), StatusCode::BAD_GATEWAY);
        assert_eq!(WebError::from(Error::FetchTimeout("slow".into())).status(), StatusCode::BAD_GATEWAY);
        assert_eq!(WebError::from(Error::UnknownSource("a.b".into())).status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            WebError::from(Error::ExtractFailed {
                host: "a.b".into(),
                stage: ExtractStage::Body,
                cause: "no match".into()
            })
            .status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_message_keeps_code() {
        let err = WebError::from(Error::UnknownSource("www.example.com".into()));
        assert!(err.to_string().starts_with("UNKNOWN_SOURCE"));
        assert!(WebError::InvalidInput("q must be a number".into()).to_string().starts_with("INVALID_INPUT"));
    }
}
