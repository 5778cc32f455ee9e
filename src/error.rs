use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Failures talking to an upstream provider.
#[derive(thiserror::Error, Debug)]
pub enum ProviderError {
    #[error("HTTP error: {}", describe_http(.0))]
    Http(#[from] reqwest::Error),

    #[error("{provider} API error: {status} - {message}")]
    Api {
        provider: &'static str,
        status: u16,
        message: String,
    },

    #[error("Invalid provider URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("Unexpected provider response: {0}")]
    Decode(String),

    #[error("{0}")]
    EmptyInput(String),
}

/// reqwest's `Display` omits the underlying cause.
fn describe_http(err: &reqwest::Error) -> String {
    if err.is_timeout() {
        return "upstream request timed out".to_string();
    }
    match std::error::Error::source(err) {
        Some(source) => format!("{}: {}", err, source),
        None => err.to_string(),
    }
}

#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Upstream(#[from] ProviderError),

    #[error("No content generated")]
    NoContent,

    #[error("{0}")]
    Internal(String),

    #[error("Server Error: {0}")]
    Server(Box<AppError>),
}

impl AppError {
    /// Wraps a failure raised while generating a script, keeping its status.
    pub fn server(inner: impl Into<AppError>) -> Self {
        AppError::Server(Box::new(inner.into()))
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Upstream(_) | AppError::NoContent | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            AppError::Server(inner) => inner.status(),
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            AppError::Validation(_) => "VALIDATION",
            AppError::Upstream(_) => "UPSTREAM",
            AppError::NoContent => "NO_CONTENT",
            AppError::Internal(_) => "INTERNAL",
            AppError::Server(inner) => inner.kind(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = self.to_string();

        tracing::error!("Request failed: {} - {}", self.kind(), message);

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_is_bad_request() {
        let err = AppError::Validation("No text".into());
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.to_string(), "No text");
    }

    #[test]
    fn server_prefixes_inner_message() {
        let err = AppError::server(AppError::Internal("boom".into()));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.to_string(), "Server Error: boom");
    }

    #[test]
    fn server_keeps_provider_message() {
        let err = AppError::server(ProviderError::Api {
            provider: "Gemini",
            status: 403,
            message: "API key not valid".into(),
        });
        assert_eq!(
            err.to_string(),
            "Server Error: Gemini API error: 403 - API key not valid"
        );
    }

    #[test]
    fn no_content_message() {
        assert_eq!(AppError::NoContent.to_string(), "No content generated");
        assert_eq!(
            AppError::NoContent.status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
