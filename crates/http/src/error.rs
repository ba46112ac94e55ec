//! Error handling for the HTTP layer
use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

/// Error envelope returned by every failing endpoint
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Application error types that map to HTTP responses
#[derive(Error, Debug)]
pub enum AppError {
    #[error("not found: {message}")]
    NotFound { message: String },

    #[error("bad request: {message}")]
    BadRequest {
        message: String,
        detail: Option<String>,
    },

    #[error("{message}: {source}")]
    Internal {
        message: String,
        #[source]
        source: anyhow::Error,
    },
}

pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    /// Create a not found error
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    /// Create a bad request error
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest {
            message: message.into(),
            detail: None,
        }
    }

    /// Create an internal error with a generic message; the cause becomes the detail
    pub fn internal(message: impl Into<String>, source: impl Into<anyhow::Error>) -> Self {
        Self::Internal {
            message: message.into(),
            source: source.into(),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Render the error into its JSON envelope
    pub fn body(&self) -> ErrorBody {
        let (message, error) = match self {
            AppError::NotFound { message } => (message.clone(), None),
            AppError::BadRequest { message, detail } => (message.clone(), detail.clone()),
            AppError::Internal { message, source } => (message.clone(), Some(format!("{source:#}"))),
        };
        ErrorBody {
            success: false,
            message,
            error,
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        Self::BadRequest {
            message: "Invalid request body".to_string(),
            detail: Some(rejection.body_text()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let error_id = Uuid::new_v4();
        let status = self.status();
        let body = self.body();

        if status.is_server_error() {
            tracing::error!(
                error_id = %error_id,
                status_code = %status.as_u16(),
                detail = body.error.as_deref().unwrap_or_default(),
                "{}",
                body.message
            );
        } else {
            tracing::warn!(
                error_id = %error_id,
                status_code = %status.as_u16(),
                "{}",
                body.message
            );
        }

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_not_found_mapping() {
        let response = AppError::not_found("book not found").into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let body = body_json(response).await;
        assert_eq!(body["success"], false);
        assert_eq!(body["message"], "book not found");
        assert!(body.get("error").is_none());
    }

    #[tokio::test]
    async fn test_bad_request_mapping() {
        let response = AppError::bad_request("Not enough copies available").into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(response).await["message"],
            "Not enough copies available"
        );
    }

    #[tokio::test]
    async fn test_internal_error_carries_detail() {
        let cause = anyhow::anyhow!("connection refused").context("books lookup");
        let response = AppError::internal("Failed to borrow book", cause).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = body_json(response).await;
        assert_eq!(body["message"], "Failed to borrow book");
        assert_eq!(body["error"], "books lookup: connection refused");
    }

    #[test]
    fn test_display_includes_cause() {
        let err = AppError::internal("Failed to retrieve summary", anyhow::anyhow!("disk full"));
        assert_eq!(err.to_string(), "Failed to retrieve summary: disk full");
    }
}
