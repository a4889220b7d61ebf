use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::analysis::parser::ResponseFormatError;
use crate::document::DocumentError;
use crate::llm_client::LlmError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
///
/// Every failure of an analysis ends up here and is reported to the user by name;
/// nothing in the chain is retried.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Could not read the uploaded document: {0}")]
    DocumentRead(#[from] DocumentError),

    #[error("Missing configuration: {0} is not set")]
    MissingConfiguration(&'static str),

    #[error("Completion request failed: {0}")]
    Completion(#[from] LlmError),

    #[error(transparent)]
    ResponseFormat(#[from] ResponseFormatError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::DocumentRead(e) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "DOCUMENT_READ_ERROR",
                format!("The uploaded resume could not be read as a PDF: {e}"),
            ),
            AppError::MissingConfiguration(key) => {
                tracing::error!("Analysis blocked: {key} is not configured");
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "MISSING_CONFIGURATION",
                    format!("API key not found. Set {key} and restart the service."),
                )
            }
            AppError::Completion(e) => {
                tracing::error!("Completion error: {e}");
                (
                    StatusCode::BAD_GATEWAY,
                    "COMPLETION_ERROR",
                    format!("The AI model request failed: {e}"),
                )
            }
            AppError::ResponseFormat(e) => {
                // The raw reply is the most useful thing a user can report back.
                let body = Json(json!({
                    "error": {
                        "code": "RESPONSE_FORMAT_ERROR",
                        "message": "The AI model did not return a readable analysis. Please try again.",
                        "raw_reply": e.raw_reply,
                    }
                }));
                return (StatusCode::BAD_GATEWAY, body).into_response();
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use serde_json::Value;

    async fn body_json(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_missing_configuration_is_service_unavailable() {
        let response = AppError::MissingConfiguration("GEMINI_API_KEY").into_response();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
        let body = body_json(response).await;
        assert_eq!(body["error"]["code"], "MISSING_CONFIGURATION");
        assert!(body["error"]["message"]
            .as_str()
            .unwrap()
            .contains("GEMINI_API_KEY"));
    }

    #[tokio::test]
    async fn test_response_format_error_exposes_raw_reply() {
        let err = ResponseFormatError {
            raw_reply: "I cannot help with that.".to_string(),
        };
        let response = AppError::from(err).into_response();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        let body = body_json(response).await;
        assert_eq!(body["error"]["code"], "RESPONSE_FORMAT_ERROR");
        assert_eq!(body["error"]["raw_reply"], "I cannot help with that.");
    }

    #[tokio::test]
    async fn test_document_read_is_unprocessable_entity() {
        let response = AppError::from(DocumentError::Empty).into_response();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let body = body_json(response).await;
        assert_eq!(body["error"]["code"], "DOCUMENT_READ_ERROR");
    }

    #[tokio::test]
    async fn test_validation_error_is_bad_request() {
        let response = AppError::Validation("job_description is required".into()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }
}
