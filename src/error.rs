use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use opentelemetry::trace::TraceContextExt;
use serde_json::json;
use thiserror::Error;
use tracing::Span;
use tracing_opentelemetry::OpenTelemetrySpanExt;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Fetch error ({status}): {message}")]
    Fetch { status: u16, message: String },

    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Schema error: {0}")]
    Schema(String),

    #[error("Internal error: {0}")]
    #[allow(dead_code)]
    Internal(String),
}

fn get_trace_id() -> Option<String> {
    let span = Span::current();
    let context = span.context();
    let span_ref = context.span();
    let span_context = span_ref.span_context();

    if span_context.is_valid() {
        Some(span_context.trace_id().to_string())
    } else {
        None
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match &self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            AppError::Fetch { status, message } => {
                tracing::error!(upstream_status = status, error = %message, "Upstream fetch error");
                (StatusCode::BAD_GATEWAY, "Upstream fetch failed".to_string())
            }
            AppError::Transport(e) => {
                tracing::error!(error = %e, "Transport error");
                (StatusCode::BAD_GATEWAY, "Upstream fetch failed".to_string())
            }
            AppError::Schema(msg) => {
                tracing::error!(error = %msg, "Schema error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
            AppError::Internal(msg) => {
                tracing::error!(error = %msg, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        let body = if let Some(trace_id) = get_trace_id() {
            json!({
                "error": error_message,
                "status": status.as_u16(),
                "trace_id": trace_id,
            })
        } else {
            json!({
                "error": error_message,
                "status": status.as_u16(),
            })
        };

        (status, Json(body)).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error() {
        let error = AppError::Validation("scope is invalid".to_string());
        assert_eq!(error.to_string(), "Validation error: scope is invalid");
    }

    #[test]
    fn test_not_found_error() {
        let error = AppError::NotFound("Filter".to_string());
        assert_eq!(error.to_string(), "Not found: Filter");
    }

    #[test]
    fn test_fetch_error() {
        let error = AppError::Fetch {
            status: 401,
            message: "unauthorized".to_string(),
        };
        assert_eq!(error.to_string(), "Fetch error (401): unauthorized");
    }

    #[test]
    fn test_schema_error() {
        let error = AppError::Schema("missing field `orderNumber`".to_string());
        assert_eq!(error.to_string(), "Schema error: missing field `orderNumber`");
    }

    #[test]
    fn test_app_result_ok() {
        fn returns_ok() -> AppResult<i32> {
            Ok(42)
        }
        let result = returns_ok();
        assert!(result.is_ok());
        assert_eq!(result.unwrap(), 42);
    }

    #[test]
    fn test_app_result_err() {
        fn returns_err() -> AppResult<i32> {
            Err(AppError::NotFound("test".to_string()))
        }
        let result = returns_err();
        assert!(result.is_err());
    }
}
