use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use comanda_core::error::OrderError;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`OrderError`] for domain errors and adds the storage variant.
/// Implements [`IntoResponse`] to produce consistent JSON error responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level order error.
    #[error(transparent)]
    Order(#[from] OrderError),

    /// A database error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A request the transport layer could not interpret, e.g. an
    /// unparseable JSON body.
    #[error("Bad request: {0}")]
    BadRequest(String),
}

/// Convenience type alias for handler and service return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            // Domain errors are all client-visible 400s per the wire
            // contract: the original board client only distinguishes
            // success from an `{error}` body.
            AppError::Order(order) => {
                let code = match order {
                    OrderError::InvalidStatus(_) => "INVALID_STATUS",
                    OrderError::NotFound(_) => "TICKET_NOT_FOUND",
                    OrderError::MissingField(_) => "MISSING_FIELD",
                    OrderError::UpdateFailed => "UPDATE_FAILED",
                    OrderError::CreateFailed => "CREATE_FAILED",
                };
                (StatusCode::BAD_REQUEST, code, order.to_string())
            }

            AppError::Database(err) => classify_sqlx_error(err),

            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}

/// Classify a sqlx error into an HTTP status, error code, and message.
///
/// - `RowNotFound` maps to 404.
/// - Everything else (connection failures included) maps to 500 with a
///   sanitized message; the request fails immediately, no retry.
fn classify_sqlx_error(err: &sqlx::Error) -> (StatusCode, &'static str, String) {
    match err {
        sqlx::Error::RowNotFound => (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            "Resource not found".to_string(),
        ),
        other => {
            tracing::error!(error = %other, "Database error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                "An internal error occurred".to_string(),
            )
        }
    }
}
