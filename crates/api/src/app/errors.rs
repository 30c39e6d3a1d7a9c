use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use tracing::error;

use stockflow_core::DomainError;
use stockflow_infra::ServiceError;

pub fn service_error_to_response(err: ServiceError) -> Response {
    match err {
        ServiceError::Domain(e) => domain_error_to_response(e),
        ServiceError::Store(e) => {
            error!(error = %e, "storage failure");
            internal_error()
        }
    }
}

pub fn domain_error_to_response(err: DomainError) -> Response {
    match err {
        DomainError::Validation(errors) => (
            StatusCode::BAD_REQUEST,
            axum::Json(json!({
                "error": "validation_failed",
                "message": "Validation failed",
                "errors": errors,
            })),
        )
            .into_response(),
        DomainError::InsufficientStock { available, requested } => (
            StatusCode::CONFLICT,
            axum::Json(json!({
                "error": "insufficient_stock",
                "message": format!(
                    "Insufficient stock. Available: {available}, Requested: {requested}"
                ),
                "available": available,
                "requested": requested,
            })),
        )
            .into_response(),
        DomainError::StockLimitExceeded { current, adding } => (
            StatusCode::CONFLICT,
            axum::Json(json!({
                "error": "stock_limit_exceeded",
                "message": format!(
                    "Stock level limit exceeded. Current: {current}, Adding: {adding}"
                ),
                "current": current,
                "adding": adding,
            })),
        )
            .into_response(),
        not_found => json_error(StatusCode::NOT_FOUND, "not_found", not_found.to_string()),
    }
}

/// Storage details stay in the logs; callers get a generic body.
pub fn internal_error() -> Response {
    json_error(
        StatusCode::INTERNAL_SERVER_ERROR,
        "internal_error",
        "Internal server error",
    )
}

pub fn json_error(status: StatusCode, code: &'static str, message: impl Into<String>) -> Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}
