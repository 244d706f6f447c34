use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use shipplan_core::DomainError;

use crate::history::HistoryError;

pub fn domain_error_to_response(err: DomainError) -> axum::response::Response {
    match err {
        DomainError::InvalidInput(violations) => (
            StatusCode::BAD_REQUEST,
            axum::Json(json!({
                "error": "validation_error",
                "message": format!("{} invalid field(s)", violations.len()),
                "violations": violations,
            })),
        )
            .into_response(),
        DomainError::Validation(msg) => json_error(StatusCode::BAD_REQUEST, "validation_error", msg),
        DomainError::InvalidId(msg) => json_error(StatusCode::BAD_REQUEST, "invalid_id", msg),
        DomainError::InvariantViolation(msg) => {
            json_error(StatusCode::UNPROCESSABLE_ENTITY, "invariant_violation", msg)
        }
        DomainError::NotFound => json_error(StatusCode::NOT_FOUND, "not_found", "not found"),
    }
}

pub fn history_error_to_response(err: HistoryError) -> axum::response::Response {
    match err {
        HistoryError::Malformed(e) => json_error(StatusCode::BAD_REQUEST, "invalid_request", e.to_string()),
        other => json_error(StatusCode::SERVICE_UNAVAILABLE, "history_unavailable", other.to_string()),
    }
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}
