use std::sync::Arc;

use axum::{
    Json,
    extract::{Extension, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
};

use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub async fn ingest(
    Extension(services): Extension<Arc<AppServices>>,
    payload: Result<Json<dto::IngestHistoryRequest>, JsonRejection>,
) -> axum::response::Response {
    let body = match payload {
        Ok(Json(body)) => body,
        Err(rejection) => {
            return errors::json_error(StatusCode::BAD_REQUEST, "invalid_request", rejection.body_text());
        }
    };

    match services.ingest_history(body.records) {
        Ok(accepted) => (
            StatusCode::ACCEPTED,
            Json(serde_json::json!({ "accepted": accepted })),
        )
            .into_response(),
        Err(e) => errors::history_error_to_response(e),
    }
}
