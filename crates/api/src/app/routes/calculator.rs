use std::sync::Arc;

use axum::{
    Json,
    extract::{Extension, rejection::JsonRejection},
    http::{HeaderValue, StatusCode, header},
    response::IntoResponse,
};

use shipplan_core::RunId;

use crate::app::services::AppServices;
use crate::app::{dto, errors};
use crate::middleware::{ALLOWED_HEADERS, ALLOWED_METHODS};

pub async fn calculate(
    Extension(services): Extension<Arc<AppServices>>,
    payload: Result<Json<dto::ShippingPlanRequest>, JsonRejection>,
) -> axum::response::Response {
    let body = match payload {
        Ok(Json(body)) => body,
        Err(rejection) => {
            return errors::json_error(StatusCode::BAD_REQUEST, "invalid_request", rejection.body_text());
        }
    };

    let run_id = RunId::new();
    let plan = match services.plan_shipment(run_id, body) {
        Ok(plan) => plan,
        Err(e) => {
            tracing::info!(%run_id, error = %e, "shipping plan rejected");
            return errors::domain_error_to_response(e);
        }
    };

    (
        StatusCode::OK,
        Json(dto::ShippingPlanResponse {
            success: true,
            run_id,
            results: plan.into_results(),
            message: "calculation complete",
        }),
    )
        .into_response()
}

pub async fn preflight() -> axum::response::Response {
    (
        StatusCode::NO_CONTENT,
        [
            (header::ACCESS_CONTROL_ALLOW_METHODS, HeaderValue::from_static(ALLOWED_METHODS)),
            (header::ACCESS_CONTROL_ALLOW_HEADERS, HeaderValue::from_static(ALLOWED_HEADERS)),
        ],
    )
        .into_response()
}
