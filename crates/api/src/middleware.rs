use axum::{
    http::{HeaderValue, header},
    middleware::Next,
    response::Response,
};

pub const ALLOWED_METHODS: &str = "GET, POST, OPTIONS";
pub const ALLOWED_HEADERS: &str = "Content-Type, Authorization, X-Client-Info, apikey";

/// Browser clients call the calculator cross-origin; every response allows any origin.
pub async fn cors_headers(req: axum::http::Request<axum::body::Body>, next: Next) -> Response {
    let mut res = next.run(req).await;
    res.headers_mut().insert(
        header::ACCESS_CONTROL_ALLOW_ORIGIN,
        HeaderValue::from_static("*"),
    );
    res
}
