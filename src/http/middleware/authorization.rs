//! Authorization header enforcement.
//! The header is only checked for presence; validating it is the resolver's job.

use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::warn;

/// Reject requests without an `Authorization` header when `enforce` is set.
pub async fn require_authorization(
    State(enforce): State<bool>,
    request: Request,
    next: Next,
) -> Response {
    if !enforce {
        return next.run(request).await;
    }

    let present = request
        .headers()
        .get(AUTHORIZATION)
        .is_some_and(|v| !v.is_empty());

    if !present {
        warn!(path = %request.uri().path(), "authorization header not provided");
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "message": "authorization header not provided" })),
        )
            .into_response();
    }

    next.run(request).await
}
