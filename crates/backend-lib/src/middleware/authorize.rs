// ============================
// board-backend-lib/src/middleware/authorize.rs
// ============================
//! Stateless authorization guard.
use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::{IntoResponse, Response},
};
use metrics::counter;
use std::sync::Arc;

use crate::error::AppError;
use crate::AppState;

/// Deny every non-public path unless the request proves its identity with a
/// valid bearer token. No session record is consulted or created; each
/// request stands on its own.
pub async fn authorization_guard(
    State(state): State<Arc<AppState>>,
    req: Request,
    next: Next,
) -> Response {
    if state.settings.is_public(req.uri().path()) {
        return next.run(req).await;
    }

    let authorized = req
        .headers()
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .is_some_and(|token| state.tokens.decode(token).is_ok());

    if authorized {
        return next.run(req).await;
    }

    counter!("request.denied").increment(1);
    tracing::debug!(path = %req.uri().path(), "denied unauthenticated request");
    AppError::Forbidden.into_response()
}
