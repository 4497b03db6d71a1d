// ============================
// board-backend-lib/src/router.rs
// ============================
//! Router and request pipeline composition.
use axum::{middleware, routing::get, Router};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::login::credential_filter;
use crate::middleware::authorization_guard;
use crate::AppState;

/// Compose the request pipeline.
///
/// Layers run outermost first, and axum applies the last-added layer
/// outermost, so the order here is: trace, then the credential filter, then
/// the authorization guard, then routing. A login POST is fully terminated
/// by the filter before the guard could see it; every other request falls
/// through the filter into the public-vs-authenticated check.
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(index))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            authorization_guard,
        ))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            credential_filter,
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Public index page.
async fn index() -> &'static str {
    "member board"
}
