// ============================
// board-backend-lib/src/login/handlers.rs
// ============================
//! Terminal success/failure handlers for the credential filter.
//!
//! Both are plain function values injected through `AppState`, so tests or
//! deployments can swap them without touching the filter.
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use board_common::{LoginSuccess, Principal};
use metrics::counter;
use std::sync::Arc;

use crate::auth::{FailureReason, TokenIssuer};
use crate::error::AppError;

/// Terminal action for a verified principal.
pub type SuccessHandler = Arc<dyn Fn(&TokenIssuer, Principal) -> Response + Send + Sync>;

/// Terminal action for a failed attempt.
pub type FailureHandler = Arc<dyn Fn(FailureReason) -> Response + Send + Sync>;

/// Default success handler: mint a signed token and respond 200.
pub fn jwt_success_handler(tokens: &TokenIssuer, principal: Principal) -> Response {
    match tokens.issue(&principal) {
        Ok(token) => {
            tracing::info!(username = %principal.username, "login succeeded, issuing token");
            counter!("login.success").increment(1);
            (StatusCode::OK, Json(LoginSuccess { token })).into_response()
        },
        Err(err) => {
            // No further fallback exists for this request; report and
            // terminate with the error response.
            tracing::error!(error = %err, "token issuance failed");
            err.into_response()
        },
    }
}

/// Default failure handler. Credential failures collapse to one 401 so the
/// wire never distinguishes unknown usernames from wrong passwords; request
/// shape failures are 400.
pub fn login_failure_handler(reason: FailureReason) -> Response {
    counter!("login.failure").increment(1);
    match reason {
        FailureReason::UnknownUser | FailureReason::BadPassword => {
            tracing::warn!("login failed: invalid credentials");
            AppError::InvalidCredentials.into_response()
        },
        FailureReason::MalformedRequest => AppError::MalformedRequest.into_response(),
        FailureReason::UnsupportedContentType => AppError::UnsupportedContentType.into_response(),
    }
}
