// ============================
// board-backend-lib/src/login/filter.rs
// ============================
//! Credential filter: recognizes JSON login requests and terminates them.
use axum::{
    extract::{Request, State},
    http::{header::CONTENT_TYPE, Method},
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use zeroize::Zeroize;

use crate::auth::{AuthOutcome, FailureReason};
use crate::AppState;

/// Only this exact media type qualifies; parameters such as `;charset=utf-8`
/// do not.
const JSON_CONTENT_TYPE: &str = "application/json";

const USERNAME_KEY: &str = "username";
const PASSWORD_KEY: &str = "password";

/// Middleware entry for the request pipeline.
///
/// A request matches when its path equals the configured login path and the
/// method is POST; everything else passes through untouched, so a GET or PUT
/// on the login path falls through to routing. On a match the filter owns
/// the single body read, verifies the extracted credentials, and hands the
/// outcome to the success or failure handler. It never writes the response
/// itself.
pub async fn credential_filter(
    State(state): State<Arc<AppState>>,
    req: Request,
    next: Next,
) -> Response {
    if req.uri().path() != state.settings.login_path || req.method() != Method::POST {
        return next.run(req).await;
    }

    let content_type = req
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    if content_type != JSON_CONTENT_TYPE {
        // Request-validation error: short-circuits before the body is read
        // and before the store is touched.
        return (state.on_failure)(FailureReason::UnsupportedContentType);
    }

    let bytes = match axum::body::to_bytes(req.into_body(), state.settings.login_body_limit).await
    {
        Ok(bytes) => bytes,
        Err(_) => return (state.on_failure)(FailureReason::MalformedRequest),
    };

    let Some((username, mut password)) = extract_credentials(&bytes) else {
        return (state.on_failure)(FailureReason::MalformedRequest);
    };

    let outcome = state.auth.verify(&username, &password).await;
    // One verification attempt per request, then the cleartext is gone.
    password.zeroize();

    match outcome {
        Ok(AuthOutcome::Success(principal)) => (state.on_success)(&state.tokens, principal),
        Ok(AuthOutcome::Failure(reason)) => (state.on_failure)(reason),
        // Store or runtime faults are the only errors that surface as 5xx
        // from this pipeline.
        Err(err) => err.into_response(),
    }
}

/// Parse the body as a flat string-keyed JSON object. Missing or non-string
/// `username`/`password` values become empty credentials rather than a parse
/// error; anything that is not a JSON object is malformed.
fn extract_credentials(bytes: &[u8]) -> Option<(String, String)> {
    let value: serde_json::Value = serde_json::from_slice(bytes).ok()?;
    let object = value.as_object()?;

    let field = |key: &str| {
        object
            .get(key)
            .and_then(serde_json::Value::as_str)
            .unwrap_or_default()
            .to_string()
    };
    Some((field(USERNAME_KEY), field(PASSWORD_KEY)))
}
