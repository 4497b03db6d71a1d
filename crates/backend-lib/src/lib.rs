// ============================
// board-backend-lib/src/lib.rs
// ============================
//! Core library for the member-board backend: member store, tagged password
//! hashing, the stateless login pipeline, and the HTTP router.

pub mod auth;
pub mod config;
pub mod error;
pub mod login;
pub mod member;
pub mod middleware;
pub mod router;
pub mod store;

use std::sync::Arc;
use std::time::Duration;

use crate::auth::{AuthProvider, DelegatingHasher, TokenIssuer};
use crate::config::Settings;
use crate::error::AppError;
use crate::login::{jwt_success_handler, login_failure_handler, FailureHandler, SuccessHandler};
use crate::store::MemberStore;

/// Application state shared across all handlers
pub struct AppState {
    /// Settings the pipeline was composed with
    pub settings: Settings,
    /// Member credential store
    pub store: Arc<dyn MemberStore>,
    /// Tagged password hasher
    pub hasher: Arc<DelegatingHasher>,
    /// Authentication provider
    pub auth: AuthProvider,
    /// Token issuer/validator
    pub tokens: TokenIssuer,
    /// Terminal handler for successful logins
    pub on_success: SuccessHandler,
    /// Terminal handler for failed logins
    pub on_failure: FailureHandler,
}

impl AppState {
    /// Create application state with the default handlers.
    pub fn new(store: Arc<dyn MemberStore>, settings: Settings) -> Result<Self, AppError> {
        let hasher = Arc::new(DelegatingHasher::new());
        let auth = AuthProvider::new(
            Arc::clone(&store),
            Arc::clone(&hasher),
            Duration::from_millis(settings.store_timeout_ms),
        )?;
        let tokens = TokenIssuer::new(&settings.token.secret, settings.token.ttl_secs);

        Ok(Self {
            settings,
            store,
            hasher,
            auth,
            tokens,
            on_success: Arc::new(jwt_success_handler),
            on_failure: Arc::new(login_failure_handler),
        })
    }

    /// Replace the terminal handlers.
    pub fn with_handlers(mut self, on_success: SuccessHandler, on_failure: FailureHandler) -> Self {
        self.on_success = on_success;
        self.on_failure = on_failure;
        self
    }
}
