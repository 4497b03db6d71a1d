// ============================
// board-backend-lib/src/login/mod.rs
// ============================
//! Login pipeline: credential filter plus its terminal handlers.

pub mod filter;
pub mod handlers;

pub use filter::credential_filter;
pub use handlers::{
    jwt_success_handler, login_failure_handler, FailureHandler, SuccessHandler,
};
