// ============================
// board-backend-lib/src/auth/mod.rs
// ============================
//! Authentication module.

pub mod password;
pub mod provider;
pub mod token;

pub use password::{DelegatingHasher, DEFAULT_TAG};
pub use provider::{AuthOutcome, AuthProvider, FailureReason};
pub use token::{Claims, TokenIssuer};
