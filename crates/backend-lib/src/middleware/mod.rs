// crates/backend-lib/src/middleware/mod.rs

//! Middleware for the board backend request pipeline.

pub mod authorize;

pub use authorize::authorization_guard;
