// crates/backend-lib/src/error.rs

//! Central error type + Axum integration.
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

/// Application error types with error codes and context
#[derive(Error, Debug)]
pub enum AppError {
    /// Login body carried a content type other than `application/json`.
    #[error("Login content type must be application/json")]
    UnsupportedContentType,

    /// Login body was not a flat JSON object.
    #[error("Malformed login request body")]
    MalformedRequest,

    /// Unknown username or wrong password. Collapsed to one variant at the
    /// wire level so responses never reveal which accounts exist.
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Request to a protected path without a valid bearer token.
    #[error("Forbidden")]
    Forbidden,

    #[error("Username is already taken: {0}")]
    DuplicateUsername(String),

    #[error("Invalid member data: {0}")]
    InvalidMember(String),

    #[error("Member not found")]
    MemberNotFound,

    #[error("Credential store lookup timed out")]
    StoreTimeout,

    #[error("Password hashing error: {0}")]
    Hash(String),

    #[error("Token error: {0}")]
    Token(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl AppError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::UnsupportedContentType
            | AppError::MalformedRequest
            | AppError::InvalidMember(_) => StatusCode::BAD_REQUEST,
            AppError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            AppError::Forbidden => StatusCode::FORBIDDEN,
            AppError::MemberNotFound => StatusCode::NOT_FOUND,
            AppError::DuplicateUsername(_) => StatusCode::CONFLICT,
            AppError::StoreTimeout => StatusCode::SERVICE_UNAVAILABLE,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::UnsupportedContentType => "LOGIN_001",
            AppError::MalformedRequest => "LOGIN_002",
            AppError::InvalidCredentials => "AUTH_001",
            AppError::Forbidden => "AUTH_002",
            AppError::DuplicateUsername(_) => "MEMBER_001",
            AppError::InvalidMember(_) => "MEMBER_002",
            AppError::MemberNotFound => "MEMBER_003",
            AppError::StoreTimeout => "STORE_001",
            AppError::Hash(_) => "HASH_001",
            AppError::Token(_) => "TOKEN_001",
            AppError::Internal(_) => "INT_001",
            AppError::Io(_) => "IO_001",
            AppError::Json(_) => "JSON_001",
        }
    }

    /// Get a sanitized message suitable for production use
    pub fn sanitized_message(&self) -> String {
        match self {
            AppError::UnsupportedContentType => {
                "Login requests must use application/json".to_string()
            },
            AppError::MalformedRequest => "Invalid request format".to_string(),
            AppError::InvalidCredentials => "Authentication failed".to_string(),
            AppError::Forbidden => "Access denied".to_string(),
            AppError::DuplicateUsername(_) => "Username is already taken".to_string(),
            AppError::InvalidMember(_) => "Invalid member data".to_string(),
            AppError::MemberNotFound => "Resource not found".to_string(),
            AppError::StoreTimeout => "Service temporarily unavailable".to_string(),
            AppError::Json(_) => "Invalid request format".to_string(),
            AppError::Hash(_)
            | AppError::Token(_)
            | AppError::Internal(_)
            | AppError::Io(_) => "An internal server error occurred".to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let error_code = self.error_code();

        // Use detailed messages in development, sanitized in production
        let message = if cfg!(debug_assertions) {
            self.to_string()
        } else {
            self.sanitized_message()
        };

        let body = serde_json::json!({
            "error": {
                "code": error_code,
                "message": message,
            }
        });

        (status, axum::Json(body)).into_response()
    }
}

impl From<String> for AppError {
    fn from(msg: String) -> Self {
        AppError::Internal(msg)
    }
}

impl From<&str> for AppError {
    fn from(msg: &str) -> Self {
        AppError::Internal(msg.to_string())
    }
}
