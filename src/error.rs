//!
//! # Custom Error Handling
//!
//! This module defines the custom error type `AppError` used throughout the application.
//! It is a closed set of tagged variants covering every failure the API can surface:
//! account-lifecycle errors (duplicate email, bad credentials, unverified account),
//! token errors from the authentication gate, ownership-scoped not-found, and
//! unexpected collaborator failures (database, hashing primitive).
//!
//! `AppError` implements `actix_web::error::ResponseError` so handlers can return
//! `Result<_, AppError>` and have errors rendered as JSON responses with the right
//! status codes. The four token variants deliberately render an identical generic
//! 401 body so a caller cannot distinguish missing, malformed, expired, or
//! wrong-purpose tokens from the outside.

use actix_web::{error::ResponseError, HttpResponse};
use serde_json::json;
use std::fmt;
use validator::ValidationErrors;

use crate::auth::token::TokenError;

/// All errors the API can report, matched exhaustively when rendering responses.
#[derive(Debug, PartialEq, Eq)]
pub enum AppError {
    /// Registration attempted with an email that already has an account (HTTP 400).
    DuplicateEmail,
    /// Login failed: unknown email or wrong password, indistinguishable (HTTP 400).
    InvalidCredentials,
    /// Login with correct credentials but an unverified account (HTTP 403).
    AccountNotVerified,
    /// No bearer token present on a gated request (HTTP 401).
    TokenMissing,
    /// Token signature or payload could not be validated (HTTP 401).
    TokenInvalid,
    /// Token was valid once but its expiry has passed (HTTP 401).
    TokenExpired,
    /// Token carries the wrong purpose claim for this use (HTTP 401).
    TokenPurposeMismatch,
    /// Resource absent or owned by someone else; the two are reported identically (HTTP 404).
    NotFound(String),
    /// The verification email could not be delivered; registration was rolled back (HTTP 500).
    EmailDeliveryFailed,
    /// Request payload failed validation (HTTP 400).
    Validation(String),
    /// Error from the database layer (HTTP 500, logged, generic body).
    Database(String),
    /// Any other unexpected server-side failure (HTTP 500, logged, generic body).
    Internal(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AppError::DuplicateEmail => write!(f, "Email already registered"),
            AppError::InvalidCredentials => write!(f, "Invalid credentials"),
            AppError::AccountNotVerified => write!(f, "Account not verified"),
            AppError::TokenMissing => write!(f, "No token provided"),
            AppError::TokenInvalid => write!(f, "Invalid token"),
            AppError::TokenExpired => write!(f, "Token expired"),
            AppError::TokenPurposeMismatch => write!(f, "Token purpose mismatch"),
            AppError::NotFound(msg) => write!(f, "Not Found: {}", msg),
            AppError::EmailDeliveryFailed => write!(f, "Verification email delivery failed"),
            AppError::Validation(msg) => write!(f, "Validation Error: {}", msg),
            AppError::Database(msg) => write!(f, "Database Error: {}", msg),
            AppError::Internal(msg) => write!(f, "Internal Server Error: {}", msg),
        }
    }
}

/// Generic body shared by every token-related 401 response.
const UNAUTHORIZED_BODY: &str = "Unauthorized: invalid or missing token";

impl ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        match self {
            AppError::DuplicateEmail => HttpResponse::BadRequest().json(json!({
                "error": "Email already registered"
            })),
            AppError::InvalidCredentials => HttpResponse::BadRequest().json(json!({
                "error": "Invalid credentials"
            })),
            AppError::AccountNotVerified => HttpResponse::Forbidden().json(json!({
                "error": "Account not verified. Please check your email and verify your account."
            })),
            // All token failures collapse to one generic body.
            AppError::TokenMissing
            | AppError::TokenInvalid
            | AppError::TokenExpired
            | AppError::TokenPurposeMismatch => HttpResponse::Unauthorized().json(json!({
                "error": UNAUTHORIZED_BODY
            })),
            AppError::NotFound(msg) => HttpResponse::NotFound().json(json!({
                "error": msg
            })),
            AppError::EmailDeliveryFailed => {
                log::error!("registration rolled back: verification email delivery failed");
                HttpResponse::InternalServerError().json(json!({
                    "error": "Registration failed: verification email could not be delivered"
                }))
            }
            AppError::Validation(msg) => HttpResponse::BadRequest().json(json!({
                "error": msg
            })),
            AppError::Database(msg) => {
                log::error!("database error: {}", msg);
                HttpResponse::InternalServerError().json(json!({
                    "error": "Internal server error"
                }))
            }
            AppError::Internal(msg) => {
                log::error!("internal error: {}", msg);
                HttpResponse::InternalServerError().json(json!({
                    "error": "Internal server error"
                }))
            }
        }
    }
}

impl From<sqlx::Error> for AppError {
    fn from(error: sqlx::Error) -> AppError {
        AppError::Database(error.to_string())
    }
}

impl From<ValidationErrors> for AppError {
    fn from(error: ValidationErrors) -> AppError {
        AppError::Validation(error.to_string())
    }
}

/// Hashing failures are configuration-level faults, not per-request errors.
impl From<bcrypt::BcryptError> for AppError {
    fn from(error: bcrypt::BcryptError) -> AppError {
        AppError::Internal(format!("Failed to hash password: {}", error))
    }
}

impl From<TokenError> for AppError {
    fn from(error: TokenError) -> AppError {
        match error {
            TokenError::Invalid => AppError::TokenInvalid,
            TokenError::Expired => AppError::TokenExpired,
            TokenError::PurposeMismatch => AppError::TokenPurposeMismatch,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_responses() {
        let error = AppError::DuplicateEmail;
        assert_eq!(error.error_response().status(), 400);

        let error = AppError::InvalidCredentials;
        assert_eq!(error.error_response().status(), 400);

        let error = AppError::AccountNotVerified;
        assert_eq!(error.error_response().status(), 403);

        let error = AppError::NotFound("Task not found or not authorized".into());
        assert_eq!(error.error_response().status(), 404);

        let error = AppError::EmailDeliveryFailed;
        assert_eq!(error.error_response().status(), 500);

        let error = AppError::Internal("boom".into());
        assert_eq!(error.error_response().status(), 500);
    }

    #[test]
    fn test_token_errors_all_render_unauthorized() {
        for error in [
            AppError::TokenMissing,
            AppError::TokenInvalid,
            AppError::TokenExpired,
            AppError::TokenPurposeMismatch,
        ] {
            assert_eq!(error.error_response().status(), 401);
        }
    }

    #[test]
    fn test_token_error_conversion() {
        assert_eq!(AppError::from(TokenError::Expired), AppError::TokenExpired);
        assert_eq!(AppError::from(TokenError::Invalid), AppError::TokenInvalid);
        assert_eq!(
            AppError::from(TokenError::PurposeMismatch),
            AppError::TokenPurposeMismatch
        );
    }
}
