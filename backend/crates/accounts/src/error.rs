//! Accounts Error Types
//!
//! Accounts-specific error variants that integrate with the unified
//! `kernel::error::AppError` system.

use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use kernel::notice::Notice;
use kernel::validation::FieldErrors;
use thiserror::Error;

/// Accounts-specific result type alias
pub type AccountsResult<T> = Result<T, AccountsError>;

/// Message shown for every failed sign-in, whatever the cause
pub const INVALID_CREDENTIALS_MESSAGE: &str = "Invalid username or password.";

#[derive(Debug, Error)]
pub enum AccountsError {
    /// No authenticated identity for an operation that needs one
    #[error("Authentication required")]
    Unauthenticated,

    /// Unknown username, wrong password or inactive account
    #[error("Invalid username or password.")]
    InvalidCredentials,

    /// Submitted form failed validation
    #[error("Validation failed")]
    Validation(FieldErrors),

    #[error("Account not found")]
    AccountNotFound,

    #[error("Username already exists")]
    UsernameTaken,

    /// Session token missing, forged or expired
    #[error("Session not found or expired")]
    SessionInvalid,

    #[error("Session fingerprint mismatch")]
    SessionFingerprintMismatch,

    #[error("Missing required header: {0}")]
    MissingHeader(&'static str),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AccountsError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            AccountsError::Unauthenticated
            | AccountsError::InvalidCredentials
            | AccountsError::SessionInvalid
            | AccountsError::SessionFingerprintMismatch => ErrorKind::Unauthorized,
            AccountsError::Validation(_) => ErrorKind::UnprocessableEntity,
            AccountsError::AccountNotFound => ErrorKind::NotFound,
            AccountsError::UsernameTaken => ErrorKind::Conflict,
            AccountsError::MissingHeader(_) => ErrorKind::BadRequest,
            AccountsError::Database(sqlx::Error::PoolTimedOut) => ErrorKind::ServiceUnavailable,
            AccountsError::Database(_) | AccountsError::Internal(_) => {
                ErrorKind::InternalServerError
            }
        }
    }

    /// Field-keyed messages when this is a validation failure
    pub fn field_errors(&self) -> Option<&FieldErrors> {
        match self {
            AccountsError::Validation(fields) => Some(fields),
            _ => None,
        }
    }

    pub fn to_app_error(&self) -> AppError {
        match self {
            AccountsError::Validation(fields) => fields
                .messages()
                .into_iter()
                .fold(AppError::validation(fields.clone()), |err, message| {
                    err.with_notice(Notice::error(message))
                }),
            AccountsError::InvalidCredentials => AppError::unauthorized(INVALID_CREDENTIALS_MESSAGE)
                .with_notice(Notice::error(INVALID_CREDENTIALS_MESSAGE)),
            // Store details stay in the logs.
            AccountsError::Database(_) | AccountsError::Internal(_) => {
                AppError::new(self.kind(), "Internal server error")
            }
            _ => AppError::new(self.kind(), self.to_string()),
        }
    }

    /// Log the error with appropriate level
    pub(crate) fn log(&self) {
        match self {
            AccountsError::Database(e) => {
                tracing::error!(error = %e, "Accounts database error");
            }
            AccountsError::Internal(msg) => {
                tracing::error!(error = %msg, "Accounts internal error");
            }
            AccountsError::InvalidCredentials => {
                tracing::warn!("Invalid login attempt");
            }
            AccountsError::SessionFingerprintMismatch => {
                tracing::warn!("Session fingerprint mismatch detected");
            }
            _ => {
                tracing::debug!(error = %self, "Accounts error");
            }
        }
    }
}

impl IntoResponse for AccountsError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

impl From<FieldErrors> for AccountsError {
    fn from(fields: FieldErrors) -> Self {
        AccountsError::Validation(fields)
    }
}

impl From<platform::password::PasswordHashError> for AccountsError {
    fn from(err: platform::password::PasswordHashError) -> Self {
        AccountsError::Internal(err.to_string())
    }
}

impl From<platform::client::FingerprintError> for AccountsError {
    fn from(err: platform::client::FingerprintError) -> Self {
        match err {
            platform::client::FingerprintError::MissingHeader(header) => {
                AccountsError::MissingHeader(header)
            }
        }
    }
}
