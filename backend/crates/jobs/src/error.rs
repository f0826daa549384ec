//! Jobs Error Types
//!
//! Offer-specific error variants that integrate with the unified
//! `kernel::error::AppError` system.

use accounts::AccountsError;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use kernel::notice::Notice;
use kernel::validation::FieldErrors;
use thiserror::Error;

pub type JobsResult<T> = Result<T, JobsError>;

pub const FORBIDDEN_ROLE_MESSAGE: &str = "Only companies can publish job offers.";
pub const FORBIDDEN_OWNER_MESSAGE: &str = "You do not have permission to delete this offer.";

#[derive(Debug, Error)]
pub enum JobsError {
    #[error("Authentication required")]
    Unauthenticated,

    /// Caller's profile is not a company profile (or missing)
    #[error("Only companies can publish job offers.")]
    ForbiddenRole,

    /// Caller does not own the offer
    #[error("You do not have permission to delete this offer.")]
    ForbiddenOwner,

    /// Staff-only listing requested by a non-staff account
    #[error("You do not have the required permissions.")]
    AdminRequired,

    #[error("Validation failed")]
    Validation(FieldErrors),

    #[error("Offer not found")]
    NotFound,

    #[error(transparent)]
    Accounts(AccountsError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl JobsError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            JobsError::Unauthenticated => ErrorKind::Unauthorized,
            JobsError::ForbiddenRole | JobsError::ForbiddenOwner | JobsError::AdminRequired => {
                ErrorKind::Forbidden
            }
            JobsError::Validation(_) => ErrorKind::UnprocessableEntity,
            JobsError::NotFound => ErrorKind::NotFound,
            JobsError::Accounts(e) => e.kind(),
            JobsError::Database(sqlx::Error::PoolTimedOut) => ErrorKind::ServiceUnavailable,
            JobsError::Database(_) | JobsError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    pub fn field_errors(&self) -> Option<&FieldErrors> {
        match self {
            JobsError::Validation(fields) => Some(fields),
            _ => None,
        }
    }

    pub fn to_app_error(&self) -> AppError {
        match self {
            JobsError::Validation(fields) => fields
                .messages()
                .into_iter()
                .fold(AppError::validation(fields.clone()), |err, message| {
                    err.with_notice(Notice::error(message))
                }),
            JobsError::ForbiddenRole | JobsError::ForbiddenOwner => {
                AppError::forbidden(self.to_string()).with_notice(Notice::error(self.to_string()))
            }
            JobsError::Accounts(e) => e.to_app_error(),
            JobsError::Database(_) | JobsError::Internal(_) => {
                AppError::new(self.kind(), "Internal server error")
            }
            _ => AppError::new(self.kind(), self.to_string()),
        }
    }

    fn log(&self) {
        match self {
            JobsError::Database(e) => {
                tracing::error!(error = %e, "Jobs database error");
            }
            JobsError::Internal(msg) => {
                tracing::error!(error = %msg, "Jobs internal error");
            }
            JobsError::ForbiddenOwner => {
                tracing::warn!("Offer deletion by non-owner refused");
            }
            _ => {
                tracing::debug!(error = %self, "Jobs error");
            }
        }
    }
}

impl IntoResponse for JobsError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

impl From<FieldErrors> for JobsError {
    fn from(fields: FieldErrors) -> Self {
        JobsError::Validation(fields)
    }
}

impl From<AccountsError> for JobsError {
    fn from(err: AccountsError) -> Self {
        match err {
            AccountsError::Unauthenticated => JobsError::Unauthenticated,
            other => JobsError::Accounts(other),
        }
    }
}
