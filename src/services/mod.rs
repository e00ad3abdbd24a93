//! Service layer coordinating forms, the repository and the view data.

use thiserror::Error;

use crate::forms::FormError;
use crate::repository::errors::{FieldErrors, RepositoryError};

pub mod candidates;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("unauthorized")]
    Unauthorized,

    #[error("not found")]
    NotFound,

    /// Field-level validation failure, displayed next to the inputs.
    #[error("validation failed: {message}")]
    Validation {
        message: String,
        errors: FieldErrors,
    },

    #[error("form error: {0}")]
    Form(String),

    #[error("internal error: {0}")]
    Internal(String),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

impl From<RepositoryError> for ServiceError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::Unauthorized => ServiceError::Unauthorized,
            RepositoryError::NotFound => ServiceError::NotFound,
            RepositoryError::Validation { message, errors } => {
                ServiceError::Validation { message, errors }
            }
            other => ServiceError::Internal(other.to_string()),
        }
    }
}

impl From<FormError> for ServiceError {
    fn from(err: FormError) -> Self {
        match err {
            FormError::Fields(errors) => ServiceError::Validation {
                message: "Please correct the highlighted fields.".to_string(),
                errors,
            },
            other => ServiceError::Form(other.to_string()),
        }
    }
}
