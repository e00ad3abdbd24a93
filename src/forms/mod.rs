//! Form definitions backing the candidate routes.

use thiserror::Error;
use validator::ValidationErrors;

use crate::repository::errors::FieldErrors;

pub mod candidate;

#[derive(Debug, Error)]
/// Errors that can occur when processing form data.
pub enum FormError {
    #[error("validation errors: {0:?}")]
    Fields(FieldErrors),

    #[error("invalid candidate id")]
    InvalidCandidateId,
}

/// Flattens validator output into the field to messages map used for inline
/// errors.
pub fn field_errors(errors: &ValidationErrors) -> FieldErrors {
    errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errors)| {
            errors.iter().map(move |error| {
                let message = error
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("The {field} field is invalid."));
                (field.to_string(), message)
            })
        })
        .collect()
}
