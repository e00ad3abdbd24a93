//! DTOs shaped for the candidate templates.

use serde::{Deserialize, Serialize};

use crate::datatable::DataTable;
use crate::domain::types::{CandidateId, Gender, SortDirection};
use crate::forms::candidate::CandidateForm;
use crate::repository::errors::FieldErrors;

/// Query parameters accepted by the candidate list.
#[derive(Debug, Default, Deserialize)]
pub struct IndexQuery {
    pub page: Option<usize>,
    pub length: Option<usize>,
    /// Optional search string entered by the user.
    pub search: Option<String>,
    /// Column the search is restricted to; empty searches all of them.
    pub search_col: Option<String>,
    pub field: Option<String>,
    pub sort: Option<String>,
}

/// Option of the "search by" selector.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct SearchColumnOption {
    pub value: &'static str,
    pub label: &'static str,
    pub selected: bool,
}

/// Data required to render the candidate list.
#[derive(Debug, Serialize)]
pub struct IndexPageData {
    pub table: DataTable,
    pub search: Option<String>,
    pub search_columns: Vec<SearchColumnOption>,
    /// Page size kept when a new search is submitted.
    pub length: usize,
    /// Ordering kept when a new search is submitted.
    pub field: String,
    pub sort: SortDirection,
    /// Link back to the list as currently shown.
    pub current_url: String,
}

/// Option of the gender selector.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct GenderOption {
    pub value: &'static str,
    pub label: &'static str,
    pub selected: bool,
}

/// Data required to render the create/edit form.
#[derive(Debug, Serialize)]
pub struct CandidateFormPageData {
    pub form: CandidateForm,
    pub errors: FieldErrors,
    pub genders: Vec<GenderOption>,
    pub is_update: bool,
}

impl CandidateFormPageData {
    pub fn new(form: CandidateForm, errors: FieldErrors) -> Self {
        let is_update = form.is_update();
        let genders = Gender::ALL
            .iter()
            .map(|gender| GenderOption {
                value: gender.code(),
                label: gender.label(),
                selected: form.gender == gender.code(),
            })
            .collect();
        Self {
            form,
            errors,
            genders,
            is_update,
        }
    }
}

/// Result of a successful create or update.
#[derive(Debug, PartialEq, Eq)]
pub struct SaveOutcome {
    /// Message reported by the API.
    pub message: String,
    pub full_name: String,
    pub email: String,
}

/// Data of the delete confirmation dialog.
#[derive(Debug, Serialize)]
pub struct DeleteConfirmationData {
    pub id: CandidateId,
    pub name: String,
    pub return_to: String,
}

/// Result of a delete request.
#[derive(Debug, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted { message: String },
    Cancelled,
}
