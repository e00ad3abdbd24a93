//! Services behind the candidate list, form and delete dialog.

use crate::datatable::{Column, DataTable, TableState};
use crate::domain::datatable::{DEFAULT_SORT_FIELD, PAGE_LENGTH_OPTIONS};
use crate::domain::types::{CandidateId, SortDirection};
use crate::dto::candidates::{
    CandidateFormPageData, DeleteConfirmationData, DeleteOutcome, IndexPageData, IndexQuery,
    SaveOutcome, SearchColumnOption,
};
use crate::forms::candidate::{
    CandidateForm, CandidatePayload, DeleteCandidateForm, safe_return_path,
};
use crate::repository::errors::FieldErrors;
use crate::repository::{CandidateReader, CandidateWriter};
use crate::services::{ServiceError, ServiceResult};

/// Prefix of the candidate pages; row actions link below it.
pub const CANDIDATE_BASE_URL: &str = "/candidate";

/// Location of the candidate list.
pub const LIST_URL: &str = "/";

/// Columns the list can be searched by, with their labels.
pub const SEARCH_COLUMNS: [(&str, &str); 3] = [
    ("full_name", "Name"),
    ("email", "Email"),
    ("phone_number", "Phone Number"),
];

const SORT_FIELDS: [&str; 4] = ["full_name", "email", "phone_number", DEFAULT_SORT_FIELD];

/// Columns of the candidate list.
pub fn candidate_columns() -> Vec<Column> {
    vec![
        Column::new("Name", "full_name")
            .class_name("text-gray-900")
            .sortable(),
        Column::new("Email", "email")
            .class_name("text-gray-500")
            .sortable(),
        Column::new("Phone", "phone_number")
            .class_name("text-gray-500")
            .sortable(),
        Column::actions("Action").class_name("text-gray-500"),
    ]
}

/// Normalizes the list query, replacing unsupported values with defaults.
pub fn table_state(query: IndexQuery, default_length: usize) -> TableState {
    let length = query
        .length
        .filter(|length| PAGE_LENGTH_OPTIONS.contains(length))
        .unwrap_or(default_length);

    // Keeps the row offset `(page - 1) * length` representable.
    let max_page = usize::MAX / length.max(1);
    let mut state = TableState::new(query.page.unwrap_or(1).min(max_page), length);

    if let Some(search) = query
        .search
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
    {
        state.search = search;
    }

    if let Some(column) = query
        .search_col
        .filter(|c| SEARCH_COLUMNS.iter().any(|(value, _)| *value == c.as_str()))
    {
        state.search_col = column;
    }

    if let Some(field) = query.field.filter(|f| SORT_FIELDS.contains(&f.as_str())) {
        state.field = field;
        state.sort = query
            .sort
            .as_deref()
            .map(SortDirection::from)
            .unwrap_or_default();
    }

    state
}

fn parse_id(id: &str) -> ServiceResult<CandidateId> {
    CandidateId::new(id).map_err(|_| ServiceError::NotFound)
}

/// Loads one page of candidates for the list view.
pub async fn load_index_page<R>(
    repo: &R,
    query: IndexQuery,
    default_length: usize,
) -> ServiceResult<IndexPageData>
where
    R: CandidateReader + ?Sized,
{
    let state = table_state(query, default_length);

    let envelope = repo
        .list_candidates(&state.to_payload())
        .await
        .map_err(|err| {
            log::error!("Failed to list candidates: {err}");
            err
        })?;

    let table = DataTable::compose(
        CANDIDATE_BASE_URL,
        LIST_URL,
        &candidate_columns(),
        envelope,
        &state,
    )
    .map_err(|err| ServiceError::Internal(err.to_string()))?;

    let search_columns = SEARCH_COLUMNS
        .iter()
        .map(|&(value, label)| SearchColumnOption {
            value,
            label,
            selected: state.search_col == value,
        })
        .collect();

    Ok(IndexPageData {
        table,
        search: (!state.search.is_empty()).then(|| state.search.clone()),
        search_columns,
        length: state.length,
        field: state.field.clone(),
        sort: state.sort,
        current_url: state.href(LIST_URL),
    })
}

/// Loads the form: empty for a new candidate, pre-filled when `id` is given.
pub async fn load_candidate_form<R>(
    repo: &R,
    id: Option<&str>,
) -> ServiceResult<CandidateFormPageData>
where
    R: CandidateReader + ?Sized,
{
    let form = match id {
        None => CandidateForm::default(),
        Some(id) => {
            let id = parse_id(id)?;
            let candidate = repo
                .get_candidate(&id)
                .await
                .map_err(|err| {
                    log::error!("Failed to load candidate {id}: {err}");
                    err
                })?
                .ok_or(ServiceError::NotFound)?;
            CandidateForm::from(candidate)
        }
    };

    Ok(CandidateFormPageData::new(form, FieldErrors::new()))
}

/// Creates the candidate when the form has no id, updates it otherwise.
pub async fn save_candidate<R>(repo: &R, form: CandidateForm) -> ServiceResult<SaveOutcome>
where
    R: CandidateWriter + ?Sized,
{
    let payload = CandidatePayload::try_from(form)?;

    let (response, fallback) = match &payload {
        CandidatePayload::Create(new_candidate) => (
            repo.create_candidate(new_candidate).await,
            new_candidate,
        ),
        CandidatePayload::Update(update) => {
            (repo.update_candidate(update).await, &update.fields)
        }
    };

    let response = response.map_err(|err| {
        log::error!("Failed to save candidate: {err}");
        err
    })?;

    let (full_name, email) = match response.data {
        Some(candidate) => (candidate.full_name, candidate.email),
        None => (fallback.full_name.clone(), fallback.email.clone()),
    };

    Ok(SaveOutcome {
        message: response.message,
        full_name,
        email,
    })
}

/// Loads the record named in the delete confirmation dialog.
pub async fn load_delete_confirmation<R>(
    repo: &R,
    id: &str,
    return_to: Option<&str>,
) -> ServiceResult<DeleteConfirmationData>
where
    R: CandidateReader + ?Sized,
{
    let id = parse_id(id)?;

    let candidate = repo
        .get_candidate(&id)
        .await
        .map_err(|err| {
            log::error!("Failed to load candidate {id}: {err}");
            err
        })?
        .ok_or(ServiceError::NotFound)?;

    Ok(DeleteConfirmationData {
        id,
        name: candidate.full_name,
        return_to: safe_return_path(return_to),
    })
}

/// Deletes the candidate once the dialog was confirmed.
pub async fn delete_candidate<R>(
    repo: &R,
    id: &str,
    form: &DeleteCandidateForm,
) -> ServiceResult<DeleteOutcome>
where
    R: CandidateWriter + ?Sized,
{
    if !form.is_confirmed() {
        return Ok(DeleteOutcome::Cancelled);
    }

    let id = parse_id(id)?;

    let response = repo.delete_candidate(&id).await.map_err(|err| {
        log::error!("Failed to delete candidate {id}: {err}");
        err
    })?;

    Ok(DeleteOutcome::Deleted {
        message: response.message,
    })
}
