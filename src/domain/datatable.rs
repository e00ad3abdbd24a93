//! Paginated list envelope exchanged with the remote API.

use serde::{Deserialize, Deserializer, Serialize};

use crate::domain::types::SortDirection;

/// Default ordering column of list requests.
pub const DEFAULT_SORT_FIELD: &str = "created_at";

/// Page sizes offered by the list views.
pub const PAGE_LENGTH_OPTIONS: [usize; 6] = [3, 10, 20, 30, 50, 100];

/// Envelope of a paginated list response.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ResponseDataTable<T> {
    #[serde(default)]
    pub page: usize,
    #[serde(default)]
    pub length: usize,
    #[serde(default)]
    pub total_records: usize,
    #[serde(default)]
    pub total_display_records: usize,
    #[serde(default, deserialize_with = "crate::domain::types::scalar_or_empty")]
    pub search_keyword: String,
    #[serde(default, deserialize_with = "crate::domain::types::scalar_or_empty")]
    pub search_column: String,
    #[serde(
        default = "Vec::new",
        deserialize_with = "rows_or_empty",
        bound(deserialize = "T: Deserialize<'de>")
    )]
    pub data: Vec<T>,
}

impl<T> Default for ResponseDataTable<T> {
    fn default() -> Self {
        Self {
            page: 0,
            length: 0,
            total_records: 0,
            total_display_records: 0,
            search_keyword: String::new(),
            search_column: String::new(),
            data: Vec::new(),
        }
    }
}

/// Deserializes a row list, mapping `null` to an empty list.
fn rows_or_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Query parameters of a list request.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PaginationPayload {
    /// Offset of the first row.
    pub start: usize,
    /// Number of rows per page.
    pub length: usize,
    /// Column used for ordering.
    pub field: String,
    pub sort: SortDirection,
    pub search: String,
    #[serde(rename = "searchCol")]
    pub search_col: String,
}

impl PaginationPayload {
    /// Builds the payload for a one-based `page` of `length` rows.
    pub fn for_page(page: usize, length: usize) -> Self {
        let page = page.max(1);
        Self {
            start: (page - 1).saturating_mul(length),
            length,
            field: DEFAULT_SORT_FIELD.to_string(),
            sort: SortDirection::Desc,
            search: String::new(),
            search_col: String::new(),
        }
    }

    pub fn order_by(mut self, field: impl Into<String>, sort: SortDirection) -> Self {
        self.field = field.into();
        self.sort = sort;
        self
    }

    pub fn search(mut self, search: impl Into<String>, column: impl Into<String>) -> Self {
        self.search = search.into();
        self.search_col = column.into();
        self
    }
}
