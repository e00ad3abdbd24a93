//! Generic data-table component.
//!
//! A table is described by a list of [`Column`]s and filled from any
//! serializable row type: each cell is looked up by the column's `data_key`
//! in the row's JSON form. [`DataTable::compose`] bundles the header, the
//! rendered rows and the pagination control into one view model which the
//! shared `datatable/table.html` partial renders for every list view.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::datatable::{
    DEFAULT_SORT_FIELD, PAGE_LENGTH_OPTIONS, PaginationPayload, ResponseDataTable,
};
use crate::domain::types::SortDirection;
use crate::pagination::Paginated;

/// Column of a data table.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct Column {
    pub label: String,
    /// Member of the row used for the cell value (and as sort field).
    pub data_key: String,
    pub class_name: String,
    /// Renders the edit/delete buttons instead of a value.
    pub is_button: bool,
    pub sortable: bool,
}

impl Column {
    pub fn new(label: impl Into<String>, data_key: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            data_key: data_key.into(),
            class_name: String::new(),
            is_button: false,
            sortable: false,
        }
    }

    /// Column holding the row action buttons.
    pub fn actions(label: impl Into<String>) -> Self {
        Self {
            is_button: true,
            ..Self::new(label, "id")
        }
    }

    pub fn class_name(mut self, class_name: impl Into<String>) -> Self {
        self.class_name = class_name.into();
        self
    }

    pub fn sortable(mut self) -> Self {
        self.sortable = !self.is_button;
        self
    }
}

/// Normalized navigation state of a list view: page, size, search and order.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct TableState {
    pub page: usize,
    pub length: usize,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub search: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub search_col: String,
    pub field: String,
    pub sort: SortDirection,
}

impl TableState {
    pub fn new(page: usize, length: usize) -> Self {
        Self {
            page: page.max(1),
            length,
            search: String::new(),
            search_col: String::new(),
            field: DEFAULT_SORT_FIELD.to_string(),
            sort: SortDirection::Desc,
        }
    }

    /// Request payload for the list endpoint.
    pub fn to_payload(&self) -> PaginationPayload {
        PaginationPayload::for_page(self.page, self.length)
            .order_by(self.field.clone(), self.sort)
            .search(self.search.clone(), self.search_col.clone())
    }

    /// Link to `list_url` showing this state.
    pub fn href(&self, list_url: &str) -> String {
        match serde_html_form::to_string(self) {
            Ok(query) if !query.is_empty() => format!("{list_url}?{query}"),
            Ok(_) => list_url.to_string(),
            Err(err) => {
                log::error!("Failed to encode table state: {err}");
                list_url.to_string()
            }
        }
    }

    pub fn with_page(&self, page: usize) -> Self {
        Self {
            page: page.max(1),
            ..self.clone()
        }
    }

    pub fn with_length(&self, length: usize) -> Self {
        Self {
            page: 1,
            length,
            ..self.clone()
        }
    }

    /// State ordered by `field`, toggling the direction when already ordered
    /// by it.
    pub fn sorted_by(&self, field: &str) -> Self {
        let sort = if self.field == field {
            self.sort.toggled()
        } else {
            SortDirection::Asc
        };
        Self {
            page: 1,
            field: field.to_string(),
            sort,
            ..self.clone()
        }
    }
}

#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct HeaderCell {
    pub label: String,
    pub sort_href: Option<String>,
    /// Current direction when the table is ordered by this column.
    pub sorted: Option<SortDirection>,
}

#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct Cell {
    pub value: String,
    pub class_name: String,
    pub is_button: bool,
}

#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct TableRow {
    pub id: String,
    pub cells: Vec<Cell>,
    pub edit_href: Option<String>,
    pub delete_href: Option<String>,
}

#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct PageLink {
    pub number: usize,
    pub href: String,
    pub current: bool,
}

#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct LengthOption {
    pub value: usize,
    pub href: String,
    pub selected: bool,
}

/// Pagination control shown in the table footer.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct TablePagination {
    pub from: usize,
    pub to: usize,
    pub total_records: usize,
    pub pages: Vec<PageLink>,
    pub prev_href: Option<String>,
    pub next_href: Option<String>,
    pub lengths: Vec<LengthOption>,
}

/// View model of a complete table.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct DataTable {
    pub column_count: usize,
    pub header: Vec<HeaderCell>,
    pub rows: Vec<TableRow>,
    pub pagination: TablePagination,
}

/// Text shown for a JSON member.
fn cell_text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(text)) => text.clone(),
        Some(other) => other.to_string(),
    }
}

/// Header cells for `columns` under the given state.
pub fn render_header(columns: &[Column], state: &TableState, list_url: &str) -> Vec<HeaderCell> {
    columns
        .iter()
        .map(|column| HeaderCell {
            label: column.label.clone(),
            sort_href: column
                .sortable
                .then(|| state.sorted_by(&column.data_key).href(list_url)),
            sorted: (column.sortable && state.field == column.data_key).then_some(state.sort),
        })
        .collect()
}

/// Renders one record into a table row.
pub fn render_row<T: Serialize>(
    base_url: &str,
    columns: &[Column],
    record: &T,
) -> Result<TableRow, serde_json::Error> {
    let value = serde_json::to_value(record)?;
    let id = cell_text(value.get("id"));

    let cells = columns
        .iter()
        .map(|column| Cell {
            value: if column.is_button {
                String::new()
            } else {
                cell_text(value.get(&column.data_key))
            },
            class_name: column.class_name.clone(),
            is_button: column.is_button,
        })
        .collect();

    let (edit_href, delete_href) = if id.is_empty() {
        (None, None)
    } else {
        (
            Some(format!("{base_url}/edit/{id}")),
            Some(format!("{base_url}/delete/{id}")),
        )
    };

    Ok(TableRow {
        id,
        cells,
        edit_href,
        delete_href,
    })
}

/// Footer control for a page of results.
pub fn render_pagination<T>(
    paginated: &Paginated<T>,
    state: &TableState,
    list_url: &str,
) -> TablePagination {
    let pages = paginated
        .pages
        .iter()
        .map(|&number| PageLink {
            number,
            href: state.with_page(number).href(list_url),
            current: number == paginated.page,
        })
        .collect();

    let lengths = PAGE_LENGTH_OPTIONS
        .iter()
        .map(|&value| LengthOption {
            value,
            href: state.with_length(value).href(list_url),
            selected: value == paginated.length,
        })
        .collect();

    TablePagination {
        from: paginated.from,
        to: paginated.to,
        total_records: paginated.total_records,
        pages,
        prev_href: paginated
            .prev_page
            .map(|page| state.with_page(page).href(list_url)),
        next_href: paginated
            .next_page
            .map(|page| state.with_page(page).href(list_url)),
        lengths,
    }
}

impl DataTable {
    /// Composes header, rows and pagination for one page of `envelope`.
    ///
    /// `base_url` prefixes the row action links, `list_url` is the list view
    /// the navigation links point back to.
    pub fn compose<T: Serialize>(
        base_url: &str,
        list_url: &str,
        columns: &[Column],
        envelope: ResponseDataTable<T>,
        state: &TableState,
    ) -> Result<Self, serde_json::Error> {
        let page = if envelope.page > 0 {
            envelope.page
        } else {
            state.page
        };
        let length = if envelope.length > 0 {
            envelope.length
        } else {
            state.length
        };
        let state = TableState {
            page,
            length,
            ..state.clone()
        };

        let rows = envelope
            .data
            .iter()
            .map(|record| render_row(base_url, columns, record))
            .collect::<Result<Vec<_>, _>>()?;

        let paginated = Paginated::new(rows, page, length, envelope.total_records);
        let pagination = render_pagination(&paginated, &state, list_url);

        Ok(Self {
            column_count: columns.len(),
            header: render_header(columns, &state, list_url),
            rows: paginated.items,
            pagination,
        })
    }
}
