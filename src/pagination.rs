//! Page arithmetic shared by the list views.

use serde::Serialize;

/// Number of page links shown around the current page.
const WINDOW_SIZE: usize = 5;

/// Number of pages needed to show `total_records` rows, `length` at a time.
pub fn total_pages(total_records: usize, length: usize) -> usize {
    if length == 0 {
        return 0;
    }
    total_records.div_ceil(length)
}

/// Up to five page numbers centred on `current_page`, shifted to stay within
/// `1..=total_pages`.
pub fn page_window(current_page: usize, total_pages: usize) -> Vec<usize> {
    if total_pages == 0 {
        return vec![];
    }

    let half = WINDOW_SIZE / 2;
    let mut start = current_page.saturating_sub(half);
    let mut end = current_page.saturating_add(half);

    if start == 0 {
        start = 1;
        end = WINDOW_SIZE;
    }

    if end >= total_pages {
        start = total_pages.saturating_sub(WINDOW_SIZE - 1).max(1);
        end = total_pages;
    }

    (start..=end).collect()
}

/// One-based bounds of the rows shown on `page`, for "Showing X to Y of Z".
pub fn display_range(
    page: usize,
    length: usize,
    rows_on_page: usize,
    total_records: usize,
) -> (usize, usize) {
    if rows_on_page == 0 {
        return (0, 0);
    }
    // The API may return more rows than its reported total; the range then
    // covers the rows actually shown instead of underflowing.
    let to = length
        .saturating_mul(page.max(1))
        .min(total_records)
        .max(rows_on_page);
    (to - rows_on_page + 1, to)
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Paginated<T> {
    pub items: Vec<T>,
    /// Page numbers of the window around the current page.
    pub pages: Vec<usize>,
    pub page: usize,
    pub length: usize,
    pub total_pages: usize,
    pub total_records: usize,
    /// First row shown, one-based.
    pub from: usize,
    /// Last row shown, one-based.
    pub to: usize,
    pub prev_page: Option<usize>,
    pub next_page: Option<usize>,
}

impl<T> Paginated<T> {
    pub fn new(items: Vec<T>, current_page: usize, length: usize, total_records: usize) -> Self {
        let current_page = if current_page == 0 { 1 } else { current_page };
        let total_pages = total_pages(total_records, length);
        let pages = page_window(current_page, total_pages);
        let (from, to) = display_range(current_page, length, items.len(), total_records);

        let prev_page =
            (current_page > 1).then(|| (current_page - 1).min(total_pages.max(1)));
        let next_page = (current_page < total_pages).then_some(current_page + 1);

        Self {
            items,
            pages,
            page: current_page,
            length,
            total_pages,
            total_records,
            from,
            to,
            prev_page,
            next_page,
        }
    }
}
