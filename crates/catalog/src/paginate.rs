use serde::Serialize;

use crate::product::Product;

/// Products per catalog page.
pub const DEFAULT_PAGE_SIZE: usize = 9;

/// The `page_index`-th page (0-based) of `items`.
///
/// Out-of-range pages, and a zero page size, give an empty slice.
pub fn paginate<T>(items: &[T], page_size: usize, page_index: usize) -> &[T] {
    let Some(start) = page_index.checked_mul(page_size) else {
        return &[];
    };
    if page_size == 0 || start >= items.len() {
        return &[];
    }
    let end = start.saturating_add(page_size).min(items.len());
    &items[start..end]
}

pub fn page_count(len: usize, page_size: usize) -> usize {
    if page_size == 0 {
        0
    } else {
        len.div_ceil(page_size)
    }
}

/// One page of the filtered, sorted catalog.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginatedView {
    pub items: Vec<Product>,
    /// Products matching the filters, across all pages.
    pub total_count: usize,
    pub page_index: usize,
}
