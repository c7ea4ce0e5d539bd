//! Explicit view state and the single derivation the page renders from
use std::num::NonZeroUsize;

use serde::{Deserialize, Serialize};

use super::filter::filter_records;
use super::pagination::{PAGE_SIZE, PageLabel, page_labels, page_slice, total_pages};
use super::types::{FilterSelection, SatelliteRecord};

/// Snapshot of everything the user can change on the search page.
///
/// Transitions return a new snapshot. Changing the filters or the search
/// term keeps `current_page` as it is, so a narrowed result set can leave
/// the user on a page past the end.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewState {
    pub filters: FilterSelection,
    pub search: String,
    pub current_page: NonZeroUsize,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            filters: FilterSelection::default(),
            search: String::new(),
            current_page: NonZeroUsize::MIN,
        }
    }
}

impl ViewState {
    pub fn with_filters(&self, filters: FilterSelection) -> Self {
        Self {
            filters,
            ..self.clone()
        }
    }

    pub fn with_search(&self, search: impl Into<String>) -> Self {
        Self {
            search: search.into(),
            ..self.clone()
        }
    }

    pub fn with_page(&self, page: NonZeroUsize) -> Self {
        Self {
            current_page: page,
            ..self.clone()
        }
    }

    /// Step back one page; `None` on page 1
    pub fn previous_page(&self) -> Option<Self> {
        let page = NonZeroUsize::new(self.current_page.get() - 1)?;
        Some(self.with_page(page))
    }

    /// Step forward one page; `None` when already on page `total_pages`
    pub fn next_page(&self, total_pages: usize) -> Option<Self> {
        if self.current_page.get() == total_pages {
            return None;
        }
        Some(self.with_page(self.current_page.saturating_add(1)))
    }
}

/// Everything needed to render one state of the search page
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct View<'a> {
    pub current_page: usize,
    pub total_results: usize,
    pub total_pages: usize,
    pub records: Vec<&'a SatelliteRecord>,
    pub page_labels: Vec<PageLabel>,
    pub has_previous: bool,
    pub has_next: bool,
}

impl View<'_> {
    /// True when the filtered collection is empty ("No satellites found.")
    pub fn is_empty(&self) -> bool {
        self.total_results == 0
    }
}

/// Filter, paginate and label `records` for `state`.
pub fn derive_view<'a>(records: &'a [SatelliteRecord], state: &ViewState) -> View<'a> {
    let filtered = filter_records(records, &state.filters, &state.search);
    let current_page = state.current_page.get();
    let total_pages = total_pages(filtered.len(), PAGE_SIZE);

    View {
        current_page,
        total_results: filtered.len(),
        total_pages,
        records: page_slice(&filtered, current_page, PAGE_SIZE).to_vec(),
        page_labels: page_labels(total_pages, current_page),
        has_previous: state.previous_page().is_some(),
        has_next: state.next_page(total_pages).is_some(),
    }
}
