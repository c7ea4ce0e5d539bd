//! Shared data model and view derivation for the satellite search page.
//!
//! Everything in this crate is synchronous and free of I/O: the web crate
//! hands it the loaded collection plus a [`ViewState`] snapshot and renders
//! whatever [`derive_view`] returns.

pub mod filter;
pub mod pagination;
pub mod types;
pub mod view;

pub use filter::{filter_records, matches_filters, matches_search};
pub use pagination::{PAGE_SIZE, PageLabel, page_labels, page_slice, total_pages};
pub use types::*;
pub use view::{View, ViewState, derive_view};
