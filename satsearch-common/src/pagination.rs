//! Client-side pagination and page-number labels
use serde::{Serialize, Serializer};

/// Number of records shown per page
pub const PAGE_SIZE: usize = 20;

/// Pages shown on each side of the current page
const PAGE_WINDOW: i128 = 2;

/// One entry of the pagination strip
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageLabel {
    Page(usize),
    Ellipsis,
}

impl PageLabel {
    pub fn is_current(&self, current_page: usize) -> bool {
        matches!(self, PageLabel::Page(n) if *n == current_page)
    }
}

impl std::fmt::Display for PageLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PageLabel::Page(n) => write!(f, "{}", n),
            PageLabel::Ellipsis => f.write_str("..."),
        }
    }
}

impl Serialize for PageLabel {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            PageLabel::Page(n) => serializer.serialize_u64(*n as u64),
            PageLabel::Ellipsis => serializer.serialize_str("..."),
        }
    }
}

/// Number of pages needed for `len` records; 0 when there are none
pub fn total_pages(len: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    len.div_ceil(page_size)
}

/// Records of 1-based `page`, i.e. `[(page-1)*size, min(page*size, len))`.
///
/// A page past the end yields an empty slice.
pub fn page_slice<T>(items: &[T], page: usize, page_size: usize) -> &[T] {
    if page == 0 {
        return &[];
    }

    let start = (page - 1).saturating_mul(page_size);
    if start >= items.len() {
        return &[];
    }
    let end = page.saturating_mul(page_size).min(items.len());

    &items[start..end]
}

/// Build the pagination strip for `current_page` out of `total_pages`.
///
/// Layout: `1`, an optional ellipsis, the pages within two of the current
/// page (limited to `2..=total_pages-1`), an optional ellipsis, `total_pages`.
/// The two anchors are always emitted, so tiny totals repeat or invert them:
/// `total_pages == 1` gives `[1, 1]` and `total_pages == 0` gives `[1, 0]`.
pub fn page_labels(total_pages: usize, current_page: usize) -> Vec<PageLabel> {
    // Wide enough that `current + PAGE_WINDOW` and `total - 1` never wrap
    let total = total_pages as i128;
    let current = current_page as i128;

    let first = (current - PAGE_WINDOW).max(2);
    let last = (current + PAGE_WINDOW).min(total - 1);

    let mut labels = vec![PageLabel::Page(1)];

    if current - PAGE_WINDOW > 2 {
        labels.push(PageLabel::Ellipsis);
    }

    labels.extend((first..=last).map(|page| PageLabel::Page(page as usize)));

    if current + PAGE_WINDOW < total - 1 {
        labels.push(PageLabel::Ellipsis);
    }

    labels.push(PageLabel::Page(total_pages));
    labels
}
