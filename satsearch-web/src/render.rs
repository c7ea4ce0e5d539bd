//! Server-side rendering of the search page
use satsearch_common::{
    COUNTRY_OPTIONS, ORBIT_OPTIONS, ObjectType, PageLabel, SatelliteRecord, View, ViewState,
};
use serde::Serialize;
use std::num::NonZeroUsize;
use tera::{Context, Tera};

const PAGE_TEMPLATE: &str = include_str!("../resources/index.html");
const LOADING_TEMPLATE: &str = include_str!("../resources/loading.html");

const PAGE_TEMPLATE_NAME: &str = "index.html";
const LOADING_TEMPLATE_NAME: &str = "loading.html";

#[derive(Debug, Serialize)]
struct SelectOption<'a> {
    value: &'a str,
    label: &'a str,
    selected: bool,
}

#[derive(Debug, Serialize)]
struct RecordRow<'a> {
    id: &'a str,
    name: &'a str,
    intl_des: &'a str,
    launch_date: &'a str,
    decay_date: &'a str,
    object_type: &'a str,
    country_code: &'a str,
}

impl<'a> From<&'a SatelliteRecord> for RecordRow<'a> {
    fn from(record: &'a SatelliteRecord) -> Self {
        Self {
            id: record.norad_cat_id.as_str(),
            name: &record.name,
            intl_des: &record.intl_des,
            launch_date: &record.launch_date,
            decay_date: record.decay_date.as_deref().unwrap_or(""),
            object_type: record.object_type.as_str(),
            country_code: &record.country_code,
        }
    }
}

/// One entry of the pagination strip; no `href` means disabled
#[derive(Debug, Serialize)]
struct PageItem {
    text: String,
    href: Option<String>,
    aria_label: Option<&'static str>,
    active: bool,
}

impl PageItem {
    fn link(text: impl Into<String>, href: String, active: bool) -> Self {
        Self { text: text.into(), href: Some(href), aria_label: None, active }
    }

    fn disabled(text: impl Into<String>) -> Self {
        Self { text: text.into(), href: None, aria_label: None, active: false }
    }

    fn labelled(mut self, aria_label: &'static str) -> Self {
        self.aria_label = Some(aria_label);
        self
    }
}

/// Compiled page templates, autoescaped as HTML
#[derive(Debug)]
pub struct PageRenderer {
    tera: Tera,
}

impl PageRenderer {
    pub fn new() -> Result<Self, tera::Error> {
        let mut tera = Tera::default();
        tera.add_raw_templates(vec![
            (PAGE_TEMPLATE_NAME, PAGE_TEMPLATE),
            (LOADING_TEMPLATE_NAME, LOADING_TEMPLATE),
        ])?;
        Ok(Self { tera })
    }

    pub fn render_loading(&self) -> Result<String, tera::Error> {
        self.tera.render(LOADING_TEMPLATE_NAME, &Context::new())
    }

    /// Render the full search page for one state snapshot and its derived view
    pub fn render_page(&self, state: &ViewState, view: &View) -> Result<String, tera::Error> {
        let known_types = ObjectType::KNOWN;
        let rows: Vec<RecordRow> = view.records.iter().map(|record| RecordRow::from(*record)).collect();

        let mut ctx = Context::new();
        ctx.insert("page", &state.current_page.get());
        ctx.insert("search", &state.search);
        ctx.insert(
            "country_options",
            &select_options(
                COUNTRY_OPTIONS.iter().map(|o| (o.value, o.label)),
                state.filters.country.as_deref(),
            ),
        );
        ctx.insert(
            "orbit_options",
            &select_options(
                ORBIT_OPTIONS.iter().map(|o| (o.value, o.label)),
                state.filters.orbit.as_deref(),
            ),
        );
        ctx.insert(
            "object_type_options",
            &select_options(
                known_types.iter().map(|t| (t.as_str(), t.label())),
                state.filters.object_type.as_ref().map(|t| t.as_str()),
            ),
        );
        ctx.insert("is_empty", &view.is_empty());
        ctx.insert("rows", &rows);
        ctx.insert("pagination", &pagination_items(state, view));

        self.tera.render(PAGE_TEMPLATE_NAME, &ctx)
    }
}

fn select_options<'a>(
    options: impl IntoIterator<Item = (&'a str, &'a str)>,
    selected: Option<&str>,
) -> Vec<SelectOption<'a>> {
    options
        .into_iter()
        .map(|(value, label)| SelectOption {
            value,
            label,
            selected: selected == Some(value),
        })
        .collect()
}

fn pagination_items(state: &ViewState, view: &View) -> Vec<PageItem> {
    let mut items = Vec::with_capacity(view.page_labels.len() + 2);

    items.push(match state.previous_page() {
        Some(prev) => PageItem::link("&lsaquo;", page_href(&prev), false),
        None => PageItem::disabled("&lsaquo;"),
    }.labelled("Previous"));

    for label in &view.page_labels {
        items.push(match label {
            PageLabel::Page(n) => match NonZeroUsize::new(*n) {
                Some(page) => PageItem::link(
                    n.to_string(),
                    page_href(&state.with_page(page)),
                    label.is_current(view.current_page),
                ),
                // Page 0 only shows up for an empty result set
                None => PageItem::disabled("0"),
            },
            PageLabel::Ellipsis => PageItem::disabled("..."),
        });
    }

    items.push(match state.next_page(view.total_pages) {
        Some(next) => PageItem::link("&rsaquo;", page_href(&next), false),
        None => PageItem::disabled("&rsaquo;"),
    }.labelled("Next"));

    items
}

/// Link to the search page for `state`; empty fields are left out.
///
/// Every value is percent-encoded, so the link is safe inside an attribute.
pub fn page_href(state: &ViewState) -> String {
    let mut params = Vec::new();

    if !state.search.is_empty() {
        params.push(format!("q={}", urlencoding::encode(&state.search)));
    }
    if let Some(ref country) = state.filters.country {
        params.push(format!("country={}", urlencoding::encode(country)));
    }
    if let Some(ref orbit) = state.filters.orbit {
        params.push(format!("orbit={}", urlencoding::encode(orbit)));
    }
    if let Some(ref object_type) = state.filters.object_type {
        params.push(format!("objectType={}", urlencoding::encode(object_type.as_str())));
    }
    params.push(format!("page={}", state.current_page));

    format!("/?{}", params.join("&"))
}
