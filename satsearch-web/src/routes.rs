use std::num::NonZeroUsize;
use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::get,
};
use serde::Deserialize;
use tower_http::trace::TraceLayer;

use satsearch_common::{FilterSelection, ViewState, derive_view};

use crate::catalog::Catalog;
use crate::error::AppError;
use crate::render::PageRenderer;

/// Query parameters of the search page; absent fields mean "All"
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SearchQuery {
    pub q: String,
    pub country: String,
    pub orbit: String,
    #[serde(rename = "objectType")]
    pub object_type: String,
    pub page: Option<String>,
}

impl SearchQuery {
    pub fn into_state(self) -> Result<ViewState, AppError> {
        let current_page = match self.page.as_deref() {
            None | Some("") => NonZeroUsize::MIN,
            Some(raw) => raw
                .parse::<NonZeroUsize>()
                .map_err(|_| AppError::InvalidPage(raw.to_string()))?,
        };

        Ok(ViewState {
            filters: FilterSelection::from_form(&self.country, &self.orbit, &self.object_type),
            search: self.q,
            current_page,
        })
    }
}

/// Shared handler state: the loaded catalog and the compiled templates
#[derive(Debug, Clone)]
pub struct AppState {
    pub catalog: Arc<Catalog>,
    pub renderer: Arc<PageRenderer>,
}

impl AppState {
    pub fn new(catalog: Arc<Catalog>) -> Result<Self, tera::Error> {
        Ok(Self {
            catalog,
            renderer: Arc::new(PageRenderer::new()?),
        })
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(search_page))
        .route("/api/view", get(api_view))
        .route("/health", get(health_check))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn search_page(
    State(app): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<Html<String>, AppError> {
    let state = query.into_state()?;

    let Some(records) = app.catalog.snapshot().await else {
        return Ok(Html(app.renderer.render_loading()?));
    };

    let view = derive_view(&records, &state);
    tracing::debug!(
        "Rendering page {}/{} ({} of {} records match)",
        view.current_page,
        view.total_pages,
        view.total_results,
        records.len()
    );

    Ok(Html(app.renderer.render_page(&state, &view)?))
}

async fn api_view(
    State(app): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<Response, AppError> {
    let state = query.into_state()?;
    let records = app.catalog.snapshot().await.ok_or(AppError::CatalogLoading)?;

    Ok(Json(derive_view(&records, &state)).into_response())
}

async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use satsearch_common::{ObjectType, SatelliteRecord};
    use tower::ServiceExt;

    fn create_test_catalog() -> Arc<Catalog> {
        let mut records = vec![
            SatelliteRecord::new("ISS (ZARYA)", "25544", ObjectType::Payload, "ISS"),
            SatelliteRecord::new("STARLINK-1007", "44713", ObjectType::Payload, "US"),
        ];
        records.extend((0..30).map(|i| {
            SatelliteRecord::new(format!("IRIDIUM 33 DEB {}", i), format!("{}", 33800 + i), ObjectType::Debris, "US")
        }));
        Catalog::from_records(records)
    }

    async fn get_body(catalog: Arc<Catalog>, uri: &str) -> (StatusCode, String) {
        let response = router(AppState::new(catalog).unwrap())
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[test]
    fn test_query_into_state() {
        let query = SearchQuery {
            q: "zarya".to_string(),
            country: "US".to_string(),
            page: Some("3".to_string()),
            ..Default::default()
        };
        let state = query.into_state().unwrap();
        assert_eq!(state.search, "zarya");
        assert_eq!(state.filters.country.as_deref(), Some("US"));
        assert_eq!(state.filters.orbit, None);
        assert_eq!(state.current_page.get(), 3);

        assert_eq!(SearchQuery::default().into_state().unwrap(), ViewState::default());
    }

    #[test]
    fn test_query_rejects_bad_page() {
        for raw in ["0", "-1", "two"] {
            let query = SearchQuery {
                page: Some(raw.to_string()),
                ..Default::default()
            };
            assert!(matches!(query.into_state(), Err(AppError::InvalidPage(_))));
        }
    }

    #[tokio::test]
    async fn test_search_page_search() {
        let (status, html) = get_body(create_test_catalog(), "/?q=ZARYA").await;
        assert_eq!(status, StatusCode::OK);
        assert!(html.contains("<td>ISS (ZARYA)</td>"));
        assert!(!html.contains("STARLINK-1007"));
    }

    #[tokio::test]
    async fn test_search_page_filters() {
        let (status, html) = get_body(create_test_catalog(), "/?country=US&objectType=DEBRIS&page=2").await;
        assert_eq!(status, StatusCode::OK);
        assert!(html.contains("<td>IRIDIUM 33 DEB 20</td>"));
        assert!(!html.contains("<td>IRIDIUM 33 DEB 19</td>"));
        assert!(!html.contains("<td>STARLINK-1007</td>"));
        assert!(html.contains("<option value=\"DEBRIS\" selected>Debris</option>"));
    }

    #[tokio::test]
    async fn test_search_page_object_type_with_space() {
        let (_, html) = get_body(create_test_catalog(), "/?objectType=ROCKET+BODY").await;
        assert!(html.contains("No satellites found."));
        assert!(html.contains("<option value=\"ROCKET BODY\" selected>Rocket Body</option>"));
    }

    #[tokio::test]
    async fn test_search_page_while_loading() {
        let (status, html) = get_body(Catalog::new(), "/").await;
        assert_eq!(status, StatusCode::OK);
        assert!(html.contains("Loading..."));
        assert!(!html.contains("No satellites found."));
    }

    #[tokio::test]
    async fn test_search_page_bad_page() {
        let (status, _) = get_body(create_test_catalog(), "/?page=0").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    // Failed startup fetch: empty list, no error surfaced
    #[tokio::test]
    async fn test_search_page_after_failed_load() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let url = format!("http://{}/satellites", listener.local_addr().unwrap());
        drop(listener);

        let catalog = Catalog::new();
        catalog.load(&reqwest::Client::new(), &url).await;

        let (status, html) = get_body(catalog, "/").await;
        assert_eq!(status, StatusCode::OK);
        assert!(html.contains("No satellites found."));
        assert!(!html.contains("<table"));
        assert!(!html.contains("Loading..."));
    }

    #[tokio::test]
    async fn test_api_view() {
        let (status, body) = get_body(create_test_catalog(), "/api/view?q=4471").await;
        assert_eq!(status, StatusCode::OK);

        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json["totalResults"], 1);
        assert_eq!(json["records"][0]["name"], "STARLINK-1007");
        assert_eq!(json["hasPrevious"], false);
    }

    #[tokio::test]
    async fn test_api_view_stale_page() {
        let (_, body) = get_body(create_test_catalog(), "/api/view?q=zarya&page=2").await;
        let json: serde_json::Value = serde_json::from_str(&body).unwrap();

        assert_eq!(json["currentPage"], 2);
        assert_eq!(json["totalPages"], 1);
        assert_eq!(json["records"], serde_json::json!([]));
    }

    #[tokio::test]
    async fn test_huge_page_number() {
        let huge = usize::MAX.to_string();

        let (status, body) = get_body(create_test_catalog(), &format!("/api/view?page={}", huge)).await;
        assert_eq!(status, StatusCode::OK);
        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json["records"], serde_json::json!([]));
        assert_eq!(json["pageLabels"], serde_json::json!([1, "...", 2]));

        let (status, html) = get_body(create_test_catalog(), &format!("/?page={}", i64::MAX)).await;
        assert_eq!(status, StatusCode::OK);
        assert!(html.contains("<table"));

        // One past usize::MAX does not parse
        let (status, _) = get_body(create_test_catalog(), "/?page=18446744073709551616").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_api_view_while_loading() {
        let (status, _) = get_body(Catalog::new(), "/api/view").await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn test_health() {
        let (status, body) = get_body(Catalog::new(), "/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "OK");
    }
}
