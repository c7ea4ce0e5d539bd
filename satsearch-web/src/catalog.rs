//! Startup loader for the satellite collection
//!
//! The collection is fetched exactly once. Until that request settles the
//! catalog reports itself as loading; afterwards it holds an immutable
//! snapshot, empty when the fetch failed.
use std::sync::Arc;

use satsearch_common::SatelliteRecord;
use thiserror::Error;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Catalog endpoint returned HTTP {0}")]
    Status(reqwest::StatusCode),

    #[error("Catalog payload is not a JSON array")]
    NotAnArray,

    #[error("Malformed satellite record: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Fetch and decode the full collection from `url`
pub async fn fetch_catalog(
    client: &reqwest::Client,
    url: &str,
) -> Result<Vec<SatelliteRecord>, LoadError> {
    let response = client.get(url).send().await?;

    if !response.status().is_success() {
        return Err(LoadError::Status(response.status()));
    }

    let payload: serde_json::Value = response.json().await?;
    if !payload.is_array() {
        return Err(LoadError::NotAnArray);
    }

    Ok(serde_json::from_value(payload)?)
}

#[derive(Debug, Clone)]
pub enum CatalogState {
    Loading,
    Ready(Arc<Vec<SatelliteRecord>>),
}

/// Shared holder of the loaded collection
#[derive(Debug)]
pub struct Catalog {
    state: RwLock<CatalogState>,
}

impl Catalog {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            state: RwLock::new(CatalogState::Loading),
        })
    }

    /// A catalog that is already loaded with `records`
    pub fn from_records(records: Vec<SatelliteRecord>) -> Arc<Self> {
        Arc::new(Self {
            state: RwLock::new(CatalogState::Ready(Arc::new(records))),
        })
    }

    /// The loaded collection, `None` while the startup fetch is in flight
    pub async fn snapshot(&self) -> Option<Arc<Vec<SatelliteRecord>>> {
        match &*self.state.read().await {
            CatalogState::Loading => None,
            CatalogState::Ready(records) => Some(records.clone()),
        }
    }

    pub async fn is_loading(&self) -> bool {
        matches!(*self.state.read().await, CatalogState::Loading)
    }

    /// Fetch the collection and leave the loading state.
    ///
    /// Failures are logged and resolve to an empty collection.
    pub async fn load(&self, client: &reqwest::Client, url: &str) {
        tracing::info!("Fetching satellite catalog from {}", url);

        let records = match fetch_catalog(client, url).await {
            Ok(records) => {
                tracing::info!("Loaded {} satellite records", records.len());
                records
            }
            Err(e) => {
                tracing::error!("Error fetching satellite catalog: {}", e);
                Vec::new()
            }
        };

        let mut state = self.state.write().await;
        if let CatalogState::Ready(_) = *state {
            tracing::warn!("Satellite catalog already loaded, ignoring second load");
            return;
        }
        *state = CatalogState::Ready(Arc::new(records));
    }

    /// Run [`Catalog::load`] in the background
    pub fn spawn_initial_load(self: &Arc<Self>, client: reqwest::Client, url: String) -> JoinHandle<()> {
        let catalog = self.clone();
        tokio::spawn(async move {
            catalog.load(&client, &url).await;
        })
    }
}
