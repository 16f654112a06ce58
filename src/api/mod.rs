pub mod errors;
pub mod models;
pub mod routes;

use std::sync::Arc;
use axum::routing::{get, post, put};
use axum::Router;
use tokio::sync::Mutex;
use tower_http::trace::TraceLayer;
use crate::config::{DashboardConfig, ProspectorConfig};
use crate::db::Database;
use crate::errors::ProspectorError;
use crate::harvester::{Harvester, ScanSummary};
use crate::places::{GooglePlacesClient, NearbySearch};
use tracing::{info, warn};

#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    /// Absent when no Places API key is configured; scanning is then disabled.
    pub harvester: Option<Arc<Harvester>>,
    pub dashboard: Arc<DashboardConfig>,
    /// Held for the duration of a scan. Scans never overlap.
    pub scan_lock: Arc<Mutex<()>>,
}

impl AppState {
    pub fn new(db: Database, harvester: Option<Harvester>, dashboard: DashboardConfig) -> Self {
        Self {
            db,
            harvester: harvester.map(Arc::new),
            dashboard: Arc::new(dashboard),
            scan_lock: Arc::new(Mutex::new(())),
        }
    }

    /// Run one scan, refusing to start while another is in progress.
    pub async fn run_scan(&self, search: &NearbySearch) -> Result<ScanSummary, ProspectorError> {
        let harvester = self.harvester.as_ref().ok_or_else(|| {
            ProspectorError::Config("Scanning is disabled: no Places API key configured".into())
        })?;

        let _guard = self.scan_lock
            .try_lock()
            .map_err(|_| ProspectorError::Conflict("A scan is already running".into()))?;

        harvester.scan(search).await
    }
}

pub async fn create_app_state(config: &ProspectorConfig) -> Result<AppState, ProspectorError> {
    let db = Database::new(&config.database.path)?;
    info!(path = %config.database.path, "Opened lead store");

    let harvester = match config.places.resolve_api_key() {
        Ok(key) => {
            let client = GooglePlacesClient::new(&key, config.places.base_url.as_deref(), config.places.timeout())?;
            Some(Harvester::new(db.clone(), Arc::new(client), &config.places))
        }
        Err(e) => {
            warn!(error = %e, "Scanning disabled");
            None
        }
    };

    Ok(AppState::new(db, harvester, config.dashboard.clone()))
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(routes::dashboard::show))
        .route("/scan", post(routes::dashboard::scan))
        .route("/leads/{place_id}/status", post(routes::dashboard::update_status))
        .route("/leads/{place_id}/note", post(routes::dashboard::save_note))
        .route("/assets/logo", get(routes::dashboard::logo))
        .route("/api/health", get(routes::health::health_check))
        .route("/api/categories", get(routes::leads::list_categories))
        .route("/api/leads", get(routes::leads::list_leads))
        .route("/api/leads/{place_id}", get(routes::leads::get_lead))
        .route("/api/leads/{place_id}/status", put(routes::leads::update_status))
        .route("/api/leads/{place_id}/notes", put(routes::leads::update_notes))
        .route("/api/scans", post(routes::scans::create_scan))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
