use axum::{extract::State, Json};
use crate::api::AppState;
use crate::api::models::CreateScanRequest;
use crate::errors::ProspectorError;
use crate::harvester::ScanSummary;
use crate::places::NearbySearch;

/// Run a scan to completion and report what it stored.
pub async fn create_scan(
    State(state): State<AppState>,
    Json(req): Json<CreateScanRequest>,
) -> Result<Json<ScanSummary>, ProspectorError> {
    let search = NearbySearch {
        latitude: req.latitude,
        longitude: req.longitude,
        radius_meters: req.radius,
        keyword: req.keyword.trim().to_string(),
    };
    state.run_scan(&search).await.map(Json)
}
