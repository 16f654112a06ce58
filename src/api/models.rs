use serde::Deserialize;

#[derive(Deserialize)]
pub struct LeadsQuery {
    pub status: Option<String>,
    pub category: Option<String>,
}

#[derive(Deserialize)]
pub struct UpdateStatusRequest {
    pub status: String,
    /// Replaces the lead's notes when present.
    pub note: Option<String>,
}

#[derive(Deserialize)]
pub struct UpdateNotesRequest {
    pub note: String,
}

#[derive(Deserialize)]
pub struct CreateScanRequest {
    pub latitude: f64,
    pub longitude: f64,
    pub radius: u32,
    pub keyword: String,
}
