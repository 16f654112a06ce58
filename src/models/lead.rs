use serde::{Deserialize, Serialize};
use super::status::LeadStatus;

/// A business candidate discovered by a scan and tracked through the sales pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lead {
    pub place_id: String,
    pub name: String,
    pub address: String,
    pub phone: Option<String>,
    pub rating: f64,
    pub latitude: f64,
    pub longitude: f64,
    pub status: LeadStatus,
    /// Search category that most recently discovered this lead.
    pub source_keyword: String,
    pub notes: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

/// Fields written by a scan. Status and notes are owned by people, never by scans.
#[derive(Debug, Clone, PartialEq)]
pub struct ScannedLead {
    pub place_id: String,
    pub name: String,
    pub address: String,
    pub phone: Option<String>,
    pub rating: f64,
    pub latitude: f64,
    pub longitude: f64,
    pub source_keyword: String,
}

/// Keep only leads discovered under `category`. Blank or "All" keeps everything.
pub fn filter_by_category(leads: Vec<Lead>, category: Option<&str>) -> Vec<Lead> {
    match category.map(str::trim) {
        None | Some("") => leads,
        Some(c) if c.eq_ignore_ascii_case("all") => leads,
        Some(c) => leads.into_iter().filter(|l| l.source_keyword == c).collect(),
    }
}
