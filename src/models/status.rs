use serde::{Deserialize, Serialize};
use std::str::FromStr;
use crate::errors::ProspectorError;

/// Sales pipeline stage of a lead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LeadStatus {
    /// Freshly discovered by a scan, untouched by a person.
    #[default]
    New,
    Contacted,
    Interested,
    /// Won.
    Closed,
    Ignored,
}

impl LeadStatus {
    pub const ALL: [LeadStatus; 5] = [
        LeadStatus::New,
        LeadStatus::Contacted,
        LeadStatus::Interested,
        LeadStatus::Closed,
        LeadStatus::Ignored,
    ];

    /// Statuses a person can move a lead into from the work queue.
    pub const TRANSITIONS: [LeadStatus; 4] = [
        LeadStatus::Contacted,
        LeadStatus::Interested,
        LeadStatus::Closed,
        LeadStatus::Ignored,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::New => "new",
            Self::Contacted => "contacted",
            Self::Interested => "interested",
            Self::Closed => "closed",
            Self::Ignored => "ignored",
        }
    }

    /// Title-cased label for filter dropdowns.
    pub fn label(&self) -> &'static str {
        match self {
            Self::New => "New",
            Self::Contacted => "Contacted",
            Self::Interested => "Interested",
            Self::Closed => "Closed",
            Self::Ignored => "Ignored",
        }
    }

    /// Button text for the one-click transition into this status.
    pub fn action_label(&self) -> &'static str {
        match self {
            Self::New => "Reset",
            Self::Contacted => "Contacted",
            Self::Interested => "Interested",
            Self::Closed => "Win/Close",
            Self::Ignored => "Ignore",
        }
    }
}

impl std::fmt::Display for LeadStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LeadStatus {
    type Err = ProspectorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "new" => Ok(Self::New),
            "contacted" => Ok(Self::Contacted),
            "interested" => Ok(Self::Interested),
            "closed" => Ok(Self::Closed),
            "ignored" => Ok(Self::Ignored),
            other => Err(ProspectorError::InvalidInput(format!("Unknown lead status '{}'", other))),
        }
    }
}

/// Parse a status filter as typed by a person or sent by the dashboard.
/// Blank input and "All" (any case) mean no filter.
pub fn parse_status_filter(raw: Option<&str>) -> Result<Option<LeadStatus>, ProspectorError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) if s.eq_ignore_ascii_case("all") => Ok(None),
        Some(s) => s.parse().map(Some),
    }
}
