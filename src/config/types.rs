use serde::{Deserialize, Serialize};
use std::time::Duration;
use crate::errors::ProspectorError;
use crate::models::default_categories;
use super::credentials::resolve_credential;

/// Environment variable consulted when no key is configured.
pub const API_KEY_ENV: &str = "GOOGLE_PLACES_API_KEY";

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ProspectorConfig {
    pub places: PlacesConfig,
    pub database: DatabaseConfig,
    pub dashboard: DashboardConfig,
    pub server: ServerConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct PlacesConfig {
    /// Literal key or `$ENV_VAR` reference.
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    /// Wait before a continuation token may be used.
    pub page_token_delay_ms: u64,
    pub max_pages: u32,
    pub timeout_secs: u64,
}

impl Default for PlacesConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: None,
            page_token_delay_ms: 2000,
            max_pages: 3,
            timeout_secs: 30,
        }
    }
}

impl PlacesConfig {
    pub fn page_token_delay(&self) -> Duration {
        Duration::from_millis(self.page_token_delay_ms)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// The API key from config, falling back to `GOOGLE_PLACES_API_KEY`.
    pub fn resolve_api_key(&self) -> Result<String, ProspectorError> {
        let key = match &self.api_key {
            Some(raw) => resolve_credential(raw),
            None => std::env::var(API_KEY_ENV).unwrap_or_default(),
        };

        if key.trim().is_empty() || key.starts_with('$') {
            return Err(ProspectorError::Config(format!(
                "No Places API key: set places.api_key in the config file or export {}",
                API_KEY_ENV
            )));
        }
        Ok(key)
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DatabaseConfig {
    pub path: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self { path: "./data/prospector.db".to_string() }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub title: String,
    pub brand_name: String,
    /// Image used for the search-center marker and sidebar. Optional.
    pub logo_path: Option<String>,
    pub default_latitude: f64,
    pub default_longitude: f64,
    pub default_radius: u32,
    pub min_radius: u32,
    pub max_radius: u32,
    pub categories: Vec<String>,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            title: "Territory Map & Leads".to_string(),
            brand_name: "Lead Harvester".to_string(),
            logo_path: None,
            default_latitude: 32.52044,
            default_longitude: -117.01972,
            default_radius: 1000,
            min_radius: 500,
            max_radius: 5000,
            categories: default_categories(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: "0.0.0.0".to_string(), port: 8080 }
    }
}
