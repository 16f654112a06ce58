use std::path::Path;
use crate::errors::ProspectorError;
use super::types::ProspectorConfig;
use tracing::{debug, warn};

/// Config file read when `--config` is not given.
pub const DEFAULT_CONFIG_PATH: &str = "prospector.yaml";

pub async fn parse_config(path: &Path) -> Result<ProspectorConfig, ProspectorError> {
    if !path.exists() {
        return Err(ProspectorError::Config(format!("Config file not found: {}", path.display())));
    }

    let metadata = tokio::fs::metadata(path).await?;
    if metadata.len() > 1_048_576 {
        return Err(ProspectorError::Config("Config file exceeds 1MB limit".into()));
    }

    let content = tokio::fs::read_to_string(path).await?;
    let config: ProspectorConfig = if content.trim().is_empty() {
        ProspectorConfig::default()
    } else {
        serde_yaml::from_str(&content)?
    };

    validate_config(&config)?;
    Ok(config)
}

/// Load an explicit config file, or the default one if present, or built-in defaults.
pub async fn load_config(path: Option<&str>) -> Result<ProspectorConfig, ProspectorError> {
    match path {
        Some(p) => parse_config(Path::new(p)).await,
        None => {
            let default_path = Path::new(DEFAULT_CONFIG_PATH);
            if default_path.exists() {
                parse_config(default_path).await
            } else {
                debug!("No config file, using defaults");
                Ok(ProspectorConfig::default())
            }
        }
    }
}

/// Reject configurations the dashboard or harvester cannot work with.
fn validate_config(config: &ProspectorConfig) -> Result<(), ProspectorError> {
    let dash = &config.dashboard;

    if dash.categories.is_empty() {
        return Err(ProspectorError::Config("dashboard.categories must not be empty".into()));
    }
    if dash.categories.iter().any(|c| c.trim().is_empty()) {
        return Err(ProspectorError::Config("dashboard.categories contains a blank entry".into()));
    }
    if !(-90.0..=90.0).contains(&dash.default_latitude) || !(-180.0..=180.0).contains(&dash.default_longitude) {
        return Err(ProspectorError::Config(format!(
            "Default search center ({}, {}) is not a valid coordinate",
            dash.default_latitude, dash.default_longitude
        )));
    }
    if dash.min_radius == 0 || dash.min_radius > dash.max_radius {
        return Err(ProspectorError::Config(format!(
            "Radius bounds {}..{} are invalid",
            dash.min_radius, dash.max_radius
        )));
    }
    if !(dash.min_radius..=dash.max_radius).contains(&dash.default_radius) {
        return Err(ProspectorError::Config(format!(
            "dashboard.default_radius {} is outside {}..{}",
            dash.default_radius, dash.min_radius, dash.max_radius
        )));
    }
    if config.places.max_pages == 0 {
        return Err(ProspectorError::Config("places.max_pages must be at least 1".into()));
    }
    if config.database.path.trim().is_empty() {
        return Err(ProspectorError::Config("database.path must not be empty".into()));
    }

    if config.places.page_token_delay_ms < 1000 {
        warn!(
            delay_ms = config.places.page_token_delay_ms,
            "Page token delay is short; the Places API may reject continuation tokens"
        );
    }

    Ok(())
}
