use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProspectorError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Places API error: {0}")]
    PlacesApi(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ProspectorError {
    /// Process exit code used by the CLI for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            ProspectorError::Config(_) | ProspectorError::Yaml(_) => 2,
            ProspectorError::PlacesApi(_) | ProspectorError::Network(_) => 3,
            ProspectorError::NotFound(_) => 4,
            ProspectorError::InvalidInput(_) => 5,
            _ => 1,
        }
    }
}
