use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::json;
use crate::errors::ProspectorError;

impl IntoResponse for ProspectorError {
    fn into_response(self) -> axum::response::Response {
        let status = match &self {
            ProspectorError::Config(_) => StatusCode::BAD_REQUEST,
            ProspectorError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            ProspectorError::NotFound(_) => StatusCode::NOT_FOUND,
            ProspectorError::Conflict(_) => StatusCode::CONFLICT,
            ProspectorError::PlacesApi(_) | ProspectorError::Network(_) => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        }

        (status, Json(json!({"error": self.to_string()}))).into_response()
    }
}
