pub mod format;
pub mod view;

pub use format::{format_phone_link, status_color};
pub use view::{render_dashboard, DashboardPage, Notice, NoticeLevel, ResolvedView, ViewState};

use std::path::Path;
use tracing::debug;

/// Read the configured logo. A missing or unreadable file only means the
/// dashboard falls back to the default marker.
pub async fn load_logo(path: Option<&str>) -> Option<(Vec<u8>, &'static str)> {
    let path = path?;
    match tokio::fs::read(path).await {
        Ok(bytes) => Some((bytes, content_type_for(Path::new(path)))),
        Err(e) => {
            debug!(path = %path, error = %e, "Logo unavailable, using default marker");
            None
        }
    }
}

pub fn content_type_for(path: &Path) -> &'static str {
    match path.extension().and_then(|e| e.to_str()).map(|e| e.to_ascii_lowercase()).as_deref() {
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("svg") => "image/svg+xml",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        _ => "application/octet-stream",
    }
}
