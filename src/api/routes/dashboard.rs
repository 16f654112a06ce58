use axum::{
    extract::{Form, Path, Query, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Redirect, Response},
};
use crate::api::AppState;
use crate::dashboard::{self, render_dashboard, DashboardPage, Notice, NoticeLevel, ViewState};
use crate::errors::ProspectorError;
use crate::harvester::ScanSummary;
use crate::models::{filter_by_category, LeadStatus};
use crate::places::NearbySearch;
use tracing::info;

pub async fn show(
    State(state): State<AppState>,
    Query(params): Query<ViewState>,
) -> Result<Html<String>, ProspectorError> {
    let view = params.resolve(&state.dashboard)?;

    let leads = state.db.list_leads(view.status_filter)?;
    let leads = filter_by_category(leads, view.type_filter.as_deref());
    let counts = state.db.status_counts()?;
    let logo_available = match state.dashboard.logo_path.as_deref() {
        Some(path) => tokio::fs::metadata(path).await.map(|m| m.is_file()).unwrap_or(false),
        None => false,
    };

    let html = render_dashboard(&DashboardPage {
        config: &state.dashboard,
        view: &view,
        leads: &leads,
        counts: &counts,
        logo_available,
        scan_enabled: state.harvester.is_some(),
        notice: params.notice(),
    })?;
    Ok(Html(html))
}

pub async fn scan(
    State(state): State<AppState>,
    Form(params): Form<ViewState>,
) -> Result<Redirect, ProspectorError> {
    let view = params.resolve(&state.dashboard)?;
    let search = NearbySearch {
        latitude: view.lat,
        longitude: view.lng,
        radius_meters: view.radius,
        keyword: view.category.clone(),
    };

    let notice = match state.run_scan(&search).await {
        Ok(summary) => scan_notice(&summary),
        Err(e @ ProspectorError::Conflict(_)) => Notice::new(NoticeLevel::Warning, e.to_string()),
        Err(e @ (ProspectorError::InvalidInput(_)
            | ProspectorError::Config(_)
            | ProspectorError::PlacesApi(_)
            | ProspectorError::Network(_))) => Notice::new(NoticeLevel::Error, e.to_string()),
        Err(e) => return Err(e),
    };
    Ok(Redirect::to(&view.location(Some(&notice))))
}

pub async fn update_status(
    State(state): State<AppState>,
    Path(place_id): Path<String>,
    Form(params): Form<ViewState>,
) -> Result<Redirect, ProspectorError> {
    let view = params.resolve(&state.dashboard)?;
    let status: LeadStatus = params.new_status
        .as_deref()
        .ok_or_else(|| ProspectorError::InvalidInput("Missing new_status".into()))?
        .parse()?;

    let notice = if state.db.set_status(&place_id, status, None)? {
        info!(place_id = %place_id, status = %status, "Lead status updated");
        None
    } else {
        Some(Notice::new(NoticeLevel::Error, format!("Lead {} not found", place_id)))
    };
    Ok(Redirect::to(&view.location(notice.as_ref())))
}

pub async fn save_note(
    State(state): State<AppState>,
    Path(place_id): Path<String>,
    Form(params): Form<ViewState>,
) -> Result<Redirect, ProspectorError> {
    let view = params.resolve(&state.dashboard)?;
    let note = params.note.unwrap_or_default();

    let notice = if state.db.save_note(&place_id, &note)? {
        Notice::new(NoticeLevel::Success, "Saved")
    } else {
        Notice::new(NoticeLevel::Error, format!("Lead {} not found", place_id))
    };
    Ok(Redirect::to(&view.location(Some(&notice))))
}

pub async fn logo(State(state): State<AppState>) -> Response {
    match dashboard::load_logo(state.dashboard.logo_path.as_deref()).await {
        Some((bytes, content_type)) => ([(header::CONTENT_TYPE, content_type)], bytes).into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

fn scan_notice(summary: &ScanSummary) -> Notice {
    if let Some(err) = &summary.search_error {
        Notice::new(
            NoticeLevel::Error,
            format!("API Error during scan: {}. Saved {} leads.", err, summary.processed),
        )
    } else if summary.processed > 0 {
        Notice::new(NoticeLevel::Success, format!("Found {} new leads!", summary.processed))
    } else {
        Notice::new(NoticeLevel::Warning, "No new leads found in this area.")
    }
}
