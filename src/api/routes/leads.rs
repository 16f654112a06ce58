use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde_json::{json, Value};
use crate::api::AppState;
use crate::api::models::{LeadsQuery, UpdateNotesRequest, UpdateStatusRequest};
use crate::errors::ProspectorError;
use crate::models::{filter_by_category, parse_status_filter, Lead, LeadStatus};

pub async fn list_leads(
    State(state): State<AppState>,
    Query(query): Query<LeadsQuery>,
) -> Result<Json<Value>, ProspectorError> {
    let status = parse_status_filter(query.status.as_deref())?;
    let leads = filter_by_category(state.db.list_leads(status)?, query.category.as_deref());
    Ok(Json(json!({ "total": leads.len(), "leads": leads })))
}

pub async fn get_lead(
    State(state): State<AppState>,
    Path(place_id): Path<String>,
) -> Result<Json<Lead>, ProspectorError> {
    state.db.get_lead(&place_id)?
        .map(Json)
        .ok_or_else(|| lead_not_found(&place_id))
}

pub async fn update_status(
    State(state): State<AppState>,
    Path(place_id): Path<String>,
    Json(req): Json<UpdateStatusRequest>,
) -> Result<Json<Lead>, ProspectorError> {
    let status: LeadStatus = req.status.parse()?;
    if !state.db.set_status(&place_id, status, req.note.as_deref())? {
        return Err(lead_not_found(&place_id));
    }
    reload(&state, &place_id)
}

pub async fn update_notes(
    State(state): State<AppState>,
    Path(place_id): Path<String>,
    Json(req): Json<UpdateNotesRequest>,
) -> Result<Json<Lead>, ProspectorError> {
    if !state.db.save_note(&place_id, &req.note)? {
        return Err(lead_not_found(&place_id));
    }
    reload(&state, &place_id)
}

pub async fn list_categories(State(state): State<AppState>) -> Json<Value> {
    Json(json!({ "categories": state.dashboard.categories }))
}

fn reload(state: &AppState, place_id: &str) -> Result<Json<Lead>, ProspectorError> {
    state.db.get_lead(place_id)?
        .map(Json)
        .ok_or_else(|| lead_not_found(place_id))
}

fn lead_not_found(place_id: &str) -> ProspectorError {
    ProspectorError::NotFound(format!("Lead {} not found", place_id))
}
