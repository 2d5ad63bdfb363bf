use axum::{
    extract::{Form, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use serde_json::json;

use crate::{events::PageEvent, render, widgets::FreightView, AppState};

fn html_or_500(rendered: Result<String, String>) -> Response {
    match rendered {
        Ok(html) => (StatusCode::OK, Html(html)).into_response(),
        Err(e) => (StatusCode::INTERNAL_SERVER_ERROR, Html(format!("template error: {e}"))).into_response(),
    }
}

fn freight_status(state: &AppState) -> Response {
    let view = state.board.freight();
    html_or_500(render::render_freight_status(&state.hbs, &view))
}

// GET /ui/freight
pub async fn get_freight_panel(State(state): State<AppState>) -> Response {
    let view = state.board.freight();
    html_or_500(render::render_freight_panel(&state.hbs, &view))
}

// GET /ui/freight/status
pub async fn get_freight_status(State(state): State<AppState>) -> Response {
    freight_status(&state)
}

// GET /ui/freight/field
// Read by the page on `freteInput`/`freteChange`, the only times the freight
// input is written.
pub async fn get_freight_field(State(state): State<AppState>) -> impl IntoResponse {
    let FreightView { field_value, .. } = state.board.freight();
    Json(json!({ "value": field_value }))
}

#[derive(Deserialize)]
pub struct RegionForm {
    #[serde(default)]
    pub uf: String,
}

// POST /ui/freight
// Answers with the select and message as they stand after the selection; the
// looked-up value arrives later through `freightUpdated` and the field events.
pub async fn post_region(State(state): State<AppState>, Form(form): Form<RegionForm>) -> Response {
    if let Err(e) = state.board.dispatch(PageEvent::RegionSelected(form.uf)).await {
        tracing::error!("board dispatch failed: {}", e);
        return (StatusCode::SERVICE_UNAVAILABLE, Html(e)).into_response();
    }
    freight_status(&state)
}
