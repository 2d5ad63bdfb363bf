use axum::{
    extract::{Form, Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use serde::Deserialize;

use crate::{
    events::{PageEvent, Visibility},
    render, AppState,
};

fn orders_panel(state: &AppState) -> Response {
    let view = state.board.orders();
    match render::render_orders_panel(&state.hbs, &view) {
        Ok(html) => (StatusCode::OK, Html(html)).into_response(),
        Err(e) => (StatusCode::INTERNAL_SERVER_ERROR, Html(format!("template error: {e}"))).into_response(),
    }
}

fn board_unavailable(e: String) -> Response {
    tracing::error!("board dispatch failed: {}", e);
    (StatusCode::SERVICE_UNAVAILABLE, Html(e)).into_response()
}

async fn dispatch_then_render(state: &AppState, event: PageEvent) -> Response {
    if let Err(e) = state.board.dispatch(event).await {
        return board_unavailable(e);
    }
    orders_panel(state)
}

// GET /ui/orders
pub async fn get_orders_panel(State(state): State<AppState>) -> Response {
    orders_panel(&state)
}

// POST /ui/orders/refresh
pub async fn post_refresh(State(state): State<AppState>) -> Response {
    dispatch_then_render(&state, PageEvent::RefreshRequested).await
}

#[derive(Deserialize)]
pub struct StatusForm {
    #[serde(default)]
    pub status: String,
}

// POST /ui/orders/status
pub async fn post_status(State(state): State<AppState>, Form(form): Form<StatusForm>) -> Response {
    dispatch_then_render(&state, PageEvent::FilterChanged(form.status.trim().to_string())).await
}

// POST /ui/orders/:container/toggle
pub async fn post_toggle(State(state): State<AppState>, Path(container): Path<String>) -> Response {
    dispatch_then_render(&state, PageEvent::ToggleDetails(container)).await
}

// POST /ui/alerts/:id/dismiss
pub async fn post_dismiss_alert(State(state): State<AppState>, Path(id): Path<u64>) -> Response {
    dispatch_then_render(&state, PageEvent::DismissAlert(id)).await
}

#[derive(Deserialize)]
pub struct VisibilityForm {
    #[serde(default)]
    pub state: String,
}

// POST /ui/visibility
pub async fn post_visibility(State(state): State<AppState>, Form(form): Form<VisibilityForm>) -> Response {
    let Some(visibility) = Visibility::parse(&form.state) else {
        return (StatusCode::BAD_REQUEST, Html("state must be visible or hidden".to_string())).into_response();
    };

    match state.board.dispatch(PageEvent::VisibilityChanged(visibility)).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => board_unavailable(e),
    }
}
