use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse},
};

use crate::{render, AppState};

pub async fn home(State(state): State<AppState>) -> impl IntoResponse {
    let orders = state.board.orders();
    let freight = state.board.freight();

    match render::render_page(&state.hbs, "Pedidos", &orders, &freight) {
        Ok(page) => (StatusCode::OK, Html(page)).into_response(),
        Err(e) => (StatusCode::INTERNAL_SERVER_ERROR, Html(format!("template error: {e}"))).into_response(),
    }
}

pub async fn not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, Html("not found".to_string()))
}

pub async fn health() -> impl IntoResponse {
    (StatusCode::OK, Html("ok".to_string()))
}
