//! Library entrypoint for OrderBoard.
//!
//! The widgets (order list, freight lookup) live here so they can be driven
//! directly from tests; the binary only wires them to the upstream API and the
//! HTTP server.

pub mod config;
pub mod error;
pub mod models;

pub mod dom;
pub mod events;
pub mod fingerprint;
pub mod format;

pub mod services;
pub mod widgets;

#[path = "views/render.rs"]
pub mod render;
#[path = "views/templates.rs"]
pub mod templates;

pub mod controllers;
pub mod routes;

#[derive(Clone)]
pub struct AppState {
    pub hbs: templates::Hbs,
    pub settings: config::Settings,
    pub board: services::board::BoardHandle,
    pub events_tx: tokio::sync::broadcast::Sender<String>,
}
