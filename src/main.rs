use std::{net::SocketAddr, sync::Arc};

use orderboard::{
    config, dom::Document, routes, services::api_client::ApiClient, services::board, templates,
    AppState,
};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let settings = config::load();

    let client = ApiClient::new(settings.api_base_url.clone(), settings.http_timeout)
        .expect("Failed to build HTTP client");
    tracing::info!("upstream API at {}", client.base_url());
    let client = Arc::new(client);

    let (events_tx, _events_rx) = tokio::sync::broadcast::channel::<String>(64);

    let board = board::spawn_board(
        &Document::standard(),
        &settings,
        client.clone(),
        client,
        events_tx.clone(),
    )
    .expect("Failed to mount widgets");

    let state = AppState {
        hbs: templates::build_handlebars(),
        settings: settings.clone(),
        board,
        events_tx,
    };

    let app = routes::app(state);

    let ip = settings
        .host
        .parse::<std::net::IpAddr>()
        .expect("HOST must be an IP address");
    let addr = SocketAddr::from((ip, settings.port));
    tracing::info!("listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind listener");
    axum::serve(listener, app).await.expect("server error");
}
