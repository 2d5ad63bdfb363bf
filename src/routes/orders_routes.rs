use axum::{Router, routing::{get, post}};
use crate::{AppState, controllers::orders_controller};

pub fn add_routes(router: Router<AppState>) -> Router<AppState> {
    router
        .route("/ui/orders", get(orders_controller::get_orders_panel))
        .route("/ui/orders/refresh", post(orders_controller::post_refresh))
        .route("/ui/orders/status", post(orders_controller::post_status))
        .route("/ui/orders/:container/toggle", post(orders_controller::post_toggle))
        .route("/ui/alerts/:id/dismiss", post(orders_controller::post_dismiss_alert))
        .route("/ui/visibility", post(orders_controller::post_visibility))
}
