use axum::{Router, routing::get};
use crate::{AppState, controllers::freight_controller};

pub fn add_routes(router: Router<AppState>) -> Router<AppState> {
    router
        .route(
            "/ui/freight",
            get(freight_controller::get_freight_panel).post(freight_controller::post_region),
        )
        .route("/ui/freight/status", get(freight_controller::get_freight_status))
        .route("/ui/freight/field", get(freight_controller::get_freight_field))
}
