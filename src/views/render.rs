use serde_json::json;

use crate::{
    dom,
    templates::Hbs,
    widgets::{FreightView, OrderListView},
};

fn ids() -> serde_json::Value {
    json!({
        "table_body": dom::ORDERS_TABLE_BODY,
        "refresh_button": dom::REFRESH_BUTTON,
        "last_refresh": dom::LAST_REFRESH,
        "status_filter": dom::STATUS_FILTER,
        "alert_area": dom::ALERT_AREA,
        "region_select": dom::REGION_SELECT,
        "freight_field": dom::FREIGHT_FIELD,
        "freight_message": dom::FREIGHT_MESSAGE,
    })
}

// Optional elements render even when their text is empty, so presence is
// passed separately from content.
fn panels_ctx(orders: &OrderListView, freight: &FreightView) -> serde_json::Value {
    json!({
        "ids": ids(),
        "orders": orders,
        "has_last_refresh": orders.last_refresh.is_some(),
        "has_alerts": orders.alerts.is_some(),
        "freight": freight,
        "has_freight_message": freight.message.is_some(),
    })
}

pub fn render_page(
    hbs: &Hbs,
    title: &str,
    orders: &OrderListView,
    freight: &FreightView,
) -> Result<String, String> {
    let mut ctx = panels_ctx(orders, freight);
    ctx["title"] = json!(title);

    hbs.render("layouts/base", &ctx).map_err(|e| e.to_string())
}

pub fn render_orders_panel(hbs: &Hbs, orders: &OrderListView) -> Result<String, String> {
    let ctx = json!({
        "ids": ids(),
        "orders": orders,
        "has_last_refresh": orders.last_refresh.is_some(),
        "has_alerts": orders.alerts.is_some(),
    });

    hbs.render("partials/orders_panel", &ctx)
        .map_err(|e| e.to_string())
}

fn freight_ctx(freight: &FreightView) -> serde_json::Value {
    json!({
        "ids": ids(),
        "freight": freight,
        "has_freight_message": freight.message.is_some(),
    })
}

pub fn render_freight_panel(hbs: &Hbs, freight: &FreightView) -> Result<String, String> {
    hbs.render("partials/freight_panel", &freight_ctx(freight))
        .map_err(|e| e.to_string())
}

/// Region select and message only; the freight input is left out so a
/// refresh of this fragment never overwrites what the user typed.
pub fn render_freight_status(hbs: &Hbs, freight: &FreightView) -> Result<String, String> {
    hbs.render("partials/freight_status", &freight_ctx(freight))
        .map_err(|e| e.to_string())
}
