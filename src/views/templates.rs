use handlebars::Handlebars;
use std::sync::Arc;

pub type Hbs = Arc<Handlebars<'static>>;

pub fn build_handlebars() -> Hbs {
    let mut hb = Handlebars::new();

    // Templates are compiled in so tests and the binary agree on them.
    hb.register_template_string("layouts/base", include_str!("../../templates/layouts/base.hbs"))
        .expect("template layouts/base");

    hb.register_template_string(
        "partials/orders_panel",
        include_str!("../../templates/partials/orders_panel.hbs"),
    )
    .expect("template partials/orders_panel");

    hb.register_template_string(
        "partials/freight_panel",
        include_str!("../../templates/partials/freight_panel.hbs"),
    )
    .expect("template partials/freight_panel");

    hb.register_template_string(
        "partials/freight_status",
        include_str!("../../templates/partials/freight_status.hbs"),
    )
    .expect("template partials/freight_status");

    hb.register_partial("orders_panel", include_str!("../../templates/partials/orders_panel.hbs"))
        .expect("register orders_panel partial");
    hb.register_partial("freight_panel", include_str!("../../templates/partials/freight_panel.hbs"))
        .expect("register freight_panel partial");
    hb.register_partial("freight_status", include_str!("../../templates/partials/freight_status.hbs"))
        .expect("register freight_status partial");

    Arc::new(hb)
}
