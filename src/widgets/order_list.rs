//! Order table with a status filter, polled refresh and per-order detail rows.

use chrono::Local;
use serde::Serialize;
use tokio_util::sync::CancellationToken;

use crate::{
    dom::{self, Document},
    error::{FetchError, MountError},
    fingerprint::Fingerprint,
    format,
    models::{Order, OrdersResponse},
    services::api_client::OrderSource,
};

/// Columns of the summary table; notice rows span all of them.
pub const COLUMNS: usize = 7;

pub const HIDE_LABEL: &str = "Ocultar";
pub const SHOW_LABEL: &str = "Mostrar";

pub const LOADING_LABEL: &str = "Atualizando…";
pub const EMPTY_TEXT: &str = "Nenhum pedido encontrado";
pub const ERROR_ROW_TEXT: &str = "Falha ao carregar pedidos";
pub const NO_ITEMS_TEXT: &str = "Sem itens";

/// Oldest alerts are dropped past this many.
pub const MAX_ALERTS: usize = 5;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SelectOption {
    pub value: String,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatusFilter {
    pub options: Vec<SelectOption>,
    pub selected: String,
}

impl StatusFilter {
    fn set(&mut self, options: Vec<String>, selected: String) {
        self.options = options
            .into_iter()
            .map(|value| SelectOption {
                selected: value == selected,
                value,
            })
            .collect();
        self.selected = selected;
    }

    fn select(&mut self, value: String) {
        for opt in &mut self.options {
            opt.selected = opt.value == value;
        }
        self.selected = value;
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ItemRow {
    pub sku: String,
    pub name: String,
    pub quantity: String,
    pub unit_price: String,
    pub subtotal: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetailRow {
    pub container_id: String,
    /// Mirrors the container's `data-visible` marker.
    pub visible: bool,
    pub toggle_label: &'static str,
    pub items: Vec<ItemRow>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderRow {
    pub number: String,
    pub date: String,
    pub customer: String,
    pub seller: String,
    pub status: String,
    pub total: String,
    pub details: DetailRow,
}

/// A single full-width row replacing the table content.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RowNotice {
    pub text: String,
    pub tone: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableBody {
    pub rows: Vec<OrderRow>,
    pub notice: Option<RowNotice>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Alert {
    pub id: u64,
    pub tone: &'static str,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub count: usize,
    pub total: String,
}

/// What the order widget currently shows. Optional elements are `None`/`false`
/// when the page does not mount them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderListView {
    pub status_filter: StatusFilter,
    pub body: TableBody,
    pub last_refresh: Option<String>,
    pub alerts: Option<Vec<Alert>>,
    pub refresh_button: bool,
    pub summary: Option<Summary>,
    pub columns: usize,
}

impl OrderListView {
    pub fn find_details(&self, container_id: &str) -> Option<&DetailRow> {
        self.body
            .rows
            .iter()
            .map(|r| &r.details)
            .find(|d| d.container_id == container_id)
    }
}

/// Identifies one in-flight order request.
#[derive(Debug, Clone)]
pub struct RefreshTicket {
    pub generation: u64,
    pub status: String,
    pub silent: bool,
    pub cancel: CancellationToken,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    Rendered,
    Unchanged,
    Failed,
    /// A newer request was issued; the response was dropped.
    Stale,
}

pub struct OrderListController {
    default_status: String,
    view: OrderListView,
    fingerprint: Option<Fingerprint>,
    next_alert_id: u64,
    generation: u64,
    in_flight: Option<RefreshTicket>,
}

impl OrderListController {
    pub fn mount(doc: &Document, default_status: impl Into<String>) -> Result<Self, MountError> {
        doc.require(dom::ORDERS_TABLE_BODY)?;
        doc.require(dom::STATUS_FILTER)?;

        let default_status = default_status.into();
        let mut status_filter = StatusFilter {
            options: vec![],
            selected: String::new(),
        };
        status_filter.set(vec![default_status.clone()], default_status.clone());

        let view = OrderListView {
            status_filter,
            body: TableBody {
                rows: vec![],
                notice: Some(RowNotice {
                    text: "Carregando pedidos…".to_string(),
                    tone: "text-muted",
                }),
            },
            last_refresh: doc.has(dom::LAST_REFRESH).then(String::new),
            alerts: doc.has(dom::ALERT_AREA).then(Vec::new),
            refresh_button: doc.has(dom::REFRESH_BUTTON),
            summary: None,
            columns: COLUMNS,
        };

        Ok(Self {
            default_status,
            view,
            fingerprint: None,
            next_alert_id: 1,
            generation: 0,
            in_flight: None,
        })
    }

    pub fn view(&self) -> &OrderListView {
        &self.view
    }

    pub fn fingerprint(&self) -> Option<&Fingerprint> {
        self.fingerprint.as_ref()
    }

    pub fn default_status(&self) -> &str {
        &self.default_status
    }

    pub fn selected_status(&self) -> &str {
        &self.view.status_filter.selected
    }

    /// What the user picked in the dropdown.
    pub fn select_status(&mut self, status: impl Into<String>) {
        self.view.status_filter.select(status.into());
    }

    fn set_label(&mut self, text: String) {
        if let Some(label) = self.view.last_refresh.as_mut() {
            *label = text;
        }
    }

    fn stamp(&mut self) {
        self.set_label(format::refreshed_label(&Local::now()));
    }

    // A repeat of the newest alert is not stacked again.
    fn push_alert(&mut self, tone: &'static str, message: String) {
        let id = self.next_alert_id;
        let Some(alerts) = self.view.alerts.as_mut() else {
            return;
        };
        if alerts.last().is_some_and(|a| a.tone == tone && a.message == message) {
            return;
        }

        alerts.push(Alert { id, tone, message });
        self.next_alert_id += 1;
        if alerts.len() > MAX_ALERTS {
            let excess = alerts.len() - MAX_ALERTS;
            alerts.drain(..excess);
        }
    }

    pub fn dismiss_alert(&mut self, id: u64) -> bool {
        let Some(alerts) = self.view.alerts.as_mut() else {
            return false;
        };
        let before = alerts.len();
        alerts.retain(|a| a.id != id);
        alerts.len() != before
    }

    /// Starts a request for the current filter. Any request still in flight is
    /// cancelled and its response will be ignored.
    ///
    /// A silent request that supersedes a non-silent one becomes non-silent, so
    /// the `Atualizando…` label it left behind is still resolved.
    pub fn begin_refresh(&mut self, silent: bool) -> RefreshTicket {
        let mut silent = silent;
        if let Some(prev) = self.in_flight.take() {
            prev.cancel.cancel();
            silent &= prev.silent;
        }

        self.generation += 1;
        let cancel = CancellationToken::new();

        if !silent {
            self.set_label(LOADING_LABEL.to_string());
        }

        let status = if self.selected_status().is_empty() {
            self.default_status.clone()
        } else {
            self.selected_status().to_string()
        };

        let ticket = RefreshTicket {
            generation: self.generation,
            status,
            silent,
            cancel,
        };
        self.in_flight = Some(ticket.clone());
        ticket
    }

    pub fn is_current(&self, ticket: &RefreshTicket) -> bool {
        ticket.generation == self.generation && !ticket.cancel.is_cancelled()
    }

    pub fn complete_refresh(
        &mut self,
        ticket: &RefreshTicket,
        result: Result<OrdersResponse, FetchError>,
    ) -> RefreshOutcome {
        if !self.is_current(ticket) {
            tracing::debug!(
                "dropping stale order response (generation {} < {})",
                ticket.generation,
                self.generation
            );
            return RefreshOutcome::Stale;
        }
        self.in_flight = None;

        match result {
            Ok(resp) => {
                let orders = resp.orders();
                let fingerprint = Fingerprint::of_orders(&orders);

                if self.fingerprint.as_ref() != Some(&fingerprint) {
                    self.render(&orders, &resp.statuses(), resp.active_status().as_deref());
                    self.fingerprint = Some(fingerprint);
                    tracing::info!("rendered {} orders (status={})", orders.len(), ticket.status);
                    RefreshOutcome::Rendered
                } else {
                    if !ticket.silent {
                        self.stamp();
                    }
                    RefreshOutcome::Unchanged
                }
            }
            // The fingerprint survives a failure: a later response with the
            // same list counts as unchanged and the error row stays until the
            // list itself changes.
            Err(e) => {
                tracing::error!("fetch orders error: {}", e);
                self.push_alert("danger", format!("Erro ao buscar pedidos. {e}"));
                self.view.body = TableBody {
                    rows: vec![],
                    notice: Some(RowNotice {
                        text: ERROR_ROW_TEXT.to_string(),
                        tone: "text-danger",
                    }),
                };
                self.view.summary = None;
                RefreshOutcome::Failed
            }
        }
    }

    pub async fn refresh(&mut self, source: &dyn OrderSource, silent: bool) -> RefreshOutcome {
        let ticket = self.begin_refresh(silent);
        let result = source.fetch_orders(&ticket.status).await;
        self.complete_refresh(&ticket, result)
    }

    pub fn render(&mut self, orders: &[Order], statuses: &[String], active: Option<&str>) {
        let default = self.default_status.clone();

        let current = if self.selected_status().is_empty() {
            default.clone()
        } else {
            self.selected_status().to_string()
        };

        let options: Vec<String> = if statuses.is_empty() {
            vec![default.clone()]
        } else {
            statuses.to_vec()
        };

        let selected = match active {
            Some(a) if statuses.iter().any(|s| s == a) => a.to_string(),
            _ if options.contains(&current) => current,
            _ if options.contains(&default) => default,
            _ => options[0].clone(),
        };

        self.view.status_filter.set(options, selected);

        if orders.is_empty() {
            self.view.body = TableBody {
                rows: vec![],
                notice: Some(RowNotice {
                    text: EMPTY_TEXT.to_string(),
                    tone: "text-muted",
                }),
            };
        } else {
            self.view.body = TableBody {
                rows: orders.iter().map(order_row).collect(),
                notice: None,
            };
        }

        self.view.summary = Some(Summary {
            count: orders.len(),
            total: format::brl(orders.iter().map(|o| o.total).sum()),
        });

        self.stamp();
    }

    /// Flips a detail container; returns its new visibility.
    pub fn toggle_details(&mut self, container_id: &str) -> Option<bool> {
        let details = self
            .view
            .body
            .rows
            .iter_mut()
            .map(|r| &mut r.details)
            .find(|d| d.container_id == container_id)?;

        details.visible = !details.visible;
        details.toggle_label = if details.visible { HIDE_LABEL } else { SHOW_LABEL };
        Some(details.visible)
    }
}

pub fn container_id(order_number: &str) -> String {
    format!("p-{order_number}-items")
}

fn order_row(order: &Order) -> OrderRow {
    let items = order
        .items
        .iter()
        .map(|it| ItemRow {
            sku: it.sku.clone(),
            name: it.name.clone(),
            quantity: format::quantity(it.quantity),
            unit_price: format::brl(it.unit_price),
            subtotal: format::brl(it.subtotal()),
        })
        .collect();

    OrderRow {
        number: if order.number.is_empty() {
            format::PLACEHOLDER.to_string()
        } else {
            order.number.clone()
        },
        date: format::date(order.date.as_deref()),
        customer: order.customer.clone(),
        seller: order.seller.clone(),
        status: order.status.clone(),
        total: format::brl(order.total),
        details: DetailRow {
            container_id: container_id(&order.number),
            visible: true,
            toggle_label: HIDE_LABEL,
            items,
        },
    }
}
