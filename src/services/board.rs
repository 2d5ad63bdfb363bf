//! The board task: owns both widgets and the poll timer, and reacts to one
//! message at a time.
//!
//! Fetches run in their own tasks and come back as messages, so a slow
//! upstream never blocks page events. Every message ends with the views being
//! republished on watch channels; the names of the views that changed go out on
//! the broadcast channel that feeds `/events`.

use std::sync::Arc;

use tokio::sync::{broadcast, mpsc, oneshot, watch};

use crate::{
    config::Settings,
    dom::Document,
    error::{FetchError, MountError},
    events::{self, PageEvent, Visibility},
    models::{FreightResponse, OrdersResponse, RegionsResponse},
    services::{
        api_client::{FreightSource, OrderSource},
        poll_timer::{PollTimer, TimerState},
    },
    widgets::{
        FreightLookupController, FreightView, LookupTicket, OrderListController, OrderListView,
        RefreshTicket,
    },
};

pub enum BoardMessage {
    Event(PageEvent, Option<oneshot::Sender<()>>),
    OrdersFetched(RefreshTicket, Result<OrdersResponse, FetchError>),
    RegionsFetched(Result<RegionsResponse, FetchError>),
    FreightFetched(LookupTicket, Result<FreightResponse, FetchError>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardStatus {
    pub timer: TimerState,
}

/// Cheap, cloneable access to a running board.
#[derive(Clone)]
pub struct BoardHandle {
    tx: mpsc::Sender<BoardMessage>,
    orders: watch::Receiver<OrderListView>,
    freight: watch::Receiver<FreightView>,
    status: watch::Receiver<BoardStatus>,
}

impl BoardHandle {
    /// Sends an event and waits until the board has reacted to it. Fetches the
    /// reaction started may still be running.
    pub async fn dispatch(&self, event: PageEvent) -> Result<(), String> {
        let (ack_tx, ack_rx) = oneshot::channel();
        self.tx
            .send(BoardMessage::Event(event, Some(ack_tx)))
            .await
            .map_err(|_| "board is not running".to_string())?;
        ack_rx
            .await
            .map_err(|_| "board dropped the event".to_string())
    }

    pub fn orders(&self) -> OrderListView {
        self.orders.borrow().clone()
    }

    pub fn freight(&self) -> FreightView {
        self.freight.borrow().clone()
    }

    pub fn status(&self) -> BoardStatus {
        *self.status.borrow()
    }

    pub fn watch_orders(&self) -> watch::Receiver<OrderListView> {
        self.orders.clone()
    }

    pub fn watch_freight(&self) -> watch::Receiver<FreightView> {
        self.freight.clone()
    }
}

struct Board {
    orders: OrderListController,
    freight: FreightLookupController,
    timer: PollTimer<BoardMessage>,
    order_source: Arc<dyn OrderSource>,
    freight_source: Arc<dyn FreightSource>,
    tx: mpsc::Sender<BoardMessage>,
    orders_out: watch::Sender<OrderListView>,
    freight_out: watch::Sender<FreightView>,
    status_out: watch::Sender<BoardStatus>,
    events_tx: broadcast::Sender<String>,
}

/// Mounts both widgets on `doc` and starts the board task.
pub fn spawn_board(
    doc: &Document,
    settings: &Settings,
    order_source: Arc<dyn OrderSource>,
    freight_source: Arc<dyn FreightSource>,
    events_tx: broadcast::Sender<String>,
) -> Result<BoardHandle, MountError> {
    let orders = OrderListController::mount(doc, settings.default_status.clone())?;
    let freight = FreightLookupController::mount(doc)?;

    let (tx, rx) = mpsc::channel::<BoardMessage>(64);
    let timer = PollTimer::new(settings.orders_poll_interval, tx.clone(), || {
        BoardMessage::Event(PageEvent::TimerTick, None)
    });

    let (orders_out, orders_rx) = watch::channel(orders.view().clone());
    let (freight_out, freight_rx) = watch::channel(freight.view().clone());
    let (status_out, status_rx) = watch::channel(BoardStatus {
        timer: TimerState::Stopped,
    });

    spawn_field_forwarder(&freight, events_tx.clone());

    let board = Board {
        orders,
        freight,
        timer,
        order_source,
        freight_source,
        tx: tx.clone(),
        orders_out,
        freight_out,
        status_out,
        events_tx,
    };
    tokio::spawn(board.run(rx));

    Ok(BoardHandle {
        tx,
        orders: orders_rx,
        freight: freight_rx,
        status: status_rx,
    })
}

// Re-announces the freight input notifications to the page.
fn spawn_field_forwarder(freight: &FreightLookupController, events_tx: broadcast::Sender<String>) {
    let mut field_rx = freight.subscribe_field();
    tokio::spawn(async move {
        loop {
            match field_rx.recv().await {
                Ok(ev) => {
                    let _ = events_tx.send(ev.event_name().to_string());
                }
                Err(broadcast::error::RecvError::Lagged(_)) => continue,
                Err(broadcast::error::RecvError::Closed) => break,
            }
        }
    });
}

impl Board {
    async fn run(mut self, mut rx: mpsc::Receiver<BoardMessage>) {
        self.start();
        self.publish();

        while let Some(msg) = rx.recv().await {
            let ack = self.handle(msg);
            self.publish();
            if let Some(ack) = ack {
                let _ = ack.send(());
            }
        }

        tracing::info!("board stopped");
    }

    fn start(&mut self) {
        let initial = self.orders.default_status().to_string();
        self.orders.select_status(initial);
        self.spawn_refresh(false);
        self.timer.start();

        self.freight.begin_load_options();
        let source = Arc::clone(&self.freight_source);
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let result = source.fetch_regions().await;
            let _ = tx.send(BoardMessage::RegionsFetched(result)).await;
        });

        tracing::info!("board started");
    }

    fn handle(&mut self, msg: BoardMessage) -> Option<oneshot::Sender<()>> {
        match msg {
            BoardMessage::Event(event, ack) => {
                self.on_event(event);
                ack
            }
            BoardMessage::OrdersFetched(ticket, result) => {
                self.orders.complete_refresh(&ticket, result);
                None
            }
            BoardMessage::RegionsFetched(result) => {
                self.freight.complete_load_options(result);
                None
            }
            BoardMessage::FreightFetched(ticket, result) => {
                self.freight.complete_lookup(&ticket, result);
                None
            }
        }
    }

    fn on_event(&mut self, event: PageEvent) {
        tracing::debug!("page event: {:?}", event);

        match event {
            PageEvent::FilterChanged(status) => {
                self.orders.select_status(status);
                self.spawn_refresh(false);
            }
            PageEvent::RefreshRequested => self.spawn_refresh(false),
            PageEvent::TimerTick => self.spawn_refresh(true),
            PageEvent::VisibilityChanged(Visibility::Visible) => {
                self.timer.start();
                self.spawn_refresh(true);
            }
            PageEvent::VisibilityChanged(Visibility::Hidden) => self.timer.stop(),
            PageEvent::ToggleDetails(container_id) => {
                if self.orders.toggle_details(&container_id).is_none() {
                    tracing::debug!("no detail container {}", container_id);
                }
            }
            PageEvent::DismissAlert(id) => {
                self.orders.dismiss_alert(id);
            }
            PageEvent::RegionSelected(region) => {
                if let Some(ticket) = self.freight.begin_lookup(&region) {
                    self.spawn_lookup(ticket);
                }
            }
        }
    }

    fn spawn_refresh(&mut self, silent: bool) {
        let ticket = self.orders.begin_refresh(silent);
        let source = Arc::clone(&self.order_source);
        let tx = self.tx.clone();

        tokio::spawn(async move {
            let result = tokio::select! {
                _ = ticket.cancel.cancelled() => return,
                r = source.fetch_orders(&ticket.status) => r,
            };
            let _ = tx.send(BoardMessage::OrdersFetched(ticket, result)).await;
        });
    }

    fn spawn_lookup(&mut self, ticket: LookupTicket) {
        let source = Arc::clone(&self.freight_source);
        let tx = self.tx.clone();

        tokio::spawn(async move {
            let result = tokio::select! {
                _ = ticket.cancel.cancelled() => return,
                r = source.fetch_freight(&ticket.region) => r,
            };
            let _ = tx.send(BoardMessage::FreightFetched(ticket, result)).await;
        });
    }

    fn publish(&self) {
        let orders_changed = self.orders_out.send_if_modified(|v| {
            if *v != *self.orders.view() {
                *v = self.orders.view().clone();
                true
            } else {
                false
            }
        });
        if orders_changed {
            let _ = self.events_tx.send(events::ORDERS_UPDATED.to_string());
        }

        let freight_changed = self.freight_out.send_if_modified(|v| {
            if *v != *self.freight.view() {
                *v = self.freight.view().clone();
                true
            } else {
                false
            }
        });
        if freight_changed {
            let _ = self.events_tx.send(events::FREIGHT_UPDATED.to_string());
        }

        let _ = self.status_out.send_if_modified(|s| {
            let timer = self.timer.state();
            if s.timer != timer {
                s.timer = timer;
                true
            } else {
                false
            }
        });
    }
}
