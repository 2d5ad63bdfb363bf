//! Region selector that fills the freight input from `/api/frete`.

use serde::Serialize;
use tokio::sync::broadcast;
use tokio_util::sync::CancellationToken;

use crate::{
    dom::{self, Document},
    error::{FetchError, MountError},
    events::FieldEvent,
    format,
    models::{FreightResponse, RegionsResponse},
    services::api_client::FreightSource,
};

use super::order_list::SelectOption;

pub const REGION_PLACEHOLDER: &str = "UF...";

pub const LOADING_REGIONS: &str = "Carregando UFs...";
pub const REGIONS_FAILED: &str = "Não foi possível carregar UFs agora.";
pub const LOOKING_UP: &str = "Buscando frete...";
pub const LOOKUP_FAILED: &str = "Erro ao buscar frete.";
pub const NETWORK_FAILED: &str = "Falha de rede ao consultar frete.";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegionSelect {
    pub placeholder: &'static str,
    pub options: Vec<SelectOption>,
    pub selected: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FreightView {
    pub region_select: RegionSelect,
    pub field_value: String,
    /// `None` when the page has no message slot.
    pub message: Option<String>,
}

#[derive(Debug, Clone)]
pub struct LookupTicket {
    pub generation: u64,
    pub region: String,
    pub cancel: CancellationToken,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupOutcome {
    Applied,
    Rejected,
    Failed,
    Stale,
}

pub struct FreightLookupController {
    view: FreightView,
    field_events: broadcast::Sender<FieldEvent>,
    generation: u64,
    in_flight: Option<CancellationToken>,
}

impl FreightLookupController {
    pub fn mount(doc: &Document) -> Result<Self, MountError> {
        doc.require(dom::REGION_SELECT)?;
        doc.require(dom::FREIGHT_FIELD)?;

        let (field_events, _) = broadcast::channel(16);

        Ok(Self {
            view: FreightView {
                region_select: RegionSelect {
                    placeholder: REGION_PLACEHOLDER,
                    options: vec![],
                    selected: String::new(),
                },
                field_value: String::new(),
                message: doc.has(dom::FREIGHT_MESSAGE).then(String::new),
            },
            field_events,
            generation: 0,
            in_flight: None,
        })
    }

    pub fn view(&self) -> &FreightView {
        &self.view
    }

    /// Listeners of the freight input's `input`/`change` notifications.
    pub fn subscribe_field(&self) -> broadcast::Receiver<FieldEvent> {
        self.field_events.subscribe()
    }

    fn set_message(&mut self, text: impl Into<String>) {
        if let Some(msg) = self.view.message.as_mut() {
            *msg = text.into();
        }
    }

    pub fn begin_load_options(&mut self) {
        self.set_message(LOADING_REGIONS);
    }

    pub fn complete_load_options(&mut self, result: Result<RegionsResponse, FetchError>) -> bool {
        let result = result.and_then(|resp| {
            if resp.ok {
                Ok(resp.ufs)
            } else {
                Err(FetchError::Rejected("region list answered ok=false".to_string()))
            }
        });

        let regions = match result {
            Ok(ufs) => ufs,
            Err(e) => {
                tracing::warn!("fetch regions error: {}", e);
                self.set_message(REGIONS_FAILED);
                return false;
            }
        };

        let selected = self.view.region_select.selected.clone();
        self.view.region_select.options = regions
            .into_iter()
            .map(|value| SelectOption {
                selected: value == selected,
                value,
            })
            .collect();
        self.set_message("");
        true
    }

    pub async fn load_options(&mut self, source: &dyn FreightSource) -> bool {
        self.begin_load_options();
        let result = source.fetch_regions().await;
        self.complete_load_options(result)
    }

    /// `None` for an empty selection: nothing is requested.
    pub fn begin_lookup(&mut self, region: &str) -> Option<LookupTicket> {
        let region = region.trim().to_uppercase();

        for opt in &mut self.view.region_select.options {
            opt.selected = opt.value == region;
        }
        self.view.region_select.selected = region.clone();

        if region.is_empty() {
            return None;
        }

        if let Some(prev) = self.in_flight.take() {
            prev.cancel();
        }
        self.generation += 1;
        let cancel = CancellationToken::new();
        self.in_flight = Some(cancel.clone());

        self.set_message(LOOKING_UP);

        Some(LookupTicket {
            generation: self.generation,
            region,
            cancel,
        })
    }

    pub fn complete_lookup(
        &mut self,
        ticket: &LookupTicket,
        result: Result<FreightResponse, FetchError>,
    ) -> LookupOutcome {
        if ticket.generation != self.generation || ticket.cancel.is_cancelled() {
            tracing::debug!("dropping stale freight response for {}", ticket.region);
            return LookupOutcome::Stale;
        }
        self.in_flight = None;

        match result {
            Ok(resp) if resp.ok => {
                let value = resp.frete.unwrap_or(0.0);
                self.view.field_value = format::decimal_comma(value);

                // nobody listening is fine
                let _ = self.field_events.send(FieldEvent::Input);
                let _ = self.field_events.send(FieldEvent::Change);

                let region = resp
                    .uf
                    .filter(|u| !u.trim().is_empty())
                    .unwrap_or_else(|| ticket.region.clone());
                tracing::info!("freight for {} applied: {}", region, self.view.field_value);
                self.set_message(format!("Frete de {region} aplicado."));
                LookupOutcome::Applied
            }
            Ok(resp) => {
                let text = resp
                    .error
                    .filter(|e| !e.is_empty())
                    .unwrap_or_else(|| LOOKUP_FAILED.to_string());
                tracing::warn!("freight lookup for {} rejected: {}", ticket.region, text);
                self.set_message(text);
                LookupOutcome::Rejected
            }
            Err(e) => {
                tracing::error!("freight lookup for {} failed: {}", ticket.region, e);
                self.set_message(NETWORK_FAILED);
                LookupOutcome::Failed
            }
        }
    }

    pub async fn on_selection_change(
        &mut self,
        source: &dyn FreightSource,
        region: &str,
    ) -> Option<LookupOutcome> {
        let ticket = self.begin_lookup(region)?;
        let result = source.fetch_freight(&ticket.region).await;
        Some(self.complete_lookup(&ticket, result))
    }
}
