use std::{collections::VecDeque, sync::Mutex};

use async_trait::async_trait;
use orderboard::{
    dom::{self, Document},
    error::FetchError,
    events::FieldEvent,
    models::{FreightResponse, RegionsResponse},
    services::api_client::FreightSource,
    widgets::{
        freight_lookup::{self, FreightLookupController},
        LookupOutcome,
    },
};
use serde_json::json;

struct FakeFreight {
    regions: Mutex<Option<Result<RegionsResponse, FetchError>>>,
    answers: Mutex<VecDeque<Result<FreightResponse, FetchError>>>,
    requested: Mutex<Vec<String>>,
}

impl FakeFreight {
    fn new(
        regions: Result<RegionsResponse, FetchError>,
        answers: Vec<Result<FreightResponse, FetchError>>,
    ) -> Self {
        Self {
            regions: Mutex::new(Some(regions)),
            answers: Mutex::new(answers.into()),
            requested: Mutex::new(vec![]),
        }
    }

    fn answering(answers: Vec<Result<FreightResponse, FetchError>>) -> Self {
        Self::new(Ok(regions(json!({ "ufs": ["SP", "RJ"] }))), answers)
    }

    fn requested(&self) -> Vec<String> {
        self.requested.lock().unwrap().clone()
    }
}

#[async_trait]
impl FreightSource for FakeFreight {
    async fn fetch_regions(&self) -> Result<RegionsResponse, FetchError> {
        let next = self.regions.lock().unwrap().take();
        next.unwrap_or_else(|| Err(FetchError::Network("regions already served".to_string())))
    }

    async fn fetch_freight(&self, region: &str) -> Result<FreightResponse, FetchError> {
        self.requested.lock().unwrap().push(region.to_string());
        let next = self.answers.lock().unwrap().pop_front();
        next.unwrap_or_else(|| Err(FetchError::Network("no more answers".to_string())))
    }
}

fn regions(v: serde_json::Value) -> RegionsResponse {
    serde_json::from_value(v).unwrap()
}

fn freight(v: serde_json::Value) -> FreightResponse {
    serde_json::from_value(v).unwrap()
}

fn option_values(c: &FreightLookupController) -> Vec<String> {
    c.view()
        .region_select
        .options
        .iter()
        .map(|o| o.value.clone())
        .collect()
}

fn message(c: &FreightLookupController) -> String {
    c.view().message.clone().unwrap_or_default()
}

#[tokio::test]
async fn options_are_placeholder_plus_regions_in_order() {
    let source = FakeFreight::answering(vec![]);
    let mut c = FreightLookupController::mount(&Document::standard()).unwrap();

    assert!(c.load_options(&source).await);
    assert_eq!(c.view().region_select.placeholder, "UF...");
    assert_eq!(option_values(&c), vec!["SP", "RJ"]);
    assert_eq!(message(&c), "");
}

#[tokio::test]
async fn loading_message_is_shown_while_options_load() {
    let mut c = FreightLookupController::mount(&Document::standard()).unwrap();
    c.begin_load_options();
    assert_eq!(message(&c), freight_lookup::LOADING_REGIONS);
}

#[tokio::test]
async fn failed_options_leave_only_the_placeholder() {
    let source = FakeFreight::new(Err(FetchError::Status(500)), vec![]);
    let mut c = FreightLookupController::mount(&Document::standard()).unwrap();

    assert!(!c.load_options(&source).await);
    assert!(option_values(&c).is_empty());
    assert_eq!(message(&c), freight_lookup::REGIONS_FAILED);

    let source = FakeFreight::new(Ok(regions(json!({ "ok": false, "ufs": ["SP"] }))), vec![]);
    let mut c = FreightLookupController::mount(&Document::standard()).unwrap();
    assert!(!c.load_options(&source).await);
    assert!(option_values(&c).is_empty());
}

#[tokio::test]
async fn successful_lookup_writes_field_and_fires_events() {
    let source = FakeFreight::answering(vec![Ok(freight(json!({ "ok": true, "frete": 12.5, "uf": "SP" })))]);
    let mut c = FreightLookupController::mount(&Document::standard()).unwrap();
    let mut events = c.subscribe_field();

    c.load_options(&source).await;
    let outcome = c.on_selection_change(&source, "SP").await;

    assert_eq!(outcome, Some(LookupOutcome::Applied));
    assert_eq!(c.view().field_value, "12,50");
    assert!(message(&c).contains("SP"));
    assert_eq!(message(&c), "Frete de SP aplicado.");

    assert_eq!(events.try_recv().unwrap(), FieldEvent::Input);
    assert_eq!(events.try_recv().unwrap(), FieldEvent::Change);
    assert!(events.try_recv().is_err());

    let selected: Vec<_> = c
        .view()
        .region_select
        .options
        .iter()
        .filter(|o| o.selected)
        .map(|o| o.value.as_str())
        .collect();
    assert_eq!(selected, vec!["SP"]);
}

#[tokio::test]
async fn missing_value_and_region_fall_back() {
    let source = FakeFreight::answering(vec![Ok(freight(json!({ "ok": true })))]);
    let mut c = FreightLookupController::mount(&Document::standard()).unwrap();

    c.on_selection_change(&source, " rj ").await;
    assert_eq!(source.requested(), vec!["RJ"]);
    assert_eq!(c.view().field_value, "0,00");
    assert_eq!(message(&c), "Frete de RJ aplicado.");
}

#[tokio::test]
async fn rejection_keeps_field_and_shows_error() {
    let source = FakeFreight::answering(vec![
        Ok(freight(json!({ "ok": true, "frete": 30, "uf": "SP" }))),
        Ok(freight(json!({ "ok": false, "error": "X" }))),
        Ok(freight(json!({ "ok": false }))),
    ]);
    let mut c = FreightLookupController::mount(&Document::standard()).unwrap();
    c.on_selection_change(&source, "SP").await;
    let mut events = c.subscribe_field();

    assert_eq!(
        c.on_selection_change(&source, "RJ").await,
        Some(LookupOutcome::Rejected)
    );
    assert_eq!(c.view().field_value, "30,00");
    assert_eq!(message(&c), "X");

    c.on_selection_change(&source, "RJ").await;
    assert_eq!(message(&c), freight_lookup::LOOKUP_FAILED);

    assert!(events.try_recv().is_err());
}

#[tokio::test]
async fn network_failure_shows_generic_message() {
    let source = FakeFreight::answering(vec![Err(FetchError::Network("timeout".to_string()))]);
    let mut c = FreightLookupController::mount(&Document::standard()).unwrap();

    assert_eq!(
        c.on_selection_change(&source, "SP").await,
        Some(LookupOutcome::Failed)
    );
    assert_eq!(c.view().field_value, "");
    assert_eq!(message(&c), freight_lookup::NETWORK_FAILED);
}

#[tokio::test]
async fn empty_selection_requests_nothing() {
    let source = FakeFreight::answering(vec![]);
    let mut c = FreightLookupController::mount(&Document::standard()).unwrap();

    assert_eq!(c.on_selection_change(&source, "").await, None);
    assert_eq!(c.on_selection_change(&source, "   ").await, None);
    assert!(source.requested().is_empty());
    assert_eq!(message(&c), "");
}

#[tokio::test]
async fn repeated_selection_queries_again() {
    let source = FakeFreight::answering(vec![
        Ok(freight(json!({ "ok": true, "frete": 10, "uf": "SP" }))),
        Ok(freight(json!({ "ok": true, "frete": 11, "uf": "SP" }))),
    ]);
    let mut c = FreightLookupController::mount(&Document::standard()).unwrap();

    c.on_selection_change(&source, "SP").await;
    c.on_selection_change(&source, "SP").await;
    assert_eq!(source.requested(), vec!["SP", "SP"]);
    assert_eq!(c.view().field_value, "11,00");
}

#[tokio::test]
async fn superseded_lookup_is_dropped() {
    let mut c = FreightLookupController::mount(&Document::standard()).unwrap();

    let first = c.begin_lookup("SP").unwrap();
    let second = c.begin_lookup("RJ").unwrap();
    assert!(first.cancel.is_cancelled());

    let late = freight(json!({ "ok": true, "frete": 99, "uf": "SP" }));
    assert_eq!(c.complete_lookup(&first, Ok(late)), LookupOutcome::Stale);
    assert_eq!(c.view().field_value, "");

    let fresh = freight(json!({ "ok": true, "frete": 7.25, "uf": "RJ" }));
    assert_eq!(c.complete_lookup(&second, Ok(fresh)), LookupOutcome::Applied);
    assert_eq!(c.view().field_value, "7,25");
}

#[test]
fn mount_requires_select_and_field() {
    assert!(FreightLookupController::mount(&Document::standard().without(dom::REGION_SELECT)).is_err());
    assert!(FreightLookupController::mount(&Document::standard().without(dom::FREIGHT_FIELD)).is_err());

    let c = FreightLookupController::mount(&Document::standard().without(dom::FREIGHT_MESSAGE)).unwrap();
    assert_eq!(c.view().message, None);
}
