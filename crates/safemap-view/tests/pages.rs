//! End-to-end page flows: a wiremock origin, an in-memory cache and the
//! in-memory views.

use std::sync::Arc;

use safemap_client::{DataStore, ManualClock, MemoryStore};
use safemap_core::CategoryFilter;
use safemap_view::markup::{ERROR_CLASS, NO_DATA_CLASS};
use safemap_view::{
    Action, HtmlPanel, LoadOutcome, LocationsPage, MarkerLayer, OperationState, SafetyPanel,
    SpatialView, Trigger, Viewport,
};
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// 2024-03-05T14:07:00Z
const T0: i64 = 1_709_647_620_000;

fn data_store(base_url: &str) -> DataStore<MemoryStore, Arc<ManualClock>> {
    DataStore::new(
        base_url,
        5,
        "safemap-test/0.1",
        MemoryStore::new(),
        Arc::new(ManualClock::new(T0)),
    )
    .expect("store")
}

async fn mount_locations(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/data/delegacias.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {
                "nome": "Delegacia Centro",
                "endereco": "Rua A, 1",
                "tipo": "delegacia",
                "lat": -23.55,
                "lng": -46.63,
                "cidade": "SP"
            },
            {
                "nome": "Hospital",
                "endereco": "Rua B, 2",
                "tipo": "centro",
                "lat": -23.56,
                "lng": -46.64,
                "cidade": "SP",
                "telefone": "<script>alert(1)</script>"
            }
        ])))
        .mount(server)
        .await;
}

#[tokio::test]
async fn locations_page_loads_filters_and_escapes() {
    let server = MockServer::start().await;
    mount_locations(&server).await;
    let store = data_store(&server.uri());

    let mut page = LocationsPage::new(MarkerLayer::new(), HtmlPanel::new());
    let outcome = page.load(&store, Trigger::Startup).await;
    assert!(matches!(outcome, LoadOutcome::Loaded { count: 2 }));
    assert_eq!(page.views().map().marker_count(), 2);
    assert!(matches!(
        page.views().map().viewport(),
        Viewport::Fitted { .. }
    ));
    assert_eq!(
        page.last_updated_label().as_deref(),
        Some("05/03/2024 14:07")
    );

    let html = page.views().list().html();
    assert!(!html.contains("<script>"));
    assert!(html.contains("&lt;script&gt;"));

    page.dispatch(Action::SelectFilter(CategoryFilter::Station));
    assert_eq!(page.views().map().marker_count(), 1);
    assert_eq!(page.views().list().fragments().len(), 1);
    assert!(page.views().list().html().contains("Delegacia Centro"));
}

#[tokio::test]
async fn locations_page_recovers_through_retry() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/data/delegacias.json"))
        .respond_with(ResponseTemplate::new(500))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    mount_locations(&server).await;
    let store = data_store(&server.uri());

    let mut page = LocationsPage::new(MarkerLayer::new(), HtmlPanel::new());
    let outcome = page.load(&store, Trigger::Startup).await;
    assert!(matches!(outcome, LoadOutcome::Failed(_)));
    assert_eq!(page.operation().state(), OperationState::Error);
    assert!(page.views().list().html().contains(ERROR_CLASS));

    let outcome = page.load(&store, Trigger::Retry).await;
    assert!(outcome.is_loaded());
    assert_eq!(page.operation().state(), OperationState::Idle);
    assert_eq!(page.operation().control().enable_count(), 2);
}

#[tokio::test]
async fn contacts_button_reloads_after_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/contatos-emergencia"))
        .respond_with(ResponseTemplate::new(500))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/contatos-emergencia"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "nome": "Central da Mulher", "telefone": "180", "descricao": "Atendimento 24h" }
        ])))
        .mount(&server)
        .await;
    let store = data_store(&server.uri());

    let mut panel = SafetyPanel::new(HtmlPanel::new(), HtmlPanel::new());
    let outcome = panel.contacts.load(&store, Trigger::Startup).await;
    assert!(matches!(outcome, LoadOutcome::Failed(_)));
    assert_eq!(panel.contacts.operation().state(), OperationState::Error);

    let outcome = panel.contacts.load(&store, Trigger::User).await;
    assert!(outcome.is_loaded());
    assert_eq!(panel.contacts.operation().state(), OperationState::Idle);
    assert!(panel.contacts.list().html().contains("Central da Mulher"));
}

#[tokio::test]
async fn panel_sections_fail_independently() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/contatos-emergencia"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "nome": "Polícia Militar", "telefone": "190", "descricao": "Emergências" }
        ])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/dicas-seguranca"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;
    let store = data_store(&server.uri());

    let mut panel = SafetyPanel::new(HtmlPanel::new(), HtmlPanel::new());
    let (contacts, tips) = panel.load_all(&store, Trigger::Startup).await;

    assert!(contacts.is_loaded());
    assert!(matches!(tips, LoadOutcome::Failed(_)));
    assert!(panel.contacts.list().html().contains("Polícia Militar: 190 - Emergências"));
    assert!(panel
        .tips
        .list()
        .html()
        .contains(r#"data-operation="load_tips""#));
}

#[tokio::test]
async fn empty_tip_list_shows_no_data() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/dicas-seguranca"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/contatos-emergencia"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;
    let store = data_store(&server.uri());

    let mut panel = SafetyPanel::new(HtmlPanel::new(), HtmlPanel::new());
    panel.load_all(&store, Trigger::Startup).await;
    assert!(panel.tips.list().html().contains(NO_DATA_CLASS));
    assert!(panel.contacts.list().html().contains(NO_DATA_CLASS));
}
