//! Integration tests for `DataStore` using wiremock HTTP mocks.
//!
//! Each test stands up a local mock server and drives time with a
//! `ManualClock`, so cache freshness is checked without sleeping.

use std::sync::Arc;
use std::time::Duration;

use safemap_client::{
    CacheEntry, Contacts, DataStore, FetchError, FileStore, KvStore, Locations, ManualClock,
    MemoryStore, Tips,
};
use safemap_core::{Category, ValidationError};
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const T0: i64 = 1_700_000_000_000;

fn locations_json() -> serde_json::Value {
    json!([
        {
            "nome": "Delegacia da Mulher",
            "endereco": "Rua Segura, 123",
            "tipo": "delegacia",
            "lat": -23.5505,
            "lng": -46.6333,
            "cidade": "São Paulo"
        },
        {
            "nome": "Centro de Referência",
            "endereco": "Av. Principal, 456",
            "tipo": "centro",
            "lat": -22.9068,
            "lng": -43.1729
        }
    ])
}

fn test_store(
    base_url: &str,
) -> (
    DataStore<Arc<MemoryStore>, Arc<ManualClock>>,
    Arc<MemoryStore>,
    Arc<ManualClock>,
) {
    let kv = Arc::new(MemoryStore::new());
    let clock = Arc::new(ManualClock::new(T0));
    let store = DataStore::new(
        base_url,
        5,
        "safemap-test/0.1",
        Arc::clone(&kv),
        Arc::clone(&clock),
    )
    .expect("store construction should not fail");
    (store, kv, clock)
}

#[tokio::test]
async fn load_parses_locations() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/data/delegacias.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(locations_json()))
        .expect(1)
        .mount(&server)
        .await;

    let (store, _, _) = test_store(&server.uri());
    let records = store.load::<Locations>().await.expect("should load");

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].category, Category::Station);
    assert_eq!(records[1].category, Category::Center);
    assert_eq!(records[0].city.as_deref(), Some("São Paulo"));
}

#[tokio::test]
async fn cache_is_served_until_ttl_elapses() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/data/delegacias.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(locations_json()))
        .expect(2)
        .mount(&server)
        .await;

    let (store, _, clock) = test_store(&server.uri());
    store.load::<Locations>().await.expect("first load");

    clock.set(T0 + 1_799_999);
    let cached = store.load::<Locations>().await.expect("cached load");
    assert_eq!(cached.len(), 2);
    assert_eq!(
        server.received_requests().await.map(|r| r.len()),
        Some(1),
        "a fresh entry must not hit the network"
    );

    clock.set(T0 + 1_800_001);
    store.load::<Locations>().await.expect("refetch after ttl");
    assert_eq!(server.received_requests().await.map(|r| r.len()), Some(2));
}

#[tokio::test]
async fn successful_load_writes_timestamped_entry() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/dicas-seguranca"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!(["Evite áreas desertas."])))
        .mount(&server)
        .await;

    let (store, kv, _) = test_store(&server.uri());
    store.load::<Tips>().await.expect("should load");

    let raw = kv.get("dicasCache").expect("get").expect("entry written");
    let entry: CacheEntry = serde_json::from_str(&raw).expect("entry parses");
    assert_eq!(entry.timestamp, T0);
    assert_eq!(entry.dados, json!(["Evite áreas desertas."]));
}

#[tokio::test]
async fn datasets_use_independent_slots() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/dicas-seguranca"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!(["dica"])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/contatos-emergencia"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "nome": "Disque 180", "telefone": "180", "descricao": "Central de Atendimento à Mulher" }
        ])))
        .mount(&server)
        .await;

    let (store, kv, _) = test_store(&server.uri());
    let (tips, contacts) = tokio::join!(store.load::<Tips>(), store.load::<Contacts>());
    assert_eq!(tips.expect("tips").len(), 1);
    assert_eq!(contacts.expect("contacts").len(), 1);
    assert_eq!(kv.len(), 2);

    store.invalidate::<Tips>();
    assert!(kv.get("dicasCache").expect("get").is_none());
    assert!(kv.get("contatosCache").expect("get").is_some());
}

#[tokio::test]
async fn non_success_status_is_reported() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let (store, kv, _) = test_store(&server.uri());
    let err = store.load::<Contacts>().await.unwrap_err();
    assert!(
        matches!(err, FetchError::Status { status: 503, .. }),
        "unexpected error: {err:?}"
    );
    assert_eq!(err.kind(), "http_status");
    assert!(kv.is_empty(), "failures must not be cached");
}

#[tokio::test]
async fn object_payload_is_a_validation_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "erro": "indisponível" })))
        .mount(&server)
        .await;

    let (store, kv, _) = test_store(&server.uri());
    let err = store.load::<Locations>().await.unwrap_err();
    assert!(matches!(
        err,
        FetchError::Validation(ValidationError::NotACollection { .. })
    ));
    assert!(kv.is_empty());
}

#[tokio::test]
async fn malformed_json_is_a_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let (store, _, _) = test_store(&server.uri());
    let err = store.load::<Tips>().await.unwrap_err();
    assert!(matches!(err, FetchError::Decode { .. }));
    assert_eq!(err.kind(), "validation");
}

#[tokio::test]
async fn unreachable_server_is_a_transport_error() {
    let (store, _, _) = test_store("http://127.0.0.1:1");
    let err = store.load::<Tips>().await.unwrap_err();
    assert!(matches!(err, FetchError::Transport(_)));
}

#[tokio::test]
async fn stale_cache_is_replaced_after_refetch() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/dicas-seguranca"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!(["nova"])))
        .mount(&server)
        .await;

    let (store, kv, _) = test_store(&server.uri());
    let old = CacheEntry::new(json!(["antiga"]), T0 - 1_800_000);
    kv.set("dicasCache", &serde_json::to_string(&old).expect("serialize"))
        .expect("seed");

    let tips = store.load::<Tips>().await.expect("should refetch");
    assert_eq!(tips[0].text(), "nova");
}

#[tokio::test]
async fn custom_ttl_is_honoured() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!(["dica"])))
        .expect(2)
        .mount(&server)
        .await;

    let (store, _, clock) = test_store(&server.uri());
    let store = store.with_ttl(Duration::from_secs(1));
    store.load::<Tips>().await.expect("first");
    clock.advance(Duration::from_millis(1_000));
    store.load::<Tips>().await.expect("second");
}

#[tokio::test]
async fn file_backed_cache_survives_new_store() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!(["dica"])))
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().expect("tempdir");
    let clock = Arc::new(ManualClock::new(T0));
    let first = DataStore::new(
        &server.uri(),
        5,
        "safemap-test/0.1",
        FileStore::new(dir.path()),
        Arc::clone(&clock),
    )
    .expect("store");
    first.load::<Tips>().await.expect("network load");

    let second = DataStore::new(
        &server.uri(),
        5,
        "safemap-test/0.1",
        FileStore::new(dir.path()),
        Arc::clone(&clock),
    )
    .expect("store");
    let tips = second.load::<Tips>().await.expect("cached load");
    assert_eq!(tips.len(), 1);
}
