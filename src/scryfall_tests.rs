//! Tests for the Scryfall search client.

use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use std::time::Duration;

use super::{
    build_client, fetch_all_printings, fetch_set_from, CardPrinting, ScryfallCard, SearchPage,
};
use crate::config::{Currency, FetchConfig, USER_AGENT};
use crate::error::{ProxyError, ProxyResult};

/// Helper: fetch one set with a fresh client, as `fetch_all_printings` does per run.
fn fetch(config: &FetchConfig, set_code: &str) -> ProxyResult<Vec<ScryfallCard>> {
    let client = build_client(config)?;
    fetch_set_from(&client, config, set_code)
}

/// Helper: minimal card JSON as returned inside a search page.
fn card_json(name: &str, set: &str, usd: Option<&str>, eur: Option<&str>) -> serde_json::Value {
    serde_json::json!({
        "object": "card",
        "name": name,
        "set": set,
        "collector_number": "1",
        "prices": { "usd": usd, "usd_foil": null, "eur": eur, "eur_foil": null, "tix": null }
    })
}

fn page_json(cards: Vec<serde_json::Value>, next_page: Option<String>) -> serde_json::Value {
    serde_json::json!({
        "object": "list",
        "total_cards": cards.len(),
        "has_more": next_page.is_some(),
        "next_page": next_page,
        "data": cards
    })
}

fn not_found_json() -> serde_json::Value {
    serde_json::json!({
        "object": "error",
        "code": "not_found",
        "status": 404,
        "details": "Your query didn't match any cards."
    })
}

// ── deserialization ──────────────────────────────────────────────────

#[test]
fn search_page_deserializes_without_next_page() {
    let json = r#"{
        "object": "list",
        "total_cards": 1,
        "has_more": false,
        "data": [
            { "name": "Lightning Bolt", "set": "wc97", "prices": { "usd": "0.45", "eur": null } }
        ]
    }"#;

    let page: SearchPage = serde_json::from_str(json).unwrap();
    assert!(!page.has_more);
    assert!(page.next_page.is_none());
    assert_eq!(page.data.len(), 1);
    assert_eq!(page.data[0].prices.usd.as_deref(), Some("0.45"));
    assert_eq!(page.data[0].prices.eur, None);
}

#[test]
fn card_without_prices_defaults_to_none() {
    let card: ScryfallCard = serde_json::from_str(r#"{ "name": "Island", "set": "ced" }"#).unwrap();
    assert_eq!(card.prices.usd, None);
    assert_eq!(card.prices.eur, None);
}

#[test]
fn flatten_keeps_name_prices_and_set() {
    let card: ScryfallCard =
        serde_json::from_value(card_json("Sol Ring", "cei", Some("120.00"), Some("99.50"))).unwrap();
    let printing = CardPrinting::from(card);

    assert_eq!(printing.name, "Sol Ring");
    assert_eq!(printing.set, "cei");
    assert_eq!(printing.price(Currency::Usd), Some("120.00"));
    assert_eq!(printing.price(Currency::Eur), Some("99.50"));
}

// ── fetch_set_from ───────────────────────────────────────────────────

#[tokio::test]
async fn fetch_set_sends_search_parameters() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/cards/search"))
        .and(query_param("q", "set:wc97"))
        .and(query_param("order", "name"))
        .and(query_param("unique", "prints"))
        .and(header("User-Agent", USER_AGENT))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_json(
            vec![card_json("Lightning Bolt", "wc97", Some("0.45"), None)],
            None,
        )))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = FetchConfig::with_base_url(&mock_server.uri());
    let result = tokio::task::spawn_blocking(move || fetch(&config, "WC97"))
        .await
        .unwrap();

    let cards = result.unwrap();
    assert_eq!(cards.len(), 1);
    assert_eq!(cards[0].name, "Lightning Bolt");
}

#[tokio::test]
async fn fetch_set_follows_next_page() {
    let mock_server = MockServer::start().await;
    let next = format!("{}/cards/search?page=2", mock_server.uri());

    Mock::given(method("GET"))
        .and(path("/cards/search"))
        .and(query_param("order", "name"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_json(
            vec![
                card_json("Ancestral Recall", "ced", Some("300.00"), None),
                card_json("Black Lotus", "ced", Some("5000.00"), None),
            ],
            Some(next),
        )))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/cards/search"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_json(
            vec![card_json("Time Walk", "ced", Some("400.00"), None)],
            None,
        )))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = FetchConfig::with_base_url(&mock_server.uri());
    let result = tokio::task::spawn_blocking(move || fetch(&config, "CED"))
        .await
        .unwrap();

    let names: Vec<String> = result.unwrap().into_iter().map(|c| c.name).collect();
    assert_eq!(names, vec!["Ancestral Recall", "Black Lotus", "Time Walk"]);
}

#[tokio::test]
async fn fetch_set_404_returns_http_status() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/cards/search"))
        .respond_with(ResponseTemplate::new(404).set_body_json(not_found_json()))
        .mount(&mock_server)
        .await;

    let config = FetchConfig::with_base_url(&mock_server.uri());
    let result = tokio::task::spawn_blocking(move || fetch(&config, "XXX"))
        .await
        .unwrap();

    match result {
        Err(ProxyError::HttpStatus(status)) => assert_eq!(status.as_u16(), 404),
        other => panic!("Expected HttpStatus error, got {:?}", other),
    }
}

#[tokio::test]
async fn fetch_set_error_on_later_page_discards_earlier_pages() {
    let mock_server = MockServer::start().await;
    let next = format!("{}/cards/search?page=2", mock_server.uri());

    Mock::given(method("GET"))
        .and(path("/cards/search"))
        .and(query_param("order", "name"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_json(
            vec![card_json("Island", "wc98", Some("0.20"), None)],
            Some(next),
        )))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/cards/search"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let config = FetchConfig::with_base_url(&mock_server.uri());
    let result = tokio::task::spawn_blocking(move || fetch(&config, "WC98"))
        .await
        .unwrap();

    assert!(matches!(result, Err(ProxyError::HttpStatus(_))));
}

#[tokio::test]
async fn fetch_set_invalid_json_returns_parse_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/cards/search"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&mock_server)
        .await;

    let config = FetchConfig::with_base_url(&mock_server.uri());
    let result = tokio::task::spawn_blocking(move || fetch(&config, "WC99"))
        .await
        .unwrap();

    assert!(matches!(result, Err(ProxyError::Parse(_))));
}

#[tokio::test]
async fn fetch_set_stops_when_has_more_is_false() {
    let mock_server = MockServer::start().await;
    let next = format!("{}/cards/search?page=2", mock_server.uri());

    Mock::given(method("GET"))
        .and(path("/cards/search"))
        .and(query_param("order", "name"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "object": "list",
            "has_more": false,
            "next_page": next,
            "data": [card_json("Lightning Bolt", "wc97", Some("0.45"), None)]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/cards/search"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&mock_server)
        .await;

    let config = FetchConfig::with_base_url(&mock_server.uri());
    let result = tokio::task::spawn_blocking(move || fetch(&config, "WC97"))
        .await
        .unwrap();

    let cards = result.unwrap();
    assert_eq!(cards.len(), 1);
    assert_eq!(cards[0].name, "Lightning Bolt");
}

#[tokio::test]
async fn slow_response_is_awaited_without_timeout() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/cards/search"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(page_json(
                    vec![card_json("Black Lotus", "ced", Some("5000.00"), None)],
                    None,
                ))
                .set_delay(Duration::from_millis(300)),
        )
        .mount(&mock_server)
        .await;

    let config = FetchConfig::with_base_url(&mock_server.uri());
    assert_eq!(config.timeout, None);
    let result = tokio::task::spawn_blocking(move || fetch(&config, "CED"))
        .await
        .unwrap();

    assert_eq!(result.unwrap().len(), 1);
}

#[tokio::test]
async fn configured_timeout_is_applied_to_client() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/cards/search"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(page_json(Vec::new(), None))
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&mock_server)
        .await;

    let mut config = FetchConfig::with_base_url(&mock_server.uri());
    config.timeout = Some(Duration::from_millis(100));
    let result = tokio::task::spawn_blocking(move || fetch(&config, "CED"))
        .await
        .unwrap();

    assert!(matches!(result, Err(ProxyError::Network(_))));
}

// ── fetch_all_printings ──────────────────────────────────────────────

#[tokio::test]
async fn failing_set_contributes_nothing() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/cards/search"))
        .and(query_param("q", "set:wc97"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_json(
            vec![card_json("Lightning Bolt", "wc97", Some("0.45"), Some("0.40"))],
            None,
        )))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/cards/search"))
        .and(query_param("q", "set:wc98"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/cards/search"))
        .and(query_param("q", "set:cei"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_json(
            vec![card_json("Lightning Bolt", "cei", Some("30.00"), None)],
            None,
        )))
        .mount(&mock_server)
        .await;

    let config = FetchConfig::with_base_url(&mock_server.uri());
    let sets = vec!["WC97".to_string(), "WC98".to_string(), "CEI".to_string()];
    let printings = tokio::task::spawn_blocking(move || fetch_all_printings(&config, &sets))
        .await
        .unwrap()
        .unwrap();

    let set_codes: Vec<&str> = printings.iter().map(|p| p.set.as_str()).collect();
    assert_eq!(set_codes, vec!["wc97", "cei"]);
    assert_eq!(printings[0].eur.as_deref(), Some("0.40"));
}
