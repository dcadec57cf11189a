use disaster_watch::config::AppConfig;
use disaster_watch::core::error::WatchError;
use disaster_watch::core::types::DisasterType;
use disaster_watch::pipeline::collector::{fetch_disasters, try_fetch_disasters};
use disaster_watch::pipeline::normalizer::NormalizeOptions;
use disaster_watch::sources::eonet::EonetClient;
use httpmock::prelude::*;

const FIXTURE: &str = include_str!("../fixtures/eonet-open-events.json");

fn config_for(url: String) -> AppConfig {
    AppConfig {
        feed_url: url,
        timeout_ms: 2000,
        user_agent: "dw-test".to_string(),
        ..AppConfig::default()
    }
}

fn options(cfg: &AppConfig) -> NormalizeOptions {
    NormalizeOptions::from_config(cfg, chrono::Utc::now())
}

#[tokio::test]
async fn fetches_open_events_from_mock_feed() {
    let server = MockServer::start_async().await;
    let feed = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/api/v3/events")
                .query_param("status", "open");
            then.status(200)
                .header("content-type", "application/json")
                .body(FIXTURE);
        })
        .await;

    let cfg = config_for(server.url("/api/v3/events"));
    let client = EonetClient::new(&cfg).unwrap();
    let disasters = fetch_disasters(&client, &options(&cfg)).await;

    feed.assert_async().await;
    let ids: Vec<&str> = disasters.iter().map(|d| d.id.as_str()).collect();
    assert_eq!(
        ids,
        vec!["EONET_6002", "EONET_6005", "EONET_6001", "EONET_6003", "EONET_6007"]
    );
    assert_eq!(disasters[0].location, "Assam, India");
    assert_eq!(disasters[1].disaster_type, DisasterType::Earthquake);
    assert_eq!(disasters[1].coordinates, (37.3, 136.9));
    assert_eq!(disasters[3].location, "Tropical Cyclone Remal, India");
    assert_eq!(disasters[4].coordinates, (0.0, 0.0));
}

#[tokio::test]
async fn forwards_optional_query_parameters() {
    let server = MockServer::start_async().await;
    let feed = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/events")
                .query_param("status", "open")
                .query_param("limit", "20")
                .query_param("days", "7");
            then.status(200).body(r#"{"events": []}"#);
        })
        .await;

    let cfg = AppConfig {
        query_limit: Some(20),
        query_days: Some(7),
        ..config_for(server.url("/events"))
    };
    let client = EonetClient::new(&cfg).unwrap();
    let disasters = try_fetch_disasters(&client, &options(&cfg)).await.unwrap();

    feed.assert_async().await;
    assert!(disasters.is_empty());
}

#[tokio::test]
async fn server_error_yields_empty_list() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/v3/events");
            then.status(500).body("upstream down");
        })
        .await;

    let cfg = config_for(server.url("/api/v3/events"));
    let client = EonetClient::new(&cfg).unwrap();

    let err = try_fetch_disasters(&client, &options(&cfg))
        .await
        .unwrap_err();
    assert!(matches!(err, WatchError::Http(_)));
    assert!(fetch_disasters(&client, &options(&cfg)).await.is_empty());
}

#[tokio::test]
async fn malformed_body_yields_empty_list() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/v3/events");
            then.status(200).body("<html>maintenance</html>");
        })
        .await;

    let cfg = config_for(server.url("/api/v3/events"));
    let client = EonetClient::new(&cfg).unwrap();

    let err = try_fetch_disasters(&client, &options(&cfg))
        .await
        .unwrap_err();
    assert!(matches!(err, WatchError::Parse(_)));
    assert!(fetch_disasters(&client, &options(&cfg)).await.is_empty());
}

#[tokio::test]
async fn unreachable_feed_yields_empty_list() {
    let cfg = config_for("http://127.0.0.1:1/api/v3/events".to_string());
    let client = EonetClient::new(&cfg).unwrap();
    assert!(fetch_disasters(&client, &options(&cfg)).await.is_empty());
}
