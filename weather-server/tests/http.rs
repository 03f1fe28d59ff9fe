//! End-to-end tests of the HTTP surface, with both upstreams mocked.

use weather_core::{Config, ProviderId};
use weather_server::{ServeHandle, serve};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn config_for(upstream: &MockServer) -> Config {
    let mut config = Config::default();
    for id in ProviderId::all() {
        config.set_provider_base_url(*id, upstream.uri());
    }
    config.set_provider_api_key(ProviderId::OpenWeatherMap, "OW_KEY".into());
    config.set_provider_api_key(ProviderId::WeatherUnderground, "WU_KEY".into());
    config
}

async fn start(config: Config) -> (ServeHandle, String) {
    let handle = serve(config, "127.0.0.1:0").await.unwrap();
    let base = format!("http://127.0.0.1:{}", handle.port);
    (handle, base)
}

async fn mount_boston(upstream: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/data/2.5/weather"))
        .and(query_param("APPID", "OW_KEY"))
        .and(query_param("q", "Boston"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "main": { "temp": 290.0 }
        })))
        .mount(upstream)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/WU_KEY/conditions/q/Boston.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "current_observation": { "temp_c": 16.85 }
        })))
        .mount(upstream)
        .await;
}

#[tokio::test]
async fn hello_returns_greeting() {
    let upstream = MockServer::start().await;
    let (handle, base) = start(config_for(&upstream)).await;

    let res = reqwest::get(format!("{base}/hello")).await.unwrap();
    assert_eq!(res.status(), 200);
    assert_eq!(res.text().await.unwrap(), "Hello World!");

    handle.shutdown().await.unwrap();
}

#[tokio::test]
async fn weather_returns_mean_temperature_as_json() {
    let upstream = MockServer::start().await;
    mount_boston(&upstream).await;
    let (handle, base) = start(config_for(&upstream)).await;

    let res = reqwest::get(format!("{base}/weather/Boston")).await.unwrap();
    assert_eq!(res.status(), 200);
    assert_eq!(
        res.headers()["content-type"],
        "application/json; charset=utf-8"
    );

    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["city"], "Boston");
    let temp = body["temp"].as_f64().expect("temp must be numeric");
    assert!((temp - 290.0).abs() < 1e-9);
    assert!(body["took"].is_string());

    handle.shutdown().await.unwrap();
}

#[tokio::test]
async fn provider_failure_is_500_with_raw_message() {
    let upstream = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/data/2.5/weather"))
        .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
            "cod": 401,
            "message": "Invalid API key."
        })))
        .mount(&upstream)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/WU_KEY/conditions/q/Boston.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "current_observation": { "temp_c": 16.85 }
        })))
        .mount(&upstream)
        .await;
    let (handle, base) = start(config_for(&upstream)).await;

    let res = reqwest::get(format!("{base}/weather/Boston")).await.unwrap();
    assert_eq!(res.status(), 500);

    let body = res.text().await.unwrap();
    assert!(body.starts_with("missing field `main`"), "{body}");

    handle.shutdown().await.unwrap();
}

#[tokio::test]
async fn empty_city_is_forwarded_as_empty_string() {
    let upstream = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/data/2.5/weather"))
        .and(query_param("q", ""))
        .respond_with(ResponseTemplate::new(404).set_body_json(serde_json::json!({
            "cod": "404",
            "message": "city not found"
        })))
        .mount(&upstream)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/WU_KEY/conditions/q/.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "response": { "error": { "type": "querynotfound" } }
        })))
        .mount(&upstream)
        .await;
    let (handle, base) = start(config_for(&upstream)).await;

    let res = reqwest::get(format!("{base}/weather/")).await.unwrap();
    assert_eq!(res.status(), 500);

    // Unmatched requests get an empty 404 body, which would fail with "EOF while parsing".
    let body = res.text().await.unwrap();
    assert!(body.contains("missing field"), "{body}");

    handle.shutdown().await.unwrap();
}

#[tokio::test]
async fn unreachable_upstream_is_500() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let dead = format!("http://127.0.0.1:{}", listener.local_addr().unwrap().port());
    drop(listener);

    let mut config = Config::default();
    for id in ProviderId::all() {
        config.set_provider_base_url(*id, dead.clone());
    }
    let (handle, base) = start(config).await;

    let res = reqwest::get(format!("{base}/weather/Boston")).await.unwrap();
    assert_eq!(res.status(), 500);
    assert!(!res.text().await.unwrap().is_empty());

    handle.shutdown().await.unwrap();
}
