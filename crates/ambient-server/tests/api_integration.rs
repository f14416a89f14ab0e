//! Integration tests for the API routes using an in-process router.

use std::net::SocketAddr;

use axum::body::Body;
use axum::extract::ConnectInfo;
use axum::http::{header, Request, StatusCode};
use tempfile::TempDir;
use tower::ServiceExt;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use ambient_core::Config;
use ambient_server::{router, AppState};

/// Config wired to a temp cache dir and the given upstream endpoints.
fn test_config(cache_dir: &TempDir, geo_base: &str, owm: Option<(&str, &str)>) -> Config {
    let mut config = Config::default();
    config.cache.directory = cache_dir.path().to_path_buf();
    config.upstream.geolocation_base_url = geo_base.to_string();
    config.upstream.geolocation_timeout_secs = 2;
    config.upstream.openweather_timeout_secs = 2;
    if let Some((base, key)) = owm {
        config.upstream.openweather_base_url = base.to_string();
        config.upstream.openweather_api_key = Some(key.to_string());
    }
    config
}

fn test_router(config: Config) -> axum::Router {
    router(AppState::from_config(config).unwrap())
}

/// GET with a synthetic client address (stands in for the TCP peer info
/// the real server attaches).
fn get_request(uri: &str) -> Request<Body> {
    let mut request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    let addr: SocketAddr = "127.0.0.1:4000".parse().unwrap();
    request.extensions_mut().insert(ConnectInfo(addr));
    request
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_health_is_always_ok() {
    let cache_dir = TempDir::new().unwrap();
    let app = test_router(test_config(&cache_dir, "http://127.0.0.1:1", None));

    let response = app.oneshot(get_request("/api/health")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["success"], true);
    assert!(body["message"].as_str().unwrap().contains("running"));
    assert!(body["timestamp"].is_string());
}

#[tokio::test]
async fn test_sun_requires_coordinates() {
    let cache_dir = TempDir::new().unwrap();
    let app = test_router(test_config(&cache_dir, "http://127.0.0.1:1", None));

    for uri in ["/api/sun", "/api/sun?lat=40.7", "/api/sun?lng=-74.0", "/api/sun?lat=&lng="] {
        let response = app
            .clone()
            .oneshot(get_request(uri))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "uri: {uri}");
        let body = body_json(response).await;
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], "Latitude and longitude required");
    }
}

#[tokio::test]
async fn test_sun_rejects_malformed_coordinates() {
    let cache_dir = TempDir::new().unwrap();
    let app = test_router(test_config(&cache_dir, "http://127.0.0.1:1", None));

    let response = app
        .oneshot(get_request("/api/sun?lat=abc&lng=-74.0060"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_sun_computes_and_caches() {
    let cache_dir = TempDir::new().unwrap();
    let app = test_router(test_config(&cache_dir, "http://127.0.0.1:1", None));

    let response = app
        .oneshot(get_request("/api/sun?lat=40.7128&lng=-74.0060"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["success"], true);

    let data = &body["data"];
    let elevation = data["elevation"].as_f64().unwrap();
    let azimuth = data["azimuth"].as_f64().unwrap();
    assert!((-90.0..=90.0).contains(&elevation));
    assert!((0.0..360.0).contains(&azimuth));
    assert!(data["phase"].is_string());
    assert!(data["timestamp"].is_i64());

    // The computed reading was written through to the file cache
    let entries: Vec<_> = std::fs::read_dir(cache_dir.path())
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(entries.len(), 1);
    assert!(entries[0].starts_with("sun_40.7128_-74.0060_"));
}

#[tokio::test]
async fn test_sun_serves_cached_reading() {
    let cache_dir = TempDir::new().unwrap();
    let config = test_config(&cache_dir, "http://127.0.0.1:1", None);
    let app = test_router(config);

    let first = body_json(
        app.clone()
            .oneshot(get_request("/api/sun?lat=40.7128&lng=-74.0060"))
            .await
            .unwrap(),
    )
    .await;
    let second = body_json(
        app.oneshot(get_request("/api/sun?lat=40.7128&lng=-74.0060"))
            .await
            .unwrap(),
    )
    .await;

    // Same key bucket, so the second response replays the first payload,
    // including its timestamp
    assert_eq!(first["data"], second["data"]);
}

#[tokio::test]
async fn test_weather_requires_coordinates() {
    let cache_dir = TempDir::new().unwrap();
    let app = test_router(test_config(
        &cache_dir,
        "http://127.0.0.1:1",
        Some(("http://127.0.0.1:1", "test-key")),
    ));

    let response = app.oneshot(get_request("/api/weather")).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"], "Latitude and longitude required");
}

#[tokio::test]
async fn test_weather_without_api_key_is_configuration_error() {
    let cache_dir = TempDir::new().unwrap();
    let app = test_router(test_config(&cache_dir, "http://127.0.0.1:1", None));

    let response = app
        .oneshot(get_request("/api/weather?lat=40.7128&lng=-74.0060"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_json(response).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "OpenWeatherMap API key not configured");
}

#[tokio::test]
async fn test_weather_fetches_maps_and_caches() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/weather"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "weather": [{"description": "clear sky", "icon": "01d"}],
            "main": {"temp": 18.2, "pressure": 1021, "humidity": 55},
            "wind": {"speed": 2.1, "deg": 140},
            "clouds": {"all": 0}
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let cache_dir = TempDir::new().unwrap();
    let app = test_router(test_config(
        &cache_dir,
        "http://127.0.0.1:1",
        Some((&mock_server.uri(), "test-key")),
    ));

    let response = app
        .clone()
        .oneshot(get_request("/api/weather?lat=40.7128&lng=-74.0060"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["temp"], 18.2);
    assert_eq!(body["data"]["description"], "clear sky");
    assert_eq!(body["data"]["wind_deg"], 140.0);

    // Second request is served from the cache; the mock expects exactly
    // one upstream hit
    let cached = app
        .oneshot(get_request("/api/weather?lat=40.7128&lng=-74.0060"))
        .await
        .unwrap();
    assert_eq!(cached.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_weather_upstream_failure_is_500() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/weather"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&mock_server)
        .await;

    let cache_dir = TempDir::new().unwrap();
    let app = test_router(test_config(
        &cache_dir,
        "http://127.0.0.1:1",
        Some((&mock_server.uri(), "test-key")),
    ));

    let response = app
        .oneshot(get_request("/api/weather?lat=40.7128&lng=-74.0060"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_json(response).await;
    assert_eq!(body["error"], "Failed to get weather data");
}

#[tokio::test]
async fn test_locate_success_caches_by_ip() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/127.0.0.1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "status": "success",
            "lat": 47.6062,
            "lon": -122.3321,
            "city": "Seattle",
            "country": "United States",
            "timezone": "America/Los_Angeles"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let cache_dir = TempDir::new().unwrap();
    let app = test_router(test_config(&cache_dir, &mock_server.uri(), None));

    let body = body_json(app.clone().oneshot(get_request("/api/locate")).await.unwrap()).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["city"], "Seattle");

    // Cached under the client IP; no second upstream call
    let again = body_json(app.oneshot(get_request("/api/locate")).await.unwrap()).await;
    assert_eq!(again["data"]["city"], "Seattle");
    assert!(cache_dir.path().join("locate_127.0.0.1.json").exists());
}

#[tokio::test]
async fn test_locate_falls_back_when_collaborator_unreachable() {
    let cache_dir = TempDir::new().unwrap();
    let app = test_router(test_config(&cache_dir, "http://127.0.0.1:1", None));

    let response = app.oneshot(get_request("/api/locate")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["latitude"], 40.7128);
    assert_eq!(body["data"]["longitude"], -74.0060);
    assert_eq!(body["data"]["city"], "New York");
    assert_eq!(body["data"]["country"], "US");
    assert_eq!(body["data"]["timezone"], "America/New_York");
}

#[tokio::test]
async fn test_locate_fail_status_also_falls_back_without_caching() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/127.0.0.1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "status": "fail",
            "message": "private range"
        })))
        .mount(&mock_server)
        .await;

    let cache_dir = TempDir::new().unwrap();
    let app = test_router(test_config(&cache_dir, &mock_server.uri(), None));

    let body = body_json(app.oneshot(get_request("/api/locate")).await.unwrap()).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["city"], "New York");

    // Fallbacks are not persisted
    assert!(!cache_dir.path().join("locate_127.0.0.1.json").exists());
}

#[tokio::test]
async fn test_cors_header_present_in_permissive_mode() {
    let cache_dir = TempDir::new().unwrap();
    let app = test_router(test_config(&cache_dir, "http://127.0.0.1:1", None));

    let mut request = get_request("/api/health");
    request
        .headers_mut()
        .insert(header::ORIGIN, "https://example.com".parse().unwrap());

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(
        response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .map(|v| v.to_str().unwrap()),
        Some("*")
    );
}
