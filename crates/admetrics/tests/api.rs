use std::path::PathBuf;

use admetrics::api::{router, AppState};
use admetrics_core::dataset::{Dataset, FilterDefaults};
use admetrics_core::report::ReportOptions;
use admetrics_loader::load_directory;
use axum::body::Body;
use axum::http::Request;
use axum::Router;
use http_body_util::BodyExt;
use hyper::StatusCode;
use serde_json::Value;
use tower::ServiceExt;

fn fixture_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../admetrics-loader/tests/data")
}

fn app() -> Router {
    let sources = load_directory(fixture_dir()).expect("fixtures load");
    let state = AppState::new(
        Dataset::new(sources),
        FilterDefaults::default(),
        ReportOptions::default(),
    );
    router(state)
}

async fn get(uri: &str) -> (StatusCode, Vec<u8>) {
    let response = app()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    (status, body.to_vec())
}

async fn get_json(uri: &str) -> (StatusCode, Value) {
    let (status, body) = get(uri).await;
    (status, serde_json::from_slice(&body).expect("json body"))
}

fn close(value: &Value, expected: f64) -> bool {
    value
        .as_f64()
        .is_some_and(|actual| (actual - expected).abs() < 1e-6)
}

#[tokio::test]
async fn health_is_ok() {
    let (status, body) = get("/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, b"ok");
}

#[tokio::test]
async fn options_describe_the_dataset() {
    let (status, json) = get_json("/api/options").await;
    assert_eq!(status, StatusCode::OK);

    assert_eq!(json["date_bounds"]["min"], "2025-05-17");
    assert_eq!(json["date_bounds"]["max"], "2025-05-18");
    assert_eq!(
        json["regions"],
        serde_json::json!(["NY", "CA", "TX", "WA"])
    );
    assert_eq!(json["platforms"].as_array().map(Vec::len), Some(3));
    assert_eq!(json["default_filter"]["bucket"], "week");
}

#[tokio::test]
async fn dashboard_without_parameters_uses_defaults() {
    let (status, json) = get_json("/api/dashboard").await;
    assert_eq!(status, StatusCode::OK);

    assert_eq!(json["filter"]["date_start"], "2025-05-17");
    assert_eq!(json["filter"]["date_end"], "2025-05-18");
    assert_eq!(json["filter"]["regions"], serde_json::json!(["CA", "NY", "TX"]));

    let trend = json["trend"].as_array().unwrap();
    assert_eq!(trend.len(), 1);
    assert_eq!(trend[0]["date"], "2025-05-12");
    assert!(close(&trend[0]["spend"], 650.75));
    assert!(close(&trend[0]["total_revenue"], 31230.0));
}

#[tokio::test]
async fn dashboard_applies_explicit_filter() {
    let (status, json) = get_json(
        "/api/dashboard?start=2025-05-16&end=2025-05-20&platforms=google&regions=NY&bucket=day",
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let trend = json["trend"].as_array().unwrap();
    assert_eq!(trend.len(), 5);
    assert!(close(&trend[0]["spend"], 151.25));
    assert!(close(&trend[2]["spend"], 0.0));

    let campaigns = json["campaigns"].as_array().unwrap();
    assert_eq!(campaigns.len(), 1);
    assert_eq!(campaigns[0]["campaign"], "Search Brand");
    assert!(close(&campaigns[0]["spend"], 291.25));

    assert_eq!(json["platforms"][0]["platform"], "Google");
}

#[tokio::test]
async fn empty_platform_list_selects_no_ads() {
    let (status, json) = get_json("/api/dashboard?platforms=&start=2025-05-16&end=2025-05-20").await;
    assert_eq!(status, StatusCode::OK);

    assert_eq!(json["platforms"], serde_json::json!([]));
    assert_eq!(json["campaigns"], serde_json::json!([]));
    assert!(close(&json["kpis"]["roas"], 0.0));
    assert!(json["kpis"]["profit_margin"].as_f64().unwrap() > 0.0);
    assert!(json["kpis"]["aov"].as_f64().unwrap() > 0.0);
}

#[tokio::test]
async fn ranking_and_top_are_honoured() {
    let (status, json) = get_json(
        "/api/dashboard?start=2025-05-16&end=2025-05-20&regions=NY,CA,TX,WA&ranking=spend&top=2",
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let campaigns = json["campaigns"].as_array().unwrap();
    assert_eq!(campaigns.len(), 2);
    assert_eq!(campaigns[0]["campaign"], "Spring Lookalike");
    assert_eq!(campaigns[1]["campaign"], "Creator Spark");
}

#[tokio::test]
async fn invalid_parameters_are_bad_requests() {
    for uri in [
        "/api/dashboard?start=2025-05-20&end=2025-05-16",
        "/api/dashboard?start=May%2016",
        "/api/dashboard?bucket=hourly",
        "/api/dashboard?platforms=google,myspace",
        "/api/dashboard?ranking=clicks",
        "/api/dashboard?top=many",
    ] {
        let (status, json) = get_json(uri).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
        assert!(json["error"].is_string(), "{uri}");
    }
}
