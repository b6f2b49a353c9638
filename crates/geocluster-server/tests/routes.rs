mod common;

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use common::*;
use geocluster_core::Dbscan;
use geocluster_server::{
    server::{build_router, state::AppState},
    ClusterPipeline, GeoclusterConfig, LeafletMapRenderer, PointSource,
};
use serde_json::Value;
use std::sync::Arc;
use tempfile::TempDir;
use tower::ServiceExt;

fn app(source: Arc<dyn PointSource>) -> (Router, AppState, TempDir) {
    let dir = tempfile::tempdir().unwrap();
    let mut config = GeoclusterConfig::default();
    config.render.output_dir = dir.path().to_path_buf();

    let pipeline = ClusterPipeline::new(
        source,
        Arc::new(LeafletMapRenderer::new(&config.render)),
        Dbscan::new(2.0, 2),
    )
    .unwrap();
    let state = AppState::with_pipeline(config, pipeline);

    (build_router(state.clone()), state, dir)
}

async fn get(router: &Router, uri: &str) -> (StatusCode, String) {
    let response = router
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8(body.to_vec()).unwrap())
}

#[tokio::test]
async fn test_health_and_ready() {
    let (router, state, _dir) = app(Arc::new(StaticSource(four_quakes())));

    assert_eq!(get(&router, "/health").await, (StatusCode::OK, "OK".to_string()));
    assert_eq!(get(&router, "/ready").await.0, StatusCode::OK);

    state.set_ready(false);
    assert_eq!(get(&router, "/ready").await.0, StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn test_index_links_to_results() {
    let (router, _, _dir) = app(Arc::new(StaticSource(four_quakes())));
    let (status, body) = get(&router, "/").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains(r#"href="/results""#));
}

#[tokio::test]
async fn test_results_page_shows_counts_and_map() {
    let (router, _, dir) = app(Arc::new(StaticSource(four_quakes())));

    let (status, body) = get(&router, "/results").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains(r#"<strong id="n-clusters">1</strong>"#));
    assert!(body.contains(r#"<strong id="n-noise">1</strong>"#));
    assert!(body.contains(r#"src="/maps/map.html""#));
    assert!(dir.path().join("map.html").exists());

    let (status, map) = get(&router, "/maps/map.html").await;
    assert_eq!(status, StatusCode::OK);
    assert!(map.contains("L.circleMarker"));
}

#[tokio::test]
async fn test_api_results_json() {
    let (router, _, _dir) = app(Arc::new(StaticSource(four_quakes())));

    let (status, body) = get(&router, "/api/results").await;
    assert_eq!(status, StatusCode::OK);

    let json: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["summary"]["n_clusters"], 1);
    assert_eq!(json["summary"]["n_noise"], 1);
    assert_eq!(json["summary"]["n_points"], 4);
    assert_eq!(json["artifact"]["file_name"], "map.html");
    assert_eq!(json["min_samples"], 2);
}

#[tokio::test]
async fn test_last_results() {
    let (router, _, _dir) = app(Arc::new(StaticSource(four_quakes())));

    let (status, body) = get(&router, "/api/results/last").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let json: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["error"]["type"], "not_found");

    get(&router, "/api/results").await;
    let (status, body) = get(&router, "/api/results/last").await;
    assert_eq!(status, StatusCode::OK);
    let json: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["summary"]["n_clusters"], 1);
}

#[tokio::test]
async fn test_source_failure_is_bad_gateway() {
    let (router, state, _dir) = app(Arc::new(FailingSource));

    for uri in ["/results", "/api/results"] {
        let (status, body) = get(&router, uri).await;
        assert_eq!(status, StatusCode::BAD_GATEWAY, "{}", uri);

        let json: Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json["error"]["type"], "data_source_error");
        assert!(json["error"]["message"]
            .as_str()
            .unwrap()
            .contains("feed unavailable"));
    }

    assert!(state.last_run().is_none());
}

#[tokio::test]
async fn test_api_info() {
    let (router, _, _dir) = app(Arc::new(StaticSource(four_quakes())));

    let (status, body) = get(&router, "/api/info").await;
    assert_eq!(status, StatusCode::OK);
    let json: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["name"], "geocluster");
    assert_eq!(json["source"], "static");
    assert_eq!(json["clustering"]["eps"], 2.0);
}
