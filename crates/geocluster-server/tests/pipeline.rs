mod common;

use common::*;
use geocluster_core::{ClusterError, Dbscan, NOISE};
use geocluster_server::{ClusterPipeline, Error, GeoclusterConfig, LeafletMapRenderer};
use std::sync::Arc;
use tokio_test::{assert_err, assert_ok};

#[tokio::test]
async fn test_pipeline_reports_clusters_and_noise() {
    let renderer = Arc::new(RecordingRenderer::default());
    let pipeline = ClusterPipeline::new(
        Arc::new(StaticSource(four_quakes())),
        renderer.clone(),
        Dbscan::new(2.0, 2),
    )
    .unwrap();

    let run = pipeline.run().await.unwrap();
    assert_eq!(run.n_clusters(), 1);
    assert_eq!(run.n_noise(), 1);
    assert_eq!(run.summary.n_points, 4);
    assert_eq!(run.artifact.file_name, "recorded.html");
    assert_eq!(run.artifact.markers, 4);

    let calls = renderer.calls.lock().unwrap();
    assert_eq!(calls.as_slice(), &[vec![0, 0, 0, NOISE]]);
}

#[tokio::test]
async fn test_data_source_failure_surfaces_unchanged() {
    let renderer = Arc::new(RecordingRenderer::default());
    let pipeline = ClusterPipeline::new(
        Arc::new(FailingSource),
        renderer.clone(),
        Dbscan::new(0.2, 5),
    )
    .unwrap();

    let err = pipeline.run().await.unwrap_err();
    assert!(matches!(err, Error::DataSource(ref msg) if msg == "feed unavailable"));
    assert!(renderer.calls.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_empty_feed_renders_empty_map() {
    let renderer = Arc::new(RecordingRenderer::default());
    let pipeline = ClusterPipeline::new(
        Arc::new(StaticSource(vec![])),
        renderer.clone(),
        Dbscan::new(0.2, 5),
    )
    .unwrap();

    let run = pipeline.run().await.unwrap();
    assert_eq!(run.n_clusters(), 0);
    assert_eq!(run.n_noise(), 0);
    assert_eq!(renderer.calls.lock().unwrap().len(), 1);
}

#[test]
fn test_invalid_parameters_rejected_up_front() {
    let result = ClusterPipeline::new(
        Arc::new(StaticSource(four_quakes())),
        Arc::new(RecordingRenderer::default()),
        Dbscan::new(0.0, 5),
    );
    let err = assert_err!(result);
    assert!(matches!(
        err,
        Error::Cluster(ClusterError::InvalidParameter { name: "eps", .. })
    ));
}

#[test]
fn test_pipeline_debug_names_collaborators() {
    let pipeline = ClusterPipeline::new(
        Arc::new(StaticSource(four_quakes())),
        Arc::new(RecordingRenderer::default()),
        Dbscan::new(2.0, 2),
    )
    .unwrap();

    let debug = format!("{:?}", pipeline);
    assert!(debug.contains("static"));
    assert!(debug.contains("recording"));
}

#[test]
fn test_pipeline_with_map_renderer() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = GeoclusterConfig::default();
    config.render.output_dir = dir.path().to_path_buf();

    let pipeline = ClusterPipeline::new(
        Arc::new(StaticSource(four_quakes())),
        Arc::new(LeafletMapRenderer::new(&config.render)),
        Dbscan::new(2.0, 2),
    )
    .unwrap();

    let run = assert_ok!(tokio_test::block_on(pipeline.run()));
    assert_eq!(run.artifact.file_name, "map.html");

    let page = std::fs::read_to_string(dir.path().join("map.html")).unwrap();
    assert_eq!(page.matches(r#""color":"red""#).count(), 3);
    assert_eq!(page.matches(r#""color":"black""#).count(), 1);
}

#[test]
fn test_from_config_prefers_file_source() {
    let mut config = GeoclusterConfig::default();
    config.source.file = Some("quakes.geojson".into());
    let pipeline = ClusterPipeline::from_config(&config).unwrap();
    assert_eq!(pipeline.source_name(), "geojson-file");
    assert_eq!(pipeline.dbscan().eps(), 0.2);
    assert_eq!(pipeline.dbscan().min_samples(), 5);
}
