use crate::helpers::{
    count_rows, open_readonly, spawn_keyed_upstream, spawn_slow_upstream, spawn_upstream,
    table_names, test_logger, RAINFALL_STATIONS,
};
use axum::http::StatusCode;
use fetcher::{FetchError, FetchOrchestrator, PipelineConfig, ResponseShape};
use sqlx::Connection;
use std::{path::Path, time::Duration};

fn config(url: String, store: &Path) -> PipelineConfig {
    PipelineConfig {
        url,
        store_path: store.to_string_lossy().to_string(),
        timeout: Duration::from_secs(5),
        max_retries: 0,
        ..PipelineConfig::default()
    }
}

#[tokio::test]
async fn run_stores_observations_and_rainfall() {
    let dir = tempfile::tempdir().unwrap();
    let store = dir.path().join("data.db");
    let url = spawn_upstream(StatusCode::OK, RAINFALL_STATIONS).await;

    let summary = FetchOrchestrator::new(config(url, &store), test_logger())
        .run()
        .await
        .expect("Run failed");

    assert_eq!(summary.shape, ResponseShape::CwaOpenDataStation);
    assert_eq!(summary.fragments_seen, 4);
    assert_eq!(summary.fragments_skipped, 1);
    assert_eq!(summary.written.weather_inserted, 3);
    assert_eq!(summary.written.weather_failed, 0);
    assert_eq!(summary.written.precipitation_inserted, 11);
    assert_eq!(summary.written.precipitation_failed, 0);
    assert_eq!(summary.totals.weather, 3);
    assert_eq!(summary.totals.precipitation, 11);

    let mut conn = open_readonly(&store).await;
    let tamsui: (Option<f64>, Option<f64>, Option<String>) = sqlx::query_as(
        "SELECT min_temp, max_temp, description FROM weather WHERE location = 'Tamsui'",
    )
    .fetch_one(&mut conn)
    .await
    .unwrap();
    assert_eq!(tamsui, (Some(19.8), Some(24.1), Some("Overcast".to_string())));

    let periods: Vec<(String, Option<f64>)> = sqlx::query_as(
        "SELECT period, precipitation FROM precipitation WHERE location = 'Tamsui' ORDER BY id",
    )
    .fetch_all(&mut conn)
    .await
    .unwrap();
    assert_eq!(
        periods,
        vec![("Now".to_string(), Some(0.5)), ("Past1hr".to_string(), None)]
    );

    // Rainfall-only station still lists with its observation time
    let banqiao: Vec<(Option<String>, Option<f64>, Option<String>)> = sqlx::query_as(
        "SELECT date, min_temp, description FROM weather WHERE location = 'Banqiao'",
    )
    .fetch_all(&mut conn)
    .await
    .unwrap();
    assert_eq!(banqiao.len(), 1);
    assert!(banqiao[0].0.is_some());
    assert_eq!((banqiao[0].1, banqiao[0].2.as_deref()), (None, None));
    conn.close().await.unwrap();
}

#[tokio::test]
async fn second_run_is_additive() {
    let dir = tempfile::tempdir().unwrap();
    let store = dir.path().join("data.db");
    let url = spawn_upstream(StatusCode::OK, RAINFALL_STATIONS).await;
    let orchestrator = FetchOrchestrator::new(config(url, &store), test_logger());

    let first = orchestrator.run().await.unwrap();
    let weather_after_first = count_rows(&store, "weather").await;
    let precipitation_after_first = count_rows(&store, "precipitation").await;

    let second = orchestrator.run().await.unwrap();

    assert_eq!(
        count_rows(&store, "weather").await,
        weather_after_first + second.written.weather_inserted as i64
    );
    assert_eq!(
        count_rows(&store, "precipitation").await,
        precipitation_after_first + second.written.precipitation_inserted as i64
    );
    assert_eq!(second.totals.weather, 2 * first.totals.weather);
    assert_eq!(table_names(&store).await, vec!["precipitation", "weather"]);
}

#[tokio::test]
async fn error_status_aborts_before_store() {
    let dir = tempfile::tempdir().unwrap();
    let store = dir.path().join("data.db");
    let url = spawn_upstream(StatusCode::INTERNAL_SERVER_ERROR, RAINFALL_STATIONS).await;

    let err = FetchOrchestrator::new(config(url, &store), test_logger())
        .run()
        .await
        .unwrap_err();

    match err {
        FetchError::Status { status, .. } => assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR),
        other => panic!("expected status error, got {}", other),
    }
    assert!(!store.exists());
}

#[tokio::test]
async fn invalid_json_aborts_before_store() {
    let dir = tempfile::tempdir().unwrap();
    let store = dir.path().join("data.db");
    let url = spawn_upstream(StatusCode::OK, "<html>maintenance</html>").await;

    let err = FetchOrchestrator::new(config(url, &store), test_logger())
        .run()
        .await
        .unwrap_err();

    assert!(matches!(err, FetchError::InvalidJson(_)));
    assert!(!store.exists());
}

#[tokio::test]
async fn unknown_shape_aborts_before_store() {
    let dir = tempfile::tempdir().unwrap();
    let store = dir.path().join("data.db");
    let url = spawn_upstream(StatusCode::OK, r#"{"success": "true", "result": {}}"#).await;

    let err = FetchOrchestrator::new(config(url, &store), test_logger())
        .run()
        .await
        .unwrap_err();

    match err {
        FetchError::Shape(shape) => assert!(shape.attempted.contains(&"records.location")),
        other => panic!("expected shape error, got {}", other),
    }
    assert!(!store.exists());
}

#[tokio::test]
async fn empty_fragment_list_completes_with_zero_rows() {
    let dir = tempfile::tempdir().unwrap();
    let store = dir.path().join("data.db");
    let url = spawn_upstream(StatusCode::OK, r#"{"records": {"location": []}}"#).await;

    let summary = FetchOrchestrator::new(config(url, &store), test_logger())
        .run()
        .await
        .unwrap();

    assert_eq!(summary.shape, ResponseShape::RecordsLocation);
    assert_eq!(summary.fragments_seen, 0);
    assert_eq!(table_names(&store).await, vec!["precipitation", "weather"]);
    assert_eq!(count_rows(&store, "weather").await, 0);
}

#[tokio::test]
async fn unreachable_upstream_is_a_transport_error() {
    let dir = tempfile::tempdir().unwrap();
    let store = dir.path().join("data.db");

    let err = FetchOrchestrator::new(
        config("http://127.0.0.1:1/data".to_string(), &store),
        test_logger(),
    )
    .run()
    .await
    .unwrap_err();

    assert!(matches!(err, FetchError::Transport { .. }));
    assert!(!store.exists());
}

#[tokio::test]
async fn slow_upstream_hits_the_timeout() {
    let dir = tempfile::tempdir().unwrap();
    let store = dir.path().join("data.db");
    let url = spawn_slow_upstream(Duration::from_secs(10)).await;

    let mut config = config(url, &store);
    config.timeout = Duration::from_millis(300);

    let err = FetchOrchestrator::new(config, test_logger())
        .run()
        .await
        .unwrap_err();

    assert!(matches!(err, FetchError::Transport { .. }));
}

#[tokio::test]
async fn authorization_is_sent_as_query_parameter() {
    let dir = tempfile::tempdir().unwrap();
    let store = dir.path().join("data.db");
    let url = spawn_keyed_upstream("CWA-TEST-KEY", RAINFALL_STATIONS).await;

    let err = FetchOrchestrator::new(config(url.clone(), &store), test_logger())
        .run()
        .await
        .unwrap_err();
    assert!(matches!(err, FetchError::Status { .. }));

    let mut keyed = config(url, &store);
    keyed.authorization = Some("CWA-TEST-KEY".to_string());
    let summary = FetchOrchestrator::new(keyed, test_logger())
        .run()
        .await
        .unwrap();
    assert_eq!(summary.fragments_seen, 4);
}

#[tokio::test]
async fn raw_payload_is_dumped_when_configured() {
    let dir = tempfile::tempdir().unwrap();
    let store = dir.path().join("data.db");
    let raw = dir.path().join("raw.json");
    let url = spawn_upstream(StatusCode::OK, RAINFALL_STATIONS).await;

    let mut config = config(url, &store);
    config.raw_dump = Some(raw.to_string_lossy().to_string());
    FetchOrchestrator::new(config, test_logger())
        .run()
        .await
        .unwrap();

    let dumped: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&raw).unwrap()).unwrap();
    let original: serde_json::Value = serde_json::from_str(RAINFALL_STATIONS).unwrap();
    assert_eq!(dumped, original);
}

#[tokio::test]
async fn unwritable_raw_dump_does_not_fail_the_run() {
    let dir = tempfile::tempdir().unwrap();
    let store = dir.path().join("data.db");
    let url = spawn_upstream(StatusCode::OK, RAINFALL_STATIONS).await;

    let mut config = config(url, &store);
    config.raw_dump = Some(
        dir.path()
            .join("missing/dir/raw.json")
            .to_string_lossy()
            .to_string(),
    );

    let summary = FetchOrchestrator::new(config, test_logger())
        .run()
        .await
        .unwrap();
    assert_eq!(summary.written.weather_inserted, 3);
}
