use axum::{extract::Query, http::StatusCode, routing::get, Router};
use slog::{o, Discard, Logger};
use sqlx::{sqlite::SqliteConnectOptions, Connection, SqliteConnection};
use std::{collections::HashMap, path::Path, time::Duration};
use tokio::net::TcpListener;

pub const RAINFALL_STATIONS: &str = include_str!("fixtures/rainfall_stations.json");

pub fn test_logger() -> Logger {
    Logger::root(Discard, o!())
}

/// Serves `body` with `status` at `/data` and returns the URL.
pub async fn spawn_upstream(status: StatusCode, body: &str) -> String {
    let body = body.to_string();
    let app = Router::new().route("/data", get(move || async move { (status, body) }));
    serve(app).await
}

/// Serves `body` only to requests carrying `Authorization=<key>`.
pub async fn spawn_keyed_upstream(key: &str, body: &str) -> String {
    let key = key.to_string();
    let body = body.to_string();
    let app = Router::new().route(
        "/data",
        get(move |Query(params): Query<HashMap<String, String>>| async move {
            if params.get("Authorization") == Some(&key) {
                (StatusCode::OK, body)
            } else {
                (StatusCode::UNAUTHORIZED, String::from("{}"))
            }
        }),
    );
    serve(app).await
}

/// Answers only after `delay`.
pub async fn spawn_slow_upstream(delay: Duration) -> String {
    let app = Router::new().route(
        "/data",
        get(move || async move {
            tokio::time::sleep(delay).await;
            "{}"
        }),
    );
    serve(app).await
}

async fn serve(app: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind upstream stub");
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}/data", addr)
}

pub async fn open_readonly(path: &Path) -> SqliteConnection {
    let options = SqliteConnectOptions::new().filename(path).read_only(true);
    SqliteConnection::connect_with(&options)
        .await
        .expect("Failed to open store")
}

pub async fn count_rows(path: &Path, table: &str) -> i64 {
    let mut conn = open_readonly(path).await;
    let count: i64 = sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {}", table))
        .fetch_one(&mut conn)
        .await
        .unwrap();
    conn.close().await.unwrap();
    count
}

pub async fn table_names(path: &Path) -> Vec<String> {
    let mut conn = open_readonly(path).await;
    let names: Vec<String> = sqlx::query_scalar(
        "SELECT name FROM sqlite_master WHERE type = 'table' AND name NOT LIKE 'sqlite_%' ORDER BY name",
    )
    .fetch_all(&mut conn)
    .await
    .unwrap();
    conn.close().await.unwrap();
    names
}
