use crate::{
    db::{SqliteWeatherReader, WeatherReader},
    precipitation_handler, weather_handler,
};
use axum::{
    body::Body,
    extract::Request,
    middleware::{self, Next},
    response::IntoResponse,
    routing::get,
    Router,
};
use log::info;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub weather_db: Arc<dyn WeatherReader>,
}

pub fn build_app_state(store_path: &str) -> AppState {
    let reader = SqliteWeatherReader::new(store_path);
    info!("Reading store at {}", reader.path());

    AppState {
        weather_db: Arc::new(reader),
    }
}

pub fn app(app_state: AppState) -> Router {
    Router::new()
        .route("/", get(weather_handler))
        .route("/precipitation", get(precipitation_handler))
        .with_state(Arc::new(app_state))
        .layer(middleware::from_fn(log_request))
}

async fn log_request(request: Request<Body>, next: Next) -> impl IntoResponse {
    let now = time::OffsetDateTime::now_utc();
    let path = request
        .uri()
        .path_and_query()
        .map(|p| p.as_str().to_string())
        .unwrap_or_default();
    info!(target: "http_request", "new request, {} {}", request.method().as_str(), path);

    let response = next.run(request).await;
    let response_time = time::OffsetDateTime::now_utc() - now;
    info!(target: "http_response", "response, code: {}, time: {}", response.status().as_str(), response_time);

    response
}
