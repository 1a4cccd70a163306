use std::sync::Arc;

use axum::{
    extract::{Query, State},
    response::Html,
};
use log::warn;

use crate::{
    db::{ReadError, RowFilter, Table},
    templates::{weather_page, WeatherPageData},
    AppState,
};

/// Handler for the weather page (GET /)
pub async fn weather_handler(
    State(state): State<Arc<AppState>>,
    Query(filter): Query<RowFilter>,
) -> Html<String> {
    let data = match build_weather_data(&state, &filter).await {
        Ok(data) => data,
        Err(e) => {
            warn!("failed to read weather rows: {}", e);
            WeatherPageData {
                location: filter.location().map(str::to_string),
                error: Some(e.to_string()),
                ..WeatherPageData::default()
            }
        }
    };
    Html(weather_page(&data).into_string())
}

async fn build_weather_data(
    state: &Arc<AppState>,
    filter: &RowFilter,
) -> Result<WeatherPageData, ReadError> {
    let locations = state.weather_db.locations(Table::Weather).await?;
    let rows = state.weather_db.weather(filter).await?;

    Ok(WeatherPageData {
        rows,
        locations,
        location: filter.location().map(str::to_string),
        error: None,
    })
}
