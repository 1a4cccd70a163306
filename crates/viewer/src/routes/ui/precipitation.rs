use std::sync::Arc;

use axum::{
    extract::{Query, State},
    response::Html,
};
use log::warn;

use crate::{
    db::{period_breakdown, ReadError, RowFilter, Table},
    templates::{precipitation_page, PeriodBreakdown, PrecipitationPageData},
    AppState,
};

/// Handler for the precipitation page (GET /precipitation)
pub async fn precipitation_handler(
    State(state): State<Arc<AppState>>,
    Query(filter): Query<RowFilter>,
) -> Html<String> {
    let data = match build_precipitation_data(&state, &filter).await {
        Ok(data) => data,
        Err(e) => {
            warn!("failed to read precipitation rows: {}", e);
            PrecipitationPageData {
                location: filter.location().map(str::to_string),
                period: filter.period().map(str::to_string),
                date: filter.date().map(str::to_string),
                error: Some(e.to_string()),
                ..PrecipitationPageData::default()
            }
        }
    };
    Html(precipitation_page(&data).into_string())
}

async fn build_precipitation_data(
    state: &Arc<AppState>,
    filter: &RowFilter,
) -> Result<PrecipitationPageData, ReadError> {
    let locations = state.weather_db.locations(Table::Precipitation).await?;
    let periods = state.weather_db.periods().await?;
    let dates = state.weather_db.dates(filter).await?;

    // The time series spans every observation time
    let over_time = RowFilter {
        date: None,
        ..filter.clone()
    };
    let rows = state.weather_db.precipitation(&over_time).await?;

    let chosen = filter
        .date()
        .map(str::to_string)
        .or_else(|| dates.first().cloned());
    let breakdown = match (filter.location(), chosen) {
        (Some(location), Some(date)) => {
            let at = RowFilter {
                location: Some(location.to_string()),
                period: None,
                date: Some(date.clone()),
            };
            let readings = state.weather_db.precipitation(&at).await?;
            Some(PeriodBreakdown {
                location: location.to_string(),
                date,
                values: period_breakdown(&readings),
            })
        }
        _ => None,
    };

    Ok(PrecipitationPageData {
        rows,
        locations,
        location: filter.location().map(str::to_string),
        periods,
        period: filter.period().map(str::to_string),
        dates,
        date: filter.date().map(str::to_string),
        breakdown,
        error: None,
    })
}
