use async_trait::async_trait;
use cwa_weather_core::path_exists;
use log::debug;
use serde::Deserialize;
use sqlx::{
    sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions},
    FromRow,
};
use std::time::Duration;

use super::order_periods;

#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct WeatherRow {
    pub id: i64,
    pub location: Option<String>,
    pub date: Option<String>,
    pub min_temp: Option<f64>,
    pub max_temp: Option<f64>,
    pub description: Option<String>,
    pub inserted_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct PrecipitationRow {
    pub id: i64,
    pub location: Option<String>,
    pub date: Option<String>,
    pub period: Option<String>,
    pub precipitation: Option<f64>,
    pub inserted_at: Option<String>,
}

/// Date selector value meaning "the newest observation time".
pub const LATEST: &str = "latest";

/// Query-string filters shared by both pages. An empty value (the "All"
/// option of a selector) means no filter.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RowFilter {
    pub location: Option<String>,
    pub period: Option<String>,
    pub date: Option<String>,
}

impl RowFilter {
    pub fn location(&self) -> Option<&str> {
        non_empty(&self.location)
    }

    pub fn period(&self) -> Option<&str> {
        non_empty(&self.period)
    }

    /// `None` for an empty value or `latest`.
    pub fn date(&self) -> Option<&str> {
        non_empty(&self.date).filter(|date| !date.eq_ignore_ascii_case(LATEST))
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Table {
    Weather,
    Precipitation,
}

impl Table {
    pub fn name(&self) -> &'static str {
        match self {
            Table::Weather => "weather",
            Table::Precipitation => "precipitation",
        }
    }
}

#[derive(thiserror::Error, Debug)]
pub enum ReadError {
    #[error("No store found at {0}; run fetch-and-store first")]
    StoreMissing(String),
    #[error("The {} table does not exist yet; run fetch-and-store first", .0.name())]
    MissingTable(Table),
    #[error("Failed to query store: {0}")]
    Query(#[from] sqlx::Error),
}

#[async_trait]
pub trait WeatherReader: Sync + Send {
    /// Weather rows in insertion (id) order.
    async fn weather(&self, filter: &RowFilter) -> Result<Vec<WeatherRow>, ReadError>;
    /// Precipitation rows in insertion (id) order.
    async fn precipitation(&self, filter: &RowFilter) -> Result<Vec<PrecipitationRow>, ReadError>;
    /// Distinct non-null locations of one table, alphabetical.
    async fn locations(&self, table: Table) -> Result<Vec<String>, ReadError>;
    /// Distinct non-null rainfall periods in display order.
    async fn periods(&self) -> Result<Vec<String>, ReadError>;
    /// Distinct non-null rainfall observation times, newest first. Only the
    /// location filter applies.
    async fn dates(&self, filter: &RowFilter) -> Result<Vec<String>, ReadError>;
}

/// Read-only view over the store file written by the fetcher.
pub struct SqliteWeatherReader {
    path: String,
    pool: SqlitePool,
}

impl SqliteWeatherReader {
    /// Connections are made on first query, so the viewer can start before
    /// the first fetch has created the store.
    pub fn new(path: &str) -> Self {
        let options = SqliteConnectOptions::new()
            .filename(path)
            .read_only(true)
            .create_if_missing(false)
            .busy_timeout(Duration::from_secs(5));

        let pool = SqlitePoolOptions::new()
            .max_connections(4)
            .acquire_timeout(Duration::from_secs(10))
            .connect_lazy_with(options);

        Self {
            path: path.to_string(),
            pool,
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    fn map_error(&self, table: Table, err: sqlx::Error) -> ReadError {
        if !path_exists(&self.path) {
            return ReadError::StoreMissing(self.path.clone());
        }
        let missing_table = err
            .as_database_error()
            .map(|db_err| db_err.message().starts_with("no such table"))
            .unwrap_or(false);
        if missing_table {
            ReadError::MissingTable(table)
        } else {
            ReadError::Query(err)
        }
    }
}

#[async_trait]
impl WeatherReader for SqliteWeatherReader {
    async fn weather(&self, filter: &RowFilter) -> Result<Vec<WeatherRow>, ReadError> {
        debug!("querying weather rows, location: {:?}", filter.location());
        sqlx::query_as::<_, WeatherRow>(
            "SELECT id, location, date, min_temp, max_temp, description,
                    CAST(inserted_at AS TEXT) AS inserted_at
             FROM weather
             WHERE (?1 IS NULL OR location = ?1)
             ORDER BY id",
        )
        .bind(filter.location())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| self.map_error(Table::Weather, e))
    }

    async fn precipitation(&self, filter: &RowFilter) -> Result<Vec<PrecipitationRow>, ReadError> {
        debug!(
            "querying precipitation rows, location: {:?}, period: {:?}, date: {:?}",
            filter.location(),
            filter.period(),
            filter.date()
        );
        sqlx::query_as::<_, PrecipitationRow>(
            "SELECT id, location, date, period, precipitation,
                    CAST(inserted_at AS TEXT) AS inserted_at
             FROM precipitation
             WHERE (?1 IS NULL OR location = ?1)
               AND (?2 IS NULL OR period = ?2)
               AND (?3 IS NULL OR date = ?3)
             ORDER BY id",
        )
        .bind(filter.location())
        .bind(filter.period())
        .bind(filter.date())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| self.map_error(Table::Precipitation, e))
    }

    async fn locations(&self, table: Table) -> Result<Vec<String>, ReadError> {
        let query = format!(
            "SELECT DISTINCT location FROM {} WHERE location IS NOT NULL ORDER BY location",
            table.name()
        );
        sqlx::query_scalar::<_, String>(&query)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| self.map_error(table, e))
    }

    async fn periods(&self) -> Result<Vec<String>, ReadError> {
        let periods = sqlx::query_scalar::<_, String>(
            "SELECT DISTINCT period FROM precipitation WHERE period IS NOT NULL",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| self.map_error(Table::Precipitation, e))?;
        Ok(order_periods(periods))
    }

    async fn dates(&self, filter: &RowFilter) -> Result<Vec<String>, ReadError> {
        sqlx::query_scalar::<_, String>(
            "SELECT DISTINCT date FROM precipitation
             WHERE date IS NOT NULL AND (?1 IS NULL OR location = ?1)
             ORDER BY date DESC",
        )
        .bind(filter.location())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| self.map_error(Table::Precipitation, e))
    }
}
