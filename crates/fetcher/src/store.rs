use cwa_weather_core::ensure_parent_dir;
use slog::{debug, info, warn, Logger};
use sqlx::{
    sqlite::{SqliteConnectOptions, SqliteSynchronous},
    Connection, Executor, Sqlite, SqliteConnection,
};
use std::time::Duration;

use crate::{NormalizedFragment, PrecipitationReading, WeatherObservation};

pub const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS weather (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    location TEXT,
    date TEXT,
    min_temp REAL,
    max_temp REAL,
    description TEXT,
    inserted_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
);

CREATE TABLE IF NOT EXISTS precipitation (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    location TEXT,
    date TEXT,
    period TEXT,
    precipitation REAL,
    inserted_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
);
"#;

/// Per-table outcome of one `write_all` call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WriteSummary {
    pub weather_inserted: usize,
    pub weather_failed: usize,
    pub precipitation_inserted: usize,
    pub precipitation_failed: usize,
}

/// Row counts currently held by the store.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StoreTotals {
    pub weather: i64,
    pub precipitation: i64,
}

/// Append-only writer over the SQLite store file.
pub struct StoreWriter {
    conn: SqliteConnection,
    path: String,
    logger: Logger,
}

impl StoreWriter {
    /// Opens (creating if needed) the store file. Every commit is fsynced.
    pub async fn open(path: &str, logger: Logger) -> Result<Self, sqlx::Error> {
        ensure_parent_dir(path)?;

        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true)
            .synchronous(SqliteSynchronous::Full)
            .busy_timeout(Duration::from_secs(5));

        let conn = SqliteConnection::connect_with(&options).await?;
        info!(logger, "opened store at {}", path);

        Ok(Self {
            conn,
            path: path.to_string(),
            logger,
        })
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// Creates both tables when missing. Existing tables and rows are left alone.
    pub async fn ensure_schema(&mut self) -> Result<(), sqlx::Error> {
        sqlx::raw_sql(SCHEMA).execute(&mut self.conn).await?;
        debug!(self.logger, "schema ready in {}", self.path);
        Ok(())
    }

    pub async fn insert_weather(&mut self, row: &WeatherObservation) -> Result<i64, sqlx::Error> {
        insert_weather_row(&mut self.conn, row).await
    }

    pub async fn insert_precipitation(
        &mut self,
        row: &PrecipitationReading,
    ) -> Result<i64, sqlx::Error> {
        insert_precipitation_row(&mut self.conn, row).await
    }

    /// Appends every candidate row in one transaction.
    ///
    /// A rejected row is logged and counted; it does not undo earlier rows or
    /// stop later ones. Only failing to open or commit the transaction is an
    /// error.
    ///
    /// A failure that rolls back the whole transaction (`SQLITE_FULL`, a
    /// `RAISE(ROLLBACK)` trigger) discards the rows written before it, and the
    /// rows after it run in autocommit mode and persist. The commit then fails
    /// and the call returns that error, so the counts are not reported even
    /// though some rows reached the store.
    pub async fn write_all(
        &mut self,
        fragments: &[NormalizedFragment],
    ) -> Result<WriteSummary, sqlx::Error> {
        let mut summary = WriteSummary::default();
        let mut tx = self.conn.begin().await?;

        for fragment in fragments {
            if let Some(row) = &fragment.weather {
                match insert_weather_row(&mut *tx, row).await {
                    Ok(_) => summary.weather_inserted += 1,
                    Err(e) => {
                        summary.weather_failed += 1;
                        warn!(
                            self.logger,
                            "failed to insert weather row (location: {:?}, date: {:?}): {}",
                            row.location,
                            row.date,
                            e
                        );
                    }
                }
            }

            for row in &fragment.precipitation {
                match insert_precipitation_row(&mut *tx, row).await {
                    Ok(_) => summary.precipitation_inserted += 1,
                    Err(e) => {
                        summary.precipitation_failed += 1;
                        warn!(
                            self.logger,
                            "failed to insert precipitation row (location: {:?}, date: {:?}, period: {:?}): {}",
                            row.location,
                            row.date,
                            row.period,
                            e
                        );
                    }
                }
            }
        }

        tx.commit().await?;
        Ok(summary)
    }

    pub async fn totals(&mut self) -> Result<StoreTotals, sqlx::Error> {
        let weather: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM weather")
            .fetch_one(&mut self.conn)
            .await?;
        let precipitation: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM precipitation")
            .fetch_one(&mut self.conn)
            .await?;
        Ok(StoreTotals {
            weather,
            precipitation,
        })
    }

    pub async fn close(self) -> Result<(), sqlx::Error> {
        debug!(self.logger, "closing store {}", self.path);
        self.conn.close().await
    }
}

async fn insert_weather_row<'e, E>(executor: E, row: &WeatherObservation) -> Result<i64, sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    let result = sqlx::query(
        "INSERT INTO weather (location, date, min_temp, max_temp, description)
         VALUES (?, ?, ?, ?, ?)",
    )
    .bind(row.location.as_deref())
    .bind(row.date.as_deref())
    .bind(row.min_temp)
    .bind(row.max_temp)
    .bind(row.description.as_deref())
    .execute(executor)
    .await?;
    Ok(result.last_insert_rowid())
}

async fn insert_precipitation_row<'e, E>(
    executor: E,
    row: &PrecipitationReading,
) -> Result<i64, sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    let result = sqlx::query(
        "INSERT INTO precipitation (location, date, period, precipitation)
         VALUES (?, ?, ?, ?)",
    )
    .bind(row.location.as_deref())
    .bind(row.date.as_deref())
    .bind(row.period.as_deref())
    .bind(row.precipitation)
    .execute(executor)
    .await?;
    Ok(result.last_insert_rowid())
}
