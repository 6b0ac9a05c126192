// Telemetry storage. The report engine only sees the TelemetrySource trait; TelemetryRepo is
// the SQLite implementation (sqlx pool, WAL). Timestamps are epoch milliseconds, UTC.

mod schema;

use std::future::Future;
use std::path::Path;
use std::str::FromStr;

use futures_util::StreamExt;
use futures_util::stream::BoxStream;
use sqlx::Row;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use tracing::instrument;

use crate::models::{ConnectivityState, DataBounds, EventRecord, StateSample};

/// Range-bounded reads and min/max lookups over one device's two record streams.
/// Every read returns records sorted by timestamp ascending; ranges are inclusive.
pub trait TelemetrySource: Send + Sync {
    fn event_bounds(&self) -> impl Future<Output = anyhow::Result<Option<DataBounds>>> + Send;

    fn sample_bounds(&self) -> impl Future<Output = anyhow::Result<Option<DataBounds>>> + Send;

    fn events_in_range(
        &self,
        from_ts: i64,
        to_ts: i64,
    ) -> impl Future<Output = anyhow::Result<Vec<EventRecord>>> + Send;

    fn samples_in_range(
        &self,
        from_ts: i64,
        to_ts: i64,
    ) -> impl Future<Output = anyhow::Result<Vec<StateSample>>> + Send;

    /// Every stored sample, oldest first, decoded one row at a time.
    fn sample_stream(&self) -> BoxStream<'_, anyhow::Result<StateSample>>;
}

pub struct TelemetryRepo {
    pool: SqlitePool,
}

impl TelemetryRepo {
    /// Connect to SQLite at `path`, create parent dir and DB if missing, enable WAL + pragmas.
    pub async fn connect(path: &str, max_pool_size: u32) -> anyhow::Result<Self> {
        if let Some(parent) = Path::new(path).parent() {
            std::fs::create_dir_all(parent)?;
        }
        let opts = SqliteConnectOptions::from_str(&format!("sqlite:{}", path))?
            .create_if_missing(true)
            .journal_mode(sqlx::sqlite::SqliteJournalMode::Wal)
            .busy_timeout(std::time::Duration::from_secs(5))
            .synchronous(sqlx::sqlite::SqliteSynchronous::Normal);
        let pool = SqlitePoolOptions::new()
            .max_connections(max_pool_size)
            .connect_with(opts)
            .await?;
        Ok(Self { pool })
    }

    pub async fn init(&self) -> anyhow::Result<()> {
        schema::init_tables(&self.pool).await
    }

    #[instrument(skip(self, records), fields(repo = "telemetry", operation = "save_events", records_count = records.len()))]
    pub async fn save_events(&self, records: &[EventRecord]) -> anyhow::Result<()> {
        if records.is_empty() {
            return Ok(());
        }
        let mut tx = self.pool.begin().await?;
        for r in records {
            sqlx::query("INSERT INTO event_records (created_at, value) VALUES ($1, $2)")
                .bind(r.timestamp)
                .bind(r.value)
                .execute(&mut *tx)
                .await?;
        }
        tx.commit().await?;
        Ok(())
    }

    #[instrument(skip(self, samples), fields(repo = "telemetry", operation = "save_samples", samples_count = samples.len()))]
    pub async fn save_samples(&self, samples: &[StateSample]) -> anyhow::Result<()> {
        if samples.is_empty() {
            return Ok(());
        }
        let mut tx = self.pool.begin().await?;
        for s in samples {
            sqlx::query("INSERT INTO state_samples (created_at, state) VALUES ($1, $2)")
                .bind(s.timestamp)
                .bind(s.state.as_label())
                .execute(&mut *tx)
                .await?;
        }
        tx.commit().await?;
        Ok(())
    }

    async fn bounds(&self, table: &str) -> anyhow::Result<Option<DataBounds>> {
        let sql = format!("SELECT MIN(created_at), MAX(created_at) FROM {}", table);
        let (min, max) = sqlx::query_as::<_, (Option<i64>, Option<i64>)>(&sql)
            .fetch_one(&self.pool)
            .await?;
        Ok(match (min, max) {
            (Some(min), Some(max)) => Some(DataBounds { min, max }),
            _ => None,
        })
    }

    fn parse_sample_row(row: &sqlx::sqlite::SqliteRow) -> anyhow::Result<StateSample> {
        let created_at: i64 = row.try_get("created_at")?;
        let state: String = row.try_get("state")?;
        Ok(StateSample::new(created_at, ConnectivityState::from_label(&state)))
    }
}

impl TelemetrySource for TelemetryRepo {
    #[instrument(skip(self), fields(repo = "telemetry", operation = "event_bounds"))]
    async fn event_bounds(&self) -> anyhow::Result<Option<DataBounds>> {
        self.bounds("event_records").await
    }

    #[instrument(skip(self), fields(repo = "telemetry", operation = "sample_bounds"))]
    async fn sample_bounds(&self) -> anyhow::Result<Option<DataBounds>> {
        self.bounds("state_samples").await
    }

    #[instrument(skip(self), fields(repo = "telemetry", operation = "events_in_range"))]
    async fn events_in_range(&self, from_ts: i64, to_ts: i64) -> anyhow::Result<Vec<EventRecord>> {
        let rows = sqlx::query(
            "SELECT created_at, value FROM event_records
             WHERE created_at >= $1 AND created_at <= $2 ORDER BY created_at ASC, id ASC",
        )
        .bind(from_ts)
        .bind(to_ts)
        .fetch_all(&self.pool)
        .await?;

        let mut out = Vec::with_capacity(rows.len());
        for row in rows {
            let created_at: i64 = row.try_get("created_at")?;
            let value: f64 = row.try_get("value")?;
            out.push(EventRecord::new(created_at, value));
        }
        Ok(out)
    }

    #[instrument(skip(self), fields(repo = "telemetry", operation = "samples_in_range"))]
    async fn samples_in_range(&self, from_ts: i64, to_ts: i64) -> anyhow::Result<Vec<StateSample>> {
        let rows = sqlx::query(
            "SELECT created_at, state FROM state_samples
             WHERE created_at >= $1 AND created_at <= $2 ORDER BY created_at ASC, id ASC",
        )
        .bind(from_ts)
        .bind(to_ts)
        .fetch_all(&self.pool)
        .await?;

        let mut out = Vec::with_capacity(rows.len());
        for row in rows {
            out.push(Self::parse_sample_row(&row)?);
        }
        Ok(out)
    }

    fn sample_stream(&self) -> BoxStream<'_, anyhow::Result<StateSample>> {
        tracing::debug!(repo = "telemetry", operation = "sample_stream", "opening sample cursor");
        sqlx::query("SELECT created_at, state FROM state_samples ORDER BY created_at ASC, id ASC")
            .fetch(&self.pool)
            .map(|row| Self::parse_sample_row(&row?))
            .boxed()
    }
}
