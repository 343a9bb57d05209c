//! Parameterized access to the `logs` table.

use crate::models::log::{
    filter::LogFilter,
    log_entry::{LogEntry, LogRow},
    new_log::NewLog,
};
use sqlx::{QueryBuilder, Sqlite, SqlitePool};
use std::collections::BTreeMap;

const LOG_COLUMNS: &str =
    "log_id, source, message, context, level, level_name, channel, extra, created_at";

/// Log store over a SQLite pool. Every value reaches SQLite as a bound
/// parameter; no business validation happens here.
#[derive(Clone)]
pub struct LogStore {
    pool: SqlitePool,
}

impl LogStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert one normalized record and return its `log_id`.
    pub async fn insert(&self, log: &NewLog) -> Result<i64, sqlx::Error> {
        let res = sqlx::query(
            "INSERT INTO logs (source, message, context, level, level_name, channel, extra, created_at) VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&log.source)
        .bind(&log.message)
        .bind(&log.context)
        .bind(log.level)
        .bind(&log.level_name)
        .bind(&log.channel)
        .bind(&log.extra)
        .bind(&log.created_at)
        .execute(&self.pool)
        .await?;
        Ok(res.last_insert_rowid())
    }

    /// Filtered page of logs, newest first.
    pub async fn list(
        &self,
        filter: &LogFilter,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<LogEntry>, sqlx::Error> {
        let mut qb = QueryBuilder::<Sqlite>::new(format!("SELECT {LOG_COLUMNS} FROM logs"));
        push_filters(&mut qb, filter);
        qb.push(" ORDER BY log_id DESC LIMIT ")
            .push_bind(limit)
            .push(" OFFSET ")
            .push_bind(offset);
        let rows = qb.build_query_as::<LogRow>().fetch_all(&self.pool).await?;
        Ok(rows.into_iter().map(LogEntry::from).collect())
    }

    /// Number of rows matching `filter`.
    pub async fn count(&self, filter: &LogFilter) -> Result<i64, sqlx::Error> {
        let mut qb = QueryBuilder::<Sqlite>::new("SELECT COUNT(*) FROM logs");
        push_filters(&mut qb, filter);
        qb.build_query_scalar::<i64>().fetch_one(&self.pool).await
    }

    /// Levels present in the table, keyed by code.
    pub async fn distinct_levels(&self) -> Result<BTreeMap<i64, String>, sqlx::Error> {
        let rows: Vec<(i64, String)> =
            sqlx::query_as("SELECT DISTINCT level, level_name FROM logs ORDER BY level")
                .fetch_all(&self.pool)
                .await?;
        Ok(rows.into_iter().collect())
    }

    /// Sources present in the table, sorted.
    pub async fn distinct_sources(&self) -> Result<Vec<String>, sqlx::Error> {
        sqlx::query_scalar("SELECT DISTINCT source FROM logs ORDER BY source")
            .fetch_all(&self.pool)
            .await
    }

    /// Remove rows whose `created_at` lies more than `days` days in the past.
    pub async fn delete_older_than(&self, days: u32) -> Result<u64, sqlx::Error> {
        let res = sqlx::query(
            "DELETE FROM logs WHERE julianday('now', 'localtime') - julianday(created_at) > ?",
        )
        .bind(i64::from(days))
        .execute(&self.pool)
        .await?;
        Ok(res.rows_affected())
    }
}

fn push_filters(qb: &mut QueryBuilder<'_, Sqlite>, filter: &LogFilter) {
    let mut keyword = " WHERE ";
    if !filter.sources.is_empty() {
        qb.push(keyword).push("source IN (");
        let mut list = qb.separated(", ");
        for source in &filter.sources {
            list.push_bind(source.clone());
        }
        list.push_unseparated(")");
        keyword = " AND ";
    }
    if !filter.levels.is_empty() {
        qb.push(keyword).push("level IN (");
        let mut list = qb.separated(", ");
        for level in &filter.levels {
            list.push_bind(*level);
        }
        list.push_unseparated(")");
    }
}
