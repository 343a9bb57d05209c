//! Log entry as stored in SQLite and as shown in the browsing UI.

use serde::Serialize;
use serde_json::Value;
use sqlx::FromRow;

/// Database row for a log entry. `context` and `extra` hold JSON text.
#[derive(Debug, Clone, FromRow)]
pub struct LogRow {
    pub log_id: i64,
    pub source: String,
    pub message: String,
    pub context: Option<String>,
    pub level: i64,
    pub level_name: String,
    pub channel: Option<String>,
    pub extra: Option<String>,
    pub created_at: String,
}

/// Display representation with structured `context`/`extra`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LogEntry {
    pub log_id: i64,
    pub source: String,
    pub message: String,
    pub level: i64,
    pub level_name: String,
    pub channel: Option<String>,
    pub context: Option<Value>,
    pub extra: Option<Value>,
    pub created_at: String,
}

impl From<LogRow> for LogEntry {
    fn from(r: LogRow) -> Self {
        LogEntry {
            log_id: r.log_id,
            source: r.source,
            message: r.message,
            level: r.level,
            level_name: r.level_name,
            channel: r.channel,
            context: decode_structured(r.context.as_deref()),
            extra: decode_structured(r.extra.as_deref()),
            created_at: r.created_at,
        }
    }
}

/// Parse a stored JSON column back into a value. Empty text and empty
/// collections (`[]`, `{}`) are shown as absent.
pub fn decode_structured(raw: Option<&str>) -> Option<Value> {
    let raw = raw?.trim();
    if raw.is_empty() {
        return None;
    }
    match serde_json::from_str(raw).ok()? {
        Value::Array(items) if items.is_empty() => None,
        Value::Object(map) if map.is_empty() => None,
        value => Some(value),
    }
}
