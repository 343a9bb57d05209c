//! Storage-ready log attributes produced by the normalizer.

use serde::Serialize;

/// Flat attribute set matching the `logs` columns. Has no `log_id`; the
/// store assigns one on insert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewLog {
    pub source: String,
    pub message: String,
    pub level: i64,
    pub level_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub channel: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extra: Option<String>,
    pub created_at: String,
}

/// Ingestion response: the stored attributes plus the assigned id.
#[derive(Debug, Serialize)]
pub struct StoredLog {
    #[serde(flatten)]
    pub attributes: NewLog,
    pub log_id: i64,
}
