//! Log ingestion: payload validation and normalization into storage-ready
//! attributes.
//!
//! Payloads use a JSON:API-like envelope:
//!
//! ```json
//! {"data": {"type": "log", "attributes": {"source": "app", "message": "hi", "level": 200}}}
//! ```

pub mod normalize;
pub mod validate;

pub use normalize::{normalize, normalize_at};
pub use validate::validate_log_data;

/// Timestamp format accepted for `datetime` and stored in `created_at`.
pub const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
