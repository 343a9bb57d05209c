//! Request-scoped restriction on which log rows are returned.

use serde::Serialize;

/// Equality filters on `source` and `level`. An empty list means the column
/// is not restricted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LogFilter {
    pub sources: Vec<String>,
    pub levels: Vec<i64>,
}

impl LogFilter {
    pub fn has_source(&self, source: &str) -> bool {
        self.sources.iter().any(|s| s == source)
    }

    pub fn has_level(&self, level: i64) -> bool {
        self.levels.contains(&level)
    }
}
