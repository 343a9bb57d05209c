//! Log entries: severity levels, filters, stored rows and new records.

pub mod filter;
pub mod level;
pub mod log_entry;
pub mod new_log;
