//! logpile library entrypoint.
//!
//! Modules:
//! - `app`: startup, configuration, errors, shared state
//! - `http`: Axum router, dispatcher, credential checks and handlers
//! - `ingest`: log payload validation and normalization
//! - `db`: migrations, SQLite helpers and the log store
//! - `models`: typed records used across layers
//! - `util`: helpers for tracing and HTML escaping

pub mod app;
pub mod db;
pub mod http;
pub mod ingest;
pub mod models;
pub mod util;
