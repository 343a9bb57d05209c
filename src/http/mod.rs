//! HTTP router and handlers.

use crate::app::AppState;
use axum::{
  middleware,
  routing::{get, post},
  Router,
};
use tower_http::trace::TraceLayer;

pub mod api;
pub mod auth;
pub mod logs;
pub mod pagination;
pub mod route;
pub mod ui;

/// Assemble the HTTP router. Every request passes the dispatcher, which
/// resolves the route and checks credentials before a handler runs.
pub fn build_router(state: AppState) -> Router {
  Router::new()
    .route(route::SHOW_LOGS_PATH, get(logs::show_logs))
    .route(route::STORE_LOG_PATH, post(api::store_log))
    .fallback(route::unmatched)
    .layer(middleware::from_fn_with_state(state.clone(), route::dispatch))
    .layer(TraceLayer::new_for_http())
    .with_state(state)
}
