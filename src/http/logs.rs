//! Web UI: filtered, paginated log listing.

use crate::{
  app::{error::AppError, AppState},
  http::{pagination::Pagination, ui},
  models::log::{filter::LogFilter, level::Level},
};
use axum::{
  extract::{RawQuery, State},
  http::Uri,
  response::Html,
};
use url::form_urlencoded;

/// Filter and page parameters as they arrive in the query string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShowLogsParams {
  pub sources: Vec<String>,
  pub levels: Vec<String>,
  pub page: u64,
}

impl Default for ShowLogsParams {
  fn default() -> Self {
    Self {
      sources: Vec::new(),
      levels: Vec::new(),
      page: 1,
    }
  }
}

impl ShowLogsParams {
  /// Parse `s[]`, `l[]` and `page`. Indexed (`s[0]`) and bare (`s`) keys
  /// are accepted too; empty values are skipped.
  pub fn from_query(query: Option<&str>) -> Self {
    let mut params = Self::default();
    let query = query.unwrap_or_default();
    for (key, value) in form_urlencoded::parse(query.as_bytes()) {
      if value.is_empty() {
        continue;
      }
      let name = match key.split_once('[') {
        Some((name, _)) => name,
        None => &*key,
      };
      match name {
        "s" => params.sources.push(value.into_owned()),
        "l" => params.levels.push(value.into_owned()),
        "page" => params.page = parse_page(&value),
        _ => {}
      }
    }
    params
  }
}

fn parse_page(raw: &str) -> u64 {
  raw
    .trim()
    .parse::<i64>()
    .ok()
    .and_then(|p| u64::try_from(p).ok())
    .filter(|p| *p > 0)
    .unwrap_or(1)
}

/// Check requested filters against known sources and the level enumeration.
pub fn validate_filters(
  params: &ShowLogsParams,
  known_sources: &[String],
) -> Result<LogFilter, AppError> {
  if params.sources.iter().any(|s| !known_sources.contains(s)) {
    return Err(AppError::bad_request("Error: Invalid source filter."));
  }

  let levels = params
    .levels
    .iter()
    .map(|raw| {
      raw
        .trim()
        .parse::<i64>()
        .ok()
        .and_then(Level::from_code)
        .map(Level::code)
        .ok_or_else(|| AppError::bad_request("Error: Invalid level filter."))
    })
    .collect::<Result<Vec<_>, _>>()?;

  Ok(LogFilter {
    sources: params.sources.clone(),
    levels,
  })
}

/// `GET /`: render the log table for the requested filters and page.
pub async fn show_logs(
  State(state): State<AppState>,
  uri: Uri,
  RawQuery(query): RawQuery,
) -> Result<Html<String>, AppError> {
  let params = ShowLogsParams::from_query(query.as_deref());
  let store = state.logs();

  let sources = store.distinct_sources().await?;
  let filter = validate_filters(&params, &sources)?;

  let per_page = u64::from(state.config.logs_per_page);
  let offset = Pagination::offset(params.page, per_page);
  let total = store.count(&filter).await?;
  let logs = store
    .list(
      &filter,
      i64::from(state.config.logs_per_page),
      i64::try_from(offset).unwrap_or(i64::MAX),
    )
    .await?;
  let levels = store.distinct_levels().await?;

  let pagination = Pagination::build(
    uri.path(),
    u64::try_from(total).unwrap_or_default(),
    per_page,
    params.page,
    &filter,
  );

  let page = ui::LogsPage {
    filter: &filter,
    logs: &logs,
    levels: &levels,
    sources: &sources,
    pagination: &pagination,
  };
  let html = ui::render_logs(&state.config.path_views, &page).await?;
  Ok(Html(html))
}
