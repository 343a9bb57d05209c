//! Dashboard HTML.
//!
//! The page layout lives in `<path_views>/logs.html`; this module fills its
//! `__PLACEHOLDER__` slots with escaped fragments.

use crate::{
  app::error::AppError,
  http::pagination::{Pagination, LEVEL_PARAM, SOURCE_PARAM},
  models::log::{filter::LogFilter, log_entry::LogEntry},
  util::html_escape,
};
use serde_json::Value;
use std::{collections::BTreeMap, fmt::Write, path::Path};

pub const LOGS_VIEW: &str = "logs.html";

/// Everything the logs page shows.
pub struct LogsPage<'a> {
  pub filter: &'a LogFilter,
  pub logs: &'a [LogEntry],
  pub levels: &'a BTreeMap<i64, String>,
  pub sources: &'a [String],
  pub pagination: &'a Pagination,
}

/// Load the logs view from `path_views` and render it.
pub async fn render_logs(path_views: &Path, page: &LogsPage<'_>) -> Result<String, AppError> {
  let path = path_views.join(LOGS_VIEW);
  let template = tokio::fs::read_to_string(&path).await.map_err(|e| {
    tracing::error!("cannot read view {}: {e}", path.display());
    AppError::configuration("Error: View file not found.")
  })?;
  Ok(render_template(&template, page))
}

/// Substitute placeholders in one pass over `template`. Inserted fragments
/// are never rescanned, so placeholder text inside log data stays literal.
pub fn render_template(template: &str, page: &LogsPage<'_>) -> String {
  let fragments = [
    ("__TOTAL__", page.pagination.total.to_string()),
    ("__SOURCES__", source_filters(page)),
    ("__LEVELS__", level_filters(page)),
    ("__ROWS__", rows(page.logs)),
    ("__PAGINATION__", pagination(page.pagination)),
  ];

  let mut out = String::with_capacity(template.len());
  let mut rest = template;
  while let Some(start) = rest.find("__") {
    let tail = &rest[start..];
    match fragments.iter().find(|(token, _)| tail.starts_with(*token)) {
      Some((token, fragment)) => {
        out.push_str(&rest[..start]);
        out.push_str(fragment);
        rest = &tail[token.len()..];
      }
      None => {
        out.push_str(&rest[..=start]);
        rest = &tail[1..];
      }
    }
  }
  out.push_str(rest);
  out
}

fn checkbox(name: &str, value: &str, label: &str, checked: bool) -> String {
  format!(
    "<label><input type=\"checkbox\" name=\"{name}\" value=\"{value}\"{checked}> {label}</label>",
    name = html_escape(name),
    value = html_escape(value),
    label = html_escape(label),
    checked = if checked { " checked" } else { "" },
  )
}

fn source_filters(page: &LogsPage<'_>) -> String {
  page
    .sources
    .iter()
    .map(|s| checkbox(SOURCE_PARAM, s, s, page.filter.has_source(s)))
    .collect()
}

fn level_filters(page: &LogsPage<'_>) -> String {
  page
    .levels
    .iter()
    .map(|(code, name)| {
      checkbox(
        LEVEL_PARAM,
        &code.to_string(),
        name,
        page.filter.has_level(*code),
      )
    })
    .collect()
}

fn rows(logs: &[LogEntry]) -> String {
  if logs.is_empty() {
    return "<tr><td colspan=\"5\"><em>No logs found.</em></td></tr>".to_string();
  }
  let mut out = String::new();
  for log in logs {
    let _ = write!(
      out,
      "<tr class=\"lvl-{level}\"><td>{when}</td><td>{source}</td><td>{level}</td><td>{channel}</td><td>{message}{context}{extra}</td></tr>",
      level = html_escape(&log.level_name),
      when = html_escape(&log.created_at),
      source = html_escape(&log.source),
      channel = html_escape(log.channel.as_deref().unwrap_or("")),
      message = html_escape(&log.message),
      context = details("context", log.context.as_ref()),
      extra = details("extra", log.extra.as_ref()),
    );
  }
  out
}

fn details(label: &str, value: Option<&Value>) -> String {
  match value {
    Some(v) => format!(
      "<details><summary>{label}</summary><pre>{}</pre></details>",
      html_escape(&serde_json::to_string_pretty(v).unwrap_or_default())
    ),
    None => String::new(),
  }
}

fn pagination(p: &Pagination) -> String {
  let Some(links) = p.links.as_ref() else {
    return String::new();
  };
  let link = |href: &str, text: &str| {
    if href.is_empty() {
      format!("<span class=\"disabled\">{text}</span>")
    } else {
      format!("<a href=\"{}\">{text}</a>", html_escape(href))
    }
  };
  format!(
    "<nav class=\"pagination\">{} {} <span>Page {} of {}</span> {} {}</nav>",
    link(&links.first, "&laquo; first"),
    link(&links.prev, "&lsaquo; prev"),
    p.current,
    p.pages,
    link(&links.next, "next &rsaquo;"),
    link(&links.last, "last &raquo;"),
  )
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde_json::json;

  fn entry() -> LogEntry {
    LogEntry {
      log_id: 1,
      source: "Test".into(),
      message: "<script>alert(1)</script>".into(),
      level: 100,
      level_name: "debug".into(),
      channel: Some("app".into()),
      context: Some(json!({"k": "v"})),
      extra: None,
      created_at: "2024-01-01 00:00:00".into(),
    }
  }

  #[test]
  fn renders_filters_rows_and_links() {
    let filter = LogFilter {
      sources: vec!["Test".into()],
      levels: vec![],
    };
    let logs = vec![entry()];
    let levels = BTreeMap::from([(100, "debug".to_string())]);
    let sources = vec!["Test".to_string(), "Other".to_string()];
    let pagination = Pagination::build("/", 120, 50, 1, &filter);
    let page = LogsPage {
      filter: &filter,
      logs: &logs,
      levels: &levels,
      sources: &sources,
      pagination: &pagination,
    };

    let html = render_template("__TOTAL__|__SOURCES__|__LEVELS__|__ROWS__|__PAGINATION__", &page);
    assert!(html.starts_with("120|"));
    assert!(html.contains(r#"<input type="checkbox" name="s[]" value="Test" checked>"#));
    assert!(html.contains(r#"<input type="checkbox" name="s[]" value="Other">"#));
    assert!(html.contains(r#"<input type="checkbox" name="l[]" value="100""#));
    assert!(html.contains("&lt;script&gt;"));
    assert!(!html.contains("<script>"));
    assert!(html.contains("<summary>context</summary>"));
    assert!(html.contains(r#"<a href="/?s%5B%5D=Test&amp;page=2">next"#));
    assert!(html.contains("Page 1 of 3"));
  }

  #[test]
  fn empty_listing_has_placeholder_row() {
    let filter = LogFilter::default();
    let levels = BTreeMap::new();
    let pagination = Pagination::build("/", 0, 50, 1, &filter);
    let page = LogsPage {
      filter: &filter,
      logs: &[],
      levels: &levels,
      sources: &[],
      pagination: &pagination,
    };
    let html = render_template("__ROWS__|__PAGINATION__", &page);
    assert_eq!(
      html,
      "<tr><td colspan=\"5\"><em>No logs found.</em></td></tr>|"
    );
  }

  #[test]
  fn placeholder_text_in_log_data_stays_literal() {
    let filter = LogFilter::default();
    let mut log = entry();
    log.source = "__ROWS__".into();
    log.message = "see __PAGINATION__".into();
    log.context = None;
    let logs = vec![log];
    let levels = BTreeMap::new();
    let sources = vec!["__ROWS__".to_string()];
    let pagination = Pagination::build("/", 1, 50, 1, &filter);
    let page = LogsPage {
      filter: &filter,
      logs: &logs,
      levels: &levels,
      sources: &sources,
      pagination: &pagination,
    };

    let html = render_template("__SOURCES__|__ROWS__|__PAGINATION__", &page);
    assert!(html.contains(r#"name="s[]" value="__ROWS__">"#));
    assert!(html.contains("<td>see __PAGINATION__</td>"));
    assert!(!html.contains("see <nav"));
    assert_eq!(html.matches("<tr").count(), 1);
    assert_eq!(html.matches("<nav").count(), 1);
  }

  #[test]
  fn unknown_underscore_runs_are_kept() {
    let filter = LogFilter::default();
    let levels = BTreeMap::new();
    let pagination = Pagination::build("/", 7, 50, 1, &filter);
    let page = LogsPage {
      filter: &filter,
      logs: &[],
      levels: &levels,
      sources: &[],
      pagination: &pagination,
    };
    assert_eq!(
      render_template("a__b ___TOTAL__ __NOPE__ end__", &page),
      "a__b _7 __NOPE__ end__"
    );
  }

  #[tokio::test]
  async fn missing_view_is_a_configuration_error() {
    let filter = LogFilter::default();
    let levels = BTreeMap::new();
    let pagination = Pagination::build("/", 0, 50, 1, &filter);
    let page = LogsPage {
      filter: &filter,
      logs: &[],
      levels: &levels,
      sources: &[],
      pagination: &pagination,
    };
    let err = render_logs(Path::new("/nonexistent-views"), &page)
      .await
      .unwrap_err();
    assert_eq!(err.to_string(), "Error: View file not found.");
  }
}
