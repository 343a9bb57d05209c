//! Page metadata and filter-preserving navigation links.

use crate::models::log::filter::LogFilter;
use serde::Serialize;
use url::form_urlencoded;

pub const SOURCE_PARAM: &str = "s[]";
pub const LEVEL_PARAM: &str = "l[]";
pub const PAGE_PARAM: &str = "page";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Pagination {
  pub pages: u64,
  pub total: u64,
  pub current: u64,
  #[serde(flatten)]
  pub links: Option<PageLinks>,
}

/// Navigation URLs. `prev`/`next` are empty when there is no such page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageLinks {
  pub first: String,
  pub last: String,
  pub prev: String,
  pub next: String,
}

impl Pagination {
  /// Build pagination for `total` items shown `per_page` at a time.
  /// `current` values below 1 are treated as 1; values past the last page
  /// are kept as-is.
  pub fn build(path: &str, total: u64, per_page: u64, current: u64, filter: &LogFilter) -> Self {
    let per_page = per_page.max(1);
    let current = current.max(1);
    let pages = total.div_ceil(per_page);

    let links = (pages >= 1).then(|| PageLinks {
      first: build_url(path, filter, 1),
      last: build_url(path, filter, pages),
      prev: if current > 1 {
        build_url(path, filter, current - 1)
      } else {
        String::new()
      },
      next: if current < pages {
        build_url(path, filter, current + 1)
      } else {
        String::new()
      },
    });

    Pagination {
      pages,
      total,
      current,
      links,
    }
  }

  /// Row offset of the first entry on the current page.
  pub fn offset(current: u64, per_page: u64) -> u64 {
    current.max(1).saturating_sub(1).saturating_mul(per_page)
  }
}

/// URL on `path` carrying the active filters and a page number. Filter
/// values use array-style keys without indices (`s[]=a&s[]=b`).
pub fn build_url(path: &str, filter: &LogFilter, page: u64) -> String {
  let mut query = form_urlencoded::Serializer::new(String::new());
  for source in &filter.sources {
    query.append_pair(SOURCE_PARAM, source);
  }
  for level in &filter.levels {
    query.append_pair(LEVEL_PARAM, &level.to_string());
  }
  if page > 0 {
    query.append_pair(PAGE_PARAM, &page.to_string());
  }
  format!("{path}?{}", query.finish())
}

#[cfg(test)]
mod tests {
  use super::*;

  fn links(p: &Pagination) -> &PageLinks {
    p.links.as_ref().expect("links")
  }

  #[test]
  fn computes_page_count() {
    let p = Pagination::build("/", 250, 100, 1, &LogFilter::default());
    assert_eq!(p.pages, 3);
    assert_eq!(p.total, 250);
    assert_eq!(Pagination::build("/", 200, 100, 1, &LogFilter::default()).pages, 2);
    assert_eq!(Pagination::build("/", 1, 50, 1, &LogFilter::default()).pages, 1);
  }

  #[test]
  fn first_page_has_no_prev() {
    let p = Pagination::build("/", 250, 100, 1, &LogFilter::default());
    let l = links(&p);
    assert_eq!(l.prev, "");
    assert_eq!(l.next, "/?page=2");
    assert_eq!(l.first, "/?page=1");
    assert_eq!(l.last, "/?page=3");
  }

  #[test]
  fn last_page_has_no_next() {
    let p = Pagination::build("/", 250, 100, 3, &LogFilter::default());
    let l = links(&p);
    assert_eq!(l.prev, "/?page=2");
    assert_eq!(l.next, "");
  }

  #[test]
  fn out_of_range_page_still_links() {
    let p = Pagination::build("/", 250, 100, 4, &LogFilter::default());
    assert_eq!(p.current, 4);
    let l = links(&p);
    assert_eq!(l.prev, "/?page=3");
    assert_eq!(l.next, "");
    assert_eq!(l.last, "/?page=3");
  }

  #[test]
  fn empty_result_has_no_links() {
    let p = Pagination::build("/", 0, 50, 1, &LogFilter::default());
    assert_eq!(p.pages, 0);
    assert!(p.links.is_none());
    let json = serde_json::to_value(&p).unwrap();
    assert!(json.get("first").is_none());
    assert_eq!(json["current"], 1);
  }

  #[test]
  fn non_positive_page_normalizes_to_one() {
    let p = Pagination::build("/", 10, 5, 0, &LogFilter::default());
    assert_eq!(p.current, 1);
    assert_eq!(Pagination::offset(0, 50), 0);
    assert_eq!(Pagination::offset(3, 50), 100);
  }

  #[test]
  fn links_carry_filters_without_indices() {
    let filter = LogFilter {
      sources: vec!["Test".into(), "my app".into()],
      levels: vec![100, 400],
    };
    let p = Pagination::build("/", 120, 50, 2, &filter);
    assert_eq!(
      links(&p).next,
      "/?s%5B%5D=Test&s%5B%5D=my+app&l%5B%5D=100&l%5B%5D=400&page=3"
    );
    assert!(!links(&p).first.contains("%5B0%5D"));
  }
}
