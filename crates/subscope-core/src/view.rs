// ── Presentation-ready projections ──
//
// Converts wire types into the shapes the CLI and TUI render: grouped
// search results, labeled subdomain rows, and the windowed page-control
// strip. Pure functions, shared by both frontends so they stay in sync.

use chrono::{DateTime, Utc};
use serde::Serialize;
use subscope_api::models::{SearchResult, Subdomain};

use crate::browser::total_pages;

/// A search result grouped for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchView {
    pub domain: String,
    pub count: u64,
    pub regular: Vec<String>,
    pub wildcards: Vec<String>,
}

impl SearchView {
    pub fn from_result(result: SearchResult) -> Self {
        Self {
            domain: result.domain,
            count: result.count,
            regular: result.regular,
            wildcards: result.wildcards,
        }
    }

    /// Summary line, e.g. `Found 12 subdomains for example.com`.
    pub fn summary(&self) -> String {
        let noun = if self.count == 1 { "subdomain" } else { "subdomains" };
        format!("Found {} {} for {}", self.count, noun, self.domain)
    }
}

/// One subdomain row, ready to render.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubdomainRow {
    pub name: String,
    pub status: &'static str,
    pub is_active: bool,
    pub created_date: DateTime<Utc>,
}

impl From<Subdomain> for SubdomainRow {
    fn from(s: Subdomain) -> Self {
        Self {
            name: s.name,
            status: if s.is_active { "Active" } else { "Inactive" },
            is_active: s.is_active,
            created_date: s.created_date,
        }
    }
}

/// One button in the page-control strip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageControl {
    pub number: u64,
    pub is_current: bool,
}

/// The windowed page-control strip: optional prev/next plus one numbered
/// control per page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pagination {
    pub current_page: u64,
    pub total_pages: u64,
    pub has_prev: bool,
    pub has_next: bool,
    pub pages: Vec<PageControl>,
}

impl Pagination {
    /// Build the strip for `current_page` of a result with
    /// `total_subdomains` rows. A 25-row result on page 2 yields three
    /// numbered controls with both prev and next enabled.
    pub fn build(current_page: u64, total_subdomains: u64) -> Self {
        let total = total_pages(total_subdomains);
        let current = current_page.clamp(1, total);
        let pages = (1..=total)
            .map(|number| PageControl {
                number,
                is_current: number == current,
            })
            .collect();
        Self {
            current_page: current,
            total_pages: total,
            has_prev: current > 1,
            has_next: current < total,
            pages,
        }
    }

    /// Page shown before the current one, if any.
    pub fn prev(&self) -> Option<u64> {
        self.has_prev.then(|| self.current_page - 1)
    }

    /// Page shown after the current one, if any.
    pub fn next(&self) -> Option<u64> {
        self.has_next.then(|| self.current_page + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn row_status_labels() {
        let active = Subdomain {
            name: "api.example.com".into(),
            is_active: true,
            created_date: Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap(),
        };
        let inactive = Subdomain {
            is_active: false,
            ..active.clone()
        };

        assert_eq!(SubdomainRow::from(active).status, "Active");
        assert_eq!(SubdomainRow::from(inactive).status, "Inactive");
    }

    #[test]
    fn pagination_25_rows_page_2() {
        let p = Pagination::build(2, 25);

        assert_eq!(p.total_pages, 3);
        assert_eq!(p.pages.len(), 3);
        assert!(p.has_prev);
        assert!(p.has_next);
        assert_eq!(p.prev(), Some(1));
        assert_eq!(p.next(), Some(3));
        assert!(p.pages[1].is_current);
        assert!(!p.pages[0].is_current);
    }

    #[test]
    fn pagination_edges() {
        let first = Pagination::build(1, 25);
        assert!(!first.has_prev);
        assert!(first.has_next);

        let last = Pagination::build(3, 25);
        assert!(last.has_prev);
        assert!(!last.has_next);

        let single = Pagination::build(1, 7);
        assert_eq!(single.total_pages, 1);
        assert!(!single.has_prev);
        assert!(!single.has_next);

        // Empty results still render one page.
        let empty = Pagination::build(1, 0);
        assert_eq!(empty.total_pages, 1);
        assert_eq!(empty.pages.len(), 1);
    }

    #[test]
    fn search_summary_pluralizes() {
        let one = SearchView {
            domain: "example.com".into(),
            count: 1,
            regular: vec!["www.example.com".into()],
            wildcards: vec![],
        };
        assert_eq!(one.summary(), "Found 1 subdomain for example.com");

        let many = SearchView { count: 3, ..one };
        assert_eq!(many.summary(), "Found 3 subdomains for example.com");
    }
}
