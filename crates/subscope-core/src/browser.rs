// ── Subdomain browser state machine ──
//
// Tracks which domain is open, which page is current, and which fetch is
// in flight. Page requests carry a monotonic sequence number; a response
// commits only if its sequence matches the latest request, so a slow
// page-2 response can never overwrite a newer page-3 view.
//
// This module is pure state: the caller performs the actual fetch (see
// `Session::subdomain_page`) and feeds the result back via `complete`
// or `fail`.

use subscope_api::models::SubdomainPage;

/// Rows per page. Page N covers rows `[(N-1)*10, N*10)`.
pub const ITEMS_PER_PAGE: u64 = 10;

/// A fetch the caller should perform on behalf of the browser.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub domain_id: i64,
    pub skip: u64,
    pub limit: u64,
    /// Monotonic request sequence. Pass back to `complete`/`fail`.
    pub seq: u64,
}

/// What the browser is currently showing.
#[derive(Debug, Clone, PartialEq)]
pub enum BrowserPhase {
    /// No domain open.
    Idle,
    /// A fetch is in flight and nothing is displayed yet.
    Loading,
    /// A page is displayed. `stale` is set when a later fetch failed and
    /// the view still shows the previous page.
    Displayed { page: SubdomainPage, stale: bool },
}

/// Paginated browser over one domain's subdomains.
#[derive(Debug)]
pub struct SubdomainBrowser {
    domain_id: Option<i64>,
    domain_name: String,
    current_page: u64,
    /// Page number of the request currently in flight, if any.
    pending_page: Option<u64>,
    phase: BrowserPhase,
    seq: u64,
}

impl Default for SubdomainBrowser {
    fn default() -> Self {
        Self::new()
    }
}

impl SubdomainBrowser {
    pub fn new() -> Self {
        Self {
            domain_id: None,
            domain_name: String::new(),
            current_page: 1,
            pending_page: None,
            phase: BrowserPhase::Idle,
            seq: 0,
        }
    }

    pub fn phase(&self) -> &BrowserPhase {
        &self.phase
    }

    pub fn domain_id(&self) -> Option<i64> {
        self.domain_id
    }

    pub fn domain_name(&self) -> &str {
        &self.domain_name
    }

    /// The page currently displayed (or being loaded, before the first
    /// page arrives). Starts at 1.
    pub fn current_page(&self) -> u64 {
        self.current_page
    }

    /// Total pages for the displayed result, `ceil(total / 10)`.
    /// Zero rows still produce one (empty) page.
    pub fn total_pages(&self) -> u64 {
        match &self.phase {
            BrowserPhase::Displayed { page, .. } => total_pages(page.total_subdomains),
            _ => 0,
        }
    }

    /// `true` while a fetch is outstanding.
    pub fn is_loading(&self) -> bool {
        self.pending_page.is_some()
    }

    /// Open a domain, resetting to page 1. Returns the fetch to perform.
    pub fn open(&mut self, domain_id: i64, domain_name: impl Into<String>) -> PageRequest {
        self.domain_id = Some(domain_id);
        self.domain_name = domain_name.into();
        self.current_page = 1;
        self.phase = BrowserPhase::Loading;
        self.request(1)
    }

    /// Navigate to a page. Returns the fetch to perform, or `None` when
    /// no domain is open, the page is out of range, or it is already the
    /// current page with no failed fetch to retry.
    pub fn goto(&mut self, page: u64) -> Option<PageRequest> {
        self.domain_id?;
        if page == 0 {
            return None;
        }
        if let BrowserPhase::Displayed { page: p, stale } = &self.phase {
            if page > total_pages(p.total_subdomains) {
                return None;
            }
            if page == self.current_page && !stale && self.pending_page.is_none() {
                return None;
            }
        }
        Some(self.request(page))
    }

    /// Re-fetch the current page.
    pub fn refresh(&mut self) -> Option<PageRequest> {
        self.domain_id?;
        Some(self.request(self.current_page))
    }

    /// Commit a fetched page. Ignored (returns `false`) when `seq` is not
    /// the latest request, which drops stale responses from superseded
    /// navigations.
    pub fn complete(&mut self, seq: u64, page: SubdomainPage) -> bool {
        if seq != self.seq {
            return false;
        }
        if let Some(requested) = self.pending_page.take() {
            self.current_page = requested;
        }
        self.phase = BrowserPhase::Displayed { page, stale: false };
        true
    }

    /// Record a failed fetch. The current page is kept; if a page was
    /// already displayed it stays visible and is marked stale.
    pub fn fail(&mut self, seq: u64) -> bool {
        if seq != self.seq {
            return false;
        }
        self.pending_page = None;
        match std::mem::replace(&mut self.phase, BrowserPhase::Idle) {
            BrowserPhase::Displayed { page, .. } => {
                self.phase = BrowserPhase::Displayed { page, stale: true };
            }
            _ => {
                self.phase = BrowserPhase::Loading;
            }
        }
        true
    }

    /// Close the browser. State is cleared so a later `open` starts fresh.
    pub fn close(&mut self) {
        self.domain_id = None;
        self.domain_name.clear();
        self.current_page = 1;
        self.pending_page = None;
        self.phase = BrowserPhase::Idle;
        // Invalidate any in-flight request so its response is dropped.
        self.seq += 1;
    }

    fn request(&mut self, page: u64) -> PageRequest {
        self.seq += 1;
        self.pending_page = Some(page);
        PageRequest {
            // pending_page is only set when domain_id is present
            domain_id: self.domain_id.unwrap_or_default(),
            skip: (page - 1) * ITEMS_PER_PAGE,
            limit: ITEMS_PER_PAGE,
            seq: self.seq,
        }
    }
}

/// `ceil(total / ITEMS_PER_PAGE)`, with a minimum of one page.
pub fn total_pages(total_subdomains: u64) -> u64 {
    std::cmp::max(1, total_subdomains.div_ceil(ITEMS_PER_PAGE))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use subscope_api::models::Subdomain;

    fn page_of(total: u64, names: &[&str]) -> SubdomainPage {
        SubdomainPage {
            total_subdomains: total,
            sub_domains: names
                .iter()
                .map(|n| Subdomain {
                    name: (*n).to_string(),
                    is_active: true,
                    created_date: Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap(),
                })
                .collect(),
        }
    }

    #[test]
    fn open_requests_first_page() {
        let mut b = SubdomainBrowser::new();
        let req = b.open(7, "example.com");

        assert_eq!(req.domain_id, 7);
        assert_eq!(req.skip, 0);
        assert_eq!(req.limit, 10);
        assert_eq!(b.current_page(), 1);
        assert!(b.is_loading());
        assert_eq!(*b.phase(), BrowserPhase::Loading);
    }

    #[test]
    fn page_advances_only_on_success() {
        let mut b = SubdomainBrowser::new();
        let req = b.open(7, "example.com");
        assert!(b.complete(req.seq, page_of(25, &["a"])));
        assert_eq!(b.current_page(), 1);
        assert_eq!(b.total_pages(), 3);

        let req = b.goto(2).unwrap();
        assert_eq!(req.skip, 10);
        // Still on page 1 until the fetch lands.
        assert_eq!(b.current_page(), 1);

        assert!(b.complete(req.seq, page_of(25, &["k"])));
        assert_eq!(b.current_page(), 2);
    }

    #[test]
    fn stale_response_is_dropped() {
        let mut b = SubdomainBrowser::new();
        let first = b.open(7, "example.com");
        assert!(b.complete(first.seq, page_of(25, &["a"])));

        let slow = b.goto(2).unwrap();
        let fast = b.goto(3).unwrap();

        // Page 3 lands first and commits.
        assert!(b.complete(fast.seq, page_of(25, &["z"])));
        assert_eq!(b.current_page(), 3);

        // The superseded page-2 response is ignored.
        assert!(!b.complete(slow.seq, page_of(25, &["k"])));
        assert_eq!(b.current_page(), 3);
    }

    #[test]
    fn goto_rejects_out_of_range() {
        let mut b = SubdomainBrowser::new();
        let req = b.open(7, "example.com");
        assert!(b.complete(req.seq, page_of(25, &["a"])));

        assert!(b.goto(0).is_none());
        assert!(b.goto(4).is_none());
        // Re-requesting the current page is a no-op.
        assert!(b.goto(1).is_none());
        assert!(b.goto(3).is_some());
    }

    #[test]
    fn failure_keeps_displayed_page() {
        let mut b = SubdomainBrowser::new();
        let req = b.open(7, "example.com");
        assert!(b.complete(req.seq, page_of(25, &["a"])));

        let req = b.goto(2).unwrap();
        assert!(b.fail(req.seq));

        // Still page 1, marked stale; the failed page can be retried.
        assert_eq!(b.current_page(), 1);
        assert!(matches!(b.phase(), BrowserPhase::Displayed { stale: true, .. }));
        assert!(b.goto(2).is_some());
    }

    #[test]
    fn goto_without_open_domain_is_none() {
        let mut b = SubdomainBrowser::new();
        assert!(b.goto(1).is_none());
        assert!(b.refresh().is_none());
    }

    #[test]
    fn close_drops_in_flight_response() {
        let mut b = SubdomainBrowser::new();
        let req = b.open(7, "example.com");
        b.close();

        assert!(!b.complete(req.seq, page_of(5, &["a"])));
        assert_eq!(*b.phase(), BrowserPhase::Idle);
    }

    #[test]
    fn total_pages_rounds_up() {
        assert_eq!(total_pages(0), 1);
        assert_eq!(total_pages(1), 1);
        assert_eq!(total_pages(10), 1);
        assert_eq!(total_pages(11), 2);
        assert_eq!(total_pages(25), 3);
    }
}
