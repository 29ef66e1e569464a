// Domain search endpoint

use tracing::debug;

use crate::client::ApiClient;
use crate::error::Error;
use crate::models::SearchResult;

impl ApiClient {
    /// Enumerate subdomains of a domain.
    ///
    /// `GET /api/v1/search?domain={domain}`. Requires an authenticated
    /// session. The domain string is passed through as typed by the
    /// user; the backend owns domain-name validation.
    pub async fn search(&self, domain: &str) -> Result<SearchResult, Error> {
        let mut url = self.api_url("search")?;
        url.query_pairs_mut().append_pair("domain", domain);
        debug!(domain, "searching");
        self.get(url).await
    }
}
