// Domain detail endpoints (paginated subdomain listing)

use tracing::debug;

use crate::client::ApiClient;
use crate::error::Error;
use crate::models::SubdomainPage;

impl ApiClient {
    /// Fetch one page of a domain's subdomains.
    ///
    /// `GET /api/v1/domains/{id}?skip={skip}&limit={limit}`. The response
    /// carries the page rows plus the total count, so callers can derive
    /// the page count without a second request.
    pub async fn subdomains(
        &self,
        domain_id: i64,
        skip: u64,
        limit: u64,
    ) -> Result<SubdomainPage, Error> {
        let mut url = self.api_url(&format!("domains/{domain_id}"))?;
        url.query_pairs_mut()
            .append_pair("skip", &skip.to_string())
            .append_pair("limit", &limit.to_string());
        debug!(domain_id, skip, limit, "fetching subdomain page");
        self.get(url).await
    }
}
