// Profile and health endpoints

use tracing::debug;

use crate::client::ApiClient;
use crate::error::Error;
use crate::models::{HealthStatus, Profile};

impl ApiClient {
    /// Fetch the current user's profile, including their saved domains.
    ///
    /// `GET /api/v1/profile/me`. Requires an authenticated session.
    pub async fn me(&self) -> Result<Profile, Error> {
        let url = self.api_url("profile/me")?;
        debug!("fetching profile");
        self.get(url).await
    }

    /// Probe backend and database health.
    ///
    /// `GET /api/v1/health`. Unauthenticated.
    pub async fn health(&self) -> Result<HealthStatus, Error> {
        let url = self.api_url("health")?;
        debug!("checking health");
        self.get(url).await
    }
}
