// Authentication endpoints
//
// Login and signup share the same `{email, password}` body. A successful
// login sets the session cookie in the client's jar; nothing needs to be
// stored by the caller.

use serde::Serialize;
use tracing::debug;

use crate::client::ApiClient;
use crate::error::Error;
use crate::models::{LoginResponse, SignupResponse};

#[derive(Serialize)]
struct CredentialsBody<'a> {
    email: &'a str,
    password: &'a str,
}

impl ApiClient {
    /// Authenticate and establish a session.
    ///
    /// `POST /api/v1/login`. On success the session cookie lands in the
    /// shared jar and subsequent calls are authenticated.
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginResponse, Error> {
        let url = self.api_url("login")?;
        debug!(email, "logging in");
        self.post_json(url, &CredentialsBody { email, password })
            .await
    }

    /// Register a new account.
    ///
    /// `POST /api/v1/signup`. Registration does not log the user in; a
    /// separate `login` call is required afterwards.
    pub async fn signup(&self, email: &str, password: &str) -> Result<SignupResponse, Error> {
        let url = self.api_url("signup")?;
        debug!(email, "signing up");
        self.post_json(url, &CredentialsBody { email, password })
            .await
    }
}
