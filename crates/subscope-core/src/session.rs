// ── Session facade ──
//
// The single entry point consumers use: owns the ApiClient (and with it
// the session cookie jar), runs client-side validation before any auth
// call, and maps transport errors to CoreError.

use secrecy::ExposeSecret;
use tracing::{debug, info};

use subscope_api::models::{HealthStatus, Profile, SubdomainPage};
use subscope_api::{ApiClient, TlsMode, TransportConfig};

use crate::browser::PageRequest;
use crate::config::{AuthCredentials, ServerConfig, TlsVerification};
use crate::error::CoreError;
use crate::validate;
use crate::view::SearchView;

/// An authenticated (or not-yet-authenticated) connection to one server.
///
/// The session cookie lives in the underlying client's jar; `login`
/// populates it and every later call carries it automatically.
pub struct Session {
    client: ApiClient,
    authenticated: bool,
}

impl Session {
    /// Build a session from a server config. No network traffic happens
    /// until the first call.
    pub fn connect(config: &ServerConfig) -> Result<Self, CoreError> {
        let transport = TransportConfig {
            tls: match config.tls {
                TlsVerification::SystemDefaults => TlsMode::System,
                TlsVerification::DangerAcceptInvalid => TlsMode::DangerAcceptInvalid,
            },
            timeout: config.timeout,
            cookie_jar: None,
        }
        .with_cookie_jar();

        let client = ApiClient::new(config.url.clone(), &transport)?;
        Ok(Self {
            client,
            authenticated: false,
        })
    }

    /// Wrap an existing client (used by tests against a mock server).
    pub fn from_client(client: ApiClient) -> Self {
        Self {
            client,
            authenticated: false,
        }
    }

    /// Whether `login` has succeeded on this session.
    pub fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    // ── Auth ─────────────────────────────────────────────────────────

    /// Validate credentials locally, then log in.
    ///
    /// Validation failures return `ValidationFailed` without touching the
    /// network. A 401 from the server maps to `AuthenticationFailed` here
    /// (wrong credentials), not `SessionExpired`.
    pub async fn login(&mut self, creds: &AuthCredentials) -> Result<(), CoreError> {
        validate::validate_email(&creds.email)?;
        validate::validate_password(creds.password.expose_secret())?;

        match self
            .client
            .login(&creds.email, creds.password.expose_secret())
            .await
        {
            Ok(resp) => {
                self.authenticated = true;
                info!(email = %creds.email, "login successful");
                debug!(message = %resp.message, "server login response");
                Ok(())
            }
            Err(subscope_api::Error::Unauthorized) => Err(CoreError::AuthenticationFailed {
                message: "Incorrect email or password".into(),
            }),
            Err(e) => Err(e.into()),
        }
    }

    /// Validate the registration form locally, then sign up.
    ///
    /// Signup does not establish a session; call `login` afterwards.
    pub async fn signup(
        &self,
        creds: &AuthCredentials,
        confirm_password: &str,
    ) -> Result<String, CoreError> {
        validate::validate_registration(
            &creds.email,
            creds.password.expose_secret(),
            confirm_password,
        )?;

        let resp = self
            .client
            .signup(&creds.email, creds.password.expose_secret())
            .await?;
        info!(email = %creds.email, "signup successful");
        Ok(resp.message)
    }

    // ── Data ─────────────────────────────────────────────────────────

    /// Enumerate subdomains of a domain.
    pub async fn search(&self, domain: &str) -> Result<SearchView, CoreError> {
        let domain = domain.trim();
        if domain.is_empty() {
            return Err(CoreError::ValidationFailed {
                message: "Please enter a domain to search".into(),
            });
        }
        let result = self.client.search(domain).await?;
        Ok(SearchView::from_result(result))
    }

    /// Fetch the page described by a browser `PageRequest`.
    pub async fn subdomain_page(&self, req: PageRequest) -> Result<SubdomainPage, CoreError> {
        Ok(self
            .client
            .subdomains(req.domain_id, req.skip, req.limit)
            .await?)
    }

    /// The current user's profile (with their saved domains).
    pub async fn profile(&self) -> Result<Profile, CoreError> {
        Ok(self.client.me().await?)
    }

    /// Backend health probe. Works without authentication.
    pub async fn health(&self) -> Result<HealthStatus, CoreError> {
        Ok(self.client.health().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::SecretString;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn setup() -> (MockServer, Session) {
        let server = MockServer::start().await;
        let client = ApiClient::from_reqwest(&server.uri(), reqwest::Client::new()).unwrap();
        (server, Session::from_client(client))
    }

    fn creds(email: &str, password: &str) -> AuthCredentials {
        AuthCredentials {
            email: email.into(),
            password: SecretString::from(password.to_string()),
        }
    }

    #[tokio::test]
    async fn login_validates_before_network() {
        // No mock mounted: a network call would error differently.
        let (_server, mut session) = setup().await;

        let err = session.login(&creds("not-an-email", "abc123")).await;
        assert!(matches!(err, Err(CoreError::ValidationFailed { .. })));

        let err = session.login(&creds("user@example.com", "short")).await;
        assert!(matches!(err, Err(CoreError::ValidationFailed { .. })));
        assert!(!session.is_authenticated());
    }

    #[tokio::test]
    async fn login_maps_401_to_authentication_failed() {
        let (server, mut session) = setup().await;

        Mock::given(method("POST"))
            .and(path("/api/v1/login"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        let err = session
            .login(&creds("user@example.com", "abc123"))
            .await
            .unwrap_err();

        assert!(matches!(err, CoreError::AuthenticationFailed { .. }));
        assert!(!session.is_authenticated());
    }

    #[tokio::test]
    async fn login_success_marks_authenticated() {
        let (server, mut session) = setup().await;

        Mock::given(method("POST"))
            .and(path("/api/v1/login"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({ "message": "ok" })),
            )
            .mount(&server)
            .await;

        session.login(&creds("user@example.com", "abc123")).await.unwrap();
        assert!(session.is_authenticated());
    }

    #[tokio::test]
    async fn signup_rejects_mismatched_confirmation() {
        let (_server, session) = setup().await;

        let err = session
            .signup(&creds("user@example.com", "abc123"), "abc124")
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), validate::MSG_PASSWORD_MISMATCH);
    }

    #[tokio::test]
    async fn search_trims_and_rejects_empty() {
        let (server, session) = setup().await;

        Mock::given(method("GET"))
            .and(path("/api/v1/search"))
            .and(query_param("domain", "example.com"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "domain": "example.com",
                "count": 0,
            })))
            .mount(&server)
            .await;

        assert!(matches!(
            session.search("   ").await,
            Err(CoreError::ValidationFailed { .. })
        ));

        let view = session.search("  example.com ").await.unwrap();
        assert_eq!(view.domain, "example.com");
    }

    #[tokio::test]
    async fn expired_session_maps_to_session_expired() {
        let (server, session) = setup().await;

        Mock::given(method("GET"))
            .and(path("/api/v1/profile/me"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        let err = session.profile().await.unwrap_err();
        assert!(err.is_session_expired());
    }
}
