// ── Runtime connection configuration ──
//
// These types describe *how* to reach a subscope server. They carry
// credential data and connection tuning, but never touch disk. The
// CLI/TUI constructs a `ServerConfig` and hands it in.

use secrecy::SecretString;
use url::Url;

/// Email/password credentials for session login.
#[derive(Debug, Clone)]
pub struct AuthCredentials {
    pub email: String,
    pub password: SecretString,
}

/// TLS verification strategy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TlsVerification {
    /// System CA store (strict). Default.
    #[default]
    SystemDefaults,
    /// Skip verification (self-signed dev deployments).
    DangerAcceptInvalid,
}

/// Configuration for connecting to a single subscope server.
///
/// Built by CLI/TUI, passed to `Session` -- core never reads config files.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Server URL (e.g., `https://subscope.example.com`).
    pub url: Url,
    /// TLS verification strategy.
    pub tls: TlsVerification,
    /// Request timeout.
    pub timeout: std::time::Duration,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            url: "http://localhost:8000"
                .parse()
                .unwrap_or_else(|_| unreachable!("static URL is valid")),
            tls: TlsVerification::default(),
            timeout: std::time::Duration::from_secs(30),
        }
    }
}
