//! Wire types for the backend API.
//!
//! Field names follow the backend's JSON exactly (`isActive`,
//! `createdDate`, `sub_domains`) via serde renames; Rust-side names are
//! snake_case.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Result of a domain search: `GET /api/v1/search?domain=<str>`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResult {
    /// The domain that was searched.
    pub domain: String,
    /// Total subdomains found (regular + wildcard).
    pub count: u64,
    /// Regular subdomains (e.g. `mail.example.com`).
    #[serde(default)]
    pub regular: Vec<String>,
    /// Wildcard entries (e.g. `*.example.com`).
    #[serde(default)]
    pub wildcards: Vec<String>,
}

/// One subdomain row within a [`SubdomainPage`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subdomain {
    pub name: String,
    #[serde(rename = "isActive", default)]
    pub is_active: bool,
    #[serde(rename = "createdDate")]
    pub created_date: DateTime<Utc>,
}

/// One page of a domain's subdomains:
/// `GET /api/v1/domains/{id}?skip=&limit=`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubdomainPage {
    #[serde(default)]
    pub sub_domains: Vec<Subdomain>,
    pub total_subdomains: u64,
}

/// A domain owned by the current user, as listed in [`Profile`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DomainSummary {
    pub id: i64,
    pub domain: String,
    #[serde(rename = "isActive", default = "default_true")]
    pub is_active: bool,
    #[serde(rename = "createdDate", default)]
    pub created_date: Option<DateTime<Utc>>,
}

fn default_true() -> bool {
    true
}

/// The current user's profile: `GET /api/v1/profile/me`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    pub id: i64,
    pub email: String,
    #[serde(rename = "createdDate")]
    pub created_date: DateTime<Utc>,
    #[serde(default)]
    pub domains: Vec<DomainSummary>,
}

/// Success body of `POST /api/v1/login`. The session cookie is set via
/// response headers; the body only carries a confirmation message.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    #[serde(default)]
    pub message: String,
}

/// Success body of `POST /api/v1/signup`.
#[derive(Debug, Clone, Deserialize)]
pub struct SignupResponse {
    #[serde(default)]
    pub message: String,
}

/// Structured error body returned on non-2xx responses.
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorDetail {
    pub detail: String,
}

/// Backend health probe: `GET /api/v1/health`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthStatus {
    pub server_status: String,
    pub database: String,
}
