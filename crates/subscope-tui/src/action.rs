//! All possible UI actions. Actions are the sole mechanism for state mutation.

use subscope_api::models::{DomainSummary, SubdomainPage};
use subscope_core::SearchView;

use crate::screen::ScreenId;

/// Every state transition in the TUI is expressed as an Action.
#[derive(Debug, Clone)]
pub enum Action {
    // ── Lifecycle ──────────────────────────────────────────────────
    Quit,
    Tick,
    Render,
    Resize(u16, u16),

    // ── Navigation ────────────────────────────────────────────────
    SwitchScreen(ScreenId),

    // ── Session lifecycle ─────────────────────────────────────────
    /// Login succeeded; the session cookie is set. Carries the email.
    SessionReady(String),
    /// A 401 arrived on an authenticated call. The app switches back to
    /// the auth screen, mirroring a login redirect.
    SessionExpired,
    /// Login was rejected (wrong credentials or server error detail).
    AuthFailed(String),
    /// Signup succeeded; carries the server's confirmation message.
    SignupCompleted(String),

    // ── Search ────────────────────────────────────────────────────
    SearchCompleted(Box<SearchView>),
    SearchFailed(String),

    // ── Domains / subdomain browser ───────────────────────────────
    DomainsLoaded(Vec<DomainSummary>),
    DomainsFailed(String),
    /// A subdomain page fetch finished. `seq` is echoed back so the
    /// browser can drop responses from superseded navigations.
    PageLoaded { seq: u64, page: SubdomainPage },
    PageFailed { seq: u64, message: String },
}
