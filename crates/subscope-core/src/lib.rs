// subscope-core: Domain layer between subscope-api and consumers (CLI/TUI).

pub mod browser;
pub mod config;
pub mod error;
pub mod session;
pub mod validate;
pub mod view;

// ── Primary re-exports ──────────────────────────────────────────────
pub use browser::{BrowserPhase, PageRequest, SubdomainBrowser, ITEMS_PER_PAGE};
pub use config::{AuthCredentials, ServerConfig, TlsVerification};
pub use error::CoreError;
pub use session::Session;
pub use view::{PageControl, Pagination, SearchView, SubdomainRow};
