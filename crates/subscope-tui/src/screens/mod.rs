//! Screen implementations. Each screen is a top-level Component.

mod auth;
mod domains;
mod search;

use crate::app::SharedSession;
use crate::component::Component;
use crate::screen::ScreenId;

pub use auth::AuthScreen;
pub use domains::DomainsScreen;
pub use search::SearchScreen;

/// Create the three screens, each holding a handle to the shared session.
pub fn create_screens(
    session: &SharedSession,
    prefill_email: Option<String>,
) -> Vec<(ScreenId, Box<dyn Component>)> {
    vec![
        (
            ScreenId::Auth,
            Box::new(AuthScreen::new(session.clone(), prefill_email)),
        ),
        (
            ScreenId::Search,
            Box::new(SearchScreen::new(session.clone())),
        ),
        (
            ScreenId::Domains,
            Box::new(DomainsScreen::new(session.clone())),
        ),
    ]
}
