//! Command dispatch: bridges CLI args -> core Session calls -> output.

pub mod auth;
pub mod config_cmd;
pub mod domains;
pub mod profile;
pub mod search;
pub mod util;

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// Dispatch a server-bound command to the appropriate handler.
pub async fn dispatch(cmd: Command, global: &GlobalOpts) -> Result<(), CliError> {
    match cmd {
        Command::Login { email } => auth::login(email, global).await,
        Command::Signup { email } => auth::signup(email, global).await,
        Command::Search { domain } => search::handle(&domain, global).await,
        Command::Domains(args) => domains::handle(args, global).await,
        Command::Profile => profile::handle(global).await,
        Command::Health => profile::health(global).await,
        // Config and Completions are handled before dispatch
        Command::Config(_) | Command::Completions(_) => unreachable!(),
    }
}
