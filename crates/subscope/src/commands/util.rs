//! Shared helpers for command handlers.

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use secrecy::SecretString;

use subscope_core::{AuthCredentials, Session};

use crate::cli::GlobalOpts;
use crate::config;
use crate::error::CliError;

/// Build an unauthenticated session for the resolved server.
pub fn connect(global: &GlobalOpts) -> Result<Session, CliError> {
    let server = config::resolve_server(global)?;
    Ok(Session::connect(&server)?)
}

/// Build a session and log in with resolved credentials.
///
/// The session cookie lives only in this process; every authenticated
/// command logs in at the start of its invocation.
pub async fn authenticated(global: &GlobalOpts) -> Result<Session, CliError> {
    let creds = config::resolve_credentials(global)?;
    let mut session = connect(global)?;
    session.login(&creds).await?;
    Ok(session)
}

/// Prompt for an email: CLI arg, then profile/env, then interactive.
pub fn resolve_email(explicit: Option<String>, global: &GlobalOpts) -> Result<String, CliError> {
    if let Some(email) = explicit {
        return Ok(email);
    }
    if let Some(ref email) = global.email {
        return Ok(email.clone());
    }
    dialoguer::Input::new()
        .with_prompt("Email")
        .interact_text()
        .map_err(prompt_err)
}

/// Prompt for a password without echo.
pub fn prompt_password(label: &str) -> Result<SecretString, CliError> {
    let pw = rpassword::prompt_password(label).map_err(prompt_err)?;
    Ok(SecretString::from(pw))
}

/// Credentials for an interactive auth command: resolved from config
/// where possible, prompted otherwise.
pub fn interactive_credentials(
    explicit_email: Option<String>,
    global: &GlobalOpts,
) -> Result<AuthCredentials, CliError> {
    let email = resolve_email(explicit_email, global)?;

    // Reuse the configured password chain when it matches this email.
    if let Ok(creds) = config::resolve_credentials(global) {
        if creds.email == email {
            return Ok(creds);
        }
    }

    let password = prompt_password("Password: ")?;
    Ok(AuthCredentials { email, password })
}

/// Spinner shown while a request is in flight. Disabled in quiet mode
/// and for non-table output (keeps piped JSON clean).
pub fn spinner(message: &str, global: &GlobalOpts) -> Option<ProgressBar> {
    use crate::cli::OutputFormat;

    if global.quiet || !matches!(global.output, OutputFormat::Table) {
        return None;
    }
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner:.green} {msg}") {
        pb.set_style(style);
    }
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(80));
    Some(pb)
}

/// Map a dialoguer / interactive I/O failure into CliError.
pub fn prompt_err(e: impl std::fmt::Display) -> CliError {
    CliError::Validation {
        field: "interactive".into(),
        reason: format!("prompt failed: {e}"),
    }
}
