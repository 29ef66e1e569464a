//! Login and signup command handlers.
//!
//! Both validate locally (via `Session`) before any request goes out, so
//! a typo'd email or weak password fails fast with a usage error.

use secrecy::ExposeSecret;

use subscope_core::validate;

use crate::cli::GlobalOpts;
use crate::error::CliError;

use super::util;

/// `subscope login [email]`
pub async fn login(email: Option<String>, global: &GlobalOpts) -> Result<(), CliError> {
    let creds = util::interactive_credentials(email, global)?;

    let mut session = util::connect(global)?;
    session.login(&creds).await?;

    if !global.quiet {
        eprintln!("✓ Logged in as {}", creds.email);
    }
    Ok(())
}

/// `subscope signup [email]`
pub async fn signup(email: Option<String>, global: &GlobalOpts) -> Result<(), CliError> {
    let email = util::resolve_email(email, global)?;

    // Validate the email before asking for passwords.
    validate::validate_email(&email)?;

    let password = util::prompt_password("Password: ")?;
    validate::validate_password(password.expose_secret())?;

    let confirm = util::prompt_password("Confirm password: ")?;

    let session = util::connect(global)?;
    let message = session
        .signup(
            &subscope_core::AuthCredentials {
                email: email.clone(),
                password,
            },
            confirm.expose_secret(),
        )
        .await?;

    if !global.quiet {
        eprintln!("✓ {message}");
        eprintln!("  Log in with: subscope login {email}");
    }
    Ok(())
}
