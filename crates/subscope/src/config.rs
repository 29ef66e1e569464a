//! GlobalOpts-aware configuration resolution.
//!
//! Thin wrapper over `subscope-config`: applies CLI flag and env overrides
//! on top of the file-backed profile, then hands core a pre-built
//! `ServerConfig` + `AuthCredentials`.

use std::time::Duration;

use secrecy::SecretString;

use subscope_config::{self as cfg, Config};
use subscope_core::{AuthCredentials, ServerConfig, TlsVerification};

use crate::cli::GlobalOpts;
use crate::error::CliError;

/// Resolve the active profile name from CLI flags and config.
pub fn active_profile_name(global: &GlobalOpts, config: &Config) -> String {
    config.resolve_profile_name(global.profile.as_deref())
}

/// Build a `ServerConfig` from the config file, profile, and CLI overrides.
///
/// Works without a config file when `--server` is given.
pub fn resolve_server(global: &GlobalOpts) -> Result<ServerConfig, CliError> {
    let config = cfg::load_config_or_default();
    let profile_name = active_profile_name(global, &config);
    let profile = config.profiles.get(&profile_name);

    // URL: flag > env (clap merges env) > profile
    let url_str = match (global.server.as_deref(), profile) {
        (Some(s), _) => s.to_string(),
        (None, Some(p)) => p.server.clone(),
        (None, None) => {
            return Err(CliError::NoConfig {
                path: cfg::config_path().display().to_string(),
            });
        }
    };

    let url: url::Url = url_str.parse().map_err(|_| CliError::Validation {
        field: "server".into(),
        reason: format!("invalid URL: {url_str}"),
    })?;

    let tls = if global.insecure || profile.and_then(|p| p.insecure).unwrap_or(false) {
        TlsVerification::DangerAcceptInvalid
    } else {
        TlsVerification::SystemDefaults
    };

    Ok(ServerConfig {
        url,
        tls,
        timeout: Duration::from_secs(global.timeout),
    })
}

/// Resolve login credentials: flag/env email, then the profile's
/// credential chain (env, keyring, plaintext).
pub fn resolve_credentials(global: &GlobalOpts) -> Result<AuthCredentials, CliError> {
    let config = cfg::load_config_or_default();
    let profile_name = active_profile_name(global, &config);

    if let Some(profile) = config.profiles.get(&profile_name) {
        let mut creds = cfg::resolve_credentials(profile, &profile_name)?;
        if let Some(ref email) = global.email {
            creds.email.clone_from(email);
        }
        return Ok(creds);
    }

    // No profile: need both email (flag/env) and SUBSCOPE_PASSWORD.
    let email = global
        .email
        .clone()
        .ok_or_else(|| CliError::NoCredentials {
            profile: profile_name.clone(),
        })?;
    let password = std::env::var("SUBSCOPE_PASSWORD").map_err(|_| CliError::NoCredentials {
        profile: profile_name,
    })?;

    Ok(AuthCredentials {
        email,
        password: SecretString::from(password),
    })
}
