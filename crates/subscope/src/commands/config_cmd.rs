//! Config subcommand handlers.

use dialoguer::{Confirm, Input};

use subscope_config::{self as cfg, Profile};

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts};
use crate::config;
use crate::error::CliError;
use crate::output;

use super::util::prompt_err;

pub fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        // ── Init: interactive wizard ────────────────────────────────
        ConfigCommand::Init => {
            let config_path = cfg::config_path();
            eprintln!("✨ subscope — configuration wizard");
            eprintln!("   Config path: {}\n", config_path.display());

            // 1. Profile name
            let profile_name: String = Input::new()
                .with_prompt("Profile name")
                .default("default".into())
                .interact_text()
                .map_err(prompt_err)?;

            // 2. Server URL
            let server: String = Input::new()
                .with_prompt("Server URL")
                .default("http://localhost:8000".into())
                .interact_text()
                .map_err(prompt_err)?;

            // 3. Email
            let email: String = Input::new()
                .with_prompt("Account email")
                .interact_text()
                .map_err(prompt_err)?;

            subscope_core::validate::validate_email(&email)?;

            // 4. Password: keyring or plaintext
            let pass = rpassword::prompt_password("Password: ").map_err(prompt_err)?;
            if pass.is_empty() {
                return Err(CliError::Validation {
                    field: "password".into(),
                    reason: "password cannot be empty".into(),
                });
            }

            let use_keyring = Confirm::new()
                .with_prompt("Store password in system keyring? (No = plaintext config file)")
                .default(true)
                .interact()
                .map_err(prompt_err)?;

            let password_field = if use_keyring {
                cfg::store_password(&profile_name, &pass)?;
                eprintln!("   ✓ Password stored in system keyring");
                None
            } else {
                Some(pass)
            };

            // 5. Build profile and config
            let mut config = cfg::load_config_or_default();
            config.profiles.insert(
                profile_name.clone(),
                Profile {
                    server,
                    email: Some(email),
                    password: password_field,
                    insecure: None,
                    timeout: None,
                },
            );
            config.default_profile = Some(profile_name.clone());

            // 6. Write config
            cfg::save_config(&config)?;

            eprintln!("\n✓ Configuration written to {}", config_path.display());
            eprintln!("  Active profile: {profile_name}");
            eprintln!("\n  Test it: subscope login");

            Ok(())
        }

        // ── Show ────────────────────────────────────────────────────
        ConfigCommand::Show => {
            let config = redact_passwords(cfg::load_config_or_default());
            let out = output::render_single(
                &global.output,
                &config,
                |c| format!("{c:#?}"),
                |_| "config".into(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        // ── Profiles ────────────────────────────────────────────────
        ConfigCommand::Profiles => {
            let config = cfg::load_config_or_default();
            let default = config.default_profile.as_deref().unwrap_or("default");
            if config.profiles.is_empty() {
                eprintln!("No profiles configured. Run: subscope config init");
            } else {
                for name in config.profiles.keys() {
                    let marker = if name == default { " *" } else { "" };
                    println!("{name}{marker}");
                }
            }
            Ok(())
        }

        // ── Use <name> ─────────────────────────────────────────────
        ConfigCommand::Use { name } => {
            let mut config = cfg::load_config_or_default();

            if !config.profiles.contains_key(&name) {
                let available: Vec<_> = config.profiles.keys().cloned().collect();
                return Err(CliError::ProfileNotFound {
                    name,
                    available: if available.is_empty() {
                        "(none)".into()
                    } else {
                        available.join(", ")
                    },
                });
            }

            config.default_profile = Some(name.clone());
            cfg::save_config(&config)?;
            eprintln!("✓ Default profile set to '{name}'");
            Ok(())
        }

        // ── SetPassword ─────────────────────────────────────────────
        ConfigCommand::SetPassword { profile } => {
            let config_file = cfg::load_config_or_default();
            let profile_name =
                profile.unwrap_or_else(|| config::active_profile_name(global, &config_file));

            if !config_file.profiles.contains_key(&profile_name) {
                let available: Vec<_> = config_file.profiles.keys().cloned().collect();
                return Err(CliError::ProfileNotFound {
                    name: profile_name,
                    available: if available.is_empty() {
                        "(none)".into()
                    } else {
                        available.join(", ")
                    },
                });
            }

            let secret = rpassword::prompt_password("Password: ").map_err(prompt_err)?;
            if secret.is_empty() {
                return Err(CliError::Validation {
                    field: "password".into(),
                    reason: "value cannot be empty".into(),
                });
            }

            cfg::store_password(&profile_name, &secret)?;
            eprintln!("✓ Password stored in system keyring for profile '{profile_name}'");
            Ok(())
        }
    }
}

/// Strip plaintext profile passwords before the config reaches stdout,
/// in every output mode (Debug render and JSON alike).
fn redact_passwords(mut config: cfg::Config) -> cfg::Config {
    for profile in config.profiles.values_mut() {
        if profile.password.is_some() {
            profile.password = Some("<redacted>".into());
        }
    }
    config
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn show_never_prints_plaintext_passwords() {
        let mut config = cfg::Config::default();
        config.profiles.insert(
            "dev".into(),
            Profile {
                server: "http://localhost:8000".into(),
                email: Some("user@example.com".into()),
                password: Some("hunter22".into()),
                insecure: None,
                timeout: None,
            },
        );

        let redacted = redact_passwords(config);

        assert_eq!(
            redacted.profiles["dev"].password.as_deref(),
            Some("<redacted>")
        );
        assert!(!format!("{redacted:#?}").contains("hunter22"));
    }

    #[test]
    fn redaction_leaves_absent_passwords_absent() {
        let mut config = cfg::Config::default();
        config.profiles.insert(
            "keyringed".into(),
            Profile {
                server: "http://localhost:8000".into(),
                email: None,
                password: None,
                insecure: None,
                timeout: None,
            },
        );

        let redacted = redact_passwords(config);
        assert!(redacted.profiles["keyringed"].password.is_none());
    }
}
