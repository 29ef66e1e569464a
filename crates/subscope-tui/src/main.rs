//! `subscope-tui` — terminal UI for browsing subdomain enumeration results.
//!
//! Three screens, navigable from the tab bar: Account (login/register),
//! Search (ad-hoc domain lookup), and Domains (saved domains with a
//! paginated subdomain browser).
//!
//! Logs are written to a file (default `/tmp/subscope-tui.log`) to avoid
//! corrupting the terminal UI.
//!
//! Entry point: CLI argument parsing, tracing setup, panic hooks, and app launch.

mod action;
mod app;
mod component;
mod event;
mod screen;
mod screens;
mod theme;
mod tui;
mod widgets;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use color_eyre::eyre::{Result, eyre};
use tokio::sync::Mutex;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use subscope_config as cfg;
use subscope_core::{ServerConfig, Session, TlsVerification};

use crate::app::App;

/// Terminal UI for subdomain reconnaissance accounts.
#[derive(Parser, Debug)]
#[command(name = "subscope-tui", version, about)]
struct Cli {
    /// Server URL (e.g., https://subscope.example.com)
    #[arg(short = 's', long, env = "SUBSCOPE_SERVER")]
    server: Option<String>,

    /// Account email, pre-filled into the login form
    #[arg(short = 'e', long, env = "SUBSCOPE_EMAIL")]
    email: Option<String>,

    /// Config profile to read server settings from
    #[arg(short = 'p', long, env = "SUBSCOPE_PROFILE")]
    profile: Option<String>,

    /// Skip TLS certificate verification (self-signed dev servers)
    #[arg(long, env = "SUBSCOPE_INSECURE")]
    insecure: bool,

    /// Request timeout in seconds
    #[arg(long)]
    timeout: Option<u64>,

    /// Log file path (defaults to /tmp/subscope-tui.log)
    #[arg(long, default_value = "/tmp/subscope-tui.log")]
    log_file: PathBuf,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// Set up file-based tracing. We MUST NOT log to stdout/stderr — that would
/// corrupt the TUI output. Returns a guard that must be held for the
/// lifetime of the application to ensure logs are flushed.
fn setup_tracing(cli: &Cli) -> WorkerGuard {
    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("subscope_tui={log_level}")));

    let log_dir = cli.log_file.parent().unwrap_or(std::path::Path::new("/tmp"));
    let log_filename = cli
        .log_file
        .file_name()
        .unwrap_or(std::ffi::OsStr::new("subscope-tui.log"));

    let file_appender = tracing_appender::rolling::never(log_dir, log_filename);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_target(true),
        )
        .init();

    guard
}

/// Build the server config and login-form email from flags and the config
/// file. Flags win over the profile; with neither, the defaults point at
/// a local dev server.
fn resolve_server(cli: &Cli) -> Result<(ServerConfig, Option<String>)> {
    let config = cfg::load_config_or_default();
    let profile_name = config.resolve_profile_name(cli.profile.as_deref());
    let profile = config.profiles.get(&profile_name);

    let mut server = match profile {
        Some(p) => cfg::profile_to_server_config(p)
            .map_err(|e| eyre!("profile '{profile_name}': {e}"))?,
        None => ServerConfig::default(),
    };

    if let Some(url_str) = cli.server.as_deref() {
        server.url = url_str
            .parse()
            .map_err(|e| eyre!("invalid server URL '{url_str}': {e}"))?;
    }
    if cli.insecure {
        server.tls = TlsVerification::DangerAcceptInvalid;
    }
    if let Some(secs) = cli.timeout {
        server.timeout = Duration::from_secs(secs);
    }

    let email = cli
        .email
        .clone()
        .or_else(|| profile.and_then(|p| p.email.clone()));

    Ok((server, email))
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Install panic/error hooks BEFORE entering the terminal
    tui::install_hooks()?;

    // Tracing to file — hold the guard so logs flush on exit
    let _log_guard = setup_tracing(&cli);

    let (server, email) = resolve_server(&cli)?;
    info!(url = %server.url, "starting subscope-tui");

    let session = Session::connect(&server)?;
    let mut app = App::new(Arc::new(Mutex::new(session)), email);
    app.run().await?;

    Ok(())
}
