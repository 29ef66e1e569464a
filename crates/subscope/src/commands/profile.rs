//! Profile and health command handlers.

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;

use super::util;

/// `subscope profile`
pub async fn handle(global: &GlobalOpts) -> Result<(), CliError> {
    let session = util::authenticated(global).await?;
    let profile = session.profile().await?;

    let out = output::render_single(
        &global.output,
        &profile,
        |p| {
            let mut lines = vec![
                format!("Email:   {}", p.email),
                format!("Member since: {}", p.created_date.format("%Y-%m-%d")),
                format!("Domains: {}", p.domains.len()),
            ];
            for d in &p.domains {
                let status = if d.is_active { "Active" } else { "Inactive" };
                lines.push(format!("  [{}] {} ({status})", d.id, d.domain));
            }
            lines.join("\n")
        },
        |p| p.email.clone(),
    );
    output::print_output(&out, global.quiet);
    Ok(())
}

/// `subscope health`
pub async fn health(global: &GlobalOpts) -> Result<(), CliError> {
    let session = util::connect(global)?;
    let health = session.health().await?;

    let out = output::render_single(
        &global.output,
        &health,
        |h| format!("Server:   {}\nDatabase: {}", h.server_status, h.database),
        |h| h.server_status.clone(),
    );
    output::print_output(&out, global.quiet);
    Ok(())
}
