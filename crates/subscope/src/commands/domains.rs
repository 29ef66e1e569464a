//! Domain listing and paginated subdomain browsing.

use tabled::Tabled;

use subscope_core::{Pagination, Session, SubdomainBrowser, SubdomainRow};

use crate::cli::{DomainsArgs, DomainsCommand, GlobalOpts};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table rows ──────────────────────────────────────────────────────

#[derive(Tabled)]
struct DomainTableRow {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "DOMAIN")]
    domain: String,
    #[tabled(rename = "STATUS")]
    status: &'static str,
}

#[derive(Tabled)]
struct SubdomainTableRow {
    #[tabled(rename = "SUBDOMAIN")]
    name: String,
    #[tabled(rename = "STATUS")]
    status: &'static str,
    #[tabled(rename = "CREATED")]
    created: String,
}

fn subdomain_table_row(row: &SubdomainRow) -> SubdomainTableRow {
    SubdomainTableRow {
        name: row.name.clone(),
        status: row.status,
        created: row.created_date.format("%Y-%m-%d").to_string(),
    }
}

// ── Handlers ────────────────────────────────────────────────────────

pub async fn handle(args: DomainsArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        DomainsCommand::List => list(global).await,
        DomainsCommand::Subdomains { id, page, all } => {
            if all {
                subdomains_all(id, global).await
            } else {
                subdomains_page(id, page, global).await
            }
        }
    }
}

/// `subscope domains list`
async fn list(global: &GlobalOpts) -> Result<(), CliError> {
    let session = util::authenticated(global).await?;
    let profile = session.profile().await?;

    let out = output::render_list(
        &global.output,
        &profile.domains,
        |d| DomainTableRow {
            id: d.id,
            domain: d.domain.clone(),
            status: if d.is_active { "Active" } else { "Inactive" },
        },
        |d| d.domain.clone(),
    );
    output::print_output(&out, global.quiet);
    Ok(())
}

/// `subscope domains subdomains <id> --page N`
async fn subdomains_page(id: i64, page: u64, global: &GlobalOpts) -> Result<(), CliError> {
    if page == 0 {
        return Err(CliError::Validation {
            field: "page".into(),
            reason: "pages start at 1".into(),
        });
    }

    let session = util::authenticated(global).await?;

    let mut browser = SubdomainBrowser::new();
    let mut req = browser.open(id, id.to_string());
    if page > 1 {
        // Skip straight to the requested page; range is checked against
        // the response's total below.
        if let Some(r) = browser.goto(page) {
            req = r;
        }
    }

    let pb = util::spinner("Loading subdomains...", global);
    let result = session.subdomain_page(req).await;
    if let Some(pb) = pb {
        pb.finish_and_clear();
    }
    let fetched = result?;

    let total = fetched.total_subdomains;
    let strip = Pagination::build(page, total);
    if page > strip.total_pages {
        return Err(CliError::Validation {
            field: "page".into(),
            reason: format!("page {page} is out of range (1..={})", strip.total_pages),
        });
    }
    browser.complete(req.seq, fetched.clone());

    let rows: Vec<SubdomainRow> = fetched.sub_domains.into_iter().map(Into::into).collect();
    let out = output::render_list(
        &global.output,
        &rows,
        subdomain_table_row,
        |r| r.name.clone(),
    );
    output::print_output(&out, global.quiet);

    if !global.quiet && matches!(global.output, crate::cli::OutputFormat::Table) {
        eprintln!("{}", render_strip(&strip));
        eprintln!("{total} subdomains total");
    }
    Ok(())
}

/// `subscope domains subdomains <id> --all`
async fn subdomains_all(id: i64, global: &GlobalOpts) -> Result<(), CliError> {
    let session = util::authenticated(global).await?;

    let mut browser = SubdomainBrowser::new();
    let mut req = browser.open(id, id.to_string());
    let mut rows: Vec<SubdomainRow> = Vec::new();

    let pb = util::spinner("Loading subdomains...", global);
    loop {
        let page = match session.subdomain_page(req).await {
            Ok(p) => p,
            Err(e) => {
                if let Some(ref pb) = pb {
                    pb.finish_and_clear();
                }
                return Err(e.into());
            }
        };
        rows.extend(page.sub_domains.iter().cloned().map(SubdomainRow::from));
        browser.complete(req.seq, page);

        match browser.goto(browser.current_page() + 1) {
            Some(next) => req = next,
            None => break,
        }
    }
    if let Some(pb) = pb {
        pb.finish_and_clear();
    }

    let out = output::render_list(
        &global.output,
        &rows,
        subdomain_table_row,
        |r| r.name.clone(),
    );
    output::print_output(&out, global.quiet);
    Ok(())
}

/// Render the page-control strip, e.g. `« Previous  [1] 2 3  Next »`.
fn render_strip(strip: &Pagination) -> String {
    let mut parts = Vec::new();
    if strip.has_prev {
        parts.push("« Previous".to_string());
    }
    for control in &strip.pages {
        if control.is_current {
            parts.push(format!("[{}]", control.number));
        } else {
            parts.push(control.number.to_string());
        }
    }
    if strip.has_next {
        parts.push("Next »".to_string());
    }
    parts.join("  ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strip_rendering() {
        let strip = Pagination::build(2, 25);
        assert_eq!(render_strip(&strip), "« Previous  1  [2]  3  Next »");

        let first = Pagination::build(1, 25);
        assert_eq!(render_strip(&first), "[1]  2  3  Next »");

        let single = Pagination::build(1, 5);
        assert_eq!(render_strip(&single), "[1]");
    }
}
