//! Domain search command handler.

use owo_colors::OwoColorize;

use subscope_core::SearchView;

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;

use super::util;

/// `subscope search <domain>`
pub async fn handle(domain: &str, global: &GlobalOpts) -> Result<(), CliError> {
    let session = util::authenticated(global).await?;

    let pb = util::spinner(&format!("Searching {domain}..."), global);
    let result = session.search(domain).await;
    if let Some(pb) = pb {
        pb.finish_and_clear();
    }
    let view = result?;

    let color = output::should_color(&global.color);
    let out = output::render_single(
        &global.output,
        &view,
        |v| detail(v, color),
        |v| {
            v.regular
                .iter()
                .chain(v.wildcards.iter())
                .cloned()
                .collect::<Vec<_>>()
                .join("\n")
        },
    );

    output::print_output(&out, global.quiet);
    Ok(())
}

/// Table-mode body: summary line, then each group listed when non-empty.
fn detail(v: &SearchView, color: bool) -> String {
    let mut lines = Vec::new();
    if color {
        lines.push(v.summary().bold().to_string());
    } else {
        lines.push(v.summary());
    }
    if !v.regular.is_empty() {
        lines.push(String::new());
        lines.push("Subdomains:".to_string());
        for name in &v.regular {
            lines.push(format!("  {name}"));
        }
    }
    if !v.wildcards.is_empty() {
        lines.push(String::new());
        lines.push("Wildcards:".to_string());
        for name in &v.wildcards {
            lines.push(format!("  {name}"));
        }
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detail_lists_each_entry_once() {
        let view = SearchView {
            domain: "x".into(),
            count: 2,
            regular: vec!["a.x".into()],
            wildcards: vec!["*.x".into()],
        };
        let out = detail(&view, false);
        let lines: Vec<&str> = out.lines().collect();

        assert_eq!(lines[0], "Found 2 subdomains for x");
        assert_eq!(lines.iter().filter(|l| l.trim() == "a.x").count(), 1);
        assert_eq!(lines.iter().filter(|l| l.trim() == "*.x").count(), 1);
    }

    #[test]
    fn detail_omits_empty_groups() {
        let view = SearchView {
            domain: "x".into(),
            count: 0,
            regular: vec![],
            wildcards: vec![],
        };
        let out = detail(&view, false);

        assert_eq!(out, "Found 0 subdomains for x");
    }
}
