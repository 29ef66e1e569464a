//! Renders a [`Pagination`] strip into a styled [`Line`].
//!
//! Previous/Next appear only when there is somewhere to go; the current
//! page renders as emphasized plain text rather than a jump target.

use ratatui::style::Modifier;
use ratatui::text::{Line, Span};

use subscope_core::Pagination;

use crate::theme;

/// Build the page-control line, e.g. `« Previous  1  [2]  3  Next »`.
pub fn pagination_line(strip: &Pagination) -> Line<'static> {
    let mut spans: Vec<Span<'static>> = Vec::new();

    if strip.has_prev {
        spans.push(Span::styled("« Previous", theme::key_hint_key()));
        spans.push(Span::raw("  "));
    }

    for (i, control) in strip.pages.iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw("  "));
        }
        if control.is_current {
            spans.push(Span::styled(
                format!("[{}]", control.number),
                theme::tab_active().add_modifier(Modifier::REVERSED),
            ));
        } else {
            spans.push(Span::styled(control.number.to_string(), theme::key_hint()));
        }
    }

    if strip.has_next {
        spans.push(Span::raw("  "));
        spans.push(Span::styled("Next »", theme::key_hint_key()));
    }

    Line::from(spans)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn text_of(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn middle_page_shows_both_arrows() {
        let line = pagination_line(&Pagination::build(2, 25));
        assert_eq!(text_of(&line), "« Previous  1  [2]  3  Next »");
    }

    #[test]
    fn first_page_has_no_previous() {
        let line = pagination_line(&Pagination::build(1, 25));
        assert_eq!(text_of(&line), "[1]  2  3  Next »");
    }

    #[test]
    fn last_page_has_no_next() {
        let line = pagination_line(&Pagination::build(3, 25));
        assert_eq!(text_of(&line), "« Previous  1  2  [3]");
    }

    #[test]
    fn single_page_is_just_the_current_marker() {
        let line = pagination_line(&Pagination::build(1, 7));
        assert_eq!(text_of(&line), "[1]");
    }
}
