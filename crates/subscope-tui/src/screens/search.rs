//! Search screen — domain input line plus grouped result view.
//!
//! Submitting hides any previous result and shows a throbber until the
//! fetch completes. A 401 during search dispatches `SessionExpired` so the
//! app returns to the auth screen; every other failure renders a message
//! in the results area. The throbber is cleared on all completion paths.

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};
use tokio::sync::mpsc::UnboundedSender;
use tracing::debug;

use subscope_core::{CoreError, SearchView};

use crate::action::Action;
use crate::app::SharedSession;
use crate::component::Component;
use crate::theme;

pub struct SearchScreen {
    session: SharedSession,
    action_tx: Option<UnboundedSender<Action>>,
    input: String,
    loading: bool,
    results: Option<SearchView>,
    message: Option<String>,
    throbber_state: throbber_widgets_tui::ThrobberState,
}

impl SearchScreen {
    pub fn new(session: SharedSession) -> Self {
        Self {
            session,
            action_tx: None,
            input: String::new(),
            loading: false,
            results: None,
            message: None,
            throbber_state: throbber_widgets_tui::ThrobberState::default(),
        }
    }

    fn submit(&mut self) {
        if self.loading {
            return;
        }
        let query = self.input.trim().to_string();
        if query.is_empty() {
            self.message = Some("Please enter a domain to search".into());
            return;
        }
        let Some(tx) = self.action_tx.clone() else {
            return;
        };

        // Previous results disappear while the new search is in flight.
        self.loading = true;
        self.results = None;
        self.message = None;

        let session = self.session.clone();
        debug!(domain = %query, "search submitted");
        tokio::spawn(async move {
            let action = match session.lock().await.search(&query).await {
                Ok(view) => Action::SearchCompleted(Box::new(view)),
                Err(CoreError::SessionExpired) => Action::SessionExpired,
                Err(e) => Action::SearchFailed(e.to_string()),
            };
            let _ = tx.send(action);
        });
    }

    fn result_lines(view: &SearchView) -> Vec<Line<'static>> {
        let mut lines = vec![
            Line::from(Span::styled(view.summary(), theme::title_style())),
            Line::from(""),
            Line::from(Span::styled("Subdomains", theme::table_header())),
        ];
        if view.regular.is_empty() {
            lines.push(Line::from(Span::styled("  (none)", theme::key_hint())));
        }
        for name in &view.regular {
            lines.push(Line::from(Span::styled(
                format!("  {name}"),
                theme::table_row(),
            )));
        }
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled("Wildcards", theme::table_header())));
        if view.wildcards.is_empty() {
            lines.push(Line::from(Span::styled("  (none)", theme::key_hint())));
        }
        for name in &view.wildcards {
            lines.push(Line::from(Span::styled(
                format!("  {name}"),
                Style::default().fg(theme::CORAL),
            )));
        }
        lines
    }
}

impl Component for SearchScreen {
    fn init(&mut self, action_tx: UnboundedSender<Action>) -> Result<()> {
        self.action_tx = Some(action_tx);
        Ok(())
    }

    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        match (key.modifiers, key.code) {
            (_, KeyCode::Enter) => self.submit(),
            (_, KeyCode::Backspace) => {
                self.input.pop();
            }
            (KeyModifiers::CONTROL, KeyCode::Char('u')) => self.input.clear(),
            (KeyModifiers::NONE | KeyModifiers::SHIFT, KeyCode::Char(c)) => self.input.push(c),
            (_, KeyCode::Esc) => {
                self.results = None;
                self.message = None;
            }
            _ => {}
        }
        Ok(None)
    }

    fn update(&mut self, action: &Action) -> Result<Option<Action>> {
        match action {
            Action::Tick => {
                if self.loading {
                    self.throbber_state.calc_next();
                }
            }
            Action::SearchCompleted(view) => {
                self.loading = false;
                self.results = Some((**view).clone());
            }
            Action::SearchFailed(msg) => {
                self.loading = false;
                self.message = Some(msg.clone());
            }
            Action::SessionExpired => {
                // The app switches to the auth screen; just stop the loader.
                self.loading = false;
            }
            _ => {}
        }
        Ok(None)
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let layout = Layout::vertical([Constraint::Length(3), Constraint::Min(1)]).split(area);

        // Input line
        let input_block = Block::default()
            .title(" Search domains ")
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::border_focused());
        let input_inner = input_block.inner(layout[0]);
        frame.render_widget(input_block, layout[0]);
        frame.render_widget(
            Paragraph::new(Line::from(vec![
                Span::styled(self.input.clone(), theme::table_row()),
                Span::styled("▏", theme::border_focused()),
            ])),
            input_inner,
        );

        // Results area
        let results_block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::border_default());
        let results_inner = results_block.inner(layout[1]);
        frame.render_widget(results_block, layout[1]);

        if self.loading {
            let throbber = throbber_widgets_tui::Throbber::default()
                .label("Searching...")
                .throbber_style(Style::default().fg(theme::ELECTRIC_PURPLE));
            frame.render_stateful_widget(
                throbber,
                results_inner,
                &mut self.throbber_state.clone(),
            );
        } else if let Some(message) = &self.message {
            frame.render_widget(
                Paragraph::new(Span::styled(message.clone(), theme::error_text())),
                results_inner,
            );
        } else if let Some(view) = &self.results {
            frame.render_widget(Paragraph::new(Self::result_lines(view)), results_inner);
        } else {
            frame.render_widget(
                Paragraph::new(Span::styled(
                    "Type a domain and press Enter",
                    theme::key_hint(),
                )),
                results_inner,
            );
        }
    }

    fn capturing_input(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn texts(lines: &[Line<'static>]) -> Vec<String> {
        lines
            .iter()
            .map(|l| l.spans.iter().map(|s| s.content.as_ref()).collect())
            .collect()
    }

    #[test]
    fn result_lines_list_each_entry_once() {
        let view = SearchView {
            domain: "x".into(),
            count: 2,
            regular: vec!["a.x".into()],
            wildcards: vec!["*.x".into()],
        };
        let texts = texts(&SearchScreen::result_lines(&view));

        assert_eq!(texts[0], "Found 2 subdomains for x");
        assert_eq!(texts.iter().filter(|t| t.trim() == "a.x").count(), 1);
        assert_eq!(texts.iter().filter(|t| t.trim() == "*.x").count(), 1);
        // No placeholder rows when both groups have entries.
        assert!(!texts.iter().any(|t| t.contains("(none)")));
    }

    #[test]
    fn result_lines_mark_empty_groups() {
        let view = SearchView {
            domain: "x".into(),
            count: 0,
            regular: vec![],
            wildcards: vec![],
        };
        let texts = texts(&SearchScreen::result_lines(&view));

        // Both the Subdomains and Wildcards sections stay visible, empty.
        assert_eq!(texts.iter().filter(|t| t.trim() == "(none)").count(), 2);
    }
}
