//! Domains screen — saved-domain table plus the modal subdomain browser.
//!
//! Enter on a row opens a centered modal and fetches page 1. Left/Right
//! (or p/n) move pages, digit keys jump. Responses carry the request's
//! sequence number; the browser drops any response from a superseded
//! navigation, and a failed fetch keeps the last displayed page on screen.

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Position, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Cell, Paragraph, Row, Table};
use tokio::sync::mpsc::UnboundedSender;
use tracing::debug;

use subscope_api::models::DomainSummary;
use subscope_core::{
    BrowserPhase, CoreError, PageRequest, Pagination, SubdomainBrowser, SubdomainRow,
};

use crate::action::Action;
use crate::app::SharedSession;
use crate::component::Component;
use crate::theme;
use crate::widgets::pagination::pagination_line;

pub struct DomainsScreen {
    session: SharedSession,
    action_tx: Option<UnboundedSender<Action>>,
    signed_in: bool,
    domains: Vec<DomainSummary>,
    selected: usize,
    loading_domains: bool,
    list_error: Option<String>,
    browser: SubdomainBrowser,
    modal_open: bool,
    page_error: Option<String>,
    terminal_size: (u16, u16),
    throbber_state: throbber_widgets_tui::ThrobberState,
}

impl DomainsScreen {
    pub fn new(session: SharedSession) -> Self {
        Self {
            session,
            action_tx: None,
            signed_in: false,
            domains: Vec::new(),
            selected: 0,
            loading_domains: false,
            list_error: None,
            browser: SubdomainBrowser::new(),
            modal_open: false,
            page_error: None,
            terminal_size: (80, 24),
            throbber_state: throbber_widgets_tui::ThrobberState::default(),
        }
    }

    /// Reload the saved-domain list from `/profile/me`.
    fn fetch_domains(&mut self) {
        let Some(tx) = self.action_tx.clone() else {
            return;
        };
        self.loading_domains = true;
        self.list_error = None;

        let session = self.session.clone();
        tokio::spawn(async move {
            let action = match session.lock().await.profile().await {
                Ok(profile) => Action::DomainsLoaded(profile.domains),
                Err(CoreError::SessionExpired) => Action::SessionExpired,
                Err(e) => Action::DomainsFailed(e.to_string()),
            };
            let _ = tx.send(action);
        });
    }

    /// Perform the fetch a browser navigation asked for.
    fn fetch_page(&self, req: PageRequest) {
        let Some(tx) = self.action_tx.clone() else {
            return;
        };
        let session = self.session.clone();
        debug!(domain_id = req.domain_id, skip = req.skip, seq = req.seq, "fetching page");
        tokio::spawn(async move {
            let action = match session.lock().await.subdomain_page(req).await {
                Ok(page) => Action::PageLoaded { seq: req.seq, page },
                Err(CoreError::SessionExpired) => Action::SessionExpired,
                Err(e) => Action::PageFailed {
                    seq: req.seq,
                    message: e.to_string(),
                },
            };
            let _ = tx.send(action);
        });
    }

    fn open_selected(&mut self) {
        let Some(domain) = self.domains.get(self.selected) else {
            return;
        };
        self.modal_open = true;
        self.page_error = None;
        let req = self.browser.open(domain.id, domain.domain.clone());
        self.fetch_page(req);
    }

    fn close_modal(&mut self) {
        // close() invalidates the in-flight sequence, so a late response
        // cannot repopulate a dismissed modal.
        self.modal_open = false;
        self.page_error = None;
        self.browser.close();
    }

    fn goto_page(&mut self, page: u64) {
        if let Some(req) = self.browser.goto(page) {
            self.fetch_page(req);
        }
    }

    fn modal_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => self.close_modal(),
            KeyCode::Left | KeyCode::Char('p') => {
                let page = self.browser.current_page();
                if page > 1 {
                    self.goto_page(page - 1);
                }
            }
            KeyCode::Right | KeyCode::Char('n') => {
                self.goto_page(self.browser.current_page() + 1);
            }
            KeyCode::Char('r') => {
                if let Some(req) = self.browser.refresh() {
                    self.page_error = None;
                    self.fetch_page(req);
                }
            }
            KeyCode::Char(c @ '1'..='9') => {
                if let Some(page) = c.to_digit(10) {
                    self.goto_page(u64::from(page));
                }
            }
            _ => {}
        }
    }

    fn list_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.selected = self.selected.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if self.selected + 1 < self.domains.len() {
                    self.selected += 1;
                }
            }
            KeyCode::Enter => self.open_selected(),
            KeyCode::Char('r') => {
                if self.signed_in {
                    self.fetch_domains();
                }
            }
            _ => {}
        }
    }

    /// Content area of the frame (everything above the tab/status bars).
    fn content_area(&self) -> Rect {
        let (w, h) = self.terminal_size;
        Rect::new(0, 0, w, h.saturating_sub(2))
    }

    fn modal_rect(area: Rect) -> Rect {
        let w = 64u16.min(area.width.saturating_sub(4));
        let h = 18u16.min(area.height.saturating_sub(2));
        let x = (area.width.saturating_sub(w)) / 2;
        let y = (area.height.saturating_sub(h)) / 2;
        Rect::new(area.x + x, area.y + y, w, h)
    }

    // ── Rendering ───────────────────────────────────────────────────

    fn render_domain_table(&self, frame: &mut Frame, area: Rect) {
        let header = Row::new(vec!["ID", "DOMAIN", "STATUS", "ADDED"]).style(theme::table_header());

        let rows: Vec<Row> = self
            .domains
            .iter()
            .enumerate()
            .map(|(i, d)| {
                let status = if d.is_active { "Active" } else { "Inactive" };
                let status_style = if d.is_active {
                    Style::default().fg(theme::SUCCESS_GREEN)
                } else {
                    Style::default().fg(theme::ERROR_RED)
                };
                let added = d
                    .created_date
                    .map_or_else(|| "-".to_string(), |t| t.format("%Y-%m-%d").to_string());
                let row = Row::new(vec![
                    Cell::from(d.id.to_string()),
                    Cell::from(d.domain.clone()),
                    Cell::from(Span::styled(status, status_style)),
                    Cell::from(added),
                ]);
                if i == self.selected {
                    row.style(theme::table_selected())
                } else {
                    row.style(theme::table_row())
                }
            })
            .collect();

        let table = Table::new(
            rows,
            [
                Constraint::Length(6),
                Constraint::Min(20),
                Constraint::Length(10),
                Constraint::Length(12),
            ],
        )
        .header(header)
        .column_spacing(2);

        frame.render_widget(table, area);
    }

    fn render_modal(&self, frame: &mut Frame, area: Rect) {
        let modal = Self::modal_rect(area);

        frame.render_widget(
            Block::default().style(Style::default().bg(theme::BG_DARK)),
            modal,
        );
        let block = Block::default()
            .title(format!(" {} — subdomains ", self.browser.domain_name()))
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::border_focused());
        let inner = block.inner(modal);
        frame.render_widget(block, modal);
        if inner.height < 4 {
            return;
        }

        let (rows_area, strip_area, hint_area) = {
            let body_h = inner.height.saturating_sub(2);
            (
                Rect::new(inner.x, inner.y, inner.width, body_h),
                Rect::new(inner.x, inner.y + body_h, inner.width, 1),
                Rect::new(inner.x, inner.y + body_h + 1, inner.width, 1),
            )
        };

        match self.browser.phase() {
            BrowserPhase::Displayed { page, stale } => {
                let header =
                    Row::new(vec!["SUBDOMAIN", "STATUS", "CREATED"]).style(theme::table_header());
                let rows: Vec<Row> = page
                    .sub_domains
                    .iter()
                    .cloned()
                    .map(SubdomainRow::from)
                    .map(|r| {
                        let status_style = if r.is_active {
                            Style::default().fg(theme::SUCCESS_GREEN)
                        } else {
                            Style::default().fg(theme::ERROR_RED)
                        };
                        Row::new(vec![
                            Cell::from(r.name),
                            Cell::from(Span::styled(r.status, status_style)),
                            Cell::from(r.created_date.format("%Y-%m-%d").to_string()),
                        ])
                        .style(theme::table_row())
                    })
                    .collect();
                let table = Table::new(
                    rows,
                    [
                        Constraint::Min(24),
                        Constraint::Length(10),
                        Constraint::Length(12),
                    ],
                )
                .header(header)
                .column_spacing(2);
                frame.render_widget(table, rows_area);

                // Strip line: loader/error/stale marker on the left,
                // page controls on the right.
                let strip = Pagination::build(self.browser.current_page(), page.total_subdomains);
                frame.render_widget(
                    Paragraph::new(pagination_line(&strip)).alignment(Alignment::Center),
                    strip_area,
                );

                if self.browser.is_loading() {
                    let throbber = throbber_widgets_tui::Throbber::default()
                        .throbber_style(Style::default().fg(theme::ELECTRIC_PURPLE));
                    frame.render_stateful_widget(
                        throbber,
                        Rect::new(strip_area.x, strip_area.y, 2.min(strip_area.width), 1),
                        &mut self.throbber_state.clone(),
                    );
                } else if *stale {
                    let message = self
                        .page_error
                        .clone()
                        .unwrap_or_else(|| "fetch failed, showing previous page".to_string());
                    frame.render_widget(
                        Paragraph::new(Span::styled(message, theme::error_text())),
                        hint_area,
                    );
                    return;
                }
            }
            BrowserPhase::Loading => {
                if let Some(message) = &self.page_error {
                    frame.render_widget(
                        Paragraph::new(Span::styled(message.clone(), theme::error_text())),
                        rows_area,
                    );
                } else {
                    let throbber = throbber_widgets_tui::Throbber::default()
                        .label("Loading subdomains...")
                        .throbber_style(Style::default().fg(theme::ELECTRIC_PURPLE));
                    frame.render_stateful_widget(
                        throbber,
                        rows_area,
                        &mut self.throbber_state.clone(),
                    );
                }
            }
            BrowserPhase::Idle => {}
        }

        let hints = Line::from(vec![
            Span::styled("←/→", theme::key_hint_key()),
            Span::styled(" page  ", theme::key_hint()),
            Span::styled("1-9", theme::key_hint_key()),
            Span::styled(" jump  ", theme::key_hint()),
            Span::styled("r", theme::key_hint_key()),
            Span::styled(" reload  ", theme::key_hint()),
            Span::styled("Esc", theme::key_hint_key()),
            Span::styled(" close", theme::key_hint()),
        ]);
        frame.render_widget(
            Paragraph::new(hints).alignment(Alignment::Center),
            hint_area,
        );
    }
}

impl Component for DomainsScreen {
    fn init(&mut self, action_tx: UnboundedSender<Action>) -> Result<()> {
        self.action_tx = Some(action_tx);
        Ok(())
    }

    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if self.modal_open {
            self.modal_key(key);
        } else {
            self.list_key(key);
        }
        Ok(None)
    }

    fn handle_mouse_event(&mut self, mouse: MouseEvent) -> Result<Option<Action>> {
        // Click outside the modal dismisses it.
        if self.modal_open
            && matches!(mouse.kind, MouseEventKind::Down(MouseButton::Left))
            && !Self::modal_rect(self.content_area())
                .contains(Position::new(mouse.column, mouse.row))
        {
            self.close_modal();
        }
        Ok(None)
    }

    fn update(&mut self, action: &Action) -> Result<Option<Action>> {
        match action {
            Action::Tick => {
                if self.loading_domains || self.browser.is_loading() {
                    self.throbber_state.calc_next();
                }
            }
            Action::Resize(w, h) => {
                self.terminal_size = (*w, *h);
            }
            Action::SessionReady(_) => {
                self.signed_in = true;
                self.fetch_domains();
            }
            Action::SessionExpired => {
                self.signed_in = false;
                self.loading_domains = false;
                if self.modal_open {
                    self.close_modal();
                }
            }
            Action::DomainsLoaded(domains) => {
                self.loading_domains = false;
                self.domains.clone_from(domains);
                if self.selected >= self.domains.len() {
                    self.selected = self.domains.len().saturating_sub(1);
                }
            }
            Action::DomainsFailed(msg) => {
                self.loading_domains = false;
                self.list_error = Some(msg.clone());
            }
            Action::PageLoaded { seq, page } => {
                // complete() refuses stale sequence numbers.
                if self.browser.complete(*seq, page.clone()) {
                    self.page_error = None;
                }
            }
            Action::PageFailed { seq, message } => {
                if self.browser.fail(*seq) {
                    self.page_error = Some(message.clone());
                }
            }
            _ => {}
        }
        Ok(None)
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .title(" Your domains ")
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::border_default());
        let inner = block.inner(area);
        frame.render_widget(block, area);

        if !self.signed_in {
            frame.render_widget(
                Paragraph::new(Span::styled(
                    "Sign in to load your saved domains",
                    theme::key_hint(),
                )),
                inner,
            );
            return;
        }

        if self.loading_domains {
            let throbber = throbber_widgets_tui::Throbber::default()
                .label("Loading domains...")
                .throbber_style(Style::default().fg(theme::ELECTRIC_PURPLE));
            frame.render_stateful_widget(throbber, inner, &mut self.throbber_state.clone());
        } else if let Some(message) = &self.list_error {
            frame.render_widget(
                Paragraph::new(Span::styled(message.clone(), theme::error_text())),
                inner,
            );
        } else if self.domains.is_empty() {
            frame.render_widget(
                Paragraph::new(Span::styled(
                    "No saved domains yet. Search for a domain to add one.",
                    theme::key_hint(),
                )),
                inner,
            );
        } else {
            self.render_domain_table(frame, inner);

            let hint_y = inner.y + inner.height.saturating_sub(1);
            let hints = Line::from(vec![
                Span::styled("j/k", theme::key_hint_key()),
                Span::styled(" move  ", theme::key_hint()),
                Span::styled("Enter", theme::key_hint_key()),
                Span::styled(" view subdomains  ", theme::key_hint()),
                Span::styled("r", theme::key_hint_key()),
                Span::styled(" refresh", theme::key_hint()),
            ]);
            frame.render_widget(
                Paragraph::new(hints),
                Rect::new(inner.x, hint_y, inner.width, 1),
            );
        }

        if self.modal_open {
            self.render_modal(frame, area);
        }
    }

    fn capturing_input(&self) -> bool {
        self.modal_open
    }
}
