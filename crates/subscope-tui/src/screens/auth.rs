//! Auth screen — Login/Register form pair.
//!
//! Validation runs locally before any network call; a failed rule renders
//! in the message line and the submit is aborted. Server rejections and
//! transport errors land in the same message line, never a blocking dialog.

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};
use secrecy::SecretString;
use tokio::sync::mpsc::UnboundedSender;
use tracing::debug;

use subscope_core::{AuthCredentials, validate};

use crate::action::Action;
use crate::app::SharedSession;
use crate::component::Component;
use crate::theme;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AuthMode {
    Login,
    Register,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Email,
    Password,
    Confirm,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MessageKind {
    Error,
    Info,
}

struct Message {
    text: String,
    kind: MessageKind,
}

pub struct AuthScreen {
    session: SharedSession,
    action_tx: Option<UnboundedSender<Action>>,
    mode: AuthMode,
    field: Field,
    email: String,
    password: String,
    confirm: String,
    message: Option<Message>,
    submitting: bool,
    throbber_state: throbber_widgets_tui::ThrobberState,
}

impl AuthScreen {
    pub fn new(session: SharedSession, prefill_email: Option<String>) -> Self {
        Self {
            session,
            action_tx: None,
            mode: AuthMode::Login,
            field: Field::Email,
            email: prefill_email.unwrap_or_default(),
            password: String::new(),
            confirm: String::new(),
            message: None,
            submitting: false,
            throbber_state: throbber_widgets_tui::ThrobberState::default(),
        }
    }

    fn error(&mut self, text: impl Into<String>) {
        self.message = Some(Message {
            text: text.into(),
            kind: MessageKind::Error,
        });
    }

    fn info(&mut self, text: impl Into<String>) {
        self.message = Some(Message {
            text: text.into(),
            kind: MessageKind::Info,
        });
    }

    fn switch_mode(&mut self) {
        self.mode = match self.mode {
            AuthMode::Login => AuthMode::Register,
            AuthMode::Register => AuthMode::Login,
        };
        self.field = Field::Email;
        self.message = None;
    }

    fn next_field(&mut self) {
        self.field = match (self.mode, self.field) {
            (_, Field::Email) => Field::Password,
            (AuthMode::Login, _) => Field::Email,
            (AuthMode::Register, Field::Password) => Field::Confirm,
            (AuthMode::Register, Field::Confirm) => Field::Email,
        };
    }

    fn prev_field(&mut self) {
        self.field = match (self.mode, self.field) {
            (AuthMode::Login, Field::Email) => Field::Password,
            (AuthMode::Register, Field::Email) => Field::Confirm,
            (_, Field::Password) => Field::Email,
            (_, Field::Confirm) => Field::Password,
        };
    }

    fn active_input_mut(&mut self) -> &mut String {
        match self.field {
            Field::Email => &mut self.email,
            Field::Password => &mut self.password,
            Field::Confirm => &mut self.confirm,
        }
    }

    /// Validate locally, then spawn the login/signup call.
    fn submit(&mut self) {
        if self.submitting {
            return;
        }
        self.message = None;

        let email = self.email.trim().to_string();
        let check = match self.mode {
            AuthMode::Login => validate::validate_email(&email)
                .and_then(|()| validate::validate_password(&self.password)),
            AuthMode::Register => {
                validate::validate_registration(&email, &self.password, &self.confirm)
            }
        };
        if let Err(e) = check {
            // No network call happens for a locally invalid form.
            self.error(e.to_string());
            return;
        }

        let Some(tx) = self.action_tx.clone() else {
            return;
        };
        self.submitting = true;

        let session = self.session.clone();
        let creds = AuthCredentials {
            email,
            password: SecretString::from(self.password.clone()),
        };
        let mode = self.mode;
        let confirm = self.confirm.clone();

        debug!(email = %creds.email, ?mode, "submitting auth form");
        tokio::spawn(async move {
            let action = match mode {
                AuthMode::Login => match session.lock().await.login(&creds).await {
                    Ok(()) => Action::SessionReady(creds.email.clone()),
                    Err(e) => Action::AuthFailed(e.to_string()),
                },
                AuthMode::Register => match session.lock().await.signup(&creds, &confirm).await {
                    Ok(message) => Action::SignupCompleted(message),
                    Err(e) => Action::AuthFailed(e.to_string()),
                },
            };
            let _ = tx.send(action);
        });
    }

    fn render_field(
        &self,
        frame: &mut Frame,
        area: Rect,
        label: &str,
        value: &str,
        field: Field,
        masked: bool,
    ) {
        if area.height < 2 {
            return;
        }
        let active = self.field == field;
        let label_style = if active {
            theme::input_label_active()
        } else {
            theme::input_label()
        };
        frame.render_widget(
            Paragraph::new(Span::styled(label.to_string(), label_style)),
            Rect::new(area.x, area.y, area.width, 1),
        );

        let shown = if masked {
            "•".repeat(value.chars().count())
        } else {
            value.to_string()
        };
        let cursor = if active { "▏" } else { "" };
        let value_line = Line::from(vec![
            Span::styled("> ", theme::key_hint()),
            Span::styled(shown, theme::table_row().add_modifier(Modifier::BOLD)),
            Span::styled(cursor, theme::border_focused()),
        ]);
        frame.render_widget(
            Paragraph::new(value_line),
            Rect::new(area.x, area.y + 1, area.width, 1),
        );
    }
}

impl Component for AuthScreen {
    fn init(&mut self, action_tx: UnboundedSender<Action>) -> Result<()> {
        self.action_tx = Some(action_tx);
        Ok(())
    }

    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        match (key.modifiers, key.code) {
            (_, KeyCode::Tab | KeyCode::Down) => self.next_field(),
            (_, KeyCode::BackTab | KeyCode::Up) => self.prev_field(),
            (_, KeyCode::Left | KeyCode::Right) => self.switch_mode(),
            (_, KeyCode::Enter) => self.submit(),
            (_, KeyCode::Backspace) => {
                self.active_input_mut().pop();
            }
            (KeyModifiers::NONE | KeyModifiers::SHIFT, KeyCode::Char(c)) => {
                self.active_input_mut().push(c);
            }
            _ => {}
        }
        Ok(None)
    }

    fn update(&mut self, action: &Action) -> Result<Option<Action>> {
        match action {
            Action::Tick => {
                if self.submitting {
                    self.throbber_state.calc_next();
                }
            }
            Action::SessionReady(email) => {
                self.submitting = false;
                self.password.clear();
                self.confirm.clear();
                self.info(format!("Signed in as {email}"));
            }
            Action::AuthFailed(msg) => {
                self.submitting = false;
                self.error(msg.clone());
            }
            Action::SignupCompleted(msg) => {
                // Mirror the post-signup redirect: land on the login form
                // with the account's email still filled in.
                self.submitting = false;
                self.mode = AuthMode::Login;
                self.field = Field::Password;
                self.password.clear();
                self.confirm.clear();
                self.info(msg.clone());
            }
            Action::SessionExpired => {
                self.submitting = false;
                self.password.clear();
                self.confirm.clear();
                self.error("Session expired, please sign in again");
            }
            _ => {}
        }
        Ok(None)
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let panel_w = 56u16.min(area.width.saturating_sub(4));
        let panel_h = 16u16.min(area.height.saturating_sub(2));
        let x = (area.width.saturating_sub(panel_w)) / 2;
        let y = (area.height.saturating_sub(panel_h)) / 2;
        let panel = Rect::new(area.x + x, area.y + y, panel_w, panel_h);

        let block = Block::default()
            .title(Line::from(Span::styled(" subscope ", theme::title_style())))
            .title_alignment(Alignment::Center)
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::border_focused());
        let inner = block.inner(panel);
        frame.render_widget(block, panel);
        if inner.height < 10 {
            return;
        }

        // Mode tab pair
        let (login_style, register_style) = match self.mode {
            AuthMode::Login => (theme::tab_active(), theme::tab_inactive()),
            AuthMode::Register => (theme::tab_inactive(), theme::tab_active()),
        };
        let tabs = Line::from(vec![
            Span::styled("Login", login_style),
            Span::styled("  │  ", theme::key_hint()),
            Span::styled("Register", register_style),
        ]);
        frame.render_widget(
            Paragraph::new(tabs).alignment(Alignment::Center),
            Rect::new(inner.x, inner.y, inner.width, 1),
        );

        let fields = Rect::new(inner.x + 2, inner.y + 2, inner.width.saturating_sub(4), 2);
        self.render_field(frame, fields, "Email", &self.email, Field::Email, false);

        let pw = Rect::new(fields.x, fields.y + 3, fields.width, 2);
        self.render_field(frame, pw, "Password", &self.password, Field::Password, true);

        let mut msg_y = pw.y + 3;
        if self.mode == AuthMode::Register {
            let confirm = Rect::new(fields.x, pw.y + 3, fields.width, 2);
            self.render_field(
                frame,
                confirm,
                "Confirm password",
                &self.confirm,
                Field::Confirm,
                true,
            );
            msg_y = confirm.y + 3;
        }

        // Message line: throbber while submitting, otherwise last result
        let msg_area = Rect::new(fields.x, msg_y, fields.width, 1);
        if msg_y < inner.y + inner.height {
            if self.submitting {
                let label = match self.mode {
                    AuthMode::Login => "Signing in...",
                    AuthMode::Register => "Creating account...",
                };
                let throbber = throbber_widgets_tui::Throbber::default()
                    .label(label)
                    .throbber_style(Style::default().fg(theme::ELECTRIC_PURPLE));
                frame.render_stateful_widget(throbber, msg_area, &mut self.throbber_state.clone());
            } else if let Some(message) = &self.message {
                let style = match message.kind {
                    MessageKind::Error => theme::error_text(),
                    MessageKind::Info => theme::info_text(),
                };
                frame.render_widget(
                    Paragraph::new(Span::styled(message.text.clone(), style)),
                    msg_area,
                );
            }
        }

        // Key hints on the panel's last inner row
        let hint_y = inner.y + inner.height.saturating_sub(1);
        if hint_y > msg_y {
            let hints = Line::from(vec![
                Span::styled("Tab", theme::key_hint_key()),
                Span::styled(" field  ", theme::key_hint()),
                Span::styled("←/→", theme::key_hint_key()),
                Span::styled(" login/register  ", theme::key_hint()),
                Span::styled("Enter", theme::key_hint_key()),
                Span::styled(" submit", theme::key_hint()),
            ]);
            frame.render_widget(
                Paragraph::new(hints).alignment(Alignment::Center),
                Rect::new(inner.x, hint_y, inner.width, 1),
            );
        }
    }

    fn capturing_input(&self) -> bool {
        true
    }
}
