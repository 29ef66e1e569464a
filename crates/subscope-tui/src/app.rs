//! Application core — event loop, screen management, action dispatch.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseEvent};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Paragraph, Tabs},
};
use tokio::sync::{Mutex, mpsc};
use tracing::{debug, info};

use subscope_core::Session;

use crate::action::Action;
use crate::component::Component;
use crate::event::{Event, EventReader};
use crate::screen::ScreenId;
use crate::screens::create_screens;
use crate::theme;
use crate::tui::Tui;

/// One session, shared between the screens' background fetch tasks.
pub type SharedSession = Arc<Mutex<Session>>;

/// Top-level application state and event loop.
pub struct App {
    /// Current active screen.
    active_screen: ScreenId,
    /// All screen components, keyed by ScreenId.
    screens: HashMap<ScreenId, Box<dyn Component>>,
    /// Whether the app should keep running.
    running: bool,
    /// Email of the signed-in account, when a session is established.
    session_email: Option<String>,
    /// Action sender — components dispatch actions through this.
    action_tx: mpsc::UnboundedSender<Action>,
    /// Action receiver — main loop drains this.
    action_rx: mpsc::UnboundedReceiver<Action>,
}

impl App {
    pub fn new(session: SharedSession, prefill_email: Option<String>) -> Self {
        let (action_tx, action_rx) = mpsc::unbounded_channel();

        let screens: HashMap<ScreenId, Box<dyn Component>> =
            create_screens(&session, prefill_email).into_iter().collect();

        Self {
            active_screen: ScreenId::Auth,
            screens,
            running: true,
            session_email: None,
            action_tx,
            action_rx,
        }
    }

    /// Initialize all screen components with the action sender.
    fn init_screens(&mut self) -> Result<()> {
        for screen in self.screens.values_mut() {
            screen.init(self.action_tx.clone())?;
        }
        if let Some(screen) = self.screens.get_mut(&self.active_screen) {
            screen.set_focused(true);
        }
        Ok(())
    }

    /// Run the main event loop.
    pub async fn run(&mut self) -> Result<()> {
        let mut tui = Tui::new()?;
        tui.enter()?;
        self.init_screens()?;

        // Seed the screens with the initial terminal size.
        let (w, h) = tui.size().unwrap_or((80, 24));
        self.action_tx.send(Action::Resize(w, h))?;

        let mut events = EventReader::new(
            Duration::from_millis(250), // 4 Hz tick
            Duration::from_millis(33),  // ~30 FPS render
        );

        info!("TUI event loop started");

        while self.running {
            let Some(event) = events.next().await else {
                break;
            };

            match event {
                Event::Key(key) => {
                    if let Some(action) = self.handle_key_event(key)? {
                        self.action_tx.send(action)?;
                    }
                }
                Event::Mouse(mouse) => {
                    if let Some(action) = self.handle_mouse_event(mouse)? {
                        self.action_tx.send(action)?;
                    }
                }
                Event::Paste(text) => self.handle_paste(&text)?,
                Event::Resize(w, h) => {
                    self.action_tx.send(Action::Resize(w, h))?;
                }
                Event::Tick => {
                    self.action_tx.send(Action::Tick)?;
                }
                Event::Render => {
                    self.action_tx.send(Action::Render)?;
                }
            }

            // Drain and process all queued actions
            while let Ok(action) = self.action_rx.try_recv() {
                self.process_action(&action)?;

                if let Action::Render = action {
                    tui.draw(|frame| self.render(frame))?;
                }
            }
        }

        events.stop();
        info!("TUI event loop ended");
        Ok(())
    }

    /// Map a key event to an action. Global keys are handled here;
    /// screen-specific keys are delegated to the active screen component.
    ///
    /// Screens that capture raw text input (forms, the search box, an open
    /// modal) get every key except Ctrl+C, so typing `q` or a digit never
    /// triggers a global binding.
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if key.modifiers == KeyModifiers::CONTROL && key.code == KeyCode::Char('c') {
            return Ok(Some(Action::Quit));
        }

        let capturing = self
            .screens
            .get(&self.active_screen)
            .is_some_and(|s| s.capturing_input());

        if !capturing {
            match (key.modifiers, key.code) {
                (KeyModifiers::NONE, KeyCode::Char('q')) => return Ok(Some(Action::Quit)),
                (KeyModifiers::NONE, KeyCode::Char(c @ '1'..='3')) => {
                    let n = c.to_digit(10).and_then(|n| u8::try_from(n).ok());
                    if let Some(screen) = n.and_then(ScreenId::from_number) {
                        return Ok(Some(Action::SwitchScreen(screen)));
                    }
                }
                _ => {}
            }
        }

        // Tab bar navigation stays available from every screen; forms use
        // plain Tab for field cycling, so screen cycling is Ctrl-based.
        match (key.modifiers, key.code) {
            (KeyModifiers::CONTROL, KeyCode::Char('n') | KeyCode::Tab) => {
                return Ok(Some(Action::SwitchScreen(self.active_screen.next())));
            }
            (KeyModifiers::CONTROL, KeyCode::Char('p')) => {
                return Ok(Some(Action::SwitchScreen(self.active_screen.prev())));
            }
            (KeyModifiers::NONE, KeyCode::Tab) if !capturing => {
                return Ok(Some(Action::SwitchScreen(self.active_screen.next())));
            }
            (KeyModifiers::SHIFT, KeyCode::BackTab) if !capturing => {
                return Ok(Some(Action::SwitchScreen(self.active_screen.prev())));
            }
            _ => {}
        }

        if let Some(screen) = self.screens.get_mut(&self.active_screen) {
            return screen.handle_key_event(key);
        }
        Ok(None)
    }

    /// Handle mouse events (delegate to active screen).
    fn handle_mouse_event(&mut self, mouse: MouseEvent) -> Result<Option<Action>> {
        if let Some(screen) = self.screens.get_mut(&self.active_screen) {
            return screen.handle_mouse_event(mouse);
        }
        Ok(None)
    }

    /// Feed pasted text into the active screen, one printable char at a
    /// time. Only screens that capture input get paste; otherwise pasted
    /// text would fire global bindings.
    fn handle_paste(&mut self, text: &str) -> Result<()> {
        let Some(screen) = self.screens.get_mut(&self.active_screen) else {
            return Ok(());
        };
        if !screen.capturing_input() {
            return Ok(());
        }
        for c in text.chars().filter(|c| !c.is_control()) {
            let key = KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE);
            if let Some(action) = screen.handle_key_event(key)? {
                self.action_tx.send(action)?;
            }
        }
        Ok(())
    }

    /// Send an action to every screen, collecting follow-ups.
    fn broadcast(&mut self, action: &Action) -> Result<()> {
        for screen in self.screens.values_mut() {
            if let Some(follow_up) = screen.update(action)? {
                self.action_tx.send(follow_up)?;
            }
        }
        Ok(())
    }

    /// Process a single action — update app state and propagate to screens.
    fn process_action(&mut self, action: &Action) -> Result<()> {
        match action {
            Action::Quit => {
                self.running = false;
            }

            // Size and animation ticks matter to every screen (hidden
            // screens keep their spinners honest).
            Action::Resize(..) | Action::Tick => self.broadcast(action)?,

            Action::SwitchScreen(target) => {
                if *target != self.active_screen {
                    debug!("switching screen: {} to {}", self.active_screen, target);
                    if let Some(screen) = self.screens.get_mut(&self.active_screen) {
                        screen.set_focused(false);
                    }
                    self.active_screen = *target;
                    if let Some(screen) = self.screens.get_mut(&self.active_screen) {
                        screen.set_focused(true);
                    }
                }
            }

            // Session lifecycle reaches every screen, then drives navigation:
            // a fresh login lands on Search, an expired session returns to
            // the auth form.
            Action::SessionReady(email) => {
                info!(email = %email, "session established");
                self.session_email = Some(email.clone());
                self.broadcast(action)?;
                self.action_tx.send(Action::SwitchScreen(ScreenId::Search))?;
            }
            Action::SessionExpired => {
                info!("session expired, returning to auth screen");
                self.session_email = None;
                self.broadcast(action)?;
                self.action_tx.send(Action::SwitchScreen(ScreenId::Auth))?;
            }

            // Render is handled in the main loop, not here
            Action::Render => {}

            // Fetch results and everything else go to every screen: each
            // screen only reacts to its own result actions, and the owner
            // must see them even if the user switched away mid-fetch, or
            // its loader would never clear.
            other => self.broadcast(other)?,
        }

        Ok(())
    }

    /// Render the full application frame.
    fn render(&self, frame: &mut Frame) {
        let area = frame.area();

        // Layout: [screen content] [tab bar] [status bar]
        let layout = Layout::vertical([
            Constraint::Min(1),    // Screen content
            Constraint::Length(1), // Tab bar
            Constraint::Length(1), // Status bar
        ])
        .split(area);

        if let Some(screen) = self.screens.get(&self.active_screen) {
            screen.render(frame, layout[0]);
        }
        self.render_tab_bar(frame, layout[1]);
        self.render_status_bar(frame, layout[2]);
    }

    /// Render the bottom tab bar showing the three screens.
    fn render_tab_bar(&self, frame: &mut Frame, area: Rect) {
        let titles: Vec<Line> = ScreenId::ALL
            .iter()
            .map(|&id| {
                let style = if id == self.active_screen {
                    theme::tab_active()
                } else {
                    theme::tab_inactive()
                };
                Line::from(Span::styled(
                    format!(" {} {} ", id.number(), id.label()),
                    style,
                ))
            })
            .collect();

        let tabs = Tabs::new(titles)
            .divider(Span::styled(" ", theme::key_hint()))
            .select(
                ScreenId::ALL
                    .iter()
                    .position(|&s| s == self.active_screen)
                    .unwrap_or(0),
            );

        frame.render_widget(tabs, area);
    }

    /// Render the bottom status bar with the session indicator and key hints.
    fn render_status_bar(&self, frame: &mut Frame, area: Rect) {
        let session_indicator = match &self.session_email {
            Some(email) => Span::styled(
                format!("● {email}"),
                Style::default().fg(theme::SUCCESS_GREEN),
            ),
            None => Span::styled("○ signed out", Style::default().fg(theme::ERROR_RED)),
        };

        let hints = Span::styled(" │ ^n/^p screens  ^c quit", theme::key_hint());

        let line = Line::from(vec![Span::raw(" "), session_indicator, hints]);
        frame.render_widget(Paragraph::new(line), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{Terminal, backend::TestBackend};
    use subscope_core::{SearchView, ServerConfig};

    fn test_app() -> App {
        let session = Session::connect(&ServerConfig::default()).unwrap();
        let mut app = App::new(Arc::new(Mutex::new(session)), None);
        app.init_screens().unwrap();
        app
    }

    fn buffer_text(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        terminal.draw(|frame| app.render(frame)).unwrap();
        terminal.backend().to_string()
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[tokio::test]
    async fn offscreen_search_completion_clears_loader() {
        let mut app = test_app();
        app.process_action(&Action::SwitchScreen(ScreenId::Search))
            .unwrap();

        // Type a domain and submit; the fetch is now in flight.
        for c in "example.com".chars() {
            app.handle_key_event(key(KeyCode::Char(c))).unwrap();
        }
        app.handle_key_event(key(KeyCode::Enter)).unwrap();
        assert!(buffer_text(&app).contains("Searching"));

        // Switch away before the result lands, then deliver it.
        app.process_action(&Action::SwitchScreen(ScreenId::Domains))
            .unwrap();
        let view = SearchView {
            domain: "example.com".into(),
            count: 2,
            regular: vec!["a.x".into()],
            wildcards: vec!["*.x".into()],
        };
        app.process_action(&Action::SearchCompleted(Box::new(view)))
            .unwrap();

        // Back on Search: the loader is gone, the result is shown, and a
        // new submit is possible again.
        app.process_action(&Action::SwitchScreen(ScreenId::Search))
            .unwrap();
        let text = buffer_text(&app);
        assert!(!text.contains("Searching"));
        assert!(text.contains("Found 2 subdomains for example.com"));
    }

    #[tokio::test]
    async fn paste_feeds_capturing_screen_without_global_keys() {
        let mut app = test_app();
        app.process_action(&Action::SwitchScreen(ScreenId::Search))
            .unwrap();

        // 'q' inside pasted text must not quit while a form captures input.
        app.handle_paste("quick.example.com").unwrap();
        assert!(app.running);
        assert!(buffer_text(&app).contains("quick.example.com"));

        // The domains list doesn't capture input; paste is discarded there.
        app.process_action(&Action::SwitchScreen(ScreenId::Domains))
            .unwrap();
        app.handle_paste("q").unwrap();
        assert!(app.running);
    }
}
