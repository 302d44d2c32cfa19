/// Things that can happen to this app
mod action;
pub use action::Action;

/// The sign-up / sign-in form on screen
mod auth_form;
use auth_form::AuthScreen;

/// Side effects, run outside the core
mod effect;
pub use effect::{Effect, EffectContext};

use calendar_core::{Outcome, Session};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    layout::{Constraint, Flex, Layout},
    style::{Color, Style, Stylize},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};
use std::process::ExitCode;

/// The "functional core" of the app.
pub struct App {
    /// Status to display (visible at the bottom of the screen)
    status_line: Option<String>,

    /// Where the app is in its lifecycle
    state: AppState,
}

impl App {
    /// Create a new instance of the app
    pub fn new() -> Self {
        Self {
            status_line: None,
            state: AppState::Loading,
        }
    }

    /// Render the app's UI to the screen
    pub fn render(&self, frame: &mut Frame) {
        let vertical = Layout::vertical([Constraint::Min(0), Constraint::Length(1)]);
        let [body_area, status_area] = vertical.areas(frame.area());

        match &self.state {
            AppState::Loading => frame.render_widget(Paragraph::new("Loading…"), body_area),
            AppState::SigningIn(screen) => screen.render(body_area, frame),
            AppState::SignedIn(session) => {
                let popup_vert = Layout::vertical([Constraint::Percentage(50)]).flex(Flex::Center);
                let popup_horiz =
                    Layout::horizontal([Constraint::Percentage(50)]).flex(Flex::Center);

                let [popup_area] = popup_vert.areas(body_area);
                let [popup_area] = popup_horiz.areas(popup_area);

                let user = serde_json::to_string_pretty(&session.user)
                    .unwrap_or_else(|_| session.user.to_string());

                let popup = Paragraph::new(user)
                    .wrap(Wrap { trim: false })
                    .block(
                        Block::default()
                            .borders(Borders::ALL)
                            .title("Signed in")
                            .title_bottom("s: sign out · q: quit")
                            .border_style(Style::default().fg(Color::Yellow)),
                    );

                frame.render_widget(popup, popup_area);
            }
            AppState::Exiting(_) => frame.render_widget(Paragraph::new("Exiting…"), body_area),
        };

        let status = match &self.status_line {
            Some(line) => Paragraph::new(line.as_str()),
            None => Paragraph::new("tab: next field · enter: submit · esc: quit").fg(Color::DarkGray),
        };

        frame.render_widget(status, status_area);
    }

    /// Produce any side effects as needed to initialize the app.
    #[expect(clippy::unused_self)]
    pub fn init(&self) -> Effect {
        Effect::LoadSession
    }

    /// Handle an `Action`, updating the app's state and producing some side effect(s)
    pub fn handle(&mut self, action: Action) -> Vec<Effect> {
        match action {
            Action::LoadedSession(Some(session)) => {
                self.status_line = Some("Welcome back!".to_owned());
                self.state = AppState::SignedIn(session);

                vec![]
            }
            Action::LoadedSession(None) => {
                self.state = AppState::SigningIn(AuthScreen::default());

                vec![]
            }
            Action::Settled(outcome) => {
                if let AppState::SigningIn(screen) = &mut self.state {
                    screen.form_mut().settle(&outcome);
                }

                if let Outcome::Authenticated(session) = outcome {
                    self.auth_succeeded(session);
                }

                vec![]
            }
            Action::SignedOut => {
                self.status_line = Some("Signed out".to_owned());
                self.state = AppState::SigningIn(AuthScreen::default());

                vec![]
            }
            Action::Key(key) => self.handle_key(key),
            Action::Problem(problem) => {
                self.status_line = Some(problem);

                vec![]
            }
        }
    }

    /// The form succeeded and the session is stored; move on to the
    /// signed-in screen.
    fn auth_succeeded(&mut self, session: Session) {
        tracing::info!("signed in");

        self.status_line = Some("Signed in!".to_owned());
        self.state = AppState::SignedIn(session);
    }

    /// Handle a key press in whatever state we're in.
    fn handle_key(&mut self, key: KeyEvent) -> Vec<Effect> {
        if key.kind != KeyEventKind::Press {
            return vec![];
        }

        // raw mode swallows SIGINT, so ctrl-c has to work everywhere
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.state = AppState::Exiting(ExitCode::SUCCESS);
            return vec![];
        }

        match &mut self.state {
            AppState::Loading | AppState::Exiting(_) => vec![],
            AppState::SigningIn(screen) => match key.code {
                KeyCode::Esc => {
                    self.state = AppState::Exiting(ExitCode::SUCCESS);

                    vec![]
                }
                KeyCode::Enter => match screen.form_mut().submit() {
                    Ok(submission) => {
                        self.status_line = None;

                        vec![Effect::Authenticate(submission)]
                    }
                    Err(blocked) => {
                        self.status_line = Some(blocked.to_string());

                        vec![]
                    }
                },
                KeyCode::Char('t') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                    screen.toggle_mode();
                    self.status_line = None;

                    vec![]
                }
                _ => {
                    screen.handle_event(key);

                    vec![]
                }
            },
            AppState::SignedIn(_) => match key.code {
                KeyCode::Char('q') | KeyCode::Esc => {
                    self.state = AppState::Exiting(ExitCode::SUCCESS);

                    vec![]
                }
                KeyCode::Char('s') => vec![Effect::SignOut],
                _ => {
                    self.status_line = Some(format!("Unknown key {:?}", key.code));

                    vec![]
                }
            },
        }
    }

    /// Let the TUI manager know whether we're all wrapped up and can exit.
    pub fn should_exit(&self) -> Option<ExitCode> {
        if let AppState::Exiting(code) = &self.state {
            Some(*code)
        } else {
            None
        }
    }
}

/// App lifecycle
#[derive(Debug)]
enum AppState {
    /// We haven't checked for a stored session yet
    Loading,

    /// We're showing the auth form
    SigningIn(AuthScreen),

    /// We have a session
    SignedIn(Session),

    /// We're done and want the following exit code after final effects
    Exiting(ExitCode),
}

#[cfg(test)]
mod test {
    use super::*;
    use calendar_core::{auth::Submission, flow::NETWORK_ERROR};
    use serde_json::json;

    fn press(app: &mut App, code: KeyCode) -> Vec<Effect> {
        app.handle(Action::Key(KeyEvent::new(code, KeyModifiers::NONE)))
    }

    fn type_str(app: &mut App, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    /// An app showing a login form with everything filled in.
    fn ready_to_log_in() -> App {
        let mut app = App::new();
        app.handle(Action::LoadedSession(None));
        app.handle(Action::Key(KeyEvent::new(
            KeyCode::Char('t'),
            KeyModifiers::CONTROL,
        )));

        type_str(&mut app, "5550100");
        press(&mut app, KeyCode::Tab);
        type_str(&mut app, "hunter2");

        app
    }

    fn loading(app: &App) -> bool {
        match &app.state {
            AppState::SigningIn(screen) => screen.form().is_loading(),
            _ => false,
        }
    }

    #[test]
    fn stored_session_skips_the_form() {
        let mut app = App::new();

        app.handle(Action::LoadedSession(Some(Session {
            token: "abc".to_string(),
            user: json!({}),
        })));

        assert!(matches!(app.state, AppState::SignedIn(_)));
    }

    #[test]
    fn enter_submits_once_while_in_flight() {
        let mut app = ready_to_log_in();

        let effects = press(&mut app, KeyCode::Enter);
        assert!(matches!(
            effects.as_slice(),
            [Effect::Authenticate(Submission::Login(_))]
        ));
        assert!(loading(&app));

        assert!(press(&mut app, KeyCode::Enter).is_empty());
    }

    #[test]
    fn network_failure_shows_error_and_allows_retry() {
        let mut app = ready_to_log_in();
        press(&mut app, KeyCode::Enter);

        app.handle(Action::Settled(Outcome::Unreachable));

        match &app.state {
            AppState::SigningIn(screen) => {
                assert_eq!(screen.form().error(), Some(NETWORK_ERROR));
                assert!(!screen.form().is_loading());
            }
            other => panic!("expected to still be signing in, got {other:?}"),
        }

        assert_eq!(press(&mut app, KeyCode::Enter).len(), 1);
    }

    #[test]
    fn success_moves_to_signed_in() {
        let mut app = ready_to_log_in();
        press(&mut app, KeyCode::Enter);

        app.handle(Action::Settled(Outcome::Authenticated(Session {
            token: "abc".to_string(),
            user: json!({"id": 1}),
        })));

        match &app.state {
            AppState::SignedIn(session) => assert_eq!(session.token, "abc"),
            other => panic!("expected to be signed in, got {other:?}"),
        }
    }

    #[test]
    fn incomplete_form_explains_itself() {
        let mut app = App::new();
        app.handle(Action::LoadedSession(None));

        assert!(press(&mut app, KeyCode::Enter).is_empty());
        assert_eq!(
            app.status_line.as_deref(),
            Some("Please fill out the Phone Number field")
        );
    }

    #[test]
    fn signing_out_returns_to_a_blank_form() {
        let mut app = App::new();
        app.handle(Action::LoadedSession(Some(Session {
            token: "abc".to_string(),
            user: json!({}),
        })));

        let effects = press(&mut app, KeyCode::Char('s'));
        assert!(matches!(effects.as_slice(), [Effect::SignOut]));

        app.handle(Action::SignedOut);

        match &app.state {
            AppState::SigningIn(screen) => assert_eq!(screen.form().data().phone_number, ""),
            other => panic!("expected the form, got {other:?}"),
        }
    }

    #[test]
    fn escape_quits_from_the_form() {
        let mut app = App::new();
        app.handle(Action::LoadedSession(None));

        press(&mut app, KeyCode::Esc);

        assert!(app.should_exit().is_some());
    }
}
