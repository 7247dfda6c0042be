//! Registration screen: form for creating a staff account.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::model::{
    RegistrationInput, Role, validate_email, validate_name, validate_password,
};
use crate::service::{ErrorKind, ServiceError};
use crate::tui::action::{Action, ScreenState};
use crate::tui::app::Screen;
use crate::tui::widgets::form::{Form, FormField, draw_form};

/// Field index for the registrant's name.
const NAME: usize = 0;
/// Field index for the email address.
const EMAIL: usize = 1;
/// Field index for the password.
const PASSWORD: usize = 2;

/// Shown on the email field when the email is already taken.
pub const ALREADY_REGISTERED: &str = "User already registered";
/// Shown on the email field for any other service failure.
pub const REGISTRATION_FAILED: &str = "Registration failed";

/// State for the registration screen.
#[derive(Debug, Clone)]
pub struct RegisterState {
    form: Form,
    role: Role,
    show_password: bool,
    submitting: bool,
    general_error: Option<String>,
}

impl Default for RegisterState {
    fn default() -> Self {
        Self::new()
    }
}

impl RegisterState {
    /// Creates an empty registration form. Role defaults to admin.
    pub fn new() -> Self {
        Self {
            form: Form::new(vec![
                FormField::new("Name", true),
                FormField::new("Email", true),
                FormField::masked("Password (min. 8 characters)", true),
            ]),
            role: Role::default(),
            show_password: false,
            submitting: false,
            general_error: None,
        }
    }

    /// Returns a reference to the form for rendering.
    pub fn form(&self) -> &Form {
        &self.form
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn show_password(&self) -> bool {
        self.show_password
    }

    /// Returns `true` while a registration request is in flight.
    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// Returns the general error message, if any.
    pub fn general_error(&self) -> Option<&str> {
        self.general_error.as_deref()
    }

    /// Resets the form to its initial empty state.
    pub fn reset(&mut self) {
        self.form.reset();
        self.form.set_masked(PASSWORD, true);
        self.role = Role::default();
        self.show_password = false;
        self.submitting = false;
        self.general_error = None;
    }

    /// Records a rejected registration on the email field.
    ///
    /// A duplicate email gets the fixed "already registered" message; other
    /// failures get a generic message plus the error text below the form.
    pub fn submission_failed(&mut self, err: &ServiceError) {
        self.submitting = false;
        match err.kind() {
            ErrorKind::Conflict => {
                self.form.set_error(EMAIL, ALREADY_REGISTERED.to_string());
            }
            _ => {
                self.form.set_error(EMAIL, REGISTRATION_FAILED.to_string());
                self.general_error = Some(err.to_string());
            }
        }
    }

    /// Records an accepted registration.
    pub fn submission_succeeded(&mut self) {
        self.submitting = false;
    }

    fn toggle_password_visibility(&mut self) {
        self.show_password = !self.show_password;
        self.form.set_masked(PASSWORD, !self.show_password);
    }

    /// Validates all fields and hands a [`RegistrationInput`] to the app.
    fn submit(&mut self) -> Action {
        if self.submitting {
            return Action::None;
        }
        self.form.clear_errors();
        self.general_error = None;

        let name = self.form.value(NAME).trim().to_string();
        let email = self.form.value(EMAIL).trim().to_string();
        let password = self.form.value(PASSWORD).to_string();

        // Validate each field individually to show all errors at once.
        if let Err(e) = validate_name(&name) {
            self.form.set_error(NAME, e.to_string());
        }
        if let Err(e) = validate_email(&email) {
            self.form.set_error(EMAIL, e.to_string());
        }
        if let Err(e) = validate_password(&password) {
            self.form.set_error(PASSWORD, e.to_string());
        }

        if self.form.has_errors() {
            return Action::None;
        }

        match RegistrationInput::new(name, email, password, self.role) {
            Ok(input) => {
                self.submitting = true;
                Action::Register(input)
            }
            Err(e) => {
                self.general_error = Some(e.to_string());
                Action::None
            }
        }
    }
}

impl ScreenState for RegisterState {
    fn handle_key(&mut self, key: KeyEvent) -> Action {
        if key.modifiers == KeyModifiers::ALT {
            match key.code {
                KeyCode::Char('r') => {
                    self.role = self.role.toggle();
                    return Action::None;
                }
                KeyCode::Char('p') => {
                    self.toggle_password_visibility();
                    return Action::None;
                }
                _ => {}
            }
        }

        match key.code {
            KeyCode::Tab => {
                self.form.focus_next();
                Action::None
            }
            KeyCode::BackTab => {
                self.form.focus_prev();
                Action::None
            }
            KeyCode::Char(ch) => {
                self.form.insert_char(ch);
                Action::None
            }
            KeyCode::Backspace => {
                self.form.delete_char();
                Action::None
            }
            KeyCode::Esc => Action::Navigate(Screen::Home),
            KeyCode::Enter => self.submit(),
            _ => Action::None,
        }
    }
}

/// Renders the registration screen.
#[mutants::skip]
pub fn draw_register(state: &RegisterState, frame: &mut Frame, area: Rect) {
    let block = Block::default()
        .title(" Register ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let [form_area, role_area, error_area, _spacer, footer_area] = Layout::vertical([
        Constraint::Length(9),
        Constraint::Length(2),
        Constraint::Length(1),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .areas(inner);

    draw_form(state.form(), frame, form_area);

    let selected = Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD);
    let dim = Style::default().fg(Color::DarkGray);
    let radio = |role: Role, label: &'static str| {
        if state.role() == role {
            Span::styled(format!("(\u{2022}) {label}"), selected)
        } else {
            Span::styled(format!("( ) {label}"), dim)
        }
    };
    let role_line = Line::from(vec![
        Span::raw(" Role: "),
        radio(Role::Admin, "Admin"),
        Span::raw("   "),
        radio(Role::Caretaker, "Caretaker"),
    ]);
    frame.render_widget(Paragraph::new(role_line), role_area);

    if let Some(err) = state.general_error() {
        let error = Paragraph::new(Line::from(Span::styled(
            err,
            Style::default().fg(Color::Red),
        )));
        frame.render_widget(error, error_area);
    }

    let footer = Paragraph::new(Line::from(
        "Tab: next field  Alt+r: role  Alt+p: show password  Enter: register  Esc: cancel",
    ))
    .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(footer, footer_area);
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyEventKind, KeyEventState};

    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    fn alt_press(ch: char) -> KeyEvent {
        KeyEvent {
            code: KeyCode::Char(ch),
            modifiers: KeyModifiers::ALT,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    fn type_string(state: &mut RegisterState, s: &str) {
        for ch in s.chars() {
            state.handle_key(press(KeyCode::Char(ch)));
        }
    }

    fn fill_form(state: &mut RegisterState, name: &str, email: &str, password: &str) {
        type_string(state, name);
        state.handle_key(press(KeyCode::Tab));
        type_string(state, email);
        state.handle_key(press(KeyCode::Tab));
        type_string(state, password);
    }

    fn fill_valid_form(state: &mut RegisterState) {
        fill_form(state, "Ana", "ana@zoo.example", "correct-horse");
    }

    mod typing {
        use super::*;

        #[test]
        fn chars_fill_focused_field() {
            let mut state = RegisterState::new();
            type_string(&mut state, "Ana");
            assert_eq!(state.form().value(NAME), "Ana");
        }

        #[test]
        fn backspace_deletes_char() {
            let mut state = RegisterState::new();
            type_string(&mut state, "Ab");
            state.handle_key(press(KeyCode::Backspace));
            assert_eq!(state.form().value(NAME), "A");
        }

        #[test]
        fn tab_cycles_focus() {
            let mut state = RegisterState::new();
            state.handle_key(press(KeyCode::Tab));
            assert_eq!(state.form().focus(), EMAIL);
            state.handle_key(press(KeyCode::Tab));
            assert_eq!(state.form().focus(), PASSWORD);
            state.handle_key(press(KeyCode::Tab));
            assert_eq!(state.form().focus(), NAME);
            state.handle_key(press(KeyCode::BackTab));
            assert_eq!(state.form().focus(), PASSWORD);
        }

        #[test]
        fn plain_r_and_p_are_typed() {
            let mut state = RegisterState::new();
            type_string(&mut state, "rp");
            assert_eq!(state.form().value(NAME), "rp");
            assert_eq!(state.role(), Role::Admin);
        }
    }

    mod role {
        use super::*;

        #[test]
        fn defaults_to_admin() {
            assert_eq!(RegisterState::new().role(), Role::Admin);
        }

        #[test]
        fn alt_r_toggles() {
            let mut state = RegisterState::new();
            state.handle_key(alt_press('r'));
            assert_eq!(state.role(), Role::Caretaker);
            state.handle_key(alt_press('r'));
            assert_eq!(state.role(), Role::Admin);
        }
    }

    mod password {
        use super::*;

        #[test]
        fn masked_by_default() {
            let state = RegisterState::new();
            assert!(!state.show_password());
            assert!(state.form().fields()[PASSWORD].masked);
        }

        #[test]
        fn alt_p_reveals_and_hides() {
            let mut state = RegisterState::new();
            state.handle_key(alt_press('p'));
            assert!(state.show_password());
            assert!(!state.form().fields()[PASSWORD].masked);
            state.handle_key(alt_press('p'));
            assert!(state.form().fields()[PASSWORD].masked);
        }
    }

    mod valid_submit {
        use super::*;

        #[test]
        fn returns_register_action() {
            let mut state = RegisterState::new();
            fill_valid_form(&mut state);
            state.handle_key(alt_press('r'));
            match state.handle_key(press(KeyCode::Enter)) {
                Action::Register(input) => {
                    assert_eq!(input.name, "Ana");
                    assert_eq!(input.email, "ana@zoo.example");
                    assert_eq!(input.password, "correct-horse");
                    assert_eq!(input.role, Role::Caretaker);
                }
                other => panic!("expected Register, got {other:?}"),
            }
            assert!(state.is_submitting());
        }

        #[test]
        fn trims_name_and_email() {
            let mut state = RegisterState::new();
            fill_form(&mut state, " Ana ", " ana@zoo.example ", "correct-horse");
            match state.handle_key(press(KeyCode::Enter)) {
                Action::Register(input) => {
                    assert_eq!(input.name, "Ana");
                    assert_eq!(input.email, "ana@zoo.example");
                }
                other => panic!("expected Register, got {other:?}"),
            }
        }

        #[test]
        fn second_enter_while_submitting_is_ignored() {
            let mut state = RegisterState::new();
            fill_valid_form(&mut state);
            assert!(matches!(
                state.handle_key(press(KeyCode::Enter)),
                Action::Register(_)
            ));
            assert_eq!(state.handle_key(press(KeyCode::Enter)), Action::None);
        }
    }

    mod invalid_submit {
        use super::*;

        #[test]
        fn empty_submit_shows_all_errors() {
            let mut state = RegisterState::new();
            assert_eq!(state.handle_key(press(KeyCode::Enter)), Action::None);
            assert!(state.form().fields()[NAME].error.is_some());
            assert!(state.form().fields()[EMAIL].error.is_some());
            assert!(state.form().fields()[PASSWORD].error.is_some());
        }

        #[test]
        fn short_password_blocks_submit() {
            let mut state = RegisterState::new();
            fill_form(&mut state, "Ana", "ana@zoo.example", "short1");
            assert_eq!(state.handle_key(press(KeyCode::Enter)), Action::None);
            assert_eq!(
                state.form().fields()[PASSWORD].error.as_deref(),
                Some("Password must be at least 8 characters")
            );
            assert!(state.form().fields()[NAME].error.is_none());
            assert!(state.form().fields()[EMAIL].error.is_none());
            assert!(!state.is_submitting());
        }

        #[test]
        fn bad_email_shows_error() {
            let mut state = RegisterState::new();
            fill_form(&mut state, "Ana", "ana-at-zoo", "correct-horse");
            assert_eq!(state.handle_key(press(KeyCode::Enter)), Action::None);
            assert_eq!(
                state.form().fields()[EMAIL].error.as_deref(),
                Some("Invalid email address")
            );
        }

        #[test]
        fn errors_keep_entered_values() {
            let mut state = RegisterState::new();
            fill_form(&mut state, "Ana", "ana@zoo.example", "short1");
            state.handle_key(press(KeyCode::Enter));
            assert_eq!(state.form().value(NAME), "Ana");
            assert_eq!(state.form().value(EMAIL), "ana@zoo.example");
            assert_eq!(state.form().value(PASSWORD), "short1");
        }

        #[test]
        fn errors_cleared_on_resubmit() {
            let mut state = RegisterState::new();
            state.handle_key(press(KeyCode::Enter));
            assert!(state.form().has_errors());
            state.reset();
            fill_valid_form(&mut state);
            assert!(matches!(
                state.handle_key(press(KeyCode::Enter)),
                Action::Register(_)
            ));
            assert!(!state.form().has_errors());
        }
    }

    mod service_result {
        use super::*;

        fn submitted_state() -> RegisterState {
            let mut state = RegisterState::new();
            fill_valid_form(&mut state);
            state.handle_key(press(KeyCode::Enter));
            state
        }

        #[test]
        fn conflict_marks_email_as_registered() {
            let mut state = submitted_state();
            state.submission_failed(&ServiceError::Conflict {
                email: "ana@zoo.example".into(),
            });
            assert_eq!(
                state.form().fields()[EMAIL].error.as_deref(),
                Some(ALREADY_REGISTERED)
            );
            assert_eq!(state.general_error(), None);
            assert!(!state.is_submitting());
        }

        #[test]
        fn other_failure_keeps_detail() {
            let mut state = submitted_state();
            state.submission_failed(&ServiceError::Io(std::io::Error::other("disk full")));
            assert_eq!(
                state.form().fields()[EMAIL].error.as_deref(),
                Some(REGISTRATION_FAILED)
            );
            assert_eq!(state.general_error(), Some("I/O error: disk full"));
        }

        #[test]
        fn failure_allows_retry() {
            let mut state = submitted_state();
            state.submission_failed(&ServiceError::Conflict {
                email: "ana@zoo.example".into(),
            });
            assert!(matches!(
                state.handle_key(press(KeyCode::Enter)),
                Action::Register(_)
            ));
        }

        #[test]
        fn success_clears_in_flight_flag() {
            let mut state = submitted_state();
            state.submission_succeeded();
            assert!(!state.is_submitting());
        }
    }

    mod reset {
        use super::*;

        #[test]
        fn clears_values_errors_and_focus() {
            let mut state = RegisterState::new();
            fill_form(&mut state, "Ana", "ana-at-zoo", "short1");
            state.handle_key(press(KeyCode::Enter));
            assert!(state.form().has_errors());
            state.reset();
            assert_eq!(state.form().value(NAME), "");
            assert_eq!(state.form().value(EMAIL), "");
            assert_eq!(state.form().value(PASSWORD), "");
            assert_eq!(state.form().focus(), NAME);
            assert!(!state.form().has_errors());
        }

        #[test]
        fn hides_password_and_restores_default_role() {
            let mut state = RegisterState::new();
            state.handle_key(alt_press('p'));
            state.handle_key(alt_press('r'));
            state.reset();
            assert!(!state.show_password());
            assert!(state.form().fields()[PASSWORD].masked);
            assert_eq!(state.role(), Role::Admin);
        }

        #[test]
        fn clears_in_flight_flag_and_general_error() {
            let mut state = RegisterState::new();
            fill_valid_form(&mut state);
            state.handle_key(press(KeyCode::Enter));
            state.submission_failed(&ServiceError::Io(std::io::Error::other("disk full")));
            state.reset();
            assert!(!state.is_submitting());
            assert_eq!(state.general_error(), None);
        }
    }

    mod navigation {
        use super::*;

        #[test]
        fn esc_goes_home() {
            let mut state = RegisterState::new();
            assert_eq!(
                state.handle_key(press(KeyCode::Esc)),
                Action::Navigate(Screen::Home)
            );
        }

        #[test]
        fn unhandled_key_returns_none() {
            let mut state = RegisterState::new();
            assert_eq!(state.handle_key(press(KeyCode::F(5))), Action::None);
        }
    }

    mod rendering {
        use ratatui::Terminal;
        use ratatui::backend::TestBackend;

        use super::*;

        fn buffer_to_string(buf: &ratatui::buffer::Buffer) -> String {
            let mut s = String::new();
            for y in 0..buf.area.height {
                for x in 0..buf.area.width {
                    s.push(buf[(x, y)].symbol().chars().next().unwrap_or(' '));
                }
                s.push('\n');
            }
            s
        }

        fn render_register(state: &RegisterState, width: u16, height: u16) -> String {
            let backend = TestBackend::new(width, height);
            let mut terminal = Terminal::new(backend).unwrap();
            terminal
                .draw(|frame| {
                    draw_register(state, frame, frame.area());
                })
                .unwrap();
            buffer_to_string(terminal.backend().buffer())
        }

        #[test]
        fn renders_fields_and_role() {
            let state = RegisterState::new();
            let output = render_register(&state, 90, 20);
            assert!(output.contains("Register"));
            assert!(output.contains("Name"));
            assert!(output.contains("Email"));
            assert!(output.contains("Password"));
            assert!(output.contains("Admin"));
            assert!(output.contains("Caretaker"));
        }

        #[test]
        fn password_is_not_drawn() {
            let mut state = RegisterState::new();
            fill_valid_form(&mut state);
            let output = render_register(&state, 90, 20);
            assert!(output.contains("ana@zoo.example"));
            assert!(!output.contains("correct-horse"));
        }

        #[test]
        fn renders_email_error() {
            let mut state = RegisterState::new();
            fill_valid_form(&mut state);
            state.handle_key(press(KeyCode::Enter));
            state.submission_failed(&ServiceError::Conflict {
                email: "ana@zoo.example".into(),
            });
            let output = render_register(&state, 90, 20);
            assert!(output.contains(ALREADY_REGISTERED));
        }
    }
}
