//! Help screen: scrollable keybinding reference.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::tui::action::{Action, ScreenState};
use crate::tui::app::Screen;

static HOME_KEYS: &[(&str, &str)] = &[
    ("r", "register a staff account"),
    ("l", "log in"),
    ("d", "dashboard"),
    ("q / Esc", "quit"),
];

static REGISTER_KEYS: &[(&str, &str)] = &[
    ("Tab / Shift-Tab", "next / prev field"),
    ("Alt+r", "switch role (admin / caretaker)"),
    ("Alt+p", "show / hide password"),
    ("Enter", "register"),
    ("Esc", "cancel"),
];

static LOGIN_KEYS: &[(&str, &str)] = &[("q / Esc", "back")];

static DASHBOARD_KEYS: &[(&str, &str)] = &[
    ("n", "new animal health report"),
    ("q / Esc", "back"),
];

static REPORT_KEYS: &[(&str, &str)] = &[
    ("↑/↓", "move in list; change condition on the last step"),
    ("Enter", "pick species / animal; submit on the last step"),
    ("Tab", "continue after the health history"),
    ("Esc", "previous step; leave on the first step"),
];

static HELP_KEYS: &[(&str, &str)] = &[("↑/↓", "scroll"), ("q / Esc", "back")];

static GLOBAL_KEYS: &[(&str, &str)] = &[("F1", "help"), ("Ctrl+C", "quit")];

/// State for the help screen.
#[derive(Debug, Clone)]
pub struct HelpState {
    scroll: u16,
    origin: Screen,
}

impl Default for HelpState {
    fn default() -> Self {
        Self::new()
    }
}

impl HelpState {
    /// Creates a new [`HelpState`] with scroll position at the top and origin [`Screen::Home`].
    pub fn new() -> Self {
        Self {
            scroll: 0,
            origin: Screen::Home,
        }
    }

    /// Returns the current scroll offset.
    pub fn scroll(&self) -> u16 {
        self.scroll
    }

    /// Returns the origin screen that opened help.
    pub fn origin(&self) -> Screen {
        self.origin
    }

    /// Sets the origin screen to return to when help is dismissed.
    pub fn set_origin(&mut self, screen: Screen) {
        self.origin = screen;
    }

    /// Resets the scroll position to the top.
    pub fn reset(&mut self) {
        self.scroll = 0;
    }
}

impl ScreenState for HelpState {
    fn handle_key(&mut self, key: KeyEvent) -> Action {
        match key.code {
            KeyCode::Up => {
                self.scroll = self.scroll.saturating_sub(1);
                Action::None
            }
            KeyCode::Down => {
                self.scroll = self.scroll.saturating_add(1);
                Action::None
            }
            KeyCode::Char('q') | KeyCode::Esc => Action::Navigate(self.origin),
            _ => Action::None,
        }
    }
}

fn screen_name(screen: Screen) -> &'static str {
    match screen {
        Screen::Home => "Home",
        Screen::Register => "Register",
        Screen::Login => "Log In",
        Screen::Dashboard => "Dashboard",
        Screen::Report => "New Report",
        Screen::Help => "Help",
    }
}

fn build_section(title: &'static str, keys: &[(&'static str, &'static str)]) -> Vec<Line<'static>> {
    let header_style = Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD);
    let key_style = Style::default().fg(Color::Yellow);
    let dim_style = Style::default().fg(Color::DarkGray);

    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled(title, header_style)),
    ];
    for (key, desc) in keys {
        lines.push(Line::from(vec![
            Span::styled(format!("  {key:<20}"), key_style),
            Span::styled(*desc, dim_style),
        ]));
    }
    lines
}

fn help_content(origin: Screen) -> Vec<Line<'static>> {
    let keys = match origin {
        Screen::Home => HOME_KEYS,
        Screen::Register => REGISTER_KEYS,
        Screen::Login => LOGIN_KEYS,
        Screen::Dashboard => DASHBOARD_KEYS,
        Screen::Report => REPORT_KEYS,
        Screen::Help => HELP_KEYS,
    };
    let mut lines = build_section(screen_name(origin), keys);
    lines.extend(build_section("Anywhere", GLOBAL_KEYS));
    lines
}

/// Renders the help screen.
#[mutants::skip]
pub fn draw_help(state: &HelpState, frame: &mut Frame, area: Rect) {
    let title = format!(" Help – {} ", screen_name(state.origin()));
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let [content_area, footer_area] =
        Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(inner);

    let content_lines = help_content(state.origin());
    let total = content_lines.len() as u16;
    let height = content_area.height;
    let capped_scroll = state.scroll().min(total.saturating_sub(height));

    let paragraph = Paragraph::new(content_lines).scroll((capped_scroll, 0));
    frame.render_widget(paragraph, content_area);

    let footer =
        Paragraph::new("↑/↓: scroll  q/Esc: back").style(Style::default().fg(Color::DarkGray));
    frame.render_widget(footer, footer_area);
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyEventKind, KeyEventState, KeyModifiers};

    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    const ALL_SCREENS: [Screen; 6] = [
        Screen::Home,
        Screen::Register,
        Screen::Login,
        Screen::Dashboard,
        Screen::Report,
        Screen::Help,
    ];

    mod construction {
        use super::*;

        #[test]
        fn new_starts_at_top_with_home_origin() {
            let state = HelpState::new();
            assert_eq!(state.scroll(), 0);
            assert_eq!(state.origin(), Screen::Home);
        }

        #[test]
        fn set_origin_stores_screen() {
            let mut state = HelpState::default();
            state.set_origin(Screen::Report);
            assert_eq!(state.origin(), Screen::Report);
        }
    }

    mod handle_key {
        use super::*;

        #[test]
        fn up_decrements_scroll() {
            let mut state = HelpState::new();
            state.scroll = 5;
            assert_eq!(state.handle_key(press(KeyCode::Up)), Action::None);
            assert_eq!(state.scroll(), 4);
        }

        #[test]
        fn up_at_zero_saturates() {
            let mut state = HelpState::new();
            state.handle_key(press(KeyCode::Up));
            assert_eq!(state.scroll(), 0);
        }

        #[test]
        fn down_increments_scroll() {
            let mut state = HelpState::new();
            state.handle_key(press(KeyCode::Down));
            assert_eq!(state.scroll(), 1);
        }

        #[test]
        fn q_and_esc_navigate_to_origin() {
            let mut state = HelpState::new();
            state.set_origin(Screen::Register);
            assert_eq!(
                state.handle_key(press(KeyCode::Char('q'))),
                Action::Navigate(Screen::Register)
            );
            assert_eq!(
                state.handle_key(press(KeyCode::Esc)),
                Action::Navigate(Screen::Register)
            );
        }

        #[test]
        fn unknown_key_returns_none() {
            let mut state = HelpState::new();
            assert_eq!(state.handle_key(press(KeyCode::Char('x'))), Action::None);
            assert_eq!(state.scroll(), 0);
        }

        #[test]
        fn reset_sets_scroll_to_zero() {
            let mut state = HelpState::new();
            state.handle_key(press(KeyCode::Down));
            state.handle_key(press(KeyCode::Down));
            assert_eq!(state.scroll(), 2);
            state.reset();
            assert_eq!(state.scroll(), 0);
        }
    }

    mod help_content_fn {
        use super::*;

        fn content_text(screen: Screen) -> String {
            help_content(screen)
                .into_iter()
                .flat_map(|l| l.spans.into_iter())
                .map(|s| s.content.into_owned())
                .collect()
        }

        #[test]
        fn every_screen_lists_its_name_and_global_keys() {
            for screen in ALL_SCREENS {
                let text = content_text(screen);
                assert!(text.contains(screen_name(screen)), "{screen:?} title");
                assert!(text.contains("Ctrl+C"), "{screen:?} should list Ctrl+C");
            }
        }

        #[test]
        fn register_content_excludes_other_sections() {
            let text = content_text(Screen::Register);
            assert!(text.contains("Alt+r"));
            assert!(!text.contains("new animal health report"));
        }

        #[test]
        fn report_content_mentions_tab() {
            assert!(content_text(Screen::Report).contains("continue after the health history"));
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

        fn render_help(state: &HelpState, width: u16, height: u16) -> String {
            let backend = TestBackend::new(width, height);
            let mut terminal = Terminal::new(backend).unwrap();
            terminal
                .draw(|frame| {
                    draw_help(state, frame, frame.area());
                })
                .unwrap();
            buffer_to_string(terminal.backend().buffer())
        }

        #[test]
        fn title_includes_origin_screen_name() {
            let mut state = HelpState::new();
            state.set_origin(Screen::Dashboard);
            let output = render_help(&state, 80, 30);
            assert!(output.contains("Help"));
            assert!(output.contains("Dashboard"));
        }

        #[test]
        fn renders_only_origin_screen_section() {
            let mut state = HelpState::new();
            state.set_origin(Screen::Report);
            let output = render_help(&state, 90, 30);
            assert!(output.contains("New Report"));
            assert!(!output.contains("Alt+p"));
        }

        #[test]
        fn footer_contains_q_and_esc() {
            let output = render_help(&HelpState::new(), 80, 30);
            assert!(output.contains("q/Esc: back"));
        }
    }
}
