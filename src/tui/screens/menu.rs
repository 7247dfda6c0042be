//! Menu screens: Home, Dashboard, and the Login landing page.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::tui::action::{Action, ScreenState};
use crate::tui::app::Screen;

/// A single-key shortcut to another screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuEntry {
    pub key: char,
    pub label: &'static str,
    pub target: Screen,
}

static HOME_ENTRIES: &[MenuEntry] = &[
    MenuEntry {
        key: 'r',
        label: "Register a staff account",
        target: Screen::Register,
    },
    MenuEntry {
        key: 'l',
        label: "Log in",
        target: Screen::Login,
    },
    MenuEntry {
        key: 'd',
        label: "Dashboard",
        target: Screen::Dashboard,
    },
];

static DASHBOARD_ENTRIES: &[MenuEntry] = &[MenuEntry {
    key: 'n',
    label: "New animal health report",
    target: Screen::Report,
}];

/// State for a menu screen.
#[derive(Debug, Clone)]
pub struct MenuState {
    title: &'static str,
    message: Option<&'static str>,
    entries: &'static [MenuEntry],
    /// Where Esc/q leads; `None` quits the app.
    back: Option<Screen>,
}

impl MenuState {
    /// The landing screen. Esc quits.
    pub fn home() -> Self {
        Self {
            title: "ZooPort",
            message: Some("Welcome to the zoo staff portal."),
            entries: HOME_ENTRIES,
            back: None,
        }
    }

    /// The staff dashboard.
    pub fn dashboard() -> Self {
        Self {
            title: "Dashboard",
            message: None,
            entries: DASHBOARD_ENTRIES,
            back: Some(Screen::Home),
        }
    }

    /// Where a successful registration lands.
    pub fn login() -> Self {
        Self {
            title: "Log In",
            message: Some("Your account is ready. Sign in through the zoo portal."),
            entries: &[],
            back: Some(Screen::Home),
        }
    }

    pub fn title(&self) -> &'static str {
        self.title
    }

    pub fn entries(&self) -> &'static [MenuEntry] {
        self.entries
    }
}

impl ScreenState for MenuState {
    fn handle_key(&mut self, key: KeyEvent) -> Action {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => self.back.map_or(Action::Quit, Action::Navigate),
            KeyCode::Char(ch) => self
                .entries
                .iter()
                .find(|e| e.key == ch)
                .map_or(Action::None, |e| Action::Navigate(e.target)),
            _ => Action::None,
        }
    }
}

/// Renders a menu screen.
#[mutants::skip]
pub fn draw_menu(state: &MenuState, frame: &mut Frame, area: Rect) {
    let block = Block::default()
        .title(format!(" {} ", state.title))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let [body_area, footer_area] =
        Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(inner);

    let key_style = Style::default().fg(Color::Yellow);
    let mut lines = vec![Line::from("")];
    if let Some(message) = state.message {
        lines.push(Line::from(message));
        lines.push(Line::from(""));
    }
    for entry in state.entries {
        lines.push(Line::from(vec![
            Span::styled(format!("{}  ", entry.key), key_style),
            Span::raw(entry.label),
        ]));
    }
    frame.render_widget(
        Paragraph::new(lines).alignment(Alignment::Center),
        body_area,
    );

    let footer = match state.back {
        Some(_) => "q/Esc: back  F1: help",
        None => "q/Esc: quit  F1: help",
    };
    frame.render_widget(
        Paragraph::new(footer).style(Style::default().fg(Color::DarkGray)),
        footer_area,
    );
}
