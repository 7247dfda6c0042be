use std::path::Path;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{Frame, Terminal};
use tokio::runtime::{Builder, Runtime};
use tracing::{debug, warn};

use crate::config::Config;
use crate::model::{Catalog, RegistrationInput, ReportPayload};
use crate::service::{OutboxService, ZooService};

use super::action::{Action, ScreenState};
use super::error::AppError;
use super::screens::{
    HelpState, MenuState, RegisterState, ReportState, draw_help, draw_menu, draw_register,
    draw_report,
};

/// All screens the app can navigate between.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Screen {
    /// Landing menu.
    Home,
    /// Staff registration form.
    Register,
    /// Where a successful registration lands.
    Login,
    /// Staff menu leading to the report wizard.
    Dashboard,
    /// Four-step animal health report.
    Report,
    /// Show keybinding help.
    Help,
}

/// Top-level application state.
///
/// Owns one state per screen and a current-thread runtime used to drive
/// the service calls that screens request through [`Action`]s.
pub struct App<S: ZooService> {
    screen: Screen,
    service: S,
    runtime: Runtime,
    home: MenuState,
    dashboard: MenuState,
    login: MenuState,
    register: RegisterState,
    report: ReportState,
    help: HelpState,
    should_quit: bool,
}

impl<S: ZooService> App<S> {
    /// Creates a new `App` starting on the [`Screen::Home`] screen.
    pub fn new(service: S, config: &Config) -> Result<Self, AppError> {
        let runtime = Builder::new_current_thread().build()?;
        let catalog = Catalog::new(service.list_animals().to_vec());
        Ok(Self {
            screen: Screen::Home,
            service,
            runtime,
            home: MenuState::home(),
            dashboard: MenuState::dashboard(),
            login: MenuState::login(),
            register: RegisterState::new(),
            report: ReportState::new(catalog, config.request_doctor),
            help: HelpState::new(),
            should_quit: false,
        })
    }

    /// Main event loop: draw → read event → dispatch → check quit.
    #[cfg_attr(coverage_nightly, coverage(off))]
    #[mutants::skip]
    pub fn run<B: ratatui::backend::Backend>(
        &mut self,
        terminal: &mut Terminal<B>,
    ) -> Result<(), AppError> {
        while !self.should_quit {
            terminal.draw(|frame| self.draw(frame))?;
            if let Event::Key(key) = event::read()? {
                self.handle_key(key);
            }
        }
        Ok(())
    }

    /// Renders the current screen.
    #[cfg_attr(coverage_nightly, coverage(off))]
    #[mutants::skip]
    fn draw(&self, frame: &mut Frame) {
        let area = frame.area();
        match self.screen {
            Screen::Home => draw_menu(&self.home, frame, area),
            Screen::Register => draw_register(&self.register, frame, area),
            Screen::Login => draw_menu(&self.login, frame, area),
            Screen::Dashboard => draw_menu(&self.dashboard, frame, area),
            Screen::Report => draw_report(&self.report, frame, area),
            Screen::Help => draw_help(&self.help, frame, area),
        }
    }

    /// Handles a key event: global keys first, then screen-specific.
    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }

        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }
        if key.code == KeyCode::F(1) {
            if self.screen != Screen::Help {
                self.navigate(Screen::Help);
            }
            return;
        }

        let action = match self.screen {
            Screen::Home => self.home.handle_key(key),
            Screen::Register => self.register.handle_key(key),
            Screen::Login => self.login.handle_key(key),
            Screen::Dashboard => self.dashboard.handle_key(key),
            Screen::Report => self.report.handle_key(key),
            Screen::Help => self.help.handle_key(key),
        };
        self.apply(action);
    }

    fn apply(&mut self, action: Action) {
        match action {
            Action::None => {}
            Action::Navigate(screen) => self.navigate(screen),
            Action::Register(input) => self.register(&input),
            Action::SubmitReport(payload) => self.submit_report(&payload),
            Action::Quit => self.should_quit = true,
        }
    }

    /// Switches screens. Forms start empty on entry, except when returning
    /// from the help screen.
    fn navigate(&mut self, screen: Screen) {
        if screen == Screen::Help {
            self.help.set_origin(self.screen);
            self.help.reset();
        } else if self.screen != Screen::Help {
            match screen {
                Screen::Register => self.register.reset(),
                Screen::Report => self.report.reset(),
                _ => {}
            }
        }
        self.screen = screen;
    }

    fn register(&mut self, input: &RegistrationInput) {
        match self.runtime.block_on(self.service.register(input)) {
            Ok(()) => {
                debug!(email = %input.email, "registration accepted, showing login");
                self.register.submission_succeeded();
                self.navigate(Screen::Login);
            }
            Err(e) => {
                warn!(kind = ?e.kind(), error = %e, "registration failed");
                self.register.submission_failed(&e);
            }
        }
    }

    fn submit_report(&mut self, payload: &ReportPayload) {
        match self.runtime.block_on(self.service.create_report(payload)) {
            Ok(()) => {
                debug!(animal_id = %payload.animal_id, "report accepted, showing confirmation");
                self.report.submission_succeeded();
            }
            Err(e) => {
                warn!(kind = ?e.kind(), error = %e, "report submission failed");
                self.report.submission_failed(&e);
            }
        }
    }

    /// Returns the current screen.
    pub fn screen(&self) -> Screen {
        self.screen
    }

    /// Returns `true` if the app should quit.
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Returns a reference to the service.
    pub fn service(&self) -> &S {
        &self.service
    }

    pub fn register_state(&self) -> &RegisterState {
        &self.register
    }

    pub fn report_state(&self) -> &ReportState {
        &self.report
    }
}

impl App<OutboxService> {
    /// Builds the app over a file-backed outbox in `data_dir`.
    ///
    /// Uses the catalog file named in `config`, or the built-in catalog.
    pub fn from_config(config: &Config, data_dir: &Path) -> Result<Self, AppError> {
        let catalog = match &config.catalog {
            Some(path) => Catalog::load(path)?,
            None => Catalog::builtin(),
        };
        let service = OutboxService::new(data_dir, catalog)?;
        Self::new(service, config)
    }
}
