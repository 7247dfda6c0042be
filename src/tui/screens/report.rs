//! Report screen: the four-step animal health wizard.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Flex, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use tui_textarea::TextArea;

use crate::model::{Catalog, Condition, ReportField, Retreat, Step, Wizard};
use crate::service::ServiceError;
use crate::tui::action::{Action, ScreenState};
use crate::tui::app::Screen;
use crate::tui::widgets::picker::{Picker, PickerItem, draw_picker};
use crate::tui::widgets::progress::draw_progress;

/// Shown once the service accepted the report.
pub const REPORT_SENT: &str = "Thank you! The report has been sent.";

/// State for the report wizard screen.
pub struct ReportState {
    wizard: Wizard,
    catalog: Catalog,
    species: Picker,
    animals: Picker,
    description: TextArea<'static>,
    general_error: Option<String>,
    request_doctor: bool,
}

impl ReportState {
    /// Creates a fresh wizard over the given catalog.
    ///
    /// `request_doctor` is copied into every payload this screen produces.
    pub fn new(catalog: Catalog, request_doctor: bool) -> Self {
        let species = species_picker(&catalog);
        let animals = animal_picker(&catalog, "");
        Self {
            wizard: Wizard::new(),
            catalog,
            species,
            animals,
            description: description_area(),
            general_error: None,
            request_doctor,
        }
    }

    /// Discards all progress and starts again at the first step.
    pub fn reset(&mut self) {
        self.wizard = Wizard::new();
        self.species = species_picker(&self.catalog);
        self.animals = animal_picker(&self.catalog, "");
        self.description = description_area();
        self.general_error = None;
    }

    pub fn wizard(&self) -> &Wizard {
        &self.wizard
    }

    pub fn species(&self) -> &Picker {
        &self.species
    }

    pub fn animals(&self) -> &Picker {
        &self.animals
    }

    /// Returns the general error message, if any.
    pub fn general_error(&self) -> Option<&str> {
        self.general_error.as_deref()
    }

    /// Records a rejected submission. The step and the form stay as they are.
    pub fn submission_failed(&mut self, err: &ServiceError) {
        self.wizard.submission_failed();
        self.general_error = Some(err.to_string());
    }

    /// Records an accepted submission and shows the confirmation.
    pub fn submission_succeeded(&mut self) {
        self.wizard.submission_succeeded();
        self.general_error = None;
    }

    fn handle_species(&mut self, key: KeyEvent) -> Action {
        match key.code {
            KeyCode::Up => self.species.select_prev(),
            KeyCode::Down => self.species.select_next(),
            KeyCode::Enter => {
                let species = self
                    .species
                    .current()
                    .map(|item| item.value.clone())
                    .unwrap_or_default();
                if self.wizard.select_species(&species) {
                    self.animals = animal_picker(&self.catalog, &species);
                }
            }
            _ => {}
        }
        Action::None
    }

    fn handle_animal(&mut self, key: KeyEvent) -> Action {
        match key.code {
            KeyCode::Up => self.animals.select_prev(),
            KeyCode::Down => self.animals.select_next(),
            KeyCode::Enter => {
                let animal_id = self
                    .animals
                    .current()
                    .map(|item| item.value.clone())
                    .unwrap_or_default();
                self.wizard.select_animal(&animal_id);
            }
            _ => {}
        }
        Action::None
    }

    fn handle_description(&mut self, key: KeyEvent) -> Action {
        if key.code == KeyCode::Tab {
            self.wizard.confirm();
            return Action::None;
        }
        if self.description.input(key) {
            let text = self.description.lines().join("\n");
            self.wizard.set_description(&text);
        }
        Action::None
    }

    fn handle_condition(&mut self, key: KeyEvent) -> Action {
        match key.code {
            KeyCode::Up => {
                let condition = self.wizard.form().condition.prev();
                self.wizard.set_condition(condition);
            }
            KeyCode::Down => {
                let condition = self.wizard.form().condition.next();
                self.wizard.set_condition(condition);
            }
            KeyCode::Char(ch) => {
                let mut url = self.wizard.form().photo_url.clone();
                url.push(ch);
                self.wizard.set_photo_url(&url);
            }
            KeyCode::Backspace => {
                let mut url = self.wizard.form().photo_url.clone();
                url.pop();
                self.wizard.set_photo_url(&url);
            }
            KeyCode::Enter => {
                self.general_error = None;
                if let Some(payload) = self.wizard.submit(self.request_doctor) {
                    return Action::SubmitReport(payload);
                }
            }
            _ => {}
        }
        Action::None
    }
}

impl ScreenState for ReportState {
    fn handle_key(&mut self, key: KeyEvent) -> Action {
        if self.wizard.is_submitted() {
            return match key.code {
                KeyCode::Enter | KeyCode::Esc => Action::Navigate(Screen::Dashboard),
                _ => Action::None,
            };
        }
        if self.wizard.is_submitting() {
            return Action::None;
        }

        if key.code == KeyCode::Esc {
            self.general_error = None;
            self.wizard.clear_errors();
            return match self.wizard.retreat() {
                Retreat::Moved(_) => Action::None,
                Retreat::Exit => Action::Navigate(Screen::Dashboard),
            };
        }

        match self.wizard.step() {
            Step::Species => self.handle_species(key),
            Step::Animal => self.handle_animal(key),
            Step::Description => self.handle_description(key),
            Step::Condition => self.handle_condition(key),
        }
    }
}

fn species_picker(catalog: &Catalog) -> Picker {
    let items = catalog
        .species()
        .into_iter()
        .map(|species| {
            let count = catalog
                .animals()
                .iter()
                .filter(|a| a.species == species)
                .count();
            let detail = if count == 1 {
                "1 animal".to_string()
            } else {
                format!("{count} animals")
            };
            PickerItem::new(species, species, detail)
        })
        .collect();
    Picker::new("Species", items)
}

fn animal_picker(catalog: &Catalog, species: &str) -> Picker {
    let items = catalog
        .of_species(species)
        .into_iter()
        .map(|animal| PickerItem::new(&animal.id, &animal.name, &animal.id))
        .collect();
    Picker::new("Animal", items)
}

fn description_area() -> TextArea<'static> {
    let mut textarea = TextArea::default();
    textarea.set_placeholder_text("Symptoms and recent behavior");
    textarea
}

fn footer_text(step: Step) -> &'static str {
    match step {
        Step::Species | Step::Animal => "\u{2191}/\u{2193}: move  Enter: select  Esc: back",
        Step::Description => "Type to edit  Tab: continue  Esc: back",
        Step::Condition => "\u{2191}/\u{2193}: condition  Type: photo URL  Enter: submit  Esc: back",
    }
}

/// Renders the report wizard: progress, the current step's fields, errors.
#[mutants::skip]
pub fn draw_report(state: &ReportState, frame: &mut Frame, area: Rect) {
    let block = Block::default()
        .title(" New report ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let [progress_area, title_area, body_area, error_area, footer_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(2),
        Constraint::Min(0),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .areas(inner);

    let step = state.wizard.step();
    draw_progress(step, frame, progress_area);

    let title = Paragraph::new(Line::from(Span::styled(
        state.wizard.title(),
        Style::default().add_modifier(Modifier::BOLD),
    )));
    frame.render_widget(title, title_area);

    let wizard = &state.wizard;
    match step {
        Step::Species => draw_picker(
            &state.species,
            wizard.error(ReportField::Species),
            frame,
            body_area,
        ),
        Step::Animal => draw_picker(
            &state.animals,
            wizard.error(ReportField::AnimalId),
            frame,
            body_area,
        ),
        Step::Description => draw_description(state, frame, body_area),
        Step::Condition => draw_condition(state, frame, body_area),
    }

    if let Some(err) = state.general_error() {
        let error = Paragraph::new(Line::from(Span::styled(
            err,
            Style::default().fg(Color::Red),
        )));
        frame.render_widget(error, error_area);
    }

    let footer =
        Paragraph::new(Line::from(footer_text(step))).style(Style::default().fg(Color::DarkGray));
    frame.render_widget(footer, footer_area);

    if wizard.is_submitted() {
        draw_confirmation(frame, area);
    }
}

#[mutants::skip]
fn draw_description(state: &ReportState, frame: &mut Frame, area: Rect) {
    let error = state.wizard.error(ReportField::Description);
    let border_color = if error.is_some() {
        Color::Red
    } else {
        Color::Yellow
    };
    let mut block = Block::default()
        .title(" Description ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color));
    if let Some(err) = error {
        block = block.title_bottom(err.to_string());
    }

    let mut textarea = state.description.clone();
    textarea.set_block(block);
    frame.render_widget(&textarea, area);
}

#[mutants::skip]
fn draw_condition(state: &ReportState, frame: &mut Frame, area: Rect) {
    let [status_area, condition_area, photo_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(3),
        Constraint::Length(3),
    ])
    .areas(area);

    // A failed submission is reported against the animal, which this step
    // does not otherwise show.
    if let Some(err) = state.wizard.error(ReportField::AnimalId) {
        let status = Paragraph::new(Line::from(Span::styled(
            err,
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )));
        frame.render_widget(status, status_area);
    }

    let current = state.wizard.form().condition;
    let selected = Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD);
    let dim = Style::default().fg(Color::DarkGray);
    let mut spans = Vec::new();
    for condition in Condition::all() {
        let (marker, style) = if *condition == current {
            ("(\u{2022})", selected)
        } else {
            ("( )", dim)
        };
        spans.push(Span::styled(format!("{marker} {}  ", condition.label()), style));
    }
    let conditions = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .title(" Condition ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Yellow)),
    );
    frame.render_widget(conditions, condition_area);

    let error = state.wizard.error(ReportField::PhotoUrl);
    let border_color = if error.is_some() {
        Color::Red
    } else {
        Color::Yellow
    };
    let mut block = Block::default()
        .title(" Photo URL ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color));
    if let Some(err) = error {
        block = block.title_bottom(err.to_string());
    }
    let photo = Paragraph::new(state.wizard.form().photo_url.as_str()).block(block);
    frame.render_widget(photo, photo_area);
}

#[mutants::skip]
fn draw_confirmation(frame: &mut Frame, area: Rect) {
    let [row] = Layout::vertical([Constraint::Length(5)])
        .flex(Flex::Center)
        .areas(area);
    let [popup] = Layout::horizontal([Constraint::Length(44)])
        .flex(Flex::Center)
        .areas(row);

    let text = vec![
        Line::from(Span::styled(
            REPORT_SENT,
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from("Enter: back to dashboard"),
    ];
    let paragraph = Paragraph::new(text).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Green)),
    );
    frame.render_widget(Clear, popup);
    frame.render_widget(paragraph, popup);
}
