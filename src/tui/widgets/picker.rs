//! Single-choice list used by the wizard's selection steps.

use ratatui::Frame;
use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Color, Style};
use ratatui::widgets::{Block, Borders, Row, Table};

/// One selectable entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickerItem {
    /// Value stored in the form when this entry is picked.
    pub value: String,
    /// Main text shown in the list.
    pub label: String,
    /// Secondary column (e.g. an ID or a count).
    pub detail: String,
}

impl PickerItem {
    pub fn new(
        value: impl Into<String>,
        label: impl Into<String>,
        detail: impl Into<String>,
    ) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
            detail: detail.into(),
        }
    }
}

/// A titled list with a highlighted entry.
#[derive(Debug, Clone)]
pub struct Picker {
    title: String,
    items: Vec<PickerItem>,
    /// Index of the highlighted entry, or `None` if the list is empty.
    selected: Option<usize>,
}

impl Picker {
    /// Creates a picker highlighting the first entry.
    pub fn new(title: impl Into<String>, items: Vec<PickerItem>) -> Self {
        let selected = if items.is_empty() { None } else { Some(0) };
        Self {
            title: title.into(),
            items,
            selected,
        }
    }

    pub fn items(&self) -> &[PickerItem] {
        &self.items
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    /// Returns the highlighted entry.
    pub fn current(&self) -> Option<&PickerItem> {
        self.selected.and_then(|i| self.items.get(i))
    }

    /// Moves the highlight up by one (no wrap).
    pub fn select_prev(&mut self) {
        self.selected = match self.selected {
            Some(i) if i > 0 => Some(i - 1),
            other => other,
        };
    }

    /// Moves the highlight down by one (no wrap).
    pub fn select_next(&mut self) {
        self.selected = match self.selected {
            Some(i) if i + 1 < self.items.len() => Some(i + 1),
            other => other,
        };
    }
}

/// Renders the picker as a two-column table inside a bordered block.
#[mutants::skip]
pub fn draw_picker(picker: &Picker, error: Option<&str>, frame: &mut Frame, area: Rect) {
    let border_color = if error.is_some() {
        Color::Red
    } else {
        Color::Yellow
    };
    let mut block = Block::default()
        .title(format!(" {} ", picker.title))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color));
    if let Some(err) = error {
        block = block.title_bottom(err.to_string());
    }

    let rows: Vec<Row> = picker
        .items
        .iter()
        .enumerate()
        .map(|(i, item)| {
            let style = if picker.selected == Some(i) {
                Style::default().fg(Color::Black).bg(Color::Yellow)
            } else {
                Style::default()
            };
            Row::new(vec![item.label.clone(), item.detail.clone()]).style(style)
        })
        .collect();

    let widths = [Constraint::Min(16), Constraint::Length(16)];
    let table = Table::new(rows, widths).block(block);
    frame.render_widget(table, area);
}
