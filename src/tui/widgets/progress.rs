//! Step progress indicator for the report wizard.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::model::Step;

/// Builds the progress line, e.g. `✓ › ✓ › [3] › 4`.
///
/// Completed steps show a check mark (Green), the current step is bracketed
/// (Yellow, bold), later steps are dimmed.
pub fn progress_line(current: Step) -> Line<'static> {
    let done = Style::default().fg(Color::Green);
    let active = Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD);
    let pending = Style::default().fg(Color::DarkGray);

    let mut spans: Vec<Span> = Vec::new();
    for (i, step) in Step::all().iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(" \u{203a} ", pending));
        }
        let span = if *step < current {
            Span::styled("\u{2713}", done)
        } else if *step == current {
            Span::styled(format!("[{}]", step.index()), active)
        } else {
            Span::styled(step.index().to_string(), pending)
        };
        spans.push(span);
    }
    Line::from(spans)
}

/// Renders the one-line progress indicator.
#[mutants::skip]
pub fn draw_progress(current: Step, frame: &mut Frame, area: Rect) {
    frame.render_widget(Paragraph::new(progress_line(current)), area);
}
