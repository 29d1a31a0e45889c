//! Form rendering and focus helpers shared by input screens.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

/// How a row's value is presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowKind {
    /// Free text with a cursor when focused.
    Text,
    /// One option out of a fixed list, shown as `< value >`.
    Select,
    /// A boolean shown as `[x]` / `[ ]`.
    Checkbox(bool),
}

/// One rendered row of a form.
#[derive(Debug, Clone)]
pub struct FormRow {
    /// Display label used as the block title.
    pub label: String,
    /// Current value as text (ignored for checkboxes).
    pub value: String,
    /// Dimmed hint shown while the value is empty.
    pub placeholder: Option<String>,
    /// Validation message, if any.
    pub error: Option<String>,
    /// Whether the label gets a `*` marker.
    pub required: bool,
    pub focused: bool,
    pub kind: RowKind,
}

impl FormRow {
    /// Creates an unfocused text row with no value.
    pub fn new(label: impl Into<String>, required: bool) -> Self {
        Self {
            label: label.into(),
            value: String::new(),
            placeholder: None,
            error: None,
            required,
            focused: false,
            kind: RowKind::Text,
        }
    }

    pub fn value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self
    }

    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    pub fn error(mut self, error: Option<String>) -> Self {
        self.error = error;
        self
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    pub fn kind(mut self, kind: RowKind) -> Self {
        self.kind = kind;
        self
    }
}

/// Height of one row, including its border.
pub const ROW_HEIGHT: u16 = 3;

/// Returns the item after (or before) `current` in `items`, wrapping around.
///
/// If `current` is not in `items`, the first item is returned.
pub fn cycle_focus<T: Copy + PartialEq>(items: &[T], current: T, forward: bool) -> Option<T> {
    if items.is_empty() {
        return None;
    }
    let len = items.len();
    let next = match items.iter().position(|&item| item == current) {
        Some(i) if forward => (i + 1) % len,
        Some(i) => (i + len - 1) % len,
        None => 0,
    };
    items.get(next).copied()
}

/// Renders form rows top to bottom within `area`.
#[cfg_attr(coverage_nightly, coverage(off))]
#[mutants::skip]
pub fn draw_form(rows: &[FormRow], frame: &mut Frame, area: Rect) {
    let constraints: Vec<Constraint> = rows
        .iter()
        .map(|_| Constraint::Length(ROW_HEIGHT))
        .collect();
    let areas = Layout::vertical(constraints).split(area);

    for (row, &row_area) in rows.iter().zip(areas.iter()) {
        let border_color = if row.error.is_some() {
            Color::Red
        } else if row.focused {
            Color::Yellow
        } else {
            Color::DarkGray
        };

        let label = if row.required {
            format!("{} *", row.label)
        } else {
            row.label.clone()
        };

        let block = Block::default()
            .title(label)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border_color));

        let paragraph = Paragraph::new(row_line(row)).block(block);
        frame.render_widget(paragraph, row_area);

        // Error overlaps the bottom border of the row; rows squeezed by a
        // short terminal have no bottom border to draw on.
        if let Some(ref err) = row.error {
            if row_area.height < ROW_HEIGHT {
                continue;
            }
            let error_line = Paragraph::new(Span::styled(err, Style::default().fg(Color::Red)));
            let err_area = Rect {
                x: row_area.x.saturating_add(2),
                y: row_area.y + ROW_HEIGHT - 1,
                width: row_area.width.saturating_sub(4),
                height: 1,
            }
            .intersection(row_area);
            frame.render_widget(error_line, err_area);
        }
    }
}

fn row_line(row: &FormRow) -> Line<'_> {
    let dim = Style::default().fg(Color::DarkGray);
    let mut spans = match row.kind {
        RowKind::Checkbox(checked) => {
            let mark = if checked { "[x] " } else { "[ ] " };
            vec![Span::raw(mark), Span::raw(row.label.as_str())]
        }
        RowKind::Select => vec![
            Span::styled("< ", dim),
            Span::raw(row.value.as_str()),
            Span::styled(" >", dim),
        ],
        RowKind::Text if row.value.is_empty() && !row.focused => match &row.placeholder {
            Some(hint) => vec![Span::styled(hint.as_str(), dim)],
            None => Vec::new(),
        },
        RowKind::Text => vec![Span::raw(row.value.as_str())],
    };
    if row.focused && row.kind == RowKind::Text {
        spans.push(Span::styled(
            "\u{2588}",
            Style::default().add_modifier(Modifier::SLOW_BLINK),
        ));
    }
    Line::from(spans)
}
