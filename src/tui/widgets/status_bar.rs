//! Status bar widget: one line of session context at the bottom of the screen.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

/// Data shown by the status bar.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StatusBarContext {
    /// The create-product endpoint requests go to.
    pub endpoint: String,
    /// Products created since the app started.
    pub added: usize,
    /// Whether a create request is in flight.
    pub submitting: bool,
}

/// Renders the status bar.
///
/// Display format (left-aligned, Cyan):
/// - Idle:        `POST https://shop.example.com/api/products  2 added`
/// - In flight:   `POST https://shop.example.com/api/products  2 added  SUBMITTING` (Yellow)
#[mutants::skip]
pub fn draw_status_bar(ctx: &StatusBarContext, frame: &mut Frame, area: Rect) {
    let cyan = Style::default().fg(Color::Cyan);
    let yellow = Style::default().fg(Color::Yellow);

    let mut spans = vec![
        Span::styled(format!("POST {}", ctx.endpoint), cyan),
        Span::styled(format!("  {} added", ctx.added), cyan),
    ];
    if ctx.submitting {
        spans.push(Span::styled("  SUBMITTING", yellow));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
