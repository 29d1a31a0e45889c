//! Home screen: products added during this session.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Paragraph, Row, Table};

use crate::model::NewProduct;
use crate::tui::action::{Action, ScreenState};
use crate::tui::app::Screen;

/// State for the home screen.
#[derive(Debug, Clone, Default)]
pub struct HomeState {
    /// Products the server accepted, oldest first.
    added: Vec<NewProduct>,
    /// Confirmation shown after the latest successful submission.
    notice: Option<String>,
}

impl HomeState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a product the server accepted and sets the confirmation notice.
    pub fn record(&mut self, product: NewProduct) {
        self.notice = Some(format!("Added \"{}\"", product.name));
        self.added.push(product);
    }

    /// Returns the products added so far.
    pub fn added(&self) -> &[NewProduct] {
        &self.added
    }

    /// Returns the current notice, if any.
    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    /// Clears the notice.
    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }
}

impl ScreenState for HomeState {
    fn handle_key(&mut self, key: KeyEvent) -> Action {
        match key.code {
            KeyCode::Char('a') | KeyCode::Char('n') => {
                self.dismiss_notice();
                Action::Navigate(Screen::AddProduct)
            }
            KeyCode::Char('q') | KeyCode::Esc => Action::Quit,
            _ => Action::None,
        }
    }
}

fn format_price(price: f64) -> String {
    format!("${price:.2}")
}

fn rental_summary(product: &NewProduct) -> String {
    if !product.is_rentable {
        return "-".to_string();
    }
    let rates = &product.rental_price;
    let mut parts = Vec::new();
    if rates.hourly > 0.0 {
        parts.push(format!("{}/h", format_price(rates.hourly)));
    }
    if rates.daily > 0.0 {
        parts.push(format!("{}/d", format_price(rates.daily)));
    }
    parts.join(" ")
}

/// Renders the home screen.
#[mutants::skip]
pub fn draw_home(state: &HomeState, frame: &mut Frame, area: Rect) {
    let block = Block::default()
        .title(" Products ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let [notice_area, table_area, footer_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .areas(inner);

    if let Some(notice) = state.notice() {
        let line = Paragraph::new(notice)
            .style(Style::default().fg(Color::Green))
            .alignment(Alignment::Center);
        frame.render_widget(line, notice_area);
    }

    if state.added().is_empty() {
        let lines = vec![
            Line::from(""),
            Line::from("No products added yet."),
            Line::from("Press 'a' to add a product."),
        ];
        frame.render_widget(
            Paragraph::new(lines).alignment(Alignment::Center),
            table_area,
        );
    } else {
        let header = Row::new(vec!["Name", "Brand", "Category", "Price", "Rental"])
            .style(Style::default().add_modifier(Modifier::BOLD))
            .bottom_margin(1);

        let rows: Vec<Row> = state
            .added()
            .iter()
            .map(|product| {
                Row::new(vec![
                    product.name.clone(),
                    product.brand.clone(),
                    product.category.label().to_string(),
                    format_price(product.price),
                    rental_summary(product),
                ])
            })
            .collect();

        let widths = [
            Constraint::Min(16),
            Constraint::Length(14),
            Constraint::Length(10),
            Constraint::Length(12),
            Constraint::Length(20),
        ];
        frame.render_widget(Table::new(rows, widths).header(header), table_area);
    }

    let footer =
        Paragraph::new("a: add product  F1: help  q: quit").style(Style::default().fg(Color::DarkGray));
    frame.render_widget(footer, footer_area);
}
