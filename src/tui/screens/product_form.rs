//! Add-product screen: the form, its key bindings and rendering.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::api::SubmitError;
use crate::model::{
    Category, EditorEvent, Effect, ErrorField, FieldUpdate, ProductEditor, RentalField, TextField,
};
use crate::tui::action::{Action, ScreenState};
use crate::tui::app::Screen;
use crate::tui::widgets::form::{FormRow, ROW_HEIGHT, RowKind, cycle_focus, draw_form};

/// Focusable inputs, in tab order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Input {
    Name,
    Brand,
    Category,
    Price,
    Rentable,
    Hourly,
    Daily,
    Image,
    Description,
}

static BASE_ORDER: &[Input] = &[
    Input::Name,
    Input::Brand,
    Input::Category,
    Input::Price,
    Input::Rentable,
    Input::Image,
    Input::Description,
];

static RENTABLE_ORDER: &[Input] = &[
    Input::Name,
    Input::Brand,
    Input::Category,
    Input::Price,
    Input::Rentable,
    Input::Hourly,
    Input::Daily,
    Input::Image,
    Input::Description,
];

/// Inputs currently on screen; rental rates only appear for rentable products.
pub fn visible_inputs(rentable: bool) -> &'static [Input] {
    if rentable {
        RENTABLE_ORDER
    } else {
        BASE_ORDER
    }
}

/// Where a typed character goes.
enum TextTarget {
    TopLevel(TextField),
    Rental(RentalField),
}

impl Input {
    fn text_target(self) -> Option<TextTarget> {
        match self {
            Input::Name => Some(TextTarget::TopLevel(TextField::Name)),
            Input::Brand => Some(TextTarget::TopLevel(TextField::Brand)),
            Input::Price => Some(TextTarget::TopLevel(TextField::Price)),
            Input::Image => Some(TextTarget::TopLevel(TextField::Image)),
            Input::Description => Some(TextTarget::TopLevel(TextField::Description)),
            Input::Hourly => Some(TextTarget::Rental(RentalField::Hourly)),
            Input::Daily => Some(TextTarget::Rental(RentalField::Daily)),
            Input::Category | Input::Rentable => None,
        }
    }

    /// Price inputs only accept characters that can appear in a decimal number.
    fn accepts(self, ch: char) -> bool {
        match self {
            Input::Price | Input::Hourly | Input::Daily => {
                ch.is_ascii_digit() || matches!(ch, '.' | '-' | '+' | 'e' | 'E')
            }
            _ => true,
        }
    }
}

/// State for the add-product screen.
#[derive(Debug, Clone)]
pub struct ProductFormState {
    editor: ProductEditor,
    focus: Input,
}

impl Default for ProductFormState {
    fn default() -> Self {
        Self::new()
    }
}

impl ProductFormState {
    /// Creates an empty form with focus on the product name.
    pub fn new() -> Self {
        Self {
            editor: ProductEditor::new(),
            focus: Input::Name,
        }
    }

    /// Returns the editor for inspection and rendering.
    pub fn editor(&self) -> &ProductEditor {
        &self.editor
    }

    /// Returns the focused input.
    pub fn focus(&self) -> Input {
        self.focus
    }

    /// Discards everything entered so far.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Feeds the result of the in-flight request back into the form.
    pub fn complete(&mut self, result: Result<(), SubmitError>) -> Action {
        let event = match result {
            Ok(()) => EditorEvent::Succeeded,
            Err(e) => EditorEvent::Failed(e.user_message()),
        };
        self.dispatch(event)
    }

    fn dispatch(&mut self, event: EditorEvent) -> Action {
        let (editor, effect) = std::mem::take(&mut self.editor).reduce(event);
        self.editor = editor;
        match effect {
            Effect::None => Action::None,
            Effect::Send(product) => Action::Send(product),
            Effect::NavigateHome => Action::Navigate(Screen::Home),
        }
    }

    fn edit(&mut self, update: FieldUpdate) -> Action {
        self.dispatch(EditorEvent::Edit(update))
    }

    fn move_focus(&mut self, forward: bool) {
        let inputs = visible_inputs(self.editor.form().is_rentable);
        if let Some(next) = cycle_focus(inputs, self.focus, forward) {
            self.focus = next;
        }
    }

    fn current_text(&self, target: &TextTarget) -> String {
        let form = self.editor.form();
        match target {
            TextTarget::TopLevel(field) => form.text(*field).to_string(),
            TextTarget::Rental(field) => form.rental(*field).to_string(),
        }
    }

    fn replace_text(&mut self, target: TextTarget, value: String) -> Action {
        let update = match target {
            TextTarget::TopLevel(field) => FieldUpdate::TopLevel(field, value),
            TextTarget::Rental(field) => FieldUpdate::RentalSubfield(field, value),
        };
        self.edit(update)
    }

    fn handle_char(&mut self, ch: char) -> Action {
        match self.focus {
            Input::Rentable if ch == ' ' => {
                let checked = !self.editor.form().is_rentable;
                self.edit(FieldUpdate::Rentable(checked))
            }
            Input::Category if ch == ' ' => self.cycle_category(true),
            input => match input.text_target() {
                Some(target) if input.accepts(ch) => {
                    let mut value = self.current_text(&target);
                    value.push(ch);
                    self.replace_text(target, value)
                }
                _ => Action::None,
            },
        }
    }

    fn handle_backspace(&mut self) -> Action {
        match self.focus.text_target() {
            Some(target) => {
                let mut value = self.current_text(&target);
                if value.pop().is_none() {
                    return Action::None;
                }
                self.replace_text(target, value)
            }
            None => Action::None,
        }
    }

    fn cycle_category(&mut self, forward: bool) -> Action {
        let next = Category::cycle(self.editor.form().category, forward);
        self.edit(FieldUpdate::Category(next))
    }
}

impl ScreenState for ProductFormState {
    fn handle_key(&mut self, key: KeyEvent) -> Action {
        match key.code {
            KeyCode::Tab | KeyCode::Down => {
                self.move_focus(true);
                Action::None
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.move_focus(false);
                Action::None
            }
            KeyCode::Left if self.focus == Input::Category => self.cycle_category(false),
            KeyCode::Right if self.focus == Input::Category => self.cycle_category(true),
            KeyCode::Char(ch) => self.handle_char(ch),
            KeyCode::Backspace => self.handle_backspace(),
            KeyCode::Enter => self.dispatch(EditorEvent::Submit),
            KeyCode::Esc => Action::Navigate(Screen::Home),
            _ => Action::None,
        }
    }
}

fn error_text(state: &ProductFormState, field: ErrorField) -> Option<String> {
    state.editor().errors().get(field).map(ToString::to_string)
}

/// Builds the rows for the visible inputs.
pub fn form_rows(state: &ProductFormState) -> Vec<FormRow> {
    let form = state.editor().form();
    visible_inputs(form.is_rentable)
        .iter()
        .map(|&input| {
            let focused = state.focus() == input;
            let row = match input {
                Input::Name => FormRow::new("Product Name", true)
                    .value(&form.name)
                    .placeholder("Enter product name")
                    .error(error_text(state, ErrorField::Name)),
                Input::Brand => FormRow::new("Brand", true)
                    .value(&form.brand)
                    .placeholder("Enter brand name")
                    .error(error_text(state, ErrorField::Brand)),
                Input::Category => FormRow::new("Product Category", true)
                    .kind(RowKind::Select)
                    .value(form.category.map_or("Select a category", |c| c.label()))
                    .error(error_text(state, ErrorField::Category)),
                Input::Price => FormRow::new("Price ($)", true)
                    .value(&form.price)
                    .placeholder("Enter price")
                    .error(error_text(state, ErrorField::Price)),
                Input::Rentable => FormRow::new("Available for Rent", false)
                    .kind(RowKind::Checkbox(form.is_rentable))
                    .error(error_text(state, ErrorField::RentalPrice)),
                Input::Hourly => FormRow::new("Hourly Rate ($)", false)
                    .value(&form.rental_price.hourly)
                    .placeholder("Enter hourly rate")
                    .error(error_text(state, ErrorField::RentalPriceHourly)),
                Input::Daily => FormRow::new("Daily Rate ($)", false)
                    .value(&form.rental_price.daily)
                    .placeholder("Enter daily rate")
                    .error(error_text(state, ErrorField::RentalPriceDaily)),
                Input::Image => FormRow::new("Image URL", false)
                    .value(&form.image)
                    .placeholder("Leave blank to use a placeholder image"),
                Input::Description => FormRow::new("Description", true)
                    .value(&form.description)
                    .placeholder("Enter product description")
                    .error(error_text(state, ErrorField::Description)),
            };
            row.focused(focused)
        })
        .collect()
}

/// Renders the add-product screen.
#[mutants::skip]
pub fn draw_product_form(state: &ProductFormState, frame: &mut Frame, area: Rect) {
    let block = Block::default()
        .title(" Add New Product ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = form_rows(state);
    let form_height = ROW_HEIGHT.saturating_mul(rows.len() as u16);

    let [error_area, form_area, button_area, _spacer, footer_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(form_height),
        Constraint::Length(1),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .areas(inner);

    if let Some(err) = state.editor().submit_error() {
        let error = Paragraph::new(Line::from(Span::styled(
            err,
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )));
        frame.render_widget(error, error_area);
    }

    draw_form(&rows, frame, form_area);

    let button = if state.editor().is_submitting() {
        Span::styled(
            "[ Adding Product... ]",
            Style::default().fg(Color::DarkGray),
        )
    } else {
        Span::styled(
            "[ Add Product ]",
            Style::default().fg(Color::Black).bg(Color::Cyan),
        )
    };
    frame.render_widget(
        Paragraph::new(Line::from(button)).alignment(Alignment::Center),
        button_area,
    );

    let footer = Paragraph::new(Line::from(
        "Tab/Shift+Tab: next/prev  Space/\u{2190}\u{2192}: choose  Enter: add  Esc: cancel",
    ))
    .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(footer, footer_area);
}
