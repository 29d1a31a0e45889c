use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::layout::{Constraint, Layout};
use ratatui::{Frame, Terminal};

use crate::model::NewProduct;

use super::action::{Action, ScreenState};
use super::error::AppError;
use super::screens::{
    HelpState, HomeState, ProductFormState, draw_help, draw_home, draw_product_form,
};
use super::submission::{Submitter, Ticket};
use super::widgets::{StatusBarContext, draw_status_bar};

/// How long the event loop waits for input before checking for finished requests.
const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// All screens the app can navigate between.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Screen {
    /// Products added this session.
    Home,
    /// The add-product form.
    AddProduct,
    /// Show keybinding help.
    Help,
}

/// Top-level application state.
pub struct App {
    screen: Screen,
    home: HomeState,
    form: ProductFormState,
    help: HelpState,
    submitter: Submitter,
    /// The request the form is waiting on, with the payload that was sent.
    in_flight: Option<(Ticket, NewProduct)>,
    endpoint: String,
    should_quit: bool,
}

impl App {
    /// Creates a new `App` starting on the [`Screen::Home`] screen.
    pub fn new(submitter: Submitter, endpoint: impl Into<String>) -> Self {
        Self {
            screen: Screen::Home,
            home: HomeState::new(),
            form: ProductFormState::new(),
            help: HelpState::new(),
            submitter,
            in_flight: None,
            endpoint: endpoint.into(),
            should_quit: false,
        }
    }

    /// Main event loop: draw → poll input → dispatch → collect finished requests.
    #[cfg_attr(coverage_nightly, coverage(off))]
    #[mutants::skip]
    pub fn run<B: ratatui::backend::Backend>(
        &mut self,
        terminal: &mut Terminal<B>,
    ) -> Result<(), AppError> {
        while !self.should_quit {
            terminal.draw(|frame| self.draw(frame))?;
            if event::poll(POLL_INTERVAL)? {
                if let Event::Key(key) = event::read()? {
                    self.handle_key(key);
                }
            }
            self.poll_submissions();
        }
        Ok(())
    }

    /// Renders the current screen and the status bar.
    #[cfg_attr(coverage_nightly, coverage(off))]
    #[mutants::skip]
    fn draw(&self, frame: &mut Frame) {
        let [main_area, status_area] =
            Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(frame.area());

        match self.screen {
            Screen::Home => draw_home(&self.home, frame, main_area),
            Screen::AddProduct => draw_product_form(&self.form, frame, main_area),
            Screen::Help => draw_help(&self.help, frame, main_area),
        }

        let ctx = StatusBarContext {
            endpoint: self.endpoint.clone(),
            added: self.home.added().len(),
            submitting: self.in_flight.is_some(),
        };
        draw_status_bar(&ctx, frame, status_area);
    }

    /// Handles a key event: global keys first, then screen-specific.
    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }

        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }

        if key.code == KeyCode::F(1) {
            if self.screen != Screen::Help {
                self.help.set_origin(self.screen);
                self.help.reset();
                self.screen = Screen::Help;
            }
            return;
        }

        let action = match self.screen {
            Screen::Home => self.home.handle_key(key),
            Screen::AddProduct => self.form.handle_key(key),
            Screen::Help => self.help.handle_key(key),
        };
        self.apply(action);
    }

    /// Drains finished requests and feeds the current one back into the form.
    pub fn poll_submissions(&mut self) {
        while let Some(outcome) = self.submitter.try_next() {
            let current = matches!(&self.in_flight, Some((ticket, _)) if *ticket == outcome.ticket);
            if !current {
                tracing::info!(ticket = outcome.ticket, "discarding outcome for abandoned form");
                continue;
            }
            let Some((ticket, product)) = self.in_flight.take() else {
                continue;
            };

            match &outcome.result {
                Ok(()) => {
                    tracing::info!(ticket, name = %product.name, "product created");
                    self.home.record(product);
                }
                Err(e) => tracing::warn!(ticket, error = %e, "product creation failed"),
            }
            let action = self.form.complete(outcome.result);
            self.apply(action);
        }
    }

    fn apply(&mut self, action: Action) {
        match action {
            Action::None => {}
            Action::Navigate(screen) => self.navigate(screen),
            Action::Send(product) => {
                let ticket = self.submitter.start(product.clone());
                tracing::info!(ticket, name = %product.name, "submitting product");
                self.in_flight = Some((ticket, product));
            }
            Action::Quit => self.should_quit = true,
        }
    }

    fn navigate(&mut self, screen: Screen) {
        if self.screen == Screen::AddProduct && screen == Screen::Home {
            // Leaving the form drops it along with any request it is waiting on.
            self.in_flight = None;
            self.form.reset();
        }
        if screen == Screen::AddProduct && self.screen != Screen::Help {
            self.form.reset();
        }
        self.screen = screen;
    }

    /// Returns the current screen.
    pub fn screen(&self) -> Screen {
        self.screen
    }

    /// Returns `true` if the app should quit.
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Returns the home screen state.
    pub fn home(&self) -> &HomeState {
        &self.home
    }

    /// Returns the form screen state.
    pub fn form(&self) -> &ProductFormState {
        &self.form
    }

    /// Returns `true` while a create request is outstanding.
    pub fn is_submitting(&self) -> bool {
        self.in_flight.is_some()
    }
}
