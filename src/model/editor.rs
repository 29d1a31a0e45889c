//! Submission state machine for the add-product form.
//!
//! [`ProductEditor::reduce`] is pure: it returns the next editor and an
//! [`Effect`] for the caller to carry out (send a request, navigate). The
//! editor itself never touches the network.

use super::form::{FieldUpdate, FormState};
use super::product::NewProduct;
use super::validation::FormErrors;

/// Where the editor is in the submit lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    /// Editable, no request in flight.
    #[default]
    Idle,
    /// One create request is in flight; further submits are ignored.
    Submitting,
    /// The product was created and the app has been asked to leave the form.
    Navigated,
}

/// Input to [`ProductEditor::reduce`].
#[derive(Debug, Clone, PartialEq)]
pub enum EditorEvent {
    /// The user changed a field.
    Edit(FieldUpdate),
    /// The user asked to submit the form.
    Submit,
    /// The create request returned a success status.
    Succeeded,
    /// The create request failed with the given user-facing message.
    Failed(String),
}

/// Side effect requested by a transition.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    None,
    /// Send exactly one create request with this payload.
    Send(NewProduct),
    /// Leave the form for the home screen.
    NavigateHome,
}

/// Form values plus everything displayed around them.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ProductEditor {
    form: FormState,
    errors: FormErrors,
    submit_error: Option<String>,
    phase: Phase,
}

impl ProductEditor {
    /// Creates an editor with an empty form.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current form values.
    pub fn form(&self) -> &FormState {
        &self.form
    }

    /// Field errors from the last validation pass.
    pub fn errors(&self) -> &FormErrors {
        &self.errors
    }

    /// Top-level submission error, if the last attempt failed.
    pub fn submit_error(&self) -> Option<&str> {
        self.submit_error.as_deref()
    }

    /// Current lifecycle phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Returns `true` while a request is in flight.
    pub fn is_submitting(&self) -> bool {
        self.phase == Phase::Submitting
    }

    /// Applies `event` and returns the next editor with the effect to perform.
    #[must_use]
    pub fn reduce(self, event: EditorEvent) -> (ProductEditor, Effect) {
        match event {
            EditorEvent::Edit(update) => {
                let next = Self {
                    form: self.form.apply(update),
                    submit_error: None,
                    ..self
                };
                (next, Effect::None)
            }
            EditorEvent::Submit => self.submit(),
            EditorEvent::Succeeded => {
                let next = Self {
                    submit_error: None,
                    phase: Phase::Navigated,
                    ..self
                };
                (next, Effect::NavigateHome)
            }
            EditorEvent::Failed(message) => {
                let next = Self {
                    submit_error: Some(message),
                    phase: Phase::Idle,
                    ..self
                };
                (next, Effect::None)
            }
        }
    }

    fn submit(self) -> (ProductEditor, Effect) {
        if self.phase != Phase::Idle {
            return (self, Effect::None);
        }
        match NewProduct::from_form(&self.form) {
            Ok(product) => {
                let next = Self {
                    errors: FormErrors::default(),
                    submit_error: None,
                    phase: Phase::Submitting,
                    ..self
                };
                (next, Effect::Send(product))
            }
            Err(errors) => (Self { errors, ..self }, Effect::None),
        }
    }
}
