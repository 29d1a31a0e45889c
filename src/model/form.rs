//! In-memory state of the add-product form and its pure update reducer.

use super::category::Category;

/// Rental price inputs, kept as raw text until submission.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RentalPrice {
    pub hourly: String,
    pub daily: String,
}

/// Everything the user has entered for the new product.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FormState {
    pub brand: String,
    pub name: String,
    pub price: String,
    pub description: String,
    pub image: String,
    /// `None` until the user picks an option from the category select.
    pub category: Option<Category>,
    pub is_rentable: bool,
    pub rental_price: RentalPrice,
}

/// Top-level free-text fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextField {
    Name,
    Brand,
    Price,
    Description,
    Image,
}

/// Sub-fields of [`RentalPrice`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RentalField {
    Hourly,
    Daily,
}

/// A single edit to the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldUpdate {
    /// Replace a top-level text field.
    TopLevel(TextField, String),
    /// Select a category, or go back to the unselected prompt.
    Category(Option<Category>),
    /// Checkbox state of "Available for Rent".
    Rentable(bool),
    /// Replace one of the rental price inputs.
    RentalSubfield(RentalField, String),
}

impl FormState {
    /// Returns the current text of a top-level field.
    pub fn text(&self, field: TextField) -> &str {
        match field {
            TextField::Name => &self.name,
            TextField::Brand => &self.brand,
            TextField::Price => &self.price,
            TextField::Description => &self.description,
            TextField::Image => &self.image,
        }
    }

    /// Returns the current text of a rental price input.
    pub fn rental(&self, field: RentalField) -> &str {
        match field {
            RentalField::Hourly => &self.rental_price.hourly,
            RentalField::Daily => &self.rental_price.daily,
        }
    }

    /// Returns a new state with `update` applied; `self` is left untouched.
    #[must_use]
    pub fn apply(&self, update: FieldUpdate) -> FormState {
        let mut next = self.clone();
        match update {
            FieldUpdate::TopLevel(field, value) => {
                let slot = match field {
                    TextField::Name => &mut next.name,
                    TextField::Brand => &mut next.brand,
                    TextField::Price => &mut next.price,
                    TextField::Description => &mut next.description,
                    TextField::Image => &mut next.image,
                };
                *slot = value;
            }
            FieldUpdate::Category(category) => next.category = category,
            FieldUpdate::Rentable(checked) => next.is_rentable = checked,
            FieldUpdate::RentalSubfield(field, value) => match field {
                RentalField::Hourly => next.rental_price.hourly = value,
                RentalField::Daily => next.rental_price.daily = value,
            },
        }
        next
    }
}
