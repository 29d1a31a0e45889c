use std::collections::BTreeMap;

use thiserror::Error;

use super::amount::parse_positive_amount;
use super::category::Category;
use super::form::FormState;

/// Validation errors for add-product form fields.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Product name is required")]
    NameRequired,
    #[error("Brand is required")]
    BrandRequired,
    #[error("Price is required")]
    PriceRequired,
    #[error("Price must be a positive number")]
    PriceNotPositive,
    #[error("Description is required")]
    DescriptionRequired,
    #[error("Product category is required")]
    CategoryRequired,
    #[error("At least one rental price (hourly or daily) is required")]
    RentalPriceRequired,
    #[error("Hourly rental price must be a positive number")]
    HourlyNotPositive,
    #[error("Daily rental price must be a positive number")]
    DailyNotPositive,
}

/// Where a validation message is displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ErrorField {
    Name,
    Brand,
    Category,
    Price,
    /// Shown under the rental section when neither rental price is given.
    RentalPrice,
    RentalPriceHourly,
    RentalPriceDaily,
    Description,
}

/// Field-to-message mapping produced by a validation pass.
///
/// An empty mapping means the form is valid.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FormErrors {
    errors: BTreeMap<ErrorField, ValidationError>,
}

impl FormErrors {
    /// Returns `true` if no field has an error.
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Number of fields with an error.
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Returns `true` if no field has an error.
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Returns the error for a field, if any.
    pub fn get(&self, field: ErrorField) -> Option<&ValidationError> {
        self.errors.get(&field)
    }

    /// Returns `true` if the field has an error.
    pub fn contains(&self, field: ErrorField) -> bool {
        self.errors.contains_key(&field)
    }

    /// Iterates errors in display order.
    pub fn iter(&self) -> impl Iterator<Item = (ErrorField, &ValidationError)> {
        self.errors.iter().map(|(field, err)| (*field, err))
    }

    fn insert(&mut self, field: ErrorField, error: ValidationError) {
        self.errors.insert(field, error);
    }
}

/// Values a valid form is guaranteed to carry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CheckedFields {
    pub category: Category,
    pub price: f64,
}

/// Runs every rule against `form` and returns the complete error mapping.
///
/// Rules are independent; a failure in one never hides another.
pub fn validate(form: &FormState) -> FormErrors {
    check(form).err().unwrap_or_default()
}

/// Validates `form`, returning the parsed category and price when it passes.
pub fn check(form: &FormState) -> Result<CheckedFields, FormErrors> {
    let mut errors = FormErrors::default();

    if form.name.is_empty() {
        errors.insert(ErrorField::Name, ValidationError::NameRequired);
    }
    if form.brand.is_empty() {
        errors.insert(ErrorField::Brand, ValidationError::BrandRequired);
    }
    let price = match parse_positive_amount(&form.price) {
        Ok(Some(price)) => Some(price),
        Ok(None) => {
            errors.insert(ErrorField::Price, ValidationError::PriceRequired);
            None
        }
        Err(_) => {
            errors.insert(ErrorField::Price, ValidationError::PriceNotPositive);
            None
        }
    };
    if form.description.is_empty() {
        errors.insert(ErrorField::Description, ValidationError::DescriptionRequired);
    }
    if form.category.is_none() {
        errors.insert(ErrorField::Category, ValidationError::CategoryRequired);
    }

    if form.is_rentable {
        let hourly = parse_positive_amount(&form.rental_price.hourly);
        let daily = parse_positive_amount(&form.rental_price.daily);
        if matches!((&hourly, &daily), (Ok(None), Ok(None))) {
            errors.insert(ErrorField::RentalPrice, ValidationError::RentalPriceRequired);
        } else {
            if hourly.is_err() {
                errors.insert(
                    ErrorField::RentalPriceHourly,
                    ValidationError::HourlyNotPositive,
                );
            }
            if daily.is_err() {
                errors.insert(ErrorField::RentalPriceDaily, ValidationError::DailyNotPositive);
            }
        }
    }

    // A missing category or price always left an error above.
    match (form.category, price) {
        (Some(category), Some(price)) if errors.is_valid() => Ok(CheckedFields { category, price }),
        _ => Err(errors),
    }
}

#[cfg(test)]
mod tests {
    use quickcheck_macros::quickcheck;

    use super::*;
    use crate::model::parse_amount;
    use crate::model::{Category, FieldUpdate, RentalField, TextField};

    fn valid_form() -> FormState {
        FormState {
            brand: "Toyota".into(),
            name: "Corolla".into(),
            price: "19999.99".into(),
            description: "Reliable compact sedan".into(),
            image: String::new(),
            category: Some(Category::Economy),
            is_rentable: false,
            rental_price: Default::default(),
        }
    }

    fn rentable(hourly: &str, daily: &str) -> FormState {
        valid_form()
            .apply(FieldUpdate::Rentable(true))
            .apply(FieldUpdate::RentalSubfield(RentalField::Hourly, hourly.into()))
            .apply(FieldUpdate::RentalSubfield(RentalField::Daily, daily.into()))
    }

    // --- required fields ---

    #[test]
    fn valid_form_has_no_errors() {
        let errors = validate(&valid_form());
        assert!(errors.is_valid());
        assert_eq!(errors.len(), 0);
    }

    #[test]
    fn empty_form_reports_all_required_fields() {
        let errors = validate(&FormState::default());
        assert_eq!(errors.get(ErrorField::Name), Some(&ValidationError::NameRequired));
        assert_eq!(errors.get(ErrorField::Brand), Some(&ValidationError::BrandRequired));
        assert_eq!(errors.get(ErrorField::Price), Some(&ValidationError::PriceRequired));
        assert_eq!(
            errors.get(ErrorField::Description),
            Some(&ValidationError::DescriptionRequired)
        );
        assert_eq!(
            errors.get(ErrorField::Category),
            Some(&ValidationError::CategoryRequired)
        );
        assert_eq!(errors.len(), 5);
    }

    #[test]
    fn whitespace_only_name_counts_as_entered() {
        let form = valid_form().apply(FieldUpdate::TopLevel(TextField::Name, "   ".into()));
        assert!(!errors_contain(&form, ErrorField::Name));
    }

    #[test]
    fn whitespace_only_brand_and_description_count_as_entered() {
        let form = valid_form()
            .apply(FieldUpdate::TopLevel(TextField::Brand, " ".into()))
            .apply(FieldUpdate::TopLevel(TextField::Description, "\t".into()));
        assert!(validate(&form).is_valid());
    }

    #[test]
    fn blank_rental_inputs_count_as_absent() {
        let errors = validate(&rentable("  ", " "));
        assert!(errors.contains(ErrorField::RentalPrice));
    }

    #[test]
    fn check_returns_parsed_values() {
        let checked = check(&valid_form()).unwrap();
        assert_eq!(checked.category, Category::Economy);
        assert_eq!(checked.price, 19999.99);
    }

    #[test]
    fn check_failure_always_carries_errors() {
        let form = valid_form().apply(FieldUpdate::Category(None));
        let errors = check(&form).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors.contains(ErrorField::Category));
    }

    #[test]
    fn image_is_optional() {
        let form = valid_form().apply(FieldUpdate::TopLevel(TextField::Image, String::new()));
        assert!(validate(&form).is_valid());
    }

    #[test]
    fn messages_match_display_text() {
        let errors = validate(&FormState::default());
        let messages: Vec<String> = errors.iter().map(|(_, e)| e.to_string()).collect();
        assert_eq!(
            messages,
            vec![
                "Product name is required",
                "Brand is required",
                "Product category is required",
                "Price is required",
                "Description is required",
            ]
        );
    }

    // --- price ---

    #[test]
    fn price_not_a_number() {
        let form = valid_form().apply(FieldUpdate::TopLevel(TextField::Price, "abc".into()));
        assert_eq!(
            validate(&form).get(ErrorField::Price),
            Some(&ValidationError::PriceNotPositive)
        );
    }

    #[test]
    fn price_zero() {
        let form = valid_form().apply(FieldUpdate::TopLevel(TextField::Price, "0".into()));
        assert_eq!(
            validate(&form).get(ErrorField::Price),
            Some(&ValidationError::PriceNotPositive)
        );
    }

    #[test]
    fn price_negative() {
        let form = valid_form().apply(FieldUpdate::TopLevel(TextField::Price, "-5".into()));
        assert!(errors_contain(&form, ErrorField::Price));
    }

    #[quickcheck]
    fn positive_prices_accepted(value: f64) -> bool {
        if !value.is_finite() || value <= 0.0 {
            return true; // skip
        }
        let form = valid_form().apply(FieldUpdate::TopLevel(TextField::Price, value.to_string()));
        !errors_contain(&form, ErrorField::Price)
    }

    #[quickcheck]
    fn non_positive_prices_rejected(value: f64) -> bool {
        if !value.is_finite() || value > 0.0 {
            return true; // skip
        }
        let form = valid_form().apply(FieldUpdate::TopLevel(TextField::Price, value.to_string()));
        validate(&form).get(ErrorField::Price) == Some(&ValidationError::PriceNotPositive)
    }

    #[quickcheck]
    fn unparseable_prices_rejected(s: String) -> bool {
        if s.trim().is_empty() || parse_amount(&s).is_ok() {
            return true; // skip
        }
        let form = valid_form().apply(FieldUpdate::TopLevel(TextField::Price, s));
        validate(&form).get(ErrorField::Price) == Some(&ValidationError::PriceNotPositive)
    }

    // --- rental prices ---

    #[test]
    fn rentable_without_prices_reports_single_error() {
        let errors = validate(&rentable("", ""));
        assert_eq!(
            errors.get(ErrorField::RentalPrice),
            Some(&ValidationError::RentalPriceRequired)
        );
        assert!(!errors.contains(ErrorField::RentalPriceHourly));
        assert!(!errors.contains(ErrorField::RentalPriceDaily));
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn hourly_only_is_accepted() {
        assert!(validate(&rentable("10", "")).is_valid());
    }

    #[test]
    fn daily_only_is_accepted() {
        assert!(validate(&rentable("", "75")).is_valid());
    }

    #[test]
    fn both_valid_accepted() {
        assert!(validate(&rentable("10", "75")).is_valid());
    }

    #[test]
    fn invalid_hourly_with_valid_daily() {
        let errors = validate(&rentable("abc", "75"));
        assert_eq!(
            errors.get(ErrorField::RentalPriceHourly),
            Some(&ValidationError::HourlyNotPositive)
        );
        assert!(!errors.contains(ErrorField::RentalPriceDaily));
        assert!(!errors.contains(ErrorField::RentalPrice));
    }

    #[test]
    fn both_invalid_reports_both() {
        let errors = validate(&rentable("0", "-1"));
        assert_eq!(
            errors.get(ErrorField::RentalPriceHourly),
            Some(&ValidationError::HourlyNotPositive)
        );
        assert_eq!(
            errors.get(ErrorField::RentalPriceDaily),
            Some(&ValidationError::DailyNotPositive)
        );
    }

    #[test]
    fn rental_errors_do_not_hide_other_errors() {
        let form = rentable("", "").apply(FieldUpdate::TopLevel(TextField::Name, String::new()));
        let errors = validate(&form);
        assert!(errors.contains(ErrorField::Name));
        assert!(errors.contains(ErrorField::RentalPrice));
    }

    #[quickcheck]
    fn not_rentable_never_validates_rentals(hourly: String, daily: String) -> bool {
        let form = valid_form()
            .apply(FieldUpdate::RentalSubfield(RentalField::Hourly, hourly))
            .apply(FieldUpdate::RentalSubfield(RentalField::Daily, daily));
        validate(&form).is_valid()
    }

    #[quickcheck]
    fn empty_required_field_always_reported(which: u8) -> bool {
        let (field, update) = match which % 4 {
            0 => (ErrorField::Name, FieldUpdate::TopLevel(TextField::Name, String::new())),
            1 => (ErrorField::Brand, FieldUpdate::TopLevel(TextField::Brand, String::new())),
            2 => (
                ErrorField::Description,
                FieldUpdate::TopLevel(TextField::Description, String::new()),
            ),
            _ => (ErrorField::Category, FieldUpdate::Category(None)),
        };
        let errors = validate(&valid_form().apply(update));
        !errors.is_valid() && errors.contains(field)
    }

    fn errors_contain(form: &FormState, field: ErrorField) -> bool {
        validate(form).contains(field)
    }
}
