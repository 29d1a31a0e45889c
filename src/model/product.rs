use serde::Serialize;

use super::amount::parse_amount;
use super::category::Category;
use super::form::FormState;
use super::validation::{CheckedFields, FormErrors, check};

/// Image URL sent when the user leaves the image field blank.
pub const PLACEHOLDER_IMAGE_URL: &str = "https://via.placeholder.com/400?text=No+Image";

/// Rental prices as sent to the API; absent inputs are zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RentalRates {
    pub hourly: f64,
    pub daily: f64,
}

/// JSON body of a create-product request.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProduct {
    pub brand: String,
    pub name: String,
    pub price: f64,
    pub description: String,
    pub image: String,
    pub category: Category,
    pub is_rentable: bool,
    pub rental_price: RentalRates,
}

impl NewProduct {
    /// Validates `form` and converts it into a request payload.
    ///
    /// Returns the full error mapping if the form is not valid.
    pub fn from_form(form: &FormState) -> Result<Self, FormErrors> {
        let CheckedFields { category, price } = check(form)?;

        let image = if form.image.is_empty() {
            PLACEHOLDER_IMAGE_URL.to_string()
        } else {
            form.image.clone()
        };

        Ok(Self {
            brand: form.brand.clone(),
            name: form.name.clone(),
            price,
            description: form.description.clone(),
            image,
            category,
            is_rentable: form.is_rentable,
            rental_price: RentalRates {
                hourly: amount_or_zero(&form.rental_price.hourly),
                daily: amount_or_zero(&form.rental_price.daily),
            },
        })
    }
}

fn amount_or_zero(input: &str) -> f64 {
    parse_amount(input).ok().flatten().unwrap_or(0.0)
}
