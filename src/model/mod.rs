mod amount;
mod category;
mod editor;
mod form;
mod product;
mod validation;

pub use amount::{AmountError, parse_amount, parse_positive_amount};
pub use category::Category;
pub use editor::{EditorEvent, Effect, Phase, ProductEditor};
pub use form::{FieldUpdate, FormState, RentalField, RentalPrice, TextField};
pub use product::{NewProduct, PLACEHOLDER_IMAGE_URL, RentalRates};
pub use validation::{CheckedFields, ErrorField, FormErrors, ValidationError, check, validate};
