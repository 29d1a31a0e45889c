//! Parsing of money inputs typed into the form.
//!
//! Empty input means "absent", not zero. Zero is only substituted when the
//! payload is built (see [`NewProduct`](super::NewProduct)).

use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

/// Why a non-empty amount input was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AmountError {
    #[error("not a number")]
    NotANumber,
    #[error("must be greater than zero")]
    NotPositive,
}

static DECIMAL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[+-]?(\d+(\.\d*)?|\.\d+)([eE][+-]?\d+)?$").expect("valid hardcoded regex")
});

/// Parses an amount input.
///
/// Returns `Ok(None)` for empty or whitespace-only input and
/// [`AmountError::NotANumber`] for anything that is not a plain decimal
/// (`NaN`, `inf`, hex and thousands separators are all rejected).
pub fn parse_amount(input: &str) -> Result<Option<f64>, AmountError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    if !DECIMAL_RE.is_match(trimmed) {
        return Err(AmountError::NotANumber);
    }
    match trimmed.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(Some(value)),
        _ => Err(AmountError::NotANumber),
    }
}

/// Parses an amount input that, when present, must be strictly positive.
pub fn parse_positive_amount(input: &str) -> Result<Option<f64>, AmountError> {
    match parse_amount(input)? {
        Some(value) if value <= 0.0 => Err(AmountError::NotPositive),
        other => Ok(other),
    }
}
