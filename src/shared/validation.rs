use std::borrow::Cow;

use lazy_static::lazy_static;
use regex::Regex;
use validator::{ValidationError, ValidationErrors};

use crate::shared::types::FieldErrors;

lazy_static! {
    /// Regex for numeric form input (prices, amounts)
    /// Optional leading minus, digits, optional fractional part
    /// - Valid: "100", "19.99", "0.5", "-3"
    /// - Invalid: "", "abc", "1e3", "1,50", ".5", "5."
    pub static ref NUMERIC_REGEX: Regex = Regex::new(r"^-?[0-9]+(?:\.[0-9]+)?$").unwrap();
}

/// Build a `ValidationError` carrying a human readable message
pub fn error_with_message(code: &'static str, message: String) -> ValidationError {
    ValidationError::new(code).with_message(Cow::Owned(message))
}

/// Flatten `validator` errors into field-keyed messages.
///
/// Errors without an explicit message fall back to their code.
pub fn to_field_errors(errors: &ValidationErrors) -> FieldErrors {
    errors
        .field_errors()
        .into_iter()
        .map(|(field, errs)| {
            let messages = errs
                .iter()
                .map(|e| {
                    e.message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| e.code.to_string())
                })
                .collect();
            (field.to_string(), messages)
        })
        .collect()
}

/// First message of the bag, used as the summary line of a 422 response
pub fn summary_message(errors: &FieldErrors) -> String {
    let total: usize = errors.values().map(Vec::len).sum();
    let first = errors
        .values()
        .flat_map(|messages| messages.iter())
        .next()
        .cloned()
        .unwrap_or_else(|| "The given data was invalid.".to_string());

    match total {
        0 | 1 => first,
        2 => format!("{} (and 1 more error)", first),
        n => format!("{} (and {} more errors)", first, n - 1),
    }
}
