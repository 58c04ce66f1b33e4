use std::collections::BTreeMap;
use std::fmt;

use thiserror::Error;

/// Per-field validation messages keyed by the form field name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    entries: BTreeMap<String, String>,
}

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.entries.insert(field.into(), message.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.entries.get(field).map(String::as_str)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.entries.contains_key(field)
    }

    pub fn clear_field(&mut self, field: &str) {
        self.entries.remove(field);
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(field, message)| (field.as_str(), message.as_str()))
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined = self
            .entries
            .iter()
            .map(|(field, message)| format!("{field}: {message}"))
            .collect::<Vec<_>>()
            .join("; ");
        write!(f, "{joined}")
    }
}

/// Error type shared by the booking components.
#[derive(Debug, Error)]
pub enum BookingError {
    #[error("Validation failed: {0}")]
    Validation(FieldErrors),
    #[error("Location unavailable: {0}")]
    LocationUnavailable(String),
    #[error("Payment failed: {0}")]
    PaymentFailed(String),
    #[error("Unknown plan: {0}")]
    UnknownPlan(String),
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for BookingError {
    fn from(err: serde_json::Error) -> Self {
        BookingError::Config(err.to_string())
    }
}

impl From<FieldErrors> for BookingError {
    fn from(errors: FieldErrors) -> Self {
        BookingError::Validation(errors)
    }
}

/// User-facing CLI error wrapper.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Booking(#[from] BookingError),
    #[error("Terminal error: {0}")]
    Terminal(#[from] std::io::Error),
    #[error("Invalid input: {0}")]
    Input(String),
    #[error(transparent)]
    Serde(#[from] serde_json::Error),
}

impl From<dialoguer::Error> for CliError {
    fn from(err: dialoguer::Error) -> Self {
        match err {
            dialoguer::Error::IO(io) => CliError::Terminal(io),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_errors_display_in_key_order() {
        let mut errors = FieldErrors::new();
        errors.insert("model", "Please enter model");
        errors.insert("brand", "Please enter brand name");
        assert_eq!(
            errors.to_string(),
            "brand: Please enter brand name; model: Please enter model"
        );
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn clearing_a_field_removes_only_that_message() {
        let mut errors = FieldErrors::new();
        errors.insert("brand", "Please enter brand name");
        errors.insert("model", "Please enter model");
        errors.clear_field("brand");
        assert!(!errors.contains("brand"));
        assert_eq!(errors.get("model"), Some("Please enter model"));
    }
}
