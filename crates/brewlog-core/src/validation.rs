// ABOUTME: Validation error types describing which input fields were rejected and why.
// ABOUTME: Errors accumulate so a single response can report every offending field at once.

use serde::Serialize;
use thiserror::Error;

/// Where in the request an offending value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Location {
    Body,
    Query,
    Path,
}

/// A single rejected field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub location: Location,
    pub field: String,
    pub message: String,
    pub kind: &'static str,
}

impl FieldError {
    pub fn missing(location: Location, field: &str) -> Self {
        Self {
            location,
            field: field.to_string(),
            message: "Field required".to_string(),
            kind: "missing",
        }
    }

    pub fn greater_than(location: Location, field: &str, bound: i64) -> Self {
        Self {
            location,
            field: field.to_string(),
            message: format!("Input should be greater than {bound}"),
            kind: "greater_than",
        }
    }

    pub fn greater_than_equal(location: Location, field: &str, bound: i64) -> Self {
        Self {
            location,
            field: field.to_string(),
            message: format!("Input should be greater than or equal to {bound}"),
            kind: "greater_than_equal",
        }
    }

    /// A value that could not be parsed into the expected shape at all.
    pub fn invalid(location: Location, field: &str, message: impl Into<String>) -> Self {
        Self {
            location,
            field: field.to_string(),
            message: message.into(),
            kind: "invalid",
        }
    }
}

/// One or more fields failed validation. Never constructed empty.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{} validation error(s): {}", .errors.len(), summarize(.errors))]
pub struct ValidationError {
    pub errors: Vec<FieldError>,
}

impl ValidationError {
    pub fn single(error: FieldError) -> Self {
        Self {
            errors: vec![error],
        }
    }

    /// Returns true if any error refers to the named field.
    pub fn has_field(&self, field: &str) -> bool {
        self.errors.iter().any(|e| e.field == field)
    }
}

fn summarize(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|e| format!("{}: {}", e.field, e.message))
        .collect::<Vec<_>>()
        .join("; ")
}

/// Collects field errors while checking a whole input.
#[derive(Debug, Default)]
pub(crate) struct Collector {
    errors: Vec<FieldError>,
}

impl Collector {
    pub(crate) fn push(&mut self, error: FieldError) {
        self.errors.push(error);
    }

    /// Unwraps a required value, recording a `missing` error when absent.
    pub(crate) fn required<T>(
        &mut self,
        location: Location,
        field: &str,
        value: Option<T>,
    ) -> Option<T> {
        if value.is_none() {
            self.push(FieldError::missing(location, field));
        }
        value
    }

    /// Checks `value > 0`. NaN fails the check.
    pub(crate) fn positive(
        &mut self,
        location: Location,
        field: &str,
        value: Option<f64>,
    ) -> Option<f64> {
        let value = self.required(location, field, value)?;
        if value > 0.0 {
            Some(value)
        } else {
            self.push(FieldError::greater_than(location, field, 0));
            None
        }
    }

    /// Checks `value >= min`.
    pub(crate) fn at_least(
        &mut self,
        location: Location,
        field: &str,
        value: i64,
        min: i64,
    ) -> Option<i64> {
        if value >= min {
            Some(value)
        } else {
            self.push(FieldError::greater_than_equal(location, field, min));
            None
        }
    }

    /// Yields the checked value when nothing was recorded. Every check that
    /// returns `None` records an error, so `value` is only `None` alongside
    /// at least one error.
    pub(crate) fn finish<T>(self, value: Option<T>) -> Result<T, ValidationError> {
        match value {
            Some(value) if self.errors.is_empty() => Ok(value),
            _ => Err(ValidationError {
                errors: self.errors,
            }),
        }
    }
}
