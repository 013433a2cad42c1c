//! Order admission validation.
//!
//! Validation runs before any tier is touched and aggregates every violation
//! into a single structured error, one entry per field, reported in stable
//! field order: id, name, temp, price, freshness.

use serde::Serialize;
use thiserror::Error;

use crate::kitchen::{Order, Temperature};

/// A single violated rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    /// Wire name of the offending field.
    pub field: &'static str,
    /// Human-readable rule description.
    pub message: String,
}

impl FieldError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Aggregate of all violations found in one order.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[error("{} validation errors occurred", .0.len())]
pub struct ValidationErrors(pub Vec<FieldError>);

impl ValidationErrors {
    pub fn errors(&self) -> &[FieldError] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Validate a wire order for admission.
///
/// Returns the parsed temperature on success so the coordinator does not
/// have to re-parse the one field that carries structure.
pub fn validate_order(order: &Order) -> std::result::Result<Temperature, ValidationErrors> {
    let mut errs = Vec::new();

    if order.id.is_empty() {
        errs.push(FieldError::new("id", "is required"));
    }

    if order.name.is_empty() {
        errs.push(FieldError::new("name", "is required"));
    }

    let temperature = match order.temp.parse::<Temperature>() {
        Ok(t) => Some(t),
        Err(_) => {
            errs.push(FieldError::new("temp", "must be one of hot, cold, or room"));
            None
        }
    };

    if order.price <= 0 {
        errs.push(FieldError::new("price", "must be greater than zero"));
    }

    if order.freshness <= 0 {
        errs.push(FieldError::new("freshness", "must be positive"));
    }

    match (errs.is_empty(), temperature) {
        (true, Some(t)) => Ok(t),
        _ => Err(ValidationErrors(errs)),
    }
}
