//! Input validation for orders.
//!
//! Checks the order invariants before an order is accepted into a store.
//! Detects:
//! - Empty customer or dish names
//! - Non-positive preparation times

use crate::models::Order;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Position of the offending order in the validated slice.
    pub index: usize,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// `customer_name` is empty or whitespace.
    EmptyCustomerName,
    /// `dish_name` is empty or whitespace.
    EmptyDishName,
    /// `prep_time` is zero.
    NonPositivePrepTime,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, index: usize, message: impl Into<String>) -> Self {
        Self {
            kind,
            index,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

/// Validates a single order. Errors carry index 0.
pub fn validate_order(order: &Order) -> ValidationResult {
    let mut errors = Vec::new();
    check_order(0, order, &mut errors);
    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Validates every order, collecting all errors.
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_orders(orders: &[Order]) -> ValidationResult {
    let mut errors = Vec::new();
    for (index, order) in orders.iter().enumerate() {
        check_order(index, order, &mut errors);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_order(index: usize, order: &Order, errors: &mut Vec<ValidationError>) {
    if order.customer_name.trim().is_empty() {
        errors.push(ValidationError::new(
            ValidationErrorKind::EmptyCustomerName,
            index,
            "customer_name must not be empty",
        ));
    }

    if order.dish_name.trim().is_empty() {
        errors.push(ValidationError::new(
            ValidationErrorKind::EmptyDishName,
            index,
            format!("dish_name must not be empty (customer '{}')", order.customer_name),
        ));
    }

    if order.prep_time == 0 {
        errors.push(ValidationError::new(
            ValidationErrorKind::NonPositivePrepTime,
            index,
            format!("prep_time must be positive for '{}'", order.dish_name),
        ));
    }
}
