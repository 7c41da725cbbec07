//! Schema validation - Pure, per-entity structural and semantic checks.
//!
//! Each entity has a candidate input type and a synchronous, side-effect-free
//! `validate_*` function that returns either the normalized input (names
//! trimmed) or a structured set of field errors. Validation always runs
//! before any store write; the core modules convert a [`FieldErrors`] into
//! [`crate::errors::Error::Validation`].

use crate::entities::{shopping_list_item, stock_movement};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// Structured per-field validation errors, keyed by field name.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct FieldErrors(BTreeMap<&'static str, Vec<String>>);

impl FieldErrors {
    /// Creates an empty error set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records an error message against a field.
    pub fn add(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.entry(field).or_default().push(message.into());
    }

    /// Returns true if no field has errors.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the messages recorded for a field, if any.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }

    /// Returns `Ok(value)` when empty, otherwise `Err(self)`.
    ///
    /// # Errors
    /// Returns the accumulated field errors when any were recorded.
    pub fn into_result<T>(self, value: T) -> Result<T, Self> {
        if self.is_empty() { Ok(value) } else { Err(self) }
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, messages) in &self.0 {
            for message in messages {
                if !first {
                    write!(f, "; ")?;
                }
                write!(f, "{field}: {message}")?;
                first = false;
            }
        }
        Ok(())
    }
}

/// Candidate product record.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ProductInput {
    /// Product name (at least 2 characters)
    pub name: String,
    /// Optional description
    pub description: Option<String>,
    /// Global stock quantity (non-negative)
    pub quantity: i64,
    /// Optional unit of measure
    pub unit_of_measure: Option<String>,
    /// Departments the product is assigned to
    pub department_ids: Vec<i64>,
    /// Optional invoice number
    pub invoice_number: Option<String>,
    /// Optional invoice series
    pub invoice_series: Option<String>,
    /// Optional invoice issue date
    pub issue_date: Option<String>,
}

/// Candidate department record.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DepartmentInput {
    /// Department name (at least 2 characters)
    pub name: String,
}

/// Candidate employee record.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EmployeeInput {
    /// Employee name (at least 2 characters)
    pub name: String,
    /// Job role (at least 2 characters)
    pub role: String,
    /// Login email
    pub email: String,
    /// Login password (at least 6 characters)
    pub password: String,
    /// Optional permission group
    pub group_id: Option<i64>,
}

/// Candidate group record.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GroupInput {
    /// Group name (at least 2 characters)
    pub name: String,
    /// Permitted route prefixes
    pub permissions: Vec<String>,
}

/// Candidate shopping-list item record.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ShoppingListItemInput {
    /// Requested product
    pub product_id: i64,
    /// Requesting department
    pub department_id: i64,
    /// Requested quantity (at least 1)
    pub quantity: i64,
    /// Lifecycle status: `"pending"` or `"purchased"`
    pub status: String,
    /// Requesting employee, if known
    pub employee_id: Option<i64>,
}

/// Candidate stock movement record.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MovementInput {
    /// Product the movement applies to
    pub product_id: i64,
    /// Moved quantity
    pub quantity: i64,
    /// Movement type: `"entry"`, `"exit"`, or `"transfer"`
    pub movement_type: String,
    /// Employee the movement is attributed to, if known
    pub employee_id: Option<i64>,
}

/// Candidate stock transfer request.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TransferInput {
    /// Product to transfer
    pub product_id: i64,
    /// Transferred quantity (at least 1)
    pub quantity: i64,
    /// Source department
    pub from_department_id: i64,
    /// Destination department
    pub to_department_id: i64,
}

fn check_min_len(errors: &mut FieldErrors, field: &'static str, value: &str, min: usize) {
    if value.trim().chars().count() < min {
        errors.add(field, format!("must have at least {min} characters"));
    }
}

/// Validates and normalizes a product record.
///
/// # Errors
/// Returns per-field errors for a short name or a negative quantity.
pub fn validate_product(mut input: ProductInput) -> Result<ProductInput, FieldErrors> {
    let mut errors = FieldErrors::new();
    check_min_len(&mut errors, "name", &input.name, 2);
    if input.quantity < 0 {
        errors.add("quantity", "quantity cannot be negative");
    }
    input.name = input.name.trim().to_string();
    errors.into_result(input)
}

/// Validates and normalizes a department record.
///
/// # Errors
/// Returns per-field errors for a short name.
pub fn validate_department(mut input: DepartmentInput) -> Result<DepartmentInput, FieldErrors> {
    let mut errors = FieldErrors::new();
    check_min_len(&mut errors, "name", &input.name, 2);
    input.name = input.name.trim().to_string();
    errors.into_result(input)
}

/// Validates and normalizes an employee record.
///
/// # Errors
/// Returns per-field errors for a short name or role, a malformed email,
/// or a password shorter than 6 characters.
pub fn validate_employee(mut input: EmployeeInput) -> Result<EmployeeInput, FieldErrors> {
    let mut errors = FieldErrors::new();
    check_min_len(&mut errors, "name", &input.name, 2);
    check_min_len(&mut errors, "role", &input.role, 2);
    if !is_plausible_email(&input.email) {
        errors.add("email", "invalid email");
    }
    if input.password.chars().count() < 6 {
        errors.add("password", "must have at least 6 characters");
    }
    input.name = input.name.trim().to_string();
    input.role = input.role.trim().to_string();
    input.email = input.email.trim().to_string();
    errors.into_result(input)
}

/// Validates and normalizes a group record.
///
/// # Errors
/// Returns per-field errors for a short name.
pub fn validate_group(mut input: GroupInput) -> Result<GroupInput, FieldErrors> {
    let mut errors = FieldErrors::new();
    check_min_len(&mut errors, "name", &input.name, 2);
    input.name = input.name.trim().to_string();
    errors.into_result(input)
}

/// Validates a shopping-list item record.
///
/// # Errors
/// Returns per-field errors for a quantity below 1 or a status outside
/// the `pending`/`purchased` domain.
pub fn validate_shopping_list_item(
    input: ShoppingListItemInput,
) -> Result<ShoppingListItemInput, FieldErrors> {
    let mut errors = FieldErrors::new();
    if input.quantity < 1 {
        errors.add("quantity", "quantity must be at least 1");
    }
    if input.status != shopping_list_item::STATUS_PENDING
        && input.status != shopping_list_item::STATUS_PURCHASED
    {
        errors.add("status", format!("unknown status: {}", input.status));
    }
    errors.into_result(input)
}

/// Validates a stock movement record.
///
/// # Errors
/// Returns per-field errors for a movement type outside the
/// `entry`/`exit`/`transfer` domain.
pub fn validate_movement(input: MovementInput) -> Result<MovementInput, FieldErrors> {
    let mut errors = FieldErrors::new();
    if input.movement_type != stock_movement::TYPE_ENTRY
        && input.movement_type != stock_movement::TYPE_EXIT
        && input.movement_type != stock_movement::TYPE_TRANSFER
    {
        errors.add(
            "movement_type",
            format!("unknown movement type: {}", input.movement_type),
        );
    }
    errors.into_result(input)
}

/// Validates a stock transfer request, including the cross-field
/// refinement that source and destination must differ.
///
/// # Errors
/// Returns per-field errors for a quantity below 1 or matching
/// source/destination departments.
pub fn validate_transfer(input: TransferInput) -> Result<TransferInput, FieldErrors> {
    let mut errors = FieldErrors::new();
    if input.quantity < 1 {
        errors.add("quantity", "quantity must be at least 1");
    }
    if input.from_department_id == input.to_department_id {
        errors.add(
            "to_department_id",
            "source and destination departments cannot be the same",
        );
    }
    errors.into_result(input)
}

fn is_plausible_email(email: &str) -> bool {
    let email = email.trim();
    match email.split_once('@') {
        Some((local, domain)) => !local.is_empty() && domain.contains('.'),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn test_validate_product_trims_name() {
        let input = ProductInput {
            name: "  Pimenta  ".to_string(),
            quantity: 3,
            ..Default::default()
        };
        let normalized = validate_product(input).unwrap();
        assert_eq!(normalized.name, "Pimenta");
    }

    #[test]
    fn test_validate_product_rejects_short_name_and_negative_quantity() {
        let input = ProductInput {
            name: "p".to_string(),
            quantity: -1,
            ..Default::default()
        };
        let errors = validate_product(input).unwrap_err();
        assert!(errors.get("name").is_some());
        assert!(errors.get("quantity").is_some());
    }

    #[test]
    fn test_validate_employee_rejects_bad_email_and_short_password() {
        let input = EmployeeInput {
            name: "Maria".to_string(),
            role: "Buyer".to_string(),
            email: "not-an-email".to_string(),
            password: "12345".to_string(),
            group_id: None,
        };
        let errors = validate_employee(input).unwrap_err();
        assert!(errors.get("email").is_some());
        assert!(errors.get("password").is_some());
    }

    #[test]
    fn test_validate_employee_accepts_valid_record() {
        let input = EmployeeInput {
            name: "Maria".to_string(),
            role: "Buyer".to_string(),
            email: "maria@example.com".to_string(),
            password: "secret123".to_string(),
            group_id: Some(1),
        };
        assert!(validate_employee(input).is_ok());
    }

    #[test]
    fn test_validate_shopping_list_item_status_domain() {
        let input = ShoppingListItemInput {
            product_id: 1,
            department_id: 1,
            quantity: 2,
            status: "consumed".to_string(),
            employee_id: None,
        };
        let errors = validate_shopping_list_item(input).unwrap_err();
        assert!(errors.get("status").is_some());
    }

    #[test]
    fn test_validate_shopping_list_item_quantity_minimum() {
        let input = ShoppingListItemInput {
            product_id: 1,
            department_id: 1,
            quantity: 0,
            status: shopping_list_item::STATUS_PENDING.to_string(),
            employee_id: None,
        };
        let errors = validate_shopping_list_item(input).unwrap_err();
        assert!(errors.get("quantity").is_some());
    }

    #[test]
    fn test_validate_movement_type_domain() {
        for valid in ["entry", "exit", "transfer"] {
            let input = MovementInput {
                product_id: 1,
                quantity: 1,
                movement_type: valid.to_string(),
                employee_id: None,
            };
            assert!(validate_movement(input).is_ok());
        }

        let input = MovementInput {
            product_id: 1,
            quantity: 1,
            movement_type: "adjustment".to_string(),
            employee_id: None,
        };
        assert!(validate_movement(input).is_err());
    }

    #[test]
    fn test_validate_transfer_same_department_refinement() {
        let input = TransferInput {
            product_id: 1,
            quantity: 5,
            from_department_id: 7,
            to_department_id: 7,
        };
        let errors = validate_transfer(input).unwrap_err();
        assert!(errors.get("to_department_id").is_some());
    }

    #[test]
    fn test_validate_transfer_quantity_minimum() {
        let input = TransferInput {
            product_id: 1,
            quantity: 0,
            from_department_id: 1,
            to_department_id: 2,
        };
        let errors = validate_transfer(input).unwrap_err();
        assert!(errors.get("quantity").is_some());
    }

    #[test]
    fn test_field_errors_display_joins_fields() {
        let mut errors = FieldErrors::new();
        errors.add("name", "must have at least 2 characters");
        errors.add("quantity", "quantity cannot be negative");
        let rendered = errors.to_string();
        assert!(rendered.contains("name:"));
        assert!(rendered.contains("quantity:"));
    }
}
