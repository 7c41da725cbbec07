//! Employee business logic - CRUD with login-email uniqueness.
//!
//! The email is the login identifier, so create and update both check for
//! a conflicting employee before writing.

use crate::{
    entities::{Employee, employee},
    errors::{Error, Result},
    validate::{self, EmployeeInput},
};
use sea_orm::{QueryOrder, Set, prelude::*};

/// Retrieves all employees, ordered alphabetically by name.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn get_all_employees(db: &DatabaseConnection) -> Result<Vec<employee::Model>> {
    Employee::find()
        .order_by_asc(employee::Column::Name)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Retrieves a specific employee by its unique ID.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn get_employee_by_id(
    db: &DatabaseConnection,
    employee_id: i64,
) -> Result<Option<employee::Model>> {
    Employee::find_by_id(employee_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Finds an employee by login email.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn get_employee_by_email(
    db: &DatabaseConnection,
    email: &str,
) -> Result<Option<employee::Model>> {
    Employee::find()
        .filter(employee::Column::Email.eq(email))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Creates a new employee after validating the candidate record and
/// checking that the email is not already in use.
///
/// # Errors
/// Returns a validation error for invalid fields, an email-taken error on
/// conflict, or a database error if the insert fails.
pub async fn create_employee(
    db: &DatabaseConnection,
    input: EmployeeInput,
) -> Result<employee::Model> {
    let input = validate::validate_employee(input).map_err(Error::Validation)?;

    if get_employee_by_email(db, &input.email).await?.is_some() {
        return Err(Error::EmailTaken { email: input.email });
    }

    let model = employee::ActiveModel {
        name: Set(input.name),
        role: Set(input.role),
        email: Set(input.email),
        password: Set(input.password),
        group_id: Set(input.group_id),
        ..Default::default()
    };
    model.insert(db).await.map_err(Into::into)
}

/// Replaces an existing employee's fields. The email may change, but only
/// to one no other employee holds.
///
/// # Errors
/// Returns a validation error for invalid fields, a not-found error if the
/// employee does not exist, an email-taken error on conflict, or a database
/// error if the update fails.
pub async fn update_employee(
    db: &DatabaseConnection,
    employee_id: i64,
    input: EmployeeInput,
) -> Result<employee::Model> {
    let input = validate::validate_employee(input).map_err(Error::Validation)?;

    let existing = Employee::find_by_id(employee_id)
        .one(db)
        .await?
        .ok_or(Error::EmployeeNotFound { id: employee_id })?;

    if let Some(other) = get_employee_by_email(db, &input.email).await?
        && other.id != existing.id
    {
        return Err(Error::EmailTaken { email: input.email });
    }

    let mut model: employee::ActiveModel = existing.into();
    model.name = Set(input.name);
    model.role = Set(input.role);
    model.email = Set(input.email);
    model.password = Set(input.password);
    model.group_id = Set(input.group_id);
    model.update(db).await.map_err(Into::into)
}

/// Deletes an employee by id.
///
/// # Errors
/// Returns a not-found error if the employee does not exist, or a database
/// error if the delete fails.
pub async fn delete_employee(db: &DatabaseConnection, employee_id: i64) -> Result<()> {
    let existing = Employee::find_by_id(employee_id)
        .one(db)
        .await?
        .ok_or(Error::EmployeeNotFound { id: employee_id })?;
    existing.delete(db).await?;
    Ok(())
}
