//! Department business logic - plain CRUD over business sectors.

use crate::{
    entities::{Department, department},
    errors::{Error, Result},
    validate::{self, DepartmentInput},
};
use sea_orm::{QueryOrder, Set, prelude::*};

/// Retrieves all departments, ordered alphabetically by name.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn get_all_departments(db: &DatabaseConnection) -> Result<Vec<department::Model>> {
    Department::find()
        .order_by_asc(department::Column::Name)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Retrieves a specific department by its unique ID.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn get_department_by_id(
    db: &DatabaseConnection,
    department_id: i64,
) -> Result<Option<department::Model>> {
    Department::find_by_id(department_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Creates a new department after validating the candidate record.
///
/// # Errors
/// Returns a validation error for a short name, or a database error if the
/// insert fails.
pub async fn create_department(
    db: &DatabaseConnection,
    input: DepartmentInput,
) -> Result<department::Model> {
    let input = validate::validate_department(input).map_err(Error::Validation)?;

    let model = department::ActiveModel {
        name: Set(input.name),
        ..Default::default()
    };
    model.insert(db).await.map_err(Into::into)
}

/// Renames an existing department.
///
/// # Errors
/// Returns a validation error for a short name, a not-found error if the
/// department does not exist, or a database error if the update fails.
pub async fn update_department(
    db: &DatabaseConnection,
    department_id: i64,
    input: DepartmentInput,
) -> Result<department::Model> {
    let input = validate::validate_department(input).map_err(Error::Validation)?;

    let existing = Department::find_by_id(department_id)
        .one(db)
        .await?
        .ok_or(Error::DepartmentNotFound { id: department_id })?;

    let mut model: department::ActiveModel = existing.into();
    model.name = Set(input.name);
    model.update(db).await.map_err(Into::into)
}

/// Deletes a department by id.
///
/// # Errors
/// Returns a not-found error if the department does not exist, or a
/// database error if the delete fails.
pub async fn delete_department(db: &DatabaseConnection, department_id: i64) -> Result<()> {
    let existing = Department::find_by_id(department_id)
        .one(db)
        .await?
        .ok_or(Error::DepartmentNotFound { id: department_id })?;
    existing.delete(db).await?;
    Ok(())
}
