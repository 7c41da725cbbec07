//! Shared test utilities.
//!
//! This module provides common helper functions for setting up test
//! databases and creating test entities with sensible defaults.

use crate::{
    core::{department, employee, group, product, shopping_list},
    entities::{self, shopping_list_item::STATUS_PURCHASED},
    errors::Result,
    validate::{
        DepartmentInput, EmployeeInput, GroupInput, ProductInput, ShoppingListItemInput,
    },
};
use sea_orm::DatabaseConnection;

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Creates a test product with the given stock quantity and department
/// assignments. Description, unit, and invoice fields default to `None`.
pub async fn create_test_product(
    db: &DatabaseConnection,
    name: &str,
    quantity: i64,
    department_ids: Vec<i64>,
) -> Result<entities::product::Model> {
    product::create_product(
        db,
        ProductInput {
            name: name.to_string(),
            quantity,
            department_ids,
            ..Default::default()
        },
    )
    .await
}

/// Creates a test department.
pub async fn create_test_department(
    db: &DatabaseConnection,
    name: &str,
) -> Result<entities::department::Model> {
    department::create_department(
        db,
        DepartmentInput {
            name: name.to_string(),
        },
    )
    .await
}

/// Creates a test employee with role "Buyer", password "secret123", and
/// no group.
pub async fn create_test_employee(
    db: &DatabaseConnection,
    name: &str,
    email: &str,
) -> Result<entities::employee::Model> {
    employee::create_employee(
        db,
        EmployeeInput {
            name: name.to_string(),
            role: "Buyer".to_string(),
            email: email.to_string(),
            password: "secret123".to_string(),
            group_id: None,
        },
    )
    .await
}

/// Creates a test permission group.
pub async fn create_test_group(
    db: &DatabaseConnection,
    name: &str,
    permissions: Vec<String>,
) -> Result<entities::group::Model> {
    group::create_group(
        db,
        GroupInput {
            name: name.to_string(),
            permissions,
        },
    )
    .await
}

/// Creates a pending shopping-list item with no requesting employee.
pub async fn create_test_item(
    db: &DatabaseConnection,
    product_id: i64,
    department_id: i64,
    quantity: i64,
) -> Result<entities::shopping_list_item::Model> {
    shopping_list::create_shopping_list_item(
        db,
        ShoppingListItemInput {
            product_id,
            department_id,
            quantity,
            status: entities::shopping_list_item::STATUS_PENDING.to_string(),
            employee_id: None,
        },
    )
    .await
}

/// Sets up the receiving scenario most tests start from: a department, a
/// product with zero stock, and a shopping-list item for `quantity` units
/// already marked purchased. Returns (db, product, item).
pub async fn setup_with_purchased_item(
    quantity: i64,
) -> Result<(
    DatabaseConnection,
    entities::product::Model,
    entities::shopping_list_item::Model,
)> {
    let db = setup_test_db().await?;
    let department = create_test_department(&db, "Kitchen").await?;
    let product = create_test_product(&db, "Pimenta", 0, vec![department.id]).await?;
    let item = create_test_item(&db, product.id, department.id, quantity).await?;
    let item = shopping_list::set_shopping_list_item_status(&db, item.id, STATUS_PURCHASED).await?;
    Ok((db, product, item))
}
