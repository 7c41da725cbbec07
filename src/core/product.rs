//! Product business logic - catalog CRUD and the atomic stock mutator.
//!
//! Products carry the single global `quantity` counter that the receiving
//! and transfer flows read. All quantity changes go through
//! [`update_product_quantity_atomic`] so concurrent writers cannot lose
//! updates to the counter itself.

use crate::{
    entities::{Product, product, product::DepartmentIds},
    errors::{Error, Result},
    validate::{self, ProductInput},
};
use sea_orm::{QueryOrder, Set, prelude::*};

/// Retrieves all products, ordered alphabetically by name.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn get_all_products(db: &DatabaseConnection) -> Result<Vec<product::Model>> {
    Product::find()
        .order_by_asc(product::Column::Name)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Retrieves a specific product by its unique ID.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn get_product_by_id(
    db: &DatabaseConnection,
    product_id: i64,
) -> Result<Option<product::Model>> {
    Product::find_by_id(product_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Creates a new product after validating the candidate record.
///
/// # Errors
/// Returns a validation error for a short name or negative quantity, or a
/// database error if the insert fails.
pub async fn create_product(
    db: &DatabaseConnection,
    input: ProductInput,
) -> Result<product::Model> {
    let input = validate::validate_product(input).map_err(Error::Validation)?;

    let model = product::ActiveModel {
        name: Set(input.name),
        description: Set(input.description),
        quantity: Set(input.quantity),
        unit_of_measure: Set(input.unit_of_measure),
        department_ids: Set(DepartmentIds(input.department_ids)),
        invoice_number: Set(input.invoice_number),
        invoice_series: Set(input.invoice_series),
        issue_date: Set(input.issue_date),
        ..Default::default()
    };
    model.insert(db).await.map_err(Into::into)
}

/// Replaces an existing product's fields after validating the candidate
/// record. Last write wins; no version check is performed.
///
/// # Errors
/// Returns a validation error for invalid fields, a not-found error if the
/// product does not exist, or a database error if the update fails.
pub async fn update_product(
    db: &DatabaseConnection,
    product_id: i64,
    input: ProductInput,
) -> Result<product::Model> {
    let input = validate::validate_product(input).map_err(Error::Validation)?;

    let existing = Product::find_by_id(product_id)
        .one(db)
        .await?
        .ok_or(Error::ProductNotFound { id: product_id })?;

    let mut model: product::ActiveModel = existing.into();
    model.name = Set(input.name);
    model.description = Set(input.description);
    model.quantity = Set(input.quantity);
    model.unit_of_measure = Set(input.unit_of_measure);
    model.department_ids = Set(DepartmentIds(input.department_ids));
    model.invoice_number = Set(input.invoice_number);
    model.invoice_series = Set(input.invoice_series);
    model.issue_date = Set(input.issue_date);
    model.update(db).await.map_err(Into::into)
}

/// Deletes a product by id.
///
/// # Errors
/// Returns a not-found error if the product does not exist, or a database
/// error if the delete fails.
pub async fn delete_product(db: &DatabaseConnection, product_id: i64) -> Result<()> {
    let existing = Product::find_by_id(product_id)
        .one(db)
        .await?
        .ok_or(Error::ProductNotFound { id: product_id })?;
    existing.delete(db).await?;
    Ok(())
}

/// Applies a quantity delta to a product's global stock level atomically.
///
/// Instead of reading the current quantity, modifying it, and writing it
/// back (which can lose updates under concurrent writers), this issues a
/// single SQL UPDATE: `UPDATE products SET quantity = quantity + delta
/// WHERE id = ?`. Callable on a connection or an open transaction so the
/// receiving flow can group it with its ledger writes.
///
/// # Errors
/// Returns a not-found error if the product does not exist, or a database
/// error if the update fails.
pub async fn update_product_quantity_atomic<C>(
    db: &C,
    product_id: i64,
    quantity_delta: i64,
) -> Result<product::Model>
where
    C: ConnectionTrait,
{
    use sea_orm::sea_query::Expr;

    let _product = Product::find_by_id(product_id)
        .one(db)
        .await?
        .ok_or(Error::ProductNotFound { id: product_id })?;

    Product::update_many()
        .col_expr(
            product::Column::Quantity,
            Expr::col(product::Column::Quantity).add(quantity_delta),
        )
        .filter(product::Column::Id.eq(product_id))
        .exec(db)
        .await?;

    Product::find_by_id(product_id)
        .one(db)
        .await?
        .ok_or(Error::ProductNotFound { id: product_id })
}
