//! Stock ledger business logic - movement queries, manual ledger entries,
//! and the inter-department transfer workflow.
//!
//! Movements are append-only; a wrong movement is corrected by appending an
//! offsetting one. Transfers are logged-only: the product's quantity is a
//! single global pool and departments are tags on the product, so moving
//! stock between departments changes no counter. Two concurrent transfers
//! can both pass the quantity check; the store serializes nothing across
//! calls.

use crate::{
    core::product::update_product_quantity_atomic,
    entities::{
        Product, StockMovement, stock_movement,
        stock_movement::{TYPE_ENTRY, TYPE_EXIT, TYPE_TRANSFER, TransferMetadata},
    },
    errors::{Error, Result},
    validate::{self, MovementInput, TransferInput},
};
use sea_orm::{QueryOrder, Set, TransactionTrait, prelude::*};
use tracing::info;

/// Retrieves the whole movements ledger, newest first.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn get_all_movements(db: &DatabaseConnection) -> Result<Vec<stock_movement::Model>> {
    StockMovement::find()
        .order_by_desc(stock_movement::Column::Date)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Retrieves all movements for one product, newest first.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn get_movements_for_product(
    db: &DatabaseConnection,
    product_id: i64,
) -> Result<Vec<stock_movement::Model>> {
    StockMovement::find()
        .filter(stock_movement::Column::ProductId.eq(product_id))
        .order_by_desc(stock_movement::Column::Date)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Appends a manual `entry` or `exit` movement and applies the matching
/// quantity delta to the product, in one transaction. Offsetting a wrong
/// movement goes through here too. Transfers must use [`transfer_stock`]
/// so they carry their department metadata.
///
/// # Errors
/// Returns a validation error for an unknown or `transfer` movement type
/// or a quantity below 1, a not-found error for a missing product, an
/// insufficient-quantity error for an exit larger than the stock on hand,
/// or a database error if the writes fail.
pub async fn record_movement(
    db: &DatabaseConnection,
    input: MovementInput,
) -> Result<stock_movement::Model> {
    let input = validate::validate_movement(input).map_err(Error::Validation)?;

    if input.movement_type == TYPE_TRANSFER {
        let mut errors = validate::FieldErrors::new();
        errors.add("movement_type", "transfers must go through the transfer workflow");
        return Err(Error::Validation(errors));
    }
    if input.quantity < 1 {
        return Err(Error::InvalidQuantity {
            quantity: input.quantity,
        });
    }

    let txn = db.begin().await?;

    let product = Product::find_by_id(input.product_id)
        .one(&txn)
        .await?
        .ok_or(Error::ProductNotFound {
            id: input.product_id,
        })?;

    let delta = if input.movement_type == TYPE_EXIT {
        if product.quantity < input.quantity {
            return Err(Error::InsufficientQuantity {
                available: product.quantity,
                requested: input.quantity,
            });
        }
        -input.quantity
    } else {
        debug_assert_eq!(input.movement_type, TYPE_ENTRY);
        input.quantity
    };

    update_product_quantity_atomic(&txn, product.id, delta).await?;

    let movement = stock_movement::ActiveModel {
        product_id: Set(input.product_id),
        quantity: Set(input.quantity),
        movement_type: Set(input.movement_type),
        date: Set(chrono::Utc::now()),
        employee_id: Set(input.employee_id),
        metadata: Set(None),
        ..Default::default()
    };
    let movement = movement.insert(&txn).await?;

    txn.commit().await.map_err(|_| Error::StockUpdateFailed)?;
    Ok(movement)
}

/// Records a logical transfer of stock between two departments.
///
/// Pre-validates the request (quantity >= 1, distinct departments), then
/// transactionally reads the product and checks that the source department
/// holds it and that the global quantity covers the transfer. On success
/// one `transfer` movement carrying the source and destination departments
/// is appended. The global quantity is deliberately not changed: quantities
/// are a single global pool logically partitioned by department membership.
///
/// # Errors
/// Returns a validation error for a bad request, a not-found error for a
/// missing product, a source-department error when the department does not
/// hold the product, an insufficient-quantity error when stock cannot cover
/// the transfer, or a database error if the write fails.
pub async fn transfer_stock(
    db: &DatabaseConnection,
    input: TransferInput,
) -> Result<stock_movement::Model> {
    let input = validate::validate_transfer(input).map_err(Error::Validation)?;

    let txn = db.begin().await?;

    let product = Product::find_by_id(input.product_id)
        .one(&txn)
        .await?
        .ok_or(Error::ProductNotFound {
            id: input.product_id,
        })?;

    if !product.department_ids.contains(input.from_department_id) {
        return Err(Error::SourceDepartmentWithoutProduct {
            department_id: input.from_department_id,
        });
    }

    if product.quantity < input.quantity {
        return Err(Error::InsufficientQuantity {
            available: product.quantity,
            requested: input.quantity,
        });
    }

    let movement = stock_movement::ActiveModel {
        product_id: Set(input.product_id),
        quantity: Set(input.quantity),
        movement_type: Set(TYPE_TRANSFER.to_string()),
        date: Set(chrono::Utc::now()),
        employee_id: Set(None),
        metadata: Set(Some(TransferMetadata {
            from_department_id: input.from_department_id,
            to_department_id: input.to_department_id,
        })),
        ..Default::default()
    };
    let movement = movement.insert(&txn).await?;

    txn.commit().await?;

    info!(
        product_id = input.product_id,
        quantity = input.quantity,
        from = input.from_department_id,
        to = input.to_department_id,
        "stock transfer recorded"
    );

    Ok(movement)
}
