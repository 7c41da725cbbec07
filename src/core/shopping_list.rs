//! Shopping-list business logic - request CRUD, status toggling, and the
//! receiving flow that turns a purchased item into stock.
//!
//! Receiving is the one multi-write operation in the system: it increments
//! the product's global quantity, appends an `entry` movement, records a
//! shortfall when the delivery came up short, and deletes the originating
//! item - all inside a single database transaction. Either every effect is
//! applied or none is; there is no partial-application retry, the caller
//! resubmits.

use crate::{
    core::product::update_product_quantity_atomic,
    entities::{
        Product, ShoppingListItem, missing_item, shopping_list_item, stock_movement,
        stock_movement::TYPE_ENTRY,
    },
    errors::{Error, Result},
    validate::{self, ShoppingListItemInput},
};
use sea_orm::{QueryOrder, Set, TransactionTrait, prelude::*};
use tracing::info;

/// Outcome of a successful receiving flow. Exactly one of
/// `{entry movement, nothing}` was written for the stock side and exactly
/// one of `{missing item, nothing}` for the shortfall side, committed
/// together.
#[derive(Debug, Clone)]
pub struct ReceiptOutcome {
    /// The entry movement, present when `received_quantity > 0`
    pub entry_movement: Option<stock_movement::Model>,
    /// The shortfall record, present when received < requested
    pub missing_item: Option<missing_item::Model>,
}

/// Retrieves the whole shopping list, ordered by status so pending items
/// group together.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn get_shopping_list(
    db: &DatabaseConnection,
) -> Result<Vec<shopping_list_item::Model>> {
    ShoppingListItem::find()
        .order_by_asc(shopping_list_item::Column::Status)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Retrieves a specific shopping-list item by its unique ID.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn get_shopping_list_item_by_id(
    db: &DatabaseConnection,
    item_id: i64,
) -> Result<Option<shopping_list_item::Model>> {
    ShoppingListItem::find_by_id(item_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Creates a new shopping-list item in `"pending"` status (or whatever
/// valid status the caller supplied), dated now.
///
/// # Errors
/// Returns a validation error for a quantity below 1 or an unknown status,
/// or a database error if the insert fails.
pub async fn create_shopping_list_item(
    db: &DatabaseConnection,
    input: ShoppingListItemInput,
) -> Result<shopping_list_item::Model> {
    let input = validate::validate_shopping_list_item(input).map_err(Error::Validation)?;

    let model = shopping_list_item::ActiveModel {
        product_id: Set(input.product_id),
        department_id: Set(input.department_id),
        quantity: Set(input.quantity),
        status: Set(input.status),
        employee_id: Set(input.employee_id),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    };
    model.insert(db).await.map_err(Into::into)
}

/// Replaces an existing shopping-list item's fields.
///
/// # Errors
/// Returns a validation error for invalid fields, a not-found error if the
/// item does not exist, or a database error if the update fails.
pub async fn update_shopping_list_item(
    db: &DatabaseConnection,
    item_id: i64,
    input: ShoppingListItemInput,
) -> Result<shopping_list_item::Model> {
    let input = validate::validate_shopping_list_item(input).map_err(Error::Validation)?;

    let existing = ShoppingListItem::find_by_id(item_id)
        .one(db)
        .await?
        .ok_or(Error::ShoppingItemNotFound { id: item_id })?;

    let mut model: shopping_list_item::ActiveModel = existing.into();
    model.product_id = Set(input.product_id);
    model.department_id = Set(input.department_id);
    model.quantity = Set(input.quantity);
    model.status = Set(input.status);
    model.employee_id = Set(input.employee_id);
    model.update(db).await.map_err(Into::into)
}

/// Deletes a shopping-list item by id.
///
/// # Errors
/// Returns a not-found error if the item does not exist, or a database
/// error if the delete fails.
pub async fn delete_shopping_list_item(db: &DatabaseConnection, item_id: i64) -> Result<()> {
    let existing = ShoppingListItem::find_by_id(item_id)
        .one(db)
        .await?
        .ok_or(Error::ShoppingItemNotFound { id: item_id })?;
    existing.delete(db).await?;
    Ok(())
}

/// Toggles an item between `"pending"` and `"purchased"`.
///
/// # Errors
/// Returns a validation error for an unknown status, a not-found error if
/// the item does not exist, or a database error if the update fails.
pub async fn set_shopping_list_item_status(
    db: &DatabaseConnection,
    item_id: i64,
    status: &str,
) -> Result<shopping_list_item::Model> {
    if status != shopping_list_item::STATUS_PENDING
        && status != shopping_list_item::STATUS_PURCHASED
    {
        let mut errors = validate::FieldErrors::new();
        errors.add("status", format!("unknown status: {status}"));
        return Err(Error::Validation(errors));
    }

    let existing = ShoppingListItem::find_by_id(item_id)
        .one(db)
        .await?
        .ok_or(Error::ShoppingItemNotFound { id: item_id })?;

    let mut model: shopping_list_item::ActiveModel = existing.into();
    model.status = Set(status.to_string());
    model.update(db).await.map_err(Into::into)
}

/// Receives a purchased shopping-list item into stock.
///
/// Preconditions: the item exists, its status is `"purchased"`, and
/// `received_quantity >= 0`. Inside one transaction: if any units arrived,
/// the product quantity is incremented and an `entry` movement (attributed
/// to the requesting employee) is appended; if fewer units arrived than
/// requested, a missing-item record is appended; finally the item itself is
/// deleted. A failed commit applies none of the effects and reports a
/// single stock-update failure.
///
/// # Errors
/// Returns a not-found error for a missing item or product, a precondition
/// error for an item that is not purchased or a negative received quantity,
/// a stock-update error when the commit fails, or a database error for any
/// other store failure.
pub async fn receive_shopping_list_item(
    db: &DatabaseConnection,
    item_id: i64,
    received_quantity: i64,
) -> Result<ReceiptOutcome> {
    if received_quantity < 0 {
        return Err(Error::InvalidQuantity {
            quantity: received_quantity,
        });
    }

    let item = ShoppingListItem::find_by_id(item_id)
        .one(db)
        .await?
        .ok_or(Error::ShoppingItemNotFound { id: item_id })?;

    if item.status != shopping_list_item::STATUS_PURCHASED {
        return Err(Error::ItemNotPurchased { id: item_id });
    }

    let product = Product::find_by_id(item.product_id)
        .one(db)
        .await?
        .ok_or(Error::ProductNotFound {
            id: item.product_id,
        })?;

    let quantity_missing = item.quantity - received_quantity;
    let now = chrono::Utc::now();

    let txn = db.begin().await?;

    let entry_movement = if received_quantity > 0 {
        update_product_quantity_atomic(&txn, product.id, received_quantity).await?;

        let movement = stock_movement::ActiveModel {
            product_id: Set(item.product_id),
            quantity: Set(received_quantity),
            movement_type: Set(TYPE_ENTRY.to_string()),
            date: Set(now),
            employee_id: Set(item.employee_id),
            metadata: Set(None),
            ..Default::default()
        };
        Some(movement.insert(&txn).await?)
    } else {
        None
    };

    let missing = if quantity_missing > 0 {
        let record = missing_item::ActiveModel {
            shopping_list_item_id: Set(item.id),
            product_id: Set(item.product_id),
            quantity_missing: Set(quantity_missing),
            reported_at: Set(now),
            employee_id: Set(item.employee_id),
            ..Default::default()
        };
        Some(record.insert(&txn).await?)
    } else {
        None
    };

    ShoppingListItem::delete_by_id(item.id).exec(&txn).await?;

    txn.commit().await.map_err(|_| Error::StockUpdateFailed)?;

    info!(
        item_id,
        received_quantity, quantity_missing, "shopping-list item received into stock"
    );

    Ok(ReceiptOutcome {
        entry_movement,
        missing_item: missing,
    })
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::core::product::get_product_by_id;
    use crate::entities::MissingItem;
    use crate::test_utils::*;

    #[tokio::test]
    async fn test_receive_partial_delivery() -> Result<()> {
        let (db, product, item) = setup_with_purchased_item(10).await?;

        let outcome = receive_shopping_list_item(&db, item.id, 7).await?;

        // Stock went up by exactly the received amount
        let product = get_product_by_id(&db, product.id).await?.unwrap();
        assert_eq!(product.quantity, 7);

        // One entry movement for the received units
        let movement = outcome.entry_movement.unwrap();
        assert_eq!(movement.quantity, 7);
        assert_eq!(movement.movement_type, "entry");
        assert!(movement.metadata.is_none());

        // One shortfall record for the rest
        let missing = outcome.missing_item.unwrap();
        assert_eq!(missing.quantity_missing, 3);
        assert_eq!(missing.shopping_list_item_id, item.id);

        // The item no longer exists in any read
        assert!(get_shopping_list_item_by_id(&db, item.id).await?.is_none());

        Ok(())
    }

    #[tokio::test]
    async fn test_receive_full_delivery_creates_no_missing_item() -> Result<()> {
        let (db, product, item) = setup_with_purchased_item(10).await?;

        let outcome = receive_shopping_list_item(&db, item.id, 10).await?;
        assert!(outcome.missing_item.is_none());
        assert_eq!(outcome.entry_movement.unwrap().quantity, 10);

        let product = get_product_by_id(&db, product.id).await?.unwrap();
        assert_eq!(product.quantity, 10);

        let missing = MissingItem::find().all(&db).await?;
        assert!(missing.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn test_receive_over_delivery_creates_no_missing_item() -> Result<()> {
        let (db, _product, item) = setup_with_purchased_item(10).await?;

        let outcome = receive_shopping_list_item(&db, item.id, 12).await?;
        assert!(outcome.missing_item.is_none());
        assert_eq!(outcome.entry_movement.unwrap().quantity, 12);

        Ok(())
    }

    #[tokio::test]
    async fn test_receive_nothing_logs_full_shortfall() -> Result<()> {
        let (db, product, item) = setup_with_purchased_item(10).await?;

        let outcome = receive_shopping_list_item(&db, item.id, 0).await?;

        // No entry movement and no stock change
        assert!(outcome.entry_movement.is_none());
        let product = get_product_by_id(&db, product.id).await?.unwrap();
        assert_eq!(product.quantity, 0);

        // Shortfall covers the whole request, item gone
        assert_eq!(outcome.missing_item.unwrap().quantity_missing, 10);
        assert!(get_shopping_list_item_by_id(&db, item.id).await?.is_none());

        Ok(())
    }

    #[tokio::test]
    async fn test_receive_rejects_negative_quantity() -> Result<()> {
        let (db, _product, item) = setup_with_purchased_item(10).await?;

        let result = receive_shopping_list_item(&db, item.id, -1).await;
        assert!(matches!(
            result.unwrap_err(),
            Error::InvalidQuantity { quantity: -1 }
        ));

        Ok(())
    }

    #[tokio::test]
    async fn test_receive_rejects_pending_item() -> Result<()> {
        let db = setup_test_db().await?;
        let department = create_test_department(&db, "Kitchen").await?;
        let product = create_test_product(&db, "Pimenta", 0, vec![department.id]).await?;
        let item = create_test_item(&db, product.id, department.id, 5).await?;

        let result = receive_shopping_list_item(&db, item.id, 5).await;
        assert!(matches!(result.unwrap_err(), Error::ItemNotPurchased { .. }));

        // Nothing changed
        assert!(get_shopping_list_item_by_id(&db, item.id).await?.is_some());
        assert_eq!(get_product_by_id(&db, product.id).await?.unwrap().quantity, 0);

        Ok(())
    }

    #[tokio::test]
    async fn test_receive_item_not_found() -> Result<()> {
        let db = setup_test_db().await?;

        let result = receive_shopping_list_item(&db, 404, 1).await;
        assert!(matches!(
            result.unwrap_err(),
            Error::ShoppingItemNotFound { id: 404 }
        ));

        Ok(())
    }

    #[tokio::test]
    async fn test_entry_movement_attributed_to_requesting_employee() -> Result<()> {
        let db = setup_test_db().await?;
        let department = create_test_department(&db, "Kitchen").await?;
        let product = create_test_product(&db, "Pimenta", 0, vec![department.id]).await?;
        let employee = create_test_employee(&db, "Maria", "maria@example.com").await?;

        let item = create_shopping_list_item(
            &db,
            crate::validate::ShoppingListItemInput {
                product_id: product.id,
                department_id: department.id,
                quantity: 4,
                status: shopping_list_item::STATUS_PENDING.to_string(),
                employee_id: Some(employee.id),
            },
        )
        .await?;
        set_shopping_list_item_status(&db, item.id, shopping_list_item::STATUS_PURCHASED).await?;

        let outcome = receive_shopping_list_item(&db, item.id, 4).await?;
        assert_eq!(outcome.entry_movement.unwrap().employee_id, Some(employee.id));

        Ok(())
    }

    #[tokio::test]
    async fn test_status_toggle_round_trip() -> Result<()> {
        let db = setup_test_db().await?;
        let department = create_test_department(&db, "Kitchen").await?;
        let product = create_test_product(&db, "Pimenta", 0, vec![department.id]).await?;
        let item = create_test_item(&db, product.id, department.id, 2).await?;
        assert_eq!(item.status, shopping_list_item::STATUS_PENDING);

        let purchased =
            set_shopping_list_item_status(&db, item.id, shopping_list_item::STATUS_PURCHASED)
                .await?;
        assert_eq!(purchased.status, shopping_list_item::STATUS_PURCHASED);

        let reverted =
            set_shopping_list_item_status(&db, item.id, shopping_list_item::STATUS_PENDING)
                .await?;
        assert_eq!(reverted.status, shopping_list_item::STATUS_PENDING);

        // Unknown status is a validation error
        let result = set_shopping_list_item_status(&db, item.id, "consumed").await;
        assert!(matches!(result.unwrap_err(), Error::Validation(_)));

        Ok(())
    }

    #[tokio::test]
    async fn test_shopping_list_ordered_by_status() -> Result<()> {
        let db = setup_test_db().await?;
        let department = create_test_department(&db, "Kitchen").await?;
        let product = create_test_product(&db, "Pimenta", 0, vec![department.id]).await?;

        let first = create_test_item(&db, product.id, department.id, 1).await?;
        let second = create_test_item(&db, product.id, department.id, 2).await?;
        set_shopping_list_item_status(&db, first.id, shopping_list_item::STATUS_PURCHASED)
            .await?;

        let list = get_shopping_list(&db).await?;
        assert_eq!(list.len(), 2);
        // "pending" sorts before "purchased"
        assert_eq!(list[0].id, second.id);
        assert_eq!(list[1].id, first.id);

        Ok(())
    }

    #[tokio::test]
    async fn test_create_item_validation() -> Result<()> {
        let db = setup_test_db().await?;

        let result = create_shopping_list_item(
            &db,
            crate::validate::ShoppingListItemInput {
                product_id: 1,
                department_id: 1,
                quantity: 0,
                status: shopping_list_item::STATUS_PENDING.to_string(),
                employee_id: None,
            },
        )
        .await;
        assert!(matches!(result.unwrap_err(), Error::Validation(_)));

        Ok(())
    }
}
