//! Shopping-list item entity - A request to acquire stock for a department.
//!
//! Lifecycle: created `"pending"`, toggled to `"purchased"` once bought, and
//! deleted when the delivery is received into stock. An item never persists
//! in "purchased" state after stock has been added; deletion is the terminal
//! "consumed" state.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Status of an item still waiting to be bought.
pub const STATUS_PENDING: &str = "pending";
/// Status of an item that was bought and awaits receiving.
pub const STATUS_PURCHASED: &str = "purchased";

/// Shopping-list item database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "shopping_list_items")]
pub struct Model {
    /// Unique identifier for the item
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Product being requested
    pub product_id: i64,
    /// Department requesting the stock
    pub department_id: i64,
    /// Requested quantity (at least 1)
    pub quantity: i64,
    /// Lifecycle status: `"pending"` or `"purchased"`
    pub status: String,
    /// Employee who created the request, if known
    pub employee_id: Option<i64>,
    /// When the request was created
    pub created_at: DateTimeUtc,
}

/// Defines relationships between ShoppingListItem and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each item requests one product
    #[sea_orm(
        belongs_to = "super::product::Entity",
        from = "Column::ProductId",
        to = "super::product::Column::Id"
    )]
    Product,
    /// Each item requests stock for one department
    #[sea_orm(
        belongs_to = "super::department::Entity",
        from = "Column::DepartmentId",
        to = "super::department::Column::Id"
    )]
    Department,
}

impl Related<super::product::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Product.def()
    }
}

impl Related<super::department::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Department.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
