//! Missing item entity - A shortfall record.
//!
//! Created only when a shopping-list item is received with fewer units than
//! requested. References the (deleted) shopping-list item by id for audit.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Missing item database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "missing_items")]
pub struct Model {
    /// Unique identifier for the shortfall record
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Shopping-list item the shortfall was reported against
    pub shopping_list_item_id: i64,
    /// Product that was short-delivered
    pub product_id: i64,
    /// Units missing from the delivery (at least 1)
    pub quantity_missing: i64,
    /// When the shortfall was reported
    pub reported_at: DateTimeUtc,
    /// Employee the report is attributed to, if known
    pub employee_id: Option<i64>,
}

/// Defines relationships between MissingItem and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each shortfall references one product
    #[sea_orm(
        belongs_to = "super::product::Entity",
        from = "Column::ProductId",
        to = "super::product::Column::Id"
    )]
    Product,
}

impl Related<super::product::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Product.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
