//! Stock movement entity - An immutable ledger row.
//!
//! Movements are append-only: corrections are made by appending an
//! offsetting movement, never by editing or deleting a row. Transfer
//! movements carry their source and destination departments in `metadata`;
//! entries and exits leave it empty.

use sea_orm::FromJsonQueryResult;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Movement type for stock received into the global pool.
pub const TYPE_ENTRY: &str = "entry";
/// Movement type for stock leaving the global pool.
pub const TYPE_EXIT: &str = "exit";
/// Movement type for a logical move between departments.
pub const TYPE_TRANSFER: &str = "transfer";

/// Source and destination of a transfer movement, stored as a JSON column.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, FromJsonQueryResult)]
pub struct TransferMetadata {
    /// Department the stock is logically moving out of
    pub from_department_id: i64,
    /// Department the stock is logically moving into
    pub to_department_id: i64,
}

/// Stock movement database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "stock_movements")]
pub struct Model {
    /// Unique identifier for the movement
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Product the movement applies to
    pub product_id: i64,
    /// Moved quantity
    pub quantity: i64,
    /// Movement type: `"entry"`, `"exit"`, or `"transfer"`
    pub movement_type: String,
    /// When the movement happened
    pub date: DateTimeUtc,
    /// Employee the movement is attributed to, if known
    pub employee_id: Option<i64>,
    /// Transfer source/destination; None for entries and exits
    #[sea_orm(column_type = "Json", nullable)]
    pub metadata: Option<TransferMetadata>,
}

/// Defines relationships between StockMovement and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each movement applies to one product
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
