//! Product entity - Represents a catalog product and its global stock level.
//!
//! The `quantity` field is a single global counter; departments do not hold
//! per-department quantities. A product is associated with departments through
//! the `department_ids` JSON array, which acts as a set of tags.

use sea_orm::FromJsonQueryResult;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Set of department ids a product is assigned to, stored as a JSON column.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, FromJsonQueryResult)]
pub struct DepartmentIds(pub Vec<i64>);

impl DepartmentIds {
    /// Returns true if the product is assigned to the given department.
    #[must_use]
    pub fn contains(&self, department_id: i64) -> bool {
        self.0.contains(&department_id)
    }
}

/// Product database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "products")]
pub struct Model {
    /// Unique identifier for the product
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Human-readable name of the product
    pub name: String,
    /// Optional free-form description
    pub description: Option<String>,
    /// Global stock quantity (never negative)
    pub quantity: i64,
    /// Optional unit of measure (e.g. "kg", "un")
    pub unit_of_measure: Option<String>,
    /// Departments this product is assigned to
    #[sea_orm(column_type = "Json")]
    pub department_ids: DepartmentIds,
    /// Invoice number of the most recent purchase, if recorded
    pub invoice_number: Option<String>,
    /// Invoice series of the most recent purchase, if recorded
    pub invoice_series: Option<String>,
    /// Invoice issue date of the most recent purchase, if recorded
    pub issue_date: Option<String>,
}

/// Defines relationships between Product and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One product has many stock movements
    #[sea_orm(has_many = "super::stock_movement::Entity")]
    StockMovements,
    /// One product has many shopping-list items
    #[sea_orm(has_many = "super::shopping_list_item::Entity")]
    ShoppingListItems,
}

impl Related<super::stock_movement::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::StockMovements.def()
    }
}

impl Related<super::shopping_list_item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ShoppingListItems.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
