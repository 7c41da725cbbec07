//! Department entity - A named sector of the business.
//!
//! Departments partition the catalog logically: products reference them
//! through their `department_ids` set and shopping-list items request stock
//! on their behalf. They carry no stock quantities of their own.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Department database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "departments")]
pub struct Model {
    /// Unique identifier for the department
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Human-readable name of the department
    pub name: String,
}

/// Defines relationships between Department and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One department has many shopping-list items requesting stock for it
    #[sea_orm(has_many = "super::shopping_list_item::Entity")]
    ShoppingListItems,
}

impl Related<super::shopping_list_item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ShoppingListItems.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
