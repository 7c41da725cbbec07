//! Employee entity - A user of the system.
//!
//! The email is the login identifier and must be unique. An employee with
//! role "Manager" implicitly holds every route permission; anyone else gets
//! the permissions of their group, or none without a group.
//!
//! The password is stored and compared as plaintext, carried over verbatim
//! from the system this replaces. This is a known security defect, not a
//! design feature.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Employee database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "employees")]
pub struct Model {
    /// Unique identifier for the employee
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Full name of the employee
    pub name: String,
    /// Job role; "Manager" grants the full permission set
    pub role: String,
    /// Login email, unique across employees
    #[sea_orm(unique)]
    pub email: String,
    /// Login password (plaintext - flagged defect)
    pub password: String,
    /// Permission group, None for ungrouped employees
    pub group_id: Option<i64>,
}

/// Defines relationships between Employee and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each employee may belong to one group
    #[sea_orm(
        belongs_to = "super::group::Entity",
        from = "Column::GroupId",
        to = "super::group::Column::Id"
    )]
    Group,
}

impl Related<super::group::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Group.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
