//! Group business logic - permission-group CRUD.
//!
//! Groups carry the route-prefix permission lists that non-manager
//! employees navigate with. The main management group is protected from
//! deletion so the system cannot lock out its own administrators.

use crate::{
    entities::{Group, group, group::Permissions},
    errors::{Error, Result},
    validate::{self, GroupInput},
};
use sea_orm::{QueryOrder, Set, prelude::*};

/// Name of the protected main management group.
pub const MANAGEMENT_GROUP_NAME: &str = "Management";

/// Retrieves all groups, ordered alphabetically by name.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn get_all_groups(db: &DatabaseConnection) -> Result<Vec<group::Model>> {
    Group::find()
        .order_by_asc(group::Column::Name)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Retrieves a specific group by its unique ID.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn get_group_by_id(
    db: &DatabaseConnection,
    group_id: i64,
) -> Result<Option<group::Model>> {
    Group::find_by_id(group_id).one(db).await.map_err(Into::into)
}

/// Finds a group by name.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn get_group_by_name(
    db: &DatabaseConnection,
    name: &str,
) -> Result<Option<group::Model>> {
    Group::find()
        .filter(group::Column::Name.eq(name))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Creates a new group after validating the candidate record.
///
/// # Errors
/// Returns a validation error for a short name, or a database error if the
/// insert fails.
pub async fn create_group(db: &DatabaseConnection, input: GroupInput) -> Result<group::Model> {
    let input = validate::validate_group(input).map_err(Error::Validation)?;

    let model = group::ActiveModel {
        name: Set(input.name),
        permissions: Set(Permissions(input.permissions)),
        ..Default::default()
    };
    model.insert(db).await.map_err(Into::into)
}

/// Replaces an existing group's name and permission list.
///
/// # Errors
/// Returns a validation error for a short name, a not-found error if the
/// group does not exist, or a database error if the update fails.
pub async fn update_group(
    db: &DatabaseConnection,
    group_id: i64,
    input: GroupInput,
) -> Result<group::Model> {
    let input = validate::validate_group(input).map_err(Error::Validation)?;

    let existing = Group::find_by_id(group_id)
        .one(db)
        .await?
        .ok_or(Error::GroupNotFound { id: group_id })?;

    let mut model: group::ActiveModel = existing.into();
    model.name = Set(input.name);
    model.permissions = Set(Permissions(input.permissions));
    model.update(db).await.map_err(Into::into)
}

/// Deletes a group by id. The main management group is refused.
///
/// # Errors
/// Returns a not-found error if the group does not exist, a protected-group
/// error for the management group, or a database error if the delete fails.
pub async fn delete_group(db: &DatabaseConnection, group_id: i64) -> Result<()> {
    let existing = Group::find_by_id(group_id)
        .one(db)
        .await?
        .ok_or(Error::GroupNotFound { id: group_id })?;

    if existing.name == MANAGEMENT_GROUP_NAME {
        return Err(Error::ManagementGroupProtected);
    }

    existing.delete(db).await?;
    Ok(())
}
