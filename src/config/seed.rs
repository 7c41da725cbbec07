//! Seed data loading from config.toml and initial provisioning.
//!
//! The TOML file declares the departments, permission groups, and the
//! administrator account a fresh installation starts with. Seeding is
//! idempotent: rows are matched by name (or email, for the admin) and
//! never duplicated or overwritten, so re-running the binary against an
//! existing database is safe.

use crate::{
    core::{group::MANAGEMENT_GROUP_NAME, permissions::AVAILABLE_PERMISSIONS},
    entities::{
        Department, DepartmentColumn, Employee, EmployeeColumn, department, employee,
        group::{self, Permissions},
    },
    errors::{Error, Result},
};
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};
use serde::Deserialize;
use std::path::Path;
use tracing::{debug, info};

/// Configuration structure representing the entire config.toml file
#[derive(Debug, Deserialize)]
pub struct SeedConfig {
    /// Department names to create on first run
    #[serde(default)]
    pub departments: Vec<String>,
    /// Permission groups to create on first run
    #[serde(default)]
    pub groups: Vec<GroupConfig>,
    /// The administrator account
    pub admin: AdminConfig,
}

/// Seed data for a single permission group
#[derive(Debug, Deserialize, Clone)]
pub struct GroupConfig {
    /// Group name
    pub name: String,
    /// Route prefixes the group may reach
    pub permissions: Vec<String>,
}

/// Seed data for the administrator account
#[derive(Debug, Deserialize, Clone)]
pub struct AdminConfig {
    /// Display name
    pub name: String,
    /// Login email
    pub email: String,
    /// Initial password
    pub password: String,
}

/// Loads seed configuration from a TOML file.
///
/// # Errors
/// Returns an error if the file cannot be read, the TOML syntax is
/// invalid, or required fields are missing.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<SeedConfig> {
    let contents = std::fs::read_to_string(path.as_ref()).map_err(|e| Error::Config {
        message: format!("Failed to read config file: {e}"),
    })?;

    toml::from_str(&contents).map_err(|e| Error::Config {
        message: format!("Failed to parse config.toml: {e}"),
    })
}

/// Loads seed configuration from the default location (./config.toml).
///
/// # Errors
/// Returns an error if the file cannot be read or parsed.
pub fn load_default_config() -> Result<SeedConfig> {
    load_config("config.toml")
}

/// Seeds the database from the given configuration.
///
/// Creates the configured departments and groups, the undeletable
/// Management group with the full permission set, and the administrator
/// account (role Manager, attached to Management). Existing rows are left
/// untouched.
///
/// # Errors
/// Returns an error if any insert or lookup fails.
pub async fn seed_defaults(db: &DatabaseConnection, config: &SeedConfig) -> Result<()> {
    info!(
        departments = config.departments.len(),
        groups = config.groups.len(),
        "seeding initial data"
    );

    for name in &config.departments {
        if find_department(db, name).await?.is_some() {
            debug!(department = name.as_str(), "department already present");
            continue;
        }
        department::ActiveModel {
            name: Set(name.clone()),
            ..Default::default()
        }
        .insert(db)
        .await?;
        info!(department = name.as_str(), "seeded department");
    }

    // The Management group always exists and always carries every
    // permission, regardless of what the file declares.
    let management = match crate::core::group::get_group_by_name(db, MANAGEMENT_GROUP_NAME).await? {
        Some(existing) => existing,
        None => {
            let created = group::ActiveModel {
                name: Set(MANAGEMENT_GROUP_NAME.to_string()),
                permissions: Set(Permissions(
                    AVAILABLE_PERMISSIONS
                        .iter()
                        .map(ToString::to_string)
                        .collect(),
                )),
                ..Default::default()
            }
            .insert(db)
            .await?;
            info!("seeded Management group");
            created
        }
    };

    for group_config in &config.groups {
        if group_config.name == MANAGEMENT_GROUP_NAME {
            continue;
        }
        if crate::core::group::get_group_by_name(db, &group_config.name)
            .await?
            .is_some()
        {
            debug!(group = group_config.name.as_str(), "group already present");
            continue;
        }
        group::ActiveModel {
            name: Set(group_config.name.clone()),
            permissions: Set(Permissions(group_config.permissions.clone())),
            ..Default::default()
        }
        .insert(db)
        .await?;
        info!(group = group_config.name.as_str(), "seeded group");
    }

    let admin_exists = Employee::find()
        .filter(EmployeeColumn::Email.eq(config.admin.email.as_str()))
        .one(db)
        .await?
        .is_some();
    if admin_exists {
        debug!("administrator account already present");
        return Ok(());
    }
    employee::ActiveModel {
        name: Set(config.admin.name.clone()),
        role: Set(crate::core::permissions::MANAGER_ROLE.to_string()),
        email: Set(config.admin.email.clone()),
        password: Set(config.admin.password.clone()),
        group_id: Set(Some(management.id)),
        ..Default::default()
    }
    .insert(db)
    .await?;
    info!(email = config.admin.email.as_str(), "seeded administrator");

    Ok(())
}

async fn find_department(
    db: &DatabaseConnection,
    name: &str,
) -> Result<Option<department::Model>> {
    Department::find()
        .filter(DepartmentColumn::Name.eq(name))
        .one(db)
        .await
        .map_err(Into::into)
}
