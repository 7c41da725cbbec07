//! `SQLite` connection and table creation using `SeaORM`.
//!
//! Tables are generated from the entity definitions with
//! `Schema::create_table_from_entity`, so the database schema always
//! matches the Rust struct definitions without manual SQL.

use crate::entities::{
    Department, Employee, Group, MissingItem, Product, ShoppingListItem, StockMovement,
};
use crate::errors::Result;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Schema};

const DEFAULT_DATABASE_URL: &str = "sqlite://data/pimenta_de_cheiro.sqlite";

/// Gets the database URL from the `DATABASE_URL` environment variable,
/// falling back to a local `SQLite` file.
#[must_use]
pub fn get_database_url() -> String {
    std::env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string())
}

/// Establishes a connection to the `SQLite` database at
/// [`get_database_url`].
///
/// # Errors
/// Returns an error if the connection cannot be established.
pub async fn create_connection() -> Result<DatabaseConnection> {
    Database::connect(get_database_url())
        .await
        .map_err(Into::into)
}

/// Creates every table from the entity definitions.
///
/// # Errors
/// Returns an error if any of the create-table statements fail.
pub async fn create_tables(db: &DatabaseConnection) -> Result<()> {
    let builder = db.get_database_backend();
    let schema = Schema::new(builder);

    db.execute(builder.build(&schema.create_table_from_entity(Product)))
        .await?;
    db.execute(builder.build(&schema.create_table_from_entity(Department)))
        .await?;
    db.execute(builder.build(&schema.create_table_from_entity(Employee)))
        .await?;
    db.execute(builder.build(&schema.create_table_from_entity(Group)))
        .await?;
    db.execute(builder.build(&schema.create_table_from_entity(ShoppingListItem)))
        .await?;
    db.execute(builder.build(&schema.create_table_from_entity(StockMovement)))
        .await?;
    db.execute(builder.build(&schema.create_table_from_entity(MissingItem)))
        .await?;

    Ok(())
}
