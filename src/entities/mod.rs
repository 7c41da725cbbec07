//! Entity module - Contains all SeaORM entity definitions for the database.
//! These entities represent the database tables and their relationships.
//! Each entity has a Model struct for data and an Entity struct for operations.

pub mod department;
pub mod employee;
pub mod group;
pub mod missing_item;
pub mod product;
pub mod shopping_list_item;
pub mod stock_movement;

// Re-export specific types to avoid conflicts
pub use department::{Column as DepartmentColumn, Entity as Department, Model as DepartmentModel};
pub use employee::{Column as EmployeeColumn, Entity as Employee, Model as EmployeeModel};
pub use group::{Column as GroupColumn, Entity as Group, Model as GroupModel};
pub use missing_item::{
    Column as MissingItemColumn, Entity as MissingItem, Model as MissingItemModel,
};
pub use product::{Column as ProductColumn, Entity as Product, Model as ProductModel};
pub use shopping_list_item::{
    Column as ShoppingListItemColumn, Entity as ShoppingListItem, Model as ShoppingListItemModel,
};
pub use stock_movement::{
    Column as StockMovementColumn, Entity as StockMovement, Model as StockMovementModel,
};
