//! Core business logic - framework-agnostic operations over the inventory.
//!
//! Every module validates its inputs through [`crate::validate`] before
//! writing, and returns the crate-wide [`crate::errors::Result`]. Nothing in
//! here holds entity state across calls; each operation re-fetches current
//! state and relies on the store's transaction primitive for atomicity.

/// Login and session token handling
pub mod auth;
/// Department CRUD
pub mod department;
/// Employee CRUD
pub mod employee;
/// Group CRUD with the protected management group
pub mod group;
/// Route-permission resolution and the navigation gate
pub mod permissions;
/// Product CRUD and the atomic stock mutator
pub mod product;
/// Dashboard summary, CSV reports, and the printable shopping list
pub mod report;
/// Shopping-list CRUD and the receiving (ledger-writing) flow
pub mod shopping_list;
/// Movements ledger queries and the transfer workflow
pub mod stock;
