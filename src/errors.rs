//! Unified error types and result handling.
//!
//! Every fallible operation in the crate returns [`Result`]. Validation
//! failures carry the structured per-field errors produced by the schema
//! validators; everything else is a flat, caller-displayable condition.

use crate::validate::FieldErrors;
use thiserror::Error;

/// Crate-wide error type.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration problem (missing file, bad TOML, missing env var).
    #[error("configuration error: {message}")]
    Config {
        /// Description of the configuration problem
        message: String,
    },

    /// One or more fields of a candidate record failed validation.
    #[error("validation failed: {0}")]
    Validation(FieldErrors),

    /// No product exists with the given id.
    #[error("product not found")]
    ProductNotFound {
        /// The id that was looked up
        id: i64,
    },

    /// No department exists with the given id.
    #[error("department not found")]
    DepartmentNotFound {
        /// The id that was looked up
        id: i64,
    },

    /// No employee exists with the given id.
    #[error("employee not found")]
    EmployeeNotFound {
        /// The id that was looked up
        id: i64,
    },

    /// No group exists with the given id.
    #[error("group not found")]
    GroupNotFound {
        /// The id that was looked up
        id: i64,
    },

    /// No shopping-list item exists with the given id.
    #[error("shopping-list item not found")]
    ShoppingItemNotFound {
        /// The id that was looked up
        id: i64,
    },

    /// The item must be marked as purchased before it can be received
    /// into stock.
    #[error("item must be marked as purchased before adding to stock")]
    ItemNotPurchased {
        /// Id of the offending shopping-list item
        id: i64,
    },

    /// A quantity argument was outside its allowed range.
    #[error("invalid quantity: {quantity}")]
    InvalidQuantity {
        /// The rejected quantity
        quantity: i64,
    },

    /// The product's global stock cannot cover the requested quantity.
    #[error("insufficient quantity in stock: {available} available, {requested} requested")]
    InsufficientQuantity {
        /// Stock currently on hand
        available: i64,
        /// Quantity the caller asked for
        requested: i64,
    },

    /// The source department of a transfer does not hold the product.
    #[error("source department does not hold this product")]
    SourceDepartmentWithoutProduct {
        /// The department that was named as the source
        department_id: i64,
    },

    /// An employee with this email already exists.
    #[error("email is already in use: {email}")]
    EmailTaken {
        /// The conflicting email address
        email: String,
    },

    /// The main management group cannot be deleted.
    #[error("cannot delete the main management group")]
    ManagementGroupProtected,

    /// Login failed. Deliberately generic: bad email and bad password are
    /// indistinguishable to the caller.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// The grouped writes of a receiving flow could not be committed.
    /// None of the effects were applied; the caller must resubmit.
    #[error("stock update failed")]
    StockUpdateFailed,

    /// Database error from the underlying store.
    #[error("database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// Session token error (encoding side only; decode failures are
    /// treated as "no session", not as errors).
    #[error("session token error: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Environment variable error.
    #[error("environment variable error: {0}")]
    EnvVar(#[from] std::env::VarError),
}

/// Convenience `Result` type.
pub type Result<T> = std::result::Result<T, Error>;
