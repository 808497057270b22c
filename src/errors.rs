//! Unified error types and result handling for `BookFlow`.

use thiserror::Error;

/// All errors the crate can produce.
///
/// Storage and serialization failures convert via `#[from]`; domain
/// failures carry enough context for the caller to decide whether to
/// retry or surface a message.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration or input validation error
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// The target request does not exist in the store
    #[error("Request not found: {id}")]
    RequestNotFound { id: String },

    /// The target library book does not exist in the store
    #[error("Library book not found: {id}")]
    BookNotFound { id: String },

    /// A quantity that must be positive was zero or negative
    #[error("Invalid quantity: {quantity}")]
    InvalidQuantity { quantity: i32 },

    /// A stored category string is not a known `BookCategory`
    #[error("Unknown item category: {value}")]
    UnknownCategory { value: String },

    /// The version-guarded reconciliation write kept losing to
    /// concurrent donations
    #[error("Concurrent update on request {id} after {attempts} attempts")]
    ConcurrentUpdate { id: String, attempts: u32 },

    /// Database error from `SeaORM`
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// I/O error (donation ledger, settings file)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error (JSON columns, donation ledger)
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
