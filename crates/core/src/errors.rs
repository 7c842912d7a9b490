//! Core error types for the Paperfolio application.
//!
//! This module defines database-agnostic error types. Storage-specific errors
//! (from Diesel, SQLite, etc.) are converted to these types by the storage layer.

use rust_decimal::Decimal;
use thiserror::Error;

use paperfolio_market_data::MarketDataError;

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for the trading application.
///
/// This enum represents all possible errors that can occur in the application.
/// Database-specific errors are wrapped in string form to keep this type
/// database-agnostic.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Database operation failed: {0}")]
    Database(#[from] DatabaseError),

    #[error("Input validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("Trade rejected: {0}")]
    Trade(#[from] TradeError),

    #[error("Credential operation failed: {0}")]
    Credential(#[from] CredentialError),

    #[error("Quote lookup failed: {0}")]
    Quote(#[from] QuoteError),

    #[error("Ledger drift detected: {0}")]
    LedgerDrift(String),

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

/// Database-agnostic error type for storage operations.
///
/// This enum uses `String` for all error details, allowing the storage layer
/// to convert storage-specific errors (Diesel, SQLite, etc.) into this format.
#[derive(Error, Debug)]
pub enum DatabaseError {
    /// Failed to establish a database connection.
    #[error("Failed to connect to database: {0}")]
    ConnectionFailed(String),

    /// Failed to create or configure the connection pool.
    #[error("Failed to create database pool: {0}")]
    PoolCreationFailed(String),

    /// A database query failed to execute.
    #[error("Database query failed: {0}")]
    QueryFailed(String),

    /// The requested record was not found.
    #[error("Record not found: {0}")]
    NotFound(String),

    /// A unique constraint was violated (e.g., duplicate key).
    #[error("Unique constraint violation: {0}")]
    UniqueViolation(String),

    /// A foreign key constraint was violated.
    #[error("Foreign key violation: {0}")]
    ForeignKeyViolation(String),

    /// A database transaction failed.
    #[error("Transaction failed: {0}")]
    TransactionFailed(String),

    /// Database migration failed.
    #[error("Database migration failed: {0}")]
    MigrationFailed(String),

    /// Internal/unexpected database error.
    #[error("Internal database error: {0}")]
    Internal(String),
}

/// Errors raised by the trading engine when an order cannot settle.
#[derive(Error, Debug)]
pub enum TradeError {
    /// The requested share count is not a positive whole number.
    #[error("Invalid share count: {0}")]
    InvalidShareCount(String),

    /// The order costs more than the user's cash balance.
    #[error("Insufficient funds: required {required}, available {available}")]
    InsufficientFunds {
        required: Decimal,
        available: Decimal,
    },

    /// The user holds fewer shares of the symbol than the order sells.
    #[error("Insufficient shares of {symbol}: requested {requested}, held {held}")]
    InsufficientShares {
        symbol: String,
        requested: i64,
        held: i64,
    },
}

/// Errors raised by the credential store.
#[derive(Error, Debug)]
pub enum CredentialError {
    /// The username is already registered.
    #[error("Username '{0}' is already taken")]
    DuplicateUsername(String),

    /// Unknown username or wrong password. Deliberately does not say which.
    #[error("Invalid username or password")]
    InvalidCredentials,

    /// Password and confirmation do not match.
    #[error("Passwords do not match")]
    PasswordMismatch,

    /// The new password equals the current one.
    #[error("New password must differ from the current password")]
    NoOpChange,

    /// A required credential field is missing or empty.
    #[error("{0}")]
    WeakInput(String),
}

/// Errors raised while resolving a symbol through the quote client.
#[derive(Error, Debug)]
pub enum QuoteError {
    /// The symbol does not resolve to a quoted instrument.
    #[error("Symbol not found: {0}")]
    SymbolNotFound(String),

    /// The quote provider failed; the symbol may or may not exist.
    #[error("Quote unavailable: {0}")]
    Unavailable(String),
}

/// Validation errors for user input and data parsing.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Required field '{0}' is missing")]
    MissingField(String),

    #[error("Failed to parse decimal number: {0}")]
    DecimalParse(#[from] rust_decimal::Error),
}

// === From implementations for common error types ===

impl From<rust_decimal::Error> for Error {
    fn from(err: rust_decimal::Error) -> Self {
        Error::Validation(ValidationError::DecimalParse(err))
    }
}

impl From<MarketDataError> for Error {
    fn from(err: MarketDataError) -> Self {
        match err {
            MarketDataError::SymbolNotFound(symbol) => {
                Error::Quote(QuoteError::SymbolNotFound(symbol))
            }
            other => Error::Quote(QuoteError::Unavailable(other.to_string())),
        }
    }
}
