//! SQLite storage implementation for the trade ledger.

mod model;
mod repository;

pub use model::{NewTransactionDB, TransactionDB};
pub use repository::LedgerRepository;
