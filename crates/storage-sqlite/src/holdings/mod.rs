//! SQLite storage implementation for holdings.

mod model;
mod repository;

pub use model::HoldingDB;
pub use repository::HoldingsRepository;
