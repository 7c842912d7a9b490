//! SQLite storage implementation for trade settlement.

mod repository;

pub use repository::TradingRepository;
