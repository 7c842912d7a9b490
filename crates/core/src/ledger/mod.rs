//! Ledger module - the append-only record of executed trades.

mod ledger_model;
mod ledger_service;
mod ledger_traits;

// Re-export the public interface
pub use ledger_model::{LedgerEntry, TradeAction, TRADE_ACTION_BUY, TRADE_ACTION_SELL};
pub use ledger_service::LedgerService;
pub use ledger_traits::{LedgerRepositoryTrait, LedgerServiceTrait};
