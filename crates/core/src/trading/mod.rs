//! Trading module - order validation, pricing, and settlement.

mod trading_model;
mod trading_service;
mod trading_traits;

// Re-export the public interface
pub use trading_model::{
    parse_share_count, ShareCountInput, TradeExecution, TradePlan, TradeSettlement,
};
pub use trading_service::TradingService;
pub use trading_traits::{TradingRepositoryTrait, TradingServiceTrait};
