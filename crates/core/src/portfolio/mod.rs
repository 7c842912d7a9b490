//! Portfolio module - the priced view over cash and holdings.

mod portfolio_model;
mod portfolio_service;
mod portfolio_traits;

// Re-export the public interface
pub use portfolio_model::{PortfolioSummary, Position, PositionQuote};
pub use portfolio_service::PortfolioService;
pub use portfolio_traits::PortfolioServiceTrait;
