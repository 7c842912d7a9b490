//! Quote provider implementations.

mod traits;
pub mod yahoo_chart;

pub use traits::QuoteProvider;
