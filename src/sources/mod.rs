//! External market data providers.

pub mod yahoo;

pub use yahoo::YahooFinanceClient;
