//! Multi-symbol market snapshot.
//!
//! One line per symbol: latest close plus change against the previous
//! close. Symbols whose quotes cannot be fetched are skipped.

use crate::config::POPULAR_STOCKS;
use crate::services::predictor::round2;
use crate::sources::YahooFinanceClient;
use serde::Serialize;
use tracing::warn;

/// Symbols summarized when the request names none.
pub const DEFAULT_SUMMARY_SYMBOLS: &[&str] = &["^GSPC", "AAPL", "MSFT", "GOOGL", "AMZN"];

/// One row of the market summary.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SymbolSummary {
    pub symbol: String,
    pub name: String,
    pub price: f64,
    pub change: f64,
    pub change_pct: f64,
}

/// Build one summary row from the last two closes.
///
/// Without a previous close the change columns are zero, matching a
/// symbol with a single day of history.
pub fn summary_entry(symbol: &str, current: f64, previous: Option<f64>) -> SymbolSummary {
    let symbol = symbol.to_uppercase();
    let prev = previous.unwrap_or(current);
    let change = current - prev;
    let change_pct = if prev != 0.0 {
        change / prev * 100.0
    } else {
        0.0
    };

    let name = POPULAR_STOCKS
        .iter()
        .find(|s| s.symbol == symbol)
        .map(|s| s.name.to_string())
        .unwrap_or_else(|| symbol.clone());

    SymbolSummary {
        symbol,
        name,
        price: round2(current),
        change: round2(change),
        change_pct: round2(change_pct),
    }
}

/// Fetch a summary row for each symbol, skipping fetch failures.
pub async fn market_summary(source: &YahooFinanceClient, symbols: &[String]) -> Vec<SymbolSummary> {
    let mut summary = Vec::with_capacity(symbols.len());
    for symbol in symbols {
        match source.recent_closes(symbol).await {
            Ok((current, previous)) => summary.push(summary_entry(symbol, current, previous)),
            Err(e) => {
                warn!("Summary fetch failed for {}: {}, skipping", symbol, e);
            }
        }
    }
    summary
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_change_against_previous_close() {
        let entry = summary_entry("aapl", 153.456, Some(150.0));
        assert_eq!(entry.symbol, "AAPL");
        assert_eq!(entry.name, "Apple");
        assert_eq!(entry.price, 153.46);
        assert_eq!(entry.change, 3.46);
        assert_eq!(entry.change_pct, 2.3);
    }

    #[test]
    fn test_entry_without_previous_close_is_flat() {
        let entry = summary_entry("MSFT", 300.0, None);
        assert_eq!(entry.change, 0.0);
        assert_eq!(entry.change_pct, 0.0);
        assert_eq!(entry.price, 300.0);
    }

    #[test]
    fn test_entry_unknown_symbol_uses_symbol_as_name() {
        let entry = summary_entry("ZZZZ", 10.0, Some(8.0));
        assert_eq!(entry.name, "ZZZZ");
        assert_eq!(entry.change_pct, 25.0);
    }

    #[test]
    fn test_entry_negative_change() {
        let entry = summary_entry("TSLA", 95.0, Some(100.0));
        assert_eq!(entry.change, -5.0);
        assert_eq!(entry.change_pct, -5.0);
    }

    #[test]
    fn test_entry_serialization_fields() {
        let json = serde_json::to_value(summary_entry("^GSPC", 5000.0, Some(4950.0))).unwrap();
        assert_eq!(json["symbol"], "^GSPC");
        assert_eq!(json["name"], "S&P 500");
        assert_eq!(json["price"], 5000.0);
        assert_eq!(json["change"], 50.0);
        assert_eq!(json["change_pct"], 1.01);
    }

    #[test]
    fn test_default_symbols_include_index() {
        assert!(DEFAULT_SUMMARY_SYMBOLS.contains(&"^GSPC"));
        assert_eq!(DEFAULT_SUMMARY_SYMBOLS.len(), 5);
    }
}
