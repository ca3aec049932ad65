//! Yahoo Finance API client for historical stock data.
//!
//! Provides historical OHLCV data for stocks, ETFs and indices.
//! Uses the unofficial Yahoo Finance chart API.

use crate::types::Candle;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn};

/// Yahoo Finance chart response.
#[derive(Debug, Deserialize)]
struct YahooChartResponse {
    chart: YahooChart,
}

#[derive(Debug, Deserialize)]
struct YahooChart {
    result: Option<Vec<YahooResult>>,
    error: Option<YahooApiError>,
}

#[derive(Debug, Deserialize)]
struct YahooApiError {
    code: String,
    description: String,
}

#[derive(Debug, Deserialize)]
struct YahooResult {
    timestamp: Option<Vec<i64>>,
    indicators: YahooIndicators,
}

#[derive(Debug, Deserialize)]
struct YahooIndicators {
    quote: Vec<YahooQuote>,
}

#[derive(Debug, Deserialize)]
struct YahooQuote {
    open: Option<Vec<Option<f64>>>,
    high: Option<Vec<Option<f64>>>,
    low: Option<Vec<Option<f64>>>,
    close: Option<Vec<Option<f64>>>,
    volume: Option<Vec<Option<u64>>>,
}

/// Normalize symbol for Yahoo Finance API.
/// Yahoo uses hyphens instead of dots for share classes (e.g., BRK-B not BRK.B).
/// Index symbols starting with ^ pass through unchanged.
fn normalize_yahoo_symbol(symbol: &str) -> String {
    symbol.to_uppercase().replace('.', "-")
}

/// Yahoo Finance API client.
pub struct YahooFinanceClient {
    client: Client,
}

impl YahooFinanceClient {
    /// Create a new Yahoo Finance client with the given request timeout.
    pub fn new(timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent("Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36")
            .build()
            .unwrap_or_default();

        Self { client }
    }

    /// Fetch historical data for a symbol.
    ///
    /// Arguments:
    /// - symbol: Stock/ETF/index symbol (e.g., "AAPL", "^GSPC")
    /// - range: Time range ("1d", "5d", "1mo", "3mo", "6mo", "1y", "2y", "5y", "max")
    /// - interval: Data interval ("1m", "5m", "1h", "1d", "1wk", "1mo")
    pub async fn get_historical_data(
        &self,
        symbol: &str,
        range: &str,
        interval: &str,
    ) -> Result<Vec<Candle>, String> {
        let yahoo_symbol = normalize_yahoo_symbol(symbol);
        let url = format!(
            "https://query1.finance.yahoo.com/v8/finance/chart/{}?range={}&interval={}&includePrePost=false",
            yahoo_symbol, range, interval
        );

        debug!("Fetching Yahoo Finance data: {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| format!("Request failed: {}", e))?;

        if !response.status().is_success() {
            return Err(format!("API error: {}", response.status()));
        }

        let data: YahooChartResponse = response
            .json()
            .await
            .map_err(|e| format!("Parse error: {}", e))?;

        if let Some(error) = data.chart.error {
            return Err(format!(
                "Yahoo API error: {} - {}",
                error.code, error.description
            ));
        }

        let result = data
            .chart
            .result
            .and_then(|r| r.into_iter().next())
            .ok_or_else(|| "Empty results array".to_string())?;

        let timestamps = result
            .timestamp
            .ok_or_else(|| "No timestamps in response".to_string())?;

        let quote = result
            .indicators
            .quote
            .into_iter()
            .next()
            .ok_or_else(|| "No quote data in response".to_string())?;

        let opens = quote.open.unwrap_or_default();
        let highs = quote.high.unwrap_or_default();
        let lows = quote.low.unwrap_or_default();
        let closes = quote.close.unwrap_or_default();
        let volumes = quote.volume.unwrap_or_default();

        let mut candles: Vec<Candle> = Vec::new();
        for (i, &timestamp) in timestamps.iter().enumerate() {
            let open = opens.get(i).and_then(|v| *v).unwrap_or(0.0);
            let high = highs.get(i).and_then(|v| *v).unwrap_or(0.0);
            let low = lows.get(i).and_then(|v| *v).unwrap_or(0.0);
            let close = closes.get(i).and_then(|v| *v).unwrap_or(0.0);
            let volume = volumes.get(i).and_then(|v| *v).unwrap_or(0) as f64;

            // Skip invalid data points
            if close <= 0.0 {
                continue;
            }

            let time = timestamp * 1000; // milliseconds

            // Guard the strictly-increasing-timestamps invariant
            if let Some(last) = candles.last() {
                if time <= last.time {
                    continue;
                }
            }

            candles.push(Candle {
                time,
                open,
                high,
                low,
                close,
                volume,
            });
        }

        Ok(candles)
    }

    /// Fetch a daily series, swallowing provider errors.
    ///
    /// Unknown symbols and network failures come back as an empty series;
    /// the core pipeline treats that as "no data".
    pub async fn fetch_series(&self, symbol: &str, range: &str, interval: &str) -> Vec<Candle> {
        match self.get_historical_data(symbol, range, interval).await {
            Ok(candles) => candles,
            Err(e) => {
                warn!("Fetch failed for {}: {}", symbol, e);
                Vec::new()
            }
        }
    }

    /// Fetch the last two daily closes for a symbol (current and previous).
    pub async fn recent_closes(&self, symbol: &str) -> Result<(f64, Option<f64>), String> {
        let candles = self.get_historical_data(symbol, "5d", "1d").await?;
        let current = candles
            .last()
            .map(|c| c.close)
            .ok_or_else(|| format!("No recent data for {}", symbol))?;
        let previous = candles
            .len()
            .checked_sub(2)
            .and_then(|i| candles.get(i))
            .map(|c| c.close);
        Ok((current, previous))
    }
}

impl Default for YahooFinanceClient {
    fn default() -> Self {
        Self::new(Duration::from_secs(30))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_yahoo_symbol_uppercase() {
        assert_eq!(normalize_yahoo_symbol("aapl"), "AAPL");
        assert_eq!(normalize_yahoo_symbol("msft"), "MSFT");
    }

    #[test]
    fn test_normalize_yahoo_symbol_dots_to_hyphens() {
        assert_eq!(normalize_yahoo_symbol("BRK.B"), "BRK-B");
        assert_eq!(normalize_yahoo_symbol("brk.a"), "BRK-A");
    }

    #[test]
    fn test_normalize_yahoo_symbol_index_passthrough() {
        assert_eq!(normalize_yahoo_symbol("^GSPC"), "^GSPC");
    }

    #[test]
    fn test_yahoo_chart_with_error() {
        let json = r#"{
            "result": null,
            "error": {
                "code": "Not Found",
                "description": "No data found, symbol may be delisted"
            }
        }"#;
        let chart: YahooChart = serde_json::from_str(json).unwrap();
        assert!(chart.result.is_none());
        assert_eq!(chart.error.unwrap().code, "Not Found");
    }

    #[test]
    fn test_yahoo_quote_with_nulls() {
        let json = r#"{
            "open": [150.0, null, 152.0],
            "close": [153.0, null, 155.0]
        }"#;
        let quote: YahooQuote = serde_json::from_str(json).unwrap();
        let opens = quote.open.unwrap();
        assert_eq!(opens[0], Some(150.0));
        assert_eq!(opens[1], None);
    }

    #[test]
    fn test_yahoo_response_parsing() {
        let json = r#"{
            "chart": {
                "result": [{
                    "timestamp": [1700000000, 1700086400],
                    "indicators": {
                        "quote": [{
                            "open": [150.0, 151.0],
                            "high": [155.0, 156.0],
                            "low": [148.0, 149.0],
                            "close": [153.0, 154.0],
                            "volume": [50000000, 51000000]
                        }]
                    }
                }],
                "error": null
            }
        }"#;
        let response: YahooChartResponse = serde_json::from_str(json).unwrap();
        let result = response.chart.result.unwrap();
        assert_eq!(result[0].timestamp.as_ref().unwrap().len(), 2);
    }

    #[test]
    fn test_client_creation() {
        let _client = YahooFinanceClient::default();
    }
}
