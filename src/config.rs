use std::env;

/// A stock the dashboard offers out of the box.
#[derive(Debug, Clone)]
pub struct PopularStock {
    /// Display name (e.g. "Apple").
    pub name: &'static str,
    /// Ticker symbol (e.g. "AAPL").
    pub symbol: &'static str,
}

/// Stocks shown in the dashboard selector by default.
pub const POPULAR_STOCKS: &[PopularStock] = &[
    PopularStock { name: "S&P 500", symbol: "^GSPC" },
    PopularStock { name: "Apple", symbol: "AAPL" },
    PopularStock { name: "Microsoft", symbol: "MSFT" },
    PopularStock { name: "Google", symbol: "GOOGL" },
    PopularStock { name: "Amazon", symbol: "AMZN" },
    PopularStock { name: "Tesla", symbol: "TSLA" },
    PopularStock { name: "NVIDIA", symbol: "NVDA" },
    PopularStock { name: "Meta", symbol: "META" },
    PopularStock { name: "Netflix", symbol: "NFLX" },
    PopularStock { name: "AMD", symbol: "AMD" },
    PopularStock { name: "Intel", symbol: "INTC" },
    PopularStock { name: "JPMorgan", symbol: "JPM" },
    PopularStock { name: "Visa", symbol: "V" },
    PopularStock { name: "Walmart", symbol: "WMT" },
    PopularStock { name: "Johnson & Johnson", symbol: "JNJ" },
];

/// Application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server host address.
    pub host: String,
    /// Server port.
    pub port: u16,
    /// Path of the JSON file holding the alert set.
    pub alerts_file: String,
    /// Interval between background alert checks (seconds, 0 disables).
    pub alert_check_secs: u64,
    /// TTL for cached OHLCV series (seconds).
    pub series_cache_secs: u64,
    /// HTTP timeout for market data fetches (seconds).
    pub fetch_timeout_secs: u64,
    /// Default history range for predictions (Yahoo range string).
    pub default_range: String,
    /// Default forecast horizon in days.
    pub default_horizon_days: u32,
    /// Ticker used for the market-wide trend verdict.
    pub market_ticker: String,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port: u16 = env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(3001);

        Self {
            host,
            port,
            alerts_file: env::var("ALERTS_FILE").unwrap_or_else(|_| "alerts.json".to_string()),
            alert_check_secs: env::var("ALERT_CHECK_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(300),
            series_cache_secs: env::var("SERIES_CACHE_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3600),
            fetch_timeout_secs: env::var("FETCH_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(30),
            default_range: env::var("DEFAULT_RANGE").unwrap_or_else(|_| "1y".to_string()),
            default_horizon_days: env::var("DEFAULT_HORIZON_DAYS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(5),
            market_ticker: env::var("MARKET_TICKER").unwrap_or_else(|_| "^GSPC".to_string()),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3001,
            alerts_file: "alerts.json".to_string(),
            alert_check_secs: 300,
            series_cache_secs: 3600,
            fetch_timeout_secs: 30,
            default_range: "1y".to_string(),
            default_horizon_days: 5,
            market_ticker: "^GSPC".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.port, 3001);
        assert_eq!(config.alerts_file, "alerts.json");
        assert_eq!(config.default_horizon_days, 5);
        assert_eq!(config.market_ticker, "^GSPC");
    }

    #[test]
    fn test_popular_stocks_contains_index() {
        assert!(POPULAR_STOCKS.iter().any(|s| s.symbol == "^GSPC"));
        assert!(POPULAR_STOCKS.iter().any(|s| s.symbol == "AAPL"));
        assert_eq!(POPULAR_STOCKS.len(), 15);
    }
}
