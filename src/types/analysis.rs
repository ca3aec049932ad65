use serde::{Deserialize, Serialize};

/// Fundamental attributes scored by the checklist analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockFinancials {
    /// Year-over-year revenue growth as a fraction (0.12 = 12%).
    pub revenue_growth: f64,
    /// Share of profitable periods, 0..1.
    pub profit_consistency: f64,
    /// Debt-to-equity style ratio; lower is better.
    pub debt_level: f64,
    /// Change in promoter holding; positive means accumulation.
    pub promoter_holding_trend: f64,
    /// "undervalued" or "overvalued".
    pub valuation: String,
    /// "low" or "high".
    pub key_risks: String,
    /// "clear" or "unclear".
    pub business_model: String,
}

/// Qualitative verdict from the checklist. Serializes capitalized
/// ("Buy", "Watch", "Avoid"), matching the original verdict strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum AnalysisVerdict {
    Buy,
    Watch,
    Avoid,
}

/// Result of scoring a stock's fundamentals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockAnalysis {
    pub verdict: AnalysisVerdict,
    /// Points scored, 0..=7.
    pub score: u8,
    /// One line per checklist condition.
    pub reasoning: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verdict_serializes_capitalized() {
        assert_eq!(
            serde_json::to_string(&AnalysisVerdict::Buy).unwrap(),
            "\"Buy\""
        );
        assert_eq!(
            serde_json::to_string(&AnalysisVerdict::Watch).unwrap(),
            "\"Watch\""
        );
        assert_eq!(
            serde_json::to_string(&AnalysisVerdict::Avoid).unwrap(),
            "\"Avoid\""
        );
    }

    #[test]
    fn test_financials_deserialization() {
        let body = r#"{
            "revenue_growth": 0.12,
            "profit_consistency": 0.9,
            "debt_level": 0.3,
            "promoter_holding_trend": 0.05,
            "valuation": "undervalued",
            "key_risks": "low",
            "business_model": "clear"
        }"#;
        let financials: StockFinancials = serde_json::from_str(body).unwrap();
        assert_eq!(financials.revenue_growth, 0.12);
        assert_eq!(financials.valuation, "undervalued");
    }
}
