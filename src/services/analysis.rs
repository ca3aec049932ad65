//! Fundamentals checklist analysis.
//!
//! Seven boolean-like conditions each score one point; the verdict is
//! Buy at 5+, Watch at 3+, Avoid below.

use crate::types::{AnalysisVerdict, StockAnalysis, StockFinancials};

/// Score a stock's fundamentals against the checklist.
pub fn analyze_stock(financials: &StockFinancials) -> StockAnalysis {
    let mut score = 0u8;
    let mut reasoning = Vec::with_capacity(7);

    if financials.business_model == "clear" {
        score += 1;
        reasoning.push("Business model is clear.".to_string());
    } else {
        reasoning.push("Business model unclear.".to_string());
    }

    if financials.revenue_growth > 0.1 {
        score += 1;
        reasoning.push("Revenue growth trend is positive.".to_string());
    } else {
        reasoning.push("Revenue growth is weak.".to_string());
    }

    if financials.profit_consistency > 0.8 {
        score += 1;
        reasoning.push("Profit has been consistent.".to_string());
    } else {
        reasoning.push("Profit is volatile.".to_string());
    }

    if financials.debt_level < 0.5 {
        score += 1;
        reasoning.push("Debt level is manageable.".to_string());
    } else {
        reasoning.push("Debt level is high.".to_string());
    }

    if financials.promoter_holding_trend > 0.0 {
        score += 1;
        reasoning.push("Promoter holding trend is positive.".to_string());
    } else {
        reasoning.push("Promoter holding is decreasing.".to_string());
    }

    if financials.valuation == "undervalued" {
        score += 1;
        reasoning.push("Valuation looks attractive.".to_string());
    } else {
        reasoning.push("Valuation seems high.".to_string());
    }

    if financials.key_risks == "low" {
        score += 1;
        reasoning.push("Key risks are low.".to_string());
    } else {
        reasoning.push("Key risks present.".to_string());
    }

    let verdict = if score >= 5 {
        AnalysisVerdict::Buy
    } else if score >= 3 {
        AnalysisVerdict::Watch
    } else {
        AnalysisVerdict::Avoid
    };

    StockAnalysis {
        verdict,
        score,
        reasoning,
    }
}

/// The static example payload served by the sample endpoint.
pub fn sample_financials() -> StockFinancials {
    StockFinancials {
        revenue_growth: 0.12,
        profit_consistency: 0.9,
        debt_level: 0.3,
        promoter_holding_trend: 0.05,
        valuation: "undervalued".to_string(),
        key_risks: "low".to_string(),
        business_model: "clear".to_string(),
    }
}
