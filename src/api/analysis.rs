use crate::services::analysis::{analyze_stock, sample_financials};
use crate::types::{StockAnalysis, StockFinancials};
use crate::AppState;
use axum::{
    routing::{get, post},
    Json, Router,
};

/// POST /api/analysis
async fn post_analysis(Json(financials): Json<StockFinancials>) -> Json<StockAnalysis> {
    Json(analyze_stock(&financials))
}

/// GET /api/analysis/sample
async fn get_sample() -> Json<StockFinancials> {
    Json(sample_financials())
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(post_analysis))
        .route("/sample", get(get_sample))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::AnalysisVerdict;

    #[tokio::test]
    async fn test_post_analysis_handler() {
        let Json(analysis) = post_analysis(Json(sample_financials())).await;
        assert_eq!(analysis.verdict, AnalysisVerdict::Buy);
        assert_eq!(analysis.score, 7);
    }

    #[tokio::test]
    async fn test_sample_handler_round_trips_through_analysis() {
        let Json(sample) = get_sample().await;
        let analysis = analyze_stock(&sample);
        assert_eq!(analysis.verdict, AnalysisVerdict::Buy);
    }
}
