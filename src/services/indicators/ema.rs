//! Exponential moving average.

/// Exponential moving average, aligned with the input.
///
/// The first EMA value is the SMA of the first `period` observations;
/// subsequent values use the conventional 2/(period+1) multiplier. The
/// first `period - 1` positions are `None`.
pub fn ema_series(values: &[f64], period: usize) -> Vec<Option<f64>> {
    let mut out = vec![None; values.len()];
    if period == 0 || values.len() < period {
        return out;
    }

    let multiplier = 2.0 / (period as f64 + 1.0);

    // First EMA is SMA
    let sma: f64 = values.iter().take(period).sum::<f64>() / period as f64;
    out[period - 1] = Some(sma);

    let mut ema = sma;
    for i in period..values.len() {
        ema = (values[i] - ema) * multiplier + ema;
        out[i] = Some(ema);
    }

    out
}
