//! MACD (Moving Average Convergence Divergence).

use super::ema::ema_series;

/// MACD line and signal line, aligned with the input closes.
///
/// MACD = EMA(fast) − EMA(slow), defined from index `slow - 1`; the
/// signal line is a `signal`-period EMA of the MACD line, defined
/// `signal - 1` rows later.
pub fn macd_series(
    closes: &[f64],
    fast: usize,
    slow: usize,
    signal: usize,
) -> (Vec<Option<f64>>, Vec<Option<f64>>) {
    let n = closes.len();
    let fast_ema = ema_series(closes, fast);
    let slow_ema = ema_series(closes, slow);

    let mut macd = vec![None; n];
    let mut macd_values = Vec::new();
    for i in 0..n {
        if let (Some(f), Some(s)) = (fast_ema[i], slow_ema[i]) {
            macd[i] = Some(f - s);
            macd_values.push(f - s);
        }
    }

    let mut signal_line = vec![None; n];
    if !macd_values.is_empty() {
        let offset = n - macd_values.len();
        for (j, value) in ema_series(&macd_values, signal).into_iter().enumerate() {
            signal_line[offset + j] = value;
        }
    }

    (macd, signal_line)
}
