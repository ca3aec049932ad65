//! Bollinger Bands.

use super::sma::{rolling_std_series, sma_series};

/// Upper and lower Bollinger bands, aligned with the input closes.
///
/// Bands are the trailing SMA ± `multiplier` rolling standard deviations.
pub fn bollinger_series(
    closes: &[f64],
    window: usize,
    multiplier: f64,
) -> (Vec<Option<f64>>, Vec<Option<f64>>) {
    let middle = sma_series(closes, window);
    let std = rolling_std_series(closes, window);

    let mut upper = vec![None; closes.len()];
    let mut lower = vec![None; closes.len()];
    for i in 0..closes.len() {
        if let (Some(m), Some(s)) = (middle[i], std[i]) {
            upper[i] = Some(m + multiplier * s);
            lower[i] = Some(m - multiplier * s);
        }
    }

    (upper, lower)
}
