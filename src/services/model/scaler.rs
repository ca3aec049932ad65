//! Feature standardization.

/// Zero-mean unit-variance scaler fit on the training partition only.
///
/// Columns with zero variance divide by 1.0 instead of their (zero)
/// standard deviation, so constant features transform to zeros rather
/// than NaN.
#[derive(Debug, Clone)]
pub struct StandardScaler {
    means: Vec<f64>,
    stds: Vec<f64>,
}

impl StandardScaler {
    /// Fit column means and standard deviations.
    pub fn fit(rows: &[Vec<f64>]) -> Self {
        let n_cols = rows.first().map(|r| r.len()).unwrap_or(0);
        let n = rows.len() as f64;

        let mut means = vec![0.0; n_cols];
        for row in rows {
            for (col, value) in row.iter().enumerate() {
                means[col] += value;
            }
        }
        for mean in &mut means {
            *mean /= n.max(1.0);
        }

        let mut stds = vec![0.0; n_cols];
        for row in rows {
            for (col, value) in row.iter().enumerate() {
                stds[col] += (value - means[col]).powi(2);
            }
        }
        for std in &mut stds {
            *std = (*std / n.max(1.0)).sqrt();
            if *std == 0.0 {
                *std = 1.0;
            }
        }

        Self { means, stds }
    }

    /// Transform a single row with the fitted parameters.
    pub fn transform_row(&self, row: &[f64]) -> Vec<f64> {
        row.iter()
            .enumerate()
            .map(|(col, value)| (value - self.means[col]) / self.stds[col])
            .collect()
    }

    /// Transform a batch of rows.
    pub fn transform(&self, rows: &[Vec<f64>]) -> Vec<Vec<f64>> {
        rows.iter().map(|row| self.transform_row(row)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scaler_zero_mean_unit_variance() {
        let rows = vec![vec![1.0], vec![2.0], vec![3.0], vec![4.0]];
        let scaler = StandardScaler::fit(&rows);
        let scaled = scaler.transform(&rows);

        let mean: f64 = scaled.iter().map(|r| r[0]).sum::<f64>() / 4.0;
        let var: f64 = scaled.iter().map(|r| (r[0] - mean).powi(2)).sum::<f64>() / 4.0;
        assert!(mean.abs() < 1e-10);
        assert!((var - 1.0).abs() < 1e-10);
    }

    #[test]
    fn test_scaler_zero_variance_column_guarded() {
        let rows = vec![vec![5.0, 1.0], vec![5.0, 2.0], vec![5.0, 3.0]];
        let scaler = StandardScaler::fit(&rows);
        let scaled = scaler.transform(&rows);

        for row in &scaled {
            assert_eq!(row[0], 0.0);
            assert!(row[0].is_finite() && row[1].is_finite());
        }
    }

    #[test]
    fn test_scaler_applied_to_unseen_row() {
        let rows = vec![vec![0.0], vec![10.0]];
        let scaler = StandardScaler::fit(&rows);
        // Mean 5, std 5: a value of 20 lands at z = 3 without refitting.
        assert!((scaler.transform_row(&[20.0])[0] - 3.0).abs() < 1e-10);
    }
}
