//! Random forest regression.
//!
//! Bagged variance-reduction regression trees with per-split random
//! feature subsets. Seeded so the same table always yields the same
//! model; 100 trees and seed 42 match the original pipeline's
//! `RandomForestRegressor(n_estimators=100, random_state=42)`.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Forest hyperparameters.
#[derive(Debug, Clone)]
pub struct ForestConfig {
    pub n_trees: usize,
    pub max_depth: usize,
    pub min_samples_split: usize,
    pub seed: u64,
}

impl Default for ForestConfig {
    fn default() -> Self {
        Self {
            n_trees: 100,
            max_depth: 12,
            min_samples_split: 4,
            seed: 42,
        }
    }
}

enum Node {
    Leaf {
        value: f64,
    },
    Split {
        feature: usize,
        threshold: f64,
        left: Box<Node>,
        right: Box<Node>,
    },
}

impl Node {
    fn predict(&self, row: &[f64]) -> f64 {
        match self {
            Node::Leaf { value } => *value,
            Node::Split {
                feature,
                threshold,
                left,
                right,
            } => {
                if row[*feature] <= *threshold {
                    left.predict(row)
                } else {
                    right.predict(row)
                }
            }
        }
    }
}

/// A fitted random forest regressor.
pub struct RandomForestRegressor {
    trees: Vec<Node>,
}

impl RandomForestRegressor {
    /// Fit a forest on the given rows and targets.
    ///
    /// Each tree sees a bootstrap sample of the rows and considers a
    /// random third of the features at every split.
    pub fn fit(rows: &[Vec<f64>], targets: &[f64], config: ForestConfig) -> Self {
        if rows.is_empty() {
            return Self { trees: Vec::new() };
        }
        let n_features = rows.first().map(|r| r.len()).unwrap_or(0);
        let n_candidates = (n_features / 3).max(1);

        let trees = (0..config.n_trees)
            .map(|t| {
                let mut rng = StdRng::seed_from_u64(config.seed.wrapping_add(t as u64));
                let sample: Vec<usize> = (0..rows.len())
                    .map(|_| rng.gen_range(0..rows.len()))
                    .collect();
                grow_tree(rows, targets, &sample, 0, n_candidates, &config, &mut rng)
            })
            .collect();

        Self { trees }
    }

    /// Predict a single row: mean of the tree predictions.
    pub fn predict_row(&self, row: &[f64]) -> f64 {
        if self.trees.is_empty() {
            return 0.0;
        }
        self.trees.iter().map(|t| t.predict(row)).sum::<f64>() / self.trees.len() as f64
    }

    /// Predict a batch of rows.
    pub fn predict(&self, rows: &[Vec<f64>]) -> Vec<f64> {
        rows.iter().map(|row| self.predict_row(row)).collect()
    }

    /// Fraction of trees predicting a value above the given cutoff.
    /// Used as a vote share when the targets are 0/1 labels.
    pub fn vote_share(&self, row: &[f64], cutoff: f64) -> f64 {
        if self.trees.is_empty() {
            return 0.0;
        }
        let above = self
            .trees
            .iter()
            .filter(|t| t.predict(row) > cutoff)
            .count();
        above as f64 / self.trees.len() as f64
    }
}

fn mean(targets: &[f64], sample: &[usize]) -> f64 {
    if sample.is_empty() {
        return 0.0;
    }
    sample.iter().map(|&i| targets[i]).sum::<f64>() / sample.len() as f64
}

fn grow_tree(
    rows: &[Vec<f64>],
    targets: &[f64],
    sample: &[usize],
    depth: usize,
    n_candidates: usize,
    config: &ForestConfig,
    rng: &mut StdRng,
) -> Node {
    let leaf = Node::Leaf {
        value: mean(targets, sample),
    };

    if depth >= config.max_depth || sample.len() < config.min_samples_split {
        return leaf;
    }

    let node_mean = mean(targets, sample);
    let node_sse: f64 = sample
        .iter()
        .map(|&i| (targets[i] - node_mean).powi(2))
        .sum();
    if node_sse == 0.0 {
        return leaf;
    }

    let n_features = rows[sample[0]].len();
    let Some((feature, threshold)) =
        best_split(rows, targets, sample, n_features, n_candidates, node_sse, rng)
    else {
        return leaf;
    };

    let (left_idx, right_idx): (Vec<usize>, Vec<usize>) = sample
        .iter()
        .partition(|&&i| rows[i][feature] <= threshold);

    if left_idx.is_empty() || right_idx.is_empty() {
        return leaf;
    }

    Node::Split {
        feature,
        threshold,
        left: Box::new(grow_tree(
            rows,
            targets,
            &left_idx,
            depth + 1,
            n_candidates,
            config,
            rng,
        )),
        right: Box::new(grow_tree(
            rows,
            targets,
            &right_idx,
            depth + 1,
            n_candidates,
            config,
            rng,
        )),
    }
}

/// Exhaustive best split over a random feature subset, minimizing the
/// summed squared error of the two children.
fn best_split(
    rows: &[Vec<f64>],
    targets: &[f64],
    sample: &[usize],
    n_features: usize,
    n_candidates: usize,
    node_sse: f64,
    rng: &mut StdRng,
) -> Option<(usize, f64)> {
    let mut best: Option<(usize, f64, f64)> = None;

    for _ in 0..n_candidates {
        let feature = rng.gen_range(0..n_features);

        let mut pairs: Vec<(f64, f64)> = sample
            .iter()
            .map(|&i| (rows[i][feature], targets[i]))
            .collect();
        pairs.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal));

        // Prefix sums let every cut point be scored in one pass.
        let total_sum: f64 = pairs.iter().map(|p| p.1).sum();
        let total_sq: f64 = pairs.iter().map(|p| p.1 * p.1).sum();
        let n = pairs.len() as f64;

        let mut left_sum = 0.0;
        let mut left_sq = 0.0;
        for k in 0..pairs.len() - 1 {
            left_sum += pairs[k].1;
            left_sq += pairs[k].1 * pairs[k].1;

            // Identical feature values cannot be separated.
            if pairs[k].0 == pairs[k + 1].0 {
                continue;
            }

            let left_n = (k + 1) as f64;
            let right_n = n - left_n;
            let right_sum = total_sum - left_sum;
            let right_sq = total_sq - left_sq;

            let sse = (left_sq - left_sum * left_sum / left_n)
                + (right_sq - right_sum * right_sum / right_n);

            if sse < node_sse && best.map_or(true, |(_, _, b)| sse < b) {
                let threshold = (pairs[k].0 + pairs[k + 1].0) / 2.0;
                best = Some((feature, threshold, sse));
            }
        }
    }

    best.map(|(feature, threshold, _)| (feature, threshold))
}
