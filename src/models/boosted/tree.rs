//! Axis-aligned regression tree used as the boosting weak learner.

use crate::utils::stats::mean;

/// A fitted regression tree.
#[derive(Debug, Clone)]
pub struct RegressionTree {
    root: Node,
}

#[derive(Debug, Clone)]
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

impl RegressionTree {
    /// Fit a tree on the rows selected by `indices`, splitting greedily on
    /// the variance reduction of the targets.
    pub fn fit(
        rows: &[Vec<f64>],
        targets: &[f64],
        indices: &[usize],
        max_depth: usize,
        min_samples_leaf: usize,
    ) -> Self {
        Self {
            root: grow(rows, targets, indices, max_depth, min_samples_leaf, 0),
        }
    }

    /// Predict the target for one feature row.
    pub fn predict(&self, row: &[f64]) -> f64 {
        let mut node = &self.root;
        loop {
            match node {
                Node::Leaf { value } => return *value,
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    node = if row[*feature] <= *threshold {
                        left
                    } else {
                        right
                    };
                }
            }
        }
    }
}

fn leaf_for(targets: &[f64], indices: &[usize]) -> Node {
    let values: Vec<f64> = indices.iter().map(|&i| targets[i]).collect();
    Node::Leaf {
        value: if values.is_empty() { 0.0 } else { mean(&values) },
    }
}

fn grow(
    rows: &[Vec<f64>],
    targets: &[f64],
    indices: &[usize],
    max_depth: usize,
    min_samples_leaf: usize,
    depth: usize,
) -> Node {
    if depth >= max_depth || indices.len() < 2 * min_samples_leaf.max(1) {
        return leaf_for(targets, indices);
    }

    // Constant targets cannot be improved by splitting.
    let first = targets[indices[0]];
    if indices.iter().all(|&i| (targets[i] - first).abs() < 1e-15) {
        return leaf_for(targets, indices);
    }

    let Some((feature, threshold)) = best_split(rows, targets, indices, min_samples_leaf) else {
        return leaf_for(targets, indices);
    };

    let (left_idx, right_idx): (Vec<usize>, Vec<usize>) = indices
        .iter()
        .partition(|&&i| rows[i][feature] <= threshold);
    if left_idx.is_empty() || right_idx.is_empty() {
        return leaf_for(targets, indices);
    }

    Node::Split {
        feature,
        threshold,
        left: Box::new(grow(
            rows,
            targets,
            &left_idx,
            max_depth,
            min_samples_leaf,
            depth + 1,
        )),
        right: Box::new(grow(
            rows,
            targets,
            &right_idx,
            max_depth,
            min_samples_leaf,
            depth + 1,
        )),
    }
}

/// Best (feature, threshold) by weighted-variance reduction, scanning each
/// feature's sorted values with running sums.
fn best_split(
    rows: &[Vec<f64>],
    targets: &[f64],
    indices: &[usize],
    min_samples_leaf: usize,
) -> Option<(usize, f64)> {
    let n = indices.len();
    let n_features = rows.first().map(|row| row.len()).unwrap_or(0);
    let min_leaf = min_samples_leaf.max(1);

    let total_sum: f64 = indices.iter().map(|&i| targets[i]).sum();
    let total_sq: f64 = indices.iter().map(|&i| targets[i] * targets[i]).sum();
    let parent_cost = total_sq - total_sum * total_sum / n as f64;

    let mut best: Option<(usize, f64, f64)> = None;

    for feature in 0..n_features {
        let mut pairs: Vec<(f64, f64)> = indices
            .iter()
            .map(|&i| (rows[i][feature], targets[i]))
            .collect();
        pairs.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal));

        let mut left_sum = 0.0;
        let mut left_sq = 0.0;

        for split_at in 1..n {
            let (x, y) = pairs[split_at - 1];
            left_sum += y;
            left_sq += y * y;

            // No threshold exists between equal feature values.
            if (x - pairs[split_at].0).abs() < 1e-15 {
                continue;
            }
            if split_at < min_leaf || n - split_at < min_leaf {
                continue;
            }

            let right_sum = total_sum - left_sum;
            let right_sq = total_sq - left_sq;
            let left_cost = left_sq - left_sum * left_sum / split_at as f64;
            let right_cost = right_sq - right_sum * right_sum / (n - split_at) as f64;
            let gain = parent_cost - left_cost - right_cost;

            if gain > best.map_or(1e-12, |(_, _, g)| g) {
                best = Some((feature, (x + pairs[split_at].0) / 2.0, gain));
            }
        }
    }

    best.map(|(feature, threshold, _)| (feature, threshold))
}
