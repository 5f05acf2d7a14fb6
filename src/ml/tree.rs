//! CART-style binary decision tree over numeric features.
//!
//! Splits minimize weighted Gini impurity. The split search walks features
//! in a shuffled order and keeps examining past the subsample size until at
//! least one valid partition is found, so constant features never starve a
//! node that still has signal elsewhere.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::config::{MAX_TREE_DEPTH, MIN_SAMPLES_SPLIT};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum TreeNode {
    Leaf {
        prediction: u8,
    },
    Split {
        feature: usize,
        threshold: f64,
        left: Box<TreeNode>,
        right: Box<TreeNode>,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecisionTree {
    root: TreeNode,
}

impl DecisionTree {
    /// Grow a tree on the rows selected by `indices`.
    ///
    /// `max_features` is the per-split feature subsample size; the search
    /// extends past it when the sampled features admit no valid split.
    pub fn fit<R: Rng>(
        x: &[Vec<f64>],
        y: &[u8],
        indices: &[usize],
        max_features: usize,
        rng: &mut R,
    ) -> Self {
        Self {
            root: grow(x, y, indices, max_features, MAX_TREE_DEPTH, rng),
        }
    }

    pub fn predict(&self, row: &[f64]) -> u8 {
        let mut node = &self.root;
        loop {
            match node {
                TreeNode::Leaf { prediction } => return *prediction,
                TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    node = if row.get(*feature).copied().unwrap_or(0.0) <= *threshold {
                        left
                    } else {
                        right
                    };
                }
            }
        }
    }
}

struct BestSplit {
    feature: usize,
    threshold: f64,
    gain: f64,
}

fn grow<R: Rng>(
    x: &[Vec<f64>],
    y: &[u8],
    indices: &[usize],
    max_features: usize,
    depth_left: usize,
    rng: &mut R,
) -> TreeNode {
    let positives = indices.iter().filter(|&&i| y[i] == 1).count();
    let majority = u8::from(positives * 2 > indices.len());

    let is_pure = positives == 0 || positives == indices.len();
    if depth_left == 0 || indices.len() < MIN_SAMPLES_SPLIT || is_pure {
        return TreeNode::Leaf {
            prediction: majority,
        };
    }

    let n_features = x[indices[0]].len();
    let mut features: Vec<usize> = (0..n_features).collect();
    features.shuffle(rng);

    let mut best: Option<BestSplit> = None;
    for (examined, &feature) in features.iter().enumerate() {
        if examined >= max_features && best.is_some() {
            break;
        }
        if let Some(candidate) = best_split_on(x, y, indices, feature) {
            if best.as_ref().map_or(true, |b| candidate.gain > b.gain) {
                best = Some(candidate);
            }
        }
    }

    let Some(split) = best else {
        return TreeNode::Leaf {
            prediction: majority,
        };
    };

    let (left_idx, right_idx): (Vec<usize>, Vec<usize>) = indices
        .iter()
        .partition(|&&i| x[i][split.feature] <= split.threshold);

    TreeNode::Split {
        feature: split.feature,
        threshold: split.threshold,
        left: Box::new(grow(x, y, &left_idx, max_features, depth_left - 1, rng)),
        right: Box::new(grow(x, y, &right_idx, max_features, depth_left - 1, rng)),
    }
}

/// Best impurity-reducing threshold on one feature, or None when every
/// candidate leaves a side empty or yields no gain.
fn best_split_on(x: &[Vec<f64>], y: &[u8], indices: &[usize], feature: usize) -> Option<BestSplit> {
    let mut values: Vec<f64> = indices.iter().map(|&i| x[i][feature]).collect();
    values.sort_by(|a, b| a.total_cmp(b));
    values.dedup();
    if values.len() < 2 {
        return None;
    }

    let parent_gini = gini(y, indices);
    let total = indices.len() as f64;
    let mut best: Option<BestSplit> = None;

    for pair in values.windows(2) {
        let threshold = (pair[0] + pair[1]) / 2.0;
        let (left, right): (Vec<usize>, Vec<usize>) =
            indices.iter().partition(|&&i| x[i][feature] <= threshold);
        if left.is_empty() || right.is_empty() {
            continue;
        }
        let weighted = (left.len() as f64 / total) * gini(y, &left)
            + (right.len() as f64 / total) * gini(y, &right);
        let gain = parent_gini - weighted;
        if gain > 1e-12 && best.as_ref().map_or(true, |b| gain > b.gain) {
            best = Some(BestSplit {
                feature,
                threshold,
                gain,
            });
        }
    }

    best
}

fn gini(y: &[u8], indices: &[usize]) -> f64 {
    if indices.is_empty() {
        return 0.0;
    }
    let total = indices.len() as f64;
    let positives = indices.iter().filter(|&&i| y[i] == 1).count() as f64;
    let p1 = positives / total;
    let p0 = 1.0 - p1;
    1.0 - p0 * p0 - p1 * p1
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn fit_all(x: &[Vec<f64>], y: &[u8], seed: u64) -> DecisionTree {
        let indices: Vec<usize> = (0..x.len()).collect();
        let mut rng = StdRng::seed_from_u64(seed);
        DecisionTree::fit(x, y, &indices, 2, &mut rng)
    }

    #[test]
    fn learns_single_threshold_rule() {
        let x: Vec<Vec<f64>> = vec![
            vec![1.0, 150.0],
            vec![2.0, 160.0],
            vec![3.0, 170.0],
            vec![4.0, 300.0],
            vec![5.0, 310.0],
            vec![6.0, 320.0],
        ];
        let y = vec![0, 0, 0, 1, 1, 1];
        let tree = fit_all(&x, &y, 7);

        assert_eq!(tree.predict(&[10.0, 155.0]), 0);
        assert_eq!(tree.predict(&[10.0, 315.0]), 1);
    }

    #[test]
    fn pure_node_becomes_leaf() {
        let x = vec![vec![1.0], vec![2.0], vec![3.0]];
        let y = vec![1, 1, 1];
        let tree = fit_all(&x, &y, 0);
        assert_eq!(tree.predict(&[99.0]), 1);
    }

    #[test]
    fn constant_features_yield_majority_leaf() {
        let x = vec![vec![5.0], vec![5.0], vec![5.0], vec![5.0]];
        let y = vec![0, 0, 0, 1];
        let tree = fit_all(&x, &y, 3);
        assert_eq!(tree.predict(&[5.0]), 0);
    }

    #[test]
    fn split_search_extends_past_constant_subsample() {
        // Three constant features, the signal lives in the fourth. With a
        // subsample of 2 the search must keep going until it finds it.
        let x: Vec<Vec<f64>> = (0..8)
            .map(|i| vec![1.0, 1.0, 1.0, if i < 4 { 10.0 } else { 20.0 }])
            .collect();
        let y = vec![0, 0, 0, 0, 1, 1, 1, 1];
        for seed in 0..10 {
            let tree = fit_all(&x, &y, seed);
            assert_eq!(tree.predict(&[1.0, 1.0, 1.0, 10.0]), 0, "seed {seed}");
            assert_eq!(tree.predict(&[1.0, 1.0, 1.0, 20.0]), 1, "seed {seed}");
        }
    }

    #[test]
    fn serializes_and_round_trips() {
        let x = vec![vec![1.0], vec![10.0]];
        let y = vec![0, 1];
        let tree = fit_all(&x, &y, 1);
        let json = serde_json::to_string(&tree).unwrap();
        let back: DecisionTree = serde_json::from_str(&json).unwrap();
        assert_eq!(back.predict(&[1.0]), tree.predict(&[1.0]));
        assert_eq!(back.predict(&[10.0]), tree.predict(&[10.0]));
    }
}
