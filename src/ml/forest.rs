//! Random forest over the fixed feature contract, plus the multi-output
//! wrapper that trains one forest per label column.
//!
//! Training is deterministic: every tree derives its own `StdRng` from the
//! configured seed, so a retrain over identical data reproduces the same
//! artifact bit for bit.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use super::tree::DecisionTree;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RandomForest {
    trees: Vec<DecisionTree>,
}

impl RandomForest {
    /// Fit `n_estimators` trees on bootstrap samples of the rows.
    pub fn fit(x: &[Vec<f64>], y: &[u8], n_estimators: usize, seed: u64) -> Self {
        let n_rows = x.len();
        let n_features = x.first().map(Vec::len).unwrap_or(0);
        // sqrt(n_features) per split, the usual forest heuristic.
        let max_features = ((n_features as f64).sqrt().round() as usize).max(1);

        let trees = (0..n_estimators)
            .map(|t| {
                let mut rng = StdRng::seed_from_u64(seed.wrapping_add(t as u64));
                let indices: Vec<usize> =
                    (0..n_rows).map(|_| rng.gen_range(0..n_rows)).collect();
                DecisionTree::fit(x, y, &indices, max_features, &mut rng)
            })
            .collect();

        Self { trees }
    }

    /// Majority vote across all trees.
    pub fn predict(&self, row: &[f64]) -> u8 {
        let positives = self
            .trees
            .iter()
            .filter(|tree| tree.predict(row) == 1)
            .count();
        u8::from(positives * 2 > self.trees.len())
    }
}

/// One independent forest per output label column, mirroring a
/// multi-output classifier over a binarized label matrix.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MultiOutputForest {
    forests: Vec<RandomForest>,
}

impl MultiOutputForest {
    /// Fit on rows `x` and a binary label matrix `y` (rows × outputs).
    pub fn fit(x: &[Vec<f64>], y: &[Vec<u8>], n_estimators: usize, seed: u64) -> Self {
        let n_outputs = y.first().map(Vec::len).unwrap_or(0);
        let forests = (0..n_outputs)
            .map(|output| {
                let column: Vec<u8> = y.iter().map(|row| row[output]).collect();
                // Offset keeps per-output forests decorrelated but reproducible.
                RandomForest::fit(x, &column, n_estimators, seed.wrapping_add(output as u64 * 1000))
            })
            .collect();
        Self { forests }
    }

    /// Predict one binary value per output column.
    pub fn predict(&self, row: &[f64]) -> Vec<u8> {
        self.forests.iter().map(|f| f.predict(row)).collect()
    }

    pub fn n_outputs(&self) -> usize {
        self.forests.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn separable_data() -> (Vec<Vec<f64>>, Vec<u8>) {
        let mut x = Vec::new();
        let mut y = Vec::new();
        for chol in [150.0, 160.0, 170.0, 180.0, 190.0, 200.0] {
            x.push(vec![100.0, 14.0, chol, 7000.0]);
            y.push(0);
        }
        for chol in [280.0, 290.0, 300.0, 310.0, 320.0, 330.0] {
            x.push(vec![100.0, 14.0, chol, 7000.0]);
            y.push(1);
        }
        (x, y)
    }

    #[test]
    fn learns_separable_cholesterol_rule() {
        let (x, y) = separable_data();
        let forest = RandomForest::fit(&x, &y, 25, 42);

        assert_eq!(forest.predict(&[100.0, 14.0, 155.0, 7000.0]), 0);
        assert_eq!(forest.predict(&[100.0, 14.0, 325.0, 7000.0]), 1);
    }

    #[test]
    fn training_is_deterministic_for_a_seed() {
        let (x, y) = separable_data();
        let a = RandomForest::fit(&x, &y, 10, 42);
        let b = RandomForest::fit(&x, &y, 10, 42);
        assert_eq!(
            serde_json::to_string(&a).unwrap(),
            serde_json::to_string(&b).unwrap()
        );
    }

    #[test]
    fn multi_output_predicts_per_column() {
        let (x, y_col) = separable_data();
        // Two outputs: the cholesterol rule and its inverse.
        let y: Vec<Vec<u8>> = y_col.iter().map(|&v| vec![v, 1 - v]).collect();
        let model = MultiOutputForest::fit(&x, &y, 25, 42);
        assert_eq!(model.n_outputs(), 2);

        assert_eq!(model.predict(&[100.0, 14.0, 155.0, 7000.0]), vec![0, 1]);
        assert_eq!(model.predict(&[100.0, 14.0, 325.0, 7000.0]), vec![1, 0]);
    }

    #[test]
    fn zero_outputs_predicts_empty() {
        let x = vec![vec![1.0, 2.0]];
        let y: Vec<Vec<u8>> = vec![vec![]];
        let model = MultiOutputForest::fit(&x, &y, 5, 1);
        assert_eq!(model.n_outputs(), 0);
        assert!(model.predict(&[1.0, 2.0]).is_empty());
    }
}
