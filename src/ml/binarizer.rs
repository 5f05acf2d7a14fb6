//! Multi-label binarizer: label sets to fixed-order binary rows and back.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LabelBinarizer {
    /// Sorted, deduplicated class vocabulary fixed at fit time.
    classes: Vec<String>,
}

impl LabelBinarizer {
    /// Collect the sorted union of all labels seen across the sets.
    pub fn fit(label_sets: &[Vec<String>]) -> Self {
        let classes: BTreeSet<String> = label_sets.iter().flatten().cloned().collect();
        Self {
            classes: classes.into_iter().collect(),
        }
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    /// Binary indicator row per label set, columns in class order.
    pub fn transform(&self, label_sets: &[Vec<String>]) -> Vec<Vec<u8>> {
        label_sets
            .iter()
            .map(|set| {
                self.classes
                    .iter()
                    .map(|class| u8::from(set.contains(class)))
                    .collect()
            })
            .collect()
    }

    /// Map one binary row back to its label set. Columns beyond the class
    /// vocabulary are ignored.
    pub fn inverse(&self, row: &[u8]) -> Vec<String> {
        self.classes
            .iter()
            .zip(row.iter())
            .filter(|(_, &bit)| bit == 1)
            .map(|(class, _)| class.clone())
            .collect()
    }
}
