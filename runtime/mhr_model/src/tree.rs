//! Flattened decision tree, stored the way the fitting library exports it

use serde::{Deserialize, Serialize};

use crate::error::InferenceError;

/// Marker stored in `children_left`/`children_right` for leaf nodes
pub const LEAF: i64 = -1;

/// A decision tree as parallel node arrays.
///
/// Node `i` is a leaf when `children_left[i] == LEAF`. Otherwise the row
/// goes left when `x[feature[i]] <= threshold[i]`. `value[i]` holds the
/// per-class sample counts (or weights) that reached node `i`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tree {
    pub children_left: Vec<i64>,
    pub children_right: Vec<i64>,
    pub feature: Vec<i64>,
    pub threshold: Vec<f64>,
    pub value: Vec<Vec<f64>>,
}

impl Tree {
    pub fn node_count(&self) -> usize {
        self.children_left.len()
    }

    pub(crate) fn validate(&self, n_classes: usize) -> Result<(), String> {
        let n = self.node_count();
        if n == 0 {
            return Err("tree has no nodes".into());
        }
        if self.children_right.len() != n
            || self.feature.len() != n
            || self.threshold.len() != n
            || self.value.len() != n
        {
            return Err(format!(
                "node arrays differ in length (left {}, right {}, feature {}, threshold {}, value {})",
                n,
                self.children_right.len(),
                self.feature.len(),
                self.threshold.len(),
                self.value.len()
            ));
        }
        for i in 0..n {
            if self.value[i].len() != n_classes {
                return Err(format!(
                    "node {i} has {} class values, expected {n_classes}",
                    self.value[i].len()
                ));
            }
            let (l, r) = (self.children_left[i], self.children_right[i]);
            if l == LEAF {
                continue;
            }
            if self.feature[i] < 0 {
                return Err(format!("split node {i} has no feature"));
            }
            // children always follow their parent, which also rules out cycles
            for child in [l, r] {
                if child <= i as i64 || child >= n as i64 {
                    return Err(format!("node {i} has out-of-order child {child}"));
                }
            }
        }
        Ok(())
    }

    /// Walk the tree for one row and return the leaf's class values
    pub fn leaf_values(&self, row: &[f64]) -> Result<&[f64], InferenceError> {
        let mut node = 0usize;
        loop {
            let left = self.children_left[node];
            if left == LEAF {
                return Ok(&self.value[node]);
            }
            let feature = self.feature[node] as usize;
            let x = row
                .get(feature)
                .ok_or(InferenceError::ShapeMismatch {
                    stage: "classifier",
                    expected: feature + 1,
                    actual: row.len(),
                })?;
            node = if *x <= self.threshold[node] {
                left as usize
            } else {
                self.children_right[node] as usize
            };
        }
    }

    /// Leaf class values normalized to sum to one
    pub fn leaf_proba(&self, row: &[f64]) -> Result<Vec<f64>, InferenceError> {
        let values = self.leaf_values(row)?;
        let total: f64 = values.iter().sum();
        if total <= 0.0 {
            return Ok(values.to_vec());
        }
        Ok(values.iter().map(|v| v / total).collect())
    }
}
