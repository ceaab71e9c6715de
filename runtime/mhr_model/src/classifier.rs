//! Classifier artifacts producing one raw label per feature row

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::{ArtifactError, ArtifactKind, InferenceError};
use crate::label::RawLabel;
use crate::tree::Tree;

/// Estimator parameters, tagged by family
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Estimator {
    /// One coefficient row per class; a single row means a binary model
    /// whose positive class is `classes[1]`.
    Linear {
        coef: Vec<Vec<f64>>,
        intercept: Vec<f64>,
    },
    DecisionTree {
        tree: Tree,
    },
    /// Class = argmax of the averaged, normalized leaf distributions
    RandomForest {
        trees: Vec<Tree>,
    },
}

impl Estimator {
    fn family(&self) -> &'static str {
        match self {
            Estimator::Linear { .. } => "linear",
            Estimator::DecisionTree { .. } => "decision_tree",
            Estimator::RandomForest { .. } => "random_forest",
        }
    }
}

/// A fitted classifier with its class table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Classifier {
    pub classes: Vec<RawLabel>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub n_features: Option<usize>,
    pub estimator: Estimator,
}

impl Classifier {
    pub fn new(classes: Vec<RawLabel>, estimator: Estimator) -> Self {
        Self {
            classes,
            n_features: None,
            estimator,
        }
    }

    pub(crate) fn validate(&self) -> Result<(), ArtifactError> {
        let invalid = |reason: String| ArtifactError::invalid(ArtifactKind::Classifier, reason);
        let n_classes = self.classes.len();
        if n_classes == 0 {
            return Err(invalid("classifier has no classes".into()));
        }
        match &self.estimator {
            Estimator::Linear { coef, intercept } => {
                if n_classes < 2 {
                    return Err(invalid(format!(
                        "linear model needs at least 2 classes, has {n_classes}"
                    )));
                }
                let binary = coef.len() == 1 && n_classes == 2;
                if !binary && coef.len() != n_classes {
                    return Err(invalid(format!(
                        "{} coefficient rows for {n_classes} classes",
                        coef.len()
                    )));
                }
                if intercept.len() != coef.len() {
                    return Err(invalid(format!(
                        "{} intercepts for {} coefficient rows",
                        intercept.len(),
                        coef.len()
                    )));
                }
                let width = coef[0].len();
                if coef.iter().any(|row| row.len() != width) {
                    return Err(invalid("coefficient rows differ in length".into()));
                }
                if let Some(n) = self.n_features {
                    if n != width {
                        return Err(invalid(format!(
                            "n_features is {n} but coefficients have {width} columns"
                        )));
                    }
                }
            }
            Estimator::DecisionTree { tree } => tree.validate(n_classes).map_err(invalid)?,
            Estimator::RandomForest { trees } => {
                if trees.is_empty() {
                    return Err(invalid("forest has no trees".into()));
                }
                for (i, tree) in trees.iter().enumerate() {
                    tree.validate(n_classes)
                        .map_err(|e| invalid(format!("tree {i}: {e}")))?;
                }
            }
        }
        Ok(())
    }

    /// Row width the estimator was fit on, when the artifact records it
    pub fn input_width(&self) -> Option<usize> {
        match &self.estimator {
            Estimator::Linear { coef, .. } => self.n_features.or(coef.first().map(Vec::len)),
            _ => self.n_features,
        }
    }

    /// Per-class scores for a scaled row. Higher wins.
    pub fn decision_scores(&self, row: &[f64]) -> Result<Vec<f64>, InferenceError> {
        if let Some(expected) = self.n_features {
            if row.len() != expected {
                return Err(InferenceError::ShapeMismatch {
                    stage: "classifier",
                    expected,
                    actual: row.len(),
                });
            }
        }
        match &self.estimator {
            Estimator::Linear { coef, intercept } => {
                let width = coef[0].len();
                if row.len() != width {
                    return Err(InferenceError::ShapeMismatch {
                        stage: "classifier",
                        expected: width,
                        actual: row.len(),
                    });
                }
                let scores: Vec<f64> = coef
                    .iter()
                    .zip(intercept.iter())
                    .map(|(w, b)| w.iter().zip(row.iter()).map(|(w, x)| w * x).sum::<f64>() + b)
                    .collect();
                if scores.len() == 1 {
                    // binary: negative class scores the mirror of the positive one
                    return Ok(vec![-scores[0], scores[0]]);
                }
                Ok(scores)
            }
            Estimator::DecisionTree { tree } => Ok(tree.leaf_values(row)?.to_vec()),
            Estimator::RandomForest { trees } => {
                let mut acc = vec![0.0; self.classes.len()];
                for tree in trees {
                    for (a, p) in acc.iter_mut().zip(tree.leaf_proba(row)?) {
                        *a += p;
                    }
                }
                let n = trees.len() as f64;
                Ok(acc.into_iter().map(|a| a / n).collect())
            }
        }
    }

    /// Predict the raw label for one scaled row
    pub fn predict(&self, row: &[f64]) -> Result<RawLabel, InferenceError> {
        let scores = self.decision_scores(row)?;
        let idx = argmax(&scores);
        debug!(
            "{} classifier scores {:?} -> class {}",
            self.estimator.family(),
            scores,
            idx
        );
        self.classes
            .get(idx)
            .cloned()
            .ok_or(InferenceError::ClassIndex {
                index: idx,
                classes: self.classes.len(),
            })
    }
}

/// Index of the first maximum; ties go to the lower class index
fn argmax(scores: &[f64]) -> usize {
    let mut best = 0;
    for (i, s) in scores.iter().enumerate().skip(1) {
        if *s > scores[best] {
            best = i;
        }
    }
    best
}
