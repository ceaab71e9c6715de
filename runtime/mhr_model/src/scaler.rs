//! Fitted numeric normalization applied before classification

use serde::{Deserialize, Serialize};

use crate::error::{ArtifactError, ArtifactKind, InferenceError};

/// A fitted feature scaler.
///
/// `Standard` computes `(x - mean) / scale`; `MinMax` computes
/// `x * scale + min`, matching how the fitting library stores the transform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Scaler {
    Standard {
        mean: Vec<f64>,
        scale: Vec<f64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        feature_names: Option<Vec<String>>,
    },
    MinMax {
        min: Vec<f64>,
        scale: Vec<f64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        feature_names: Option<Vec<String>>,
    },
}

impl Scaler {
    pub fn standard(mean: Vec<f64>, scale: Vec<f64>) -> Self {
        Scaler::Standard {
            mean,
            scale,
            feature_names: None,
        }
    }

    pub fn n_features(&self) -> usize {
        match self {
            Scaler::Standard { mean, .. } => mean.len(),
            Scaler::MinMax { min, .. } => min.len(),
        }
    }

    /// Column names the scaler was fit with, when recorded
    pub fn feature_names(&self) -> Option<&[String]> {
        match self {
            Scaler::Standard { feature_names, .. } | Scaler::MinMax { feature_names, .. } => {
                feature_names.as_deref()
            }
        }
    }

    pub(crate) fn validate(&self) -> Result<(), ArtifactError> {
        let (offset, scale) = match self {
            Scaler::Standard { mean, scale, .. } => (mean, scale),
            Scaler::MinMax { min, scale, .. } => (min, scale),
        };
        if offset.is_empty() {
            return Err(ArtifactError::invalid(
                ArtifactKind::Scaler,
                "scaler has no features",
            ));
        }
        if offset.len() != scale.len() {
            return Err(ArtifactError::invalid(
                ArtifactKind::Scaler,
                format!(
                    "offset has {} entries but scale has {}",
                    offset.len(),
                    scale.len()
                ),
            ));
        }
        if let Some(names) = self.feature_names() {
            if names.len() != offset.len() {
                return Err(ArtifactError::invalid(
                    ArtifactKind::Scaler,
                    format!(
                        "{} feature names for {} features",
                        names.len(),
                        offset.len()
                    ),
                ));
            }
        }
        Ok(())
    }

    /// Normalize a single feature row
    pub fn transform(&self, row: &[f64]) -> Result<Vec<f64>, InferenceError> {
        let expected = self.n_features();
        if row.len() != expected {
            return Err(InferenceError::ShapeMismatch {
                stage: "scaler",
                expected,
                actual: row.len(),
            });
        }
        let out = match self {
            Scaler::Standard { mean, scale, .. } => row
                .iter()
                .zip(mean.iter().zip(scale.iter()))
                .map(|(x, (m, s))| {
                    // constant columns are fit with a unit scale
                    let s = if *s == 0.0 { 1.0 } else { *s };
                    (x - m) / s
                })
                .collect(),
            Scaler::MinMax { min, scale, .. } => row
                .iter()
                .zip(min.iter().zip(scale.iter()))
                .map(|(x, (m, s))| x * s + m)
                .collect(),
        };
        Ok(out)
    }
}
