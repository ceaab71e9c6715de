//! Error types for artifact loading and inference

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Which of the three serialized artifacts an error refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactKind {
    Scaler,
    Classifier,
    Encoder,
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArtifactKind::Scaler => write!(f, "scaler"),
            ArtifactKind::Classifier => write!(f, "classifier"),
            ArtifactKind::Encoder => write!(f, "encoder"),
        }
    }
}

/// Errors raised while loading artifacts from disk
#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("failed to read {kind} artifact '{}': {source}", .path.display())]
    Io {
        kind: ArtifactKind,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed {kind} artifact '{}': {source}", .path.display())]
    Parse {
        kind: ArtifactKind,
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid {kind} artifact: {reason}")]
    Invalid { kind: ArtifactKind, reason: String },
    #[error("scaler was fit on columns {found:?}, expected {expected:?}")]
    FeatureOrder {
        expected: Vec<String>,
        found: Vec<String>,
    },
}

impl ArtifactError {
    pub(crate) fn invalid(kind: ArtifactKind, reason: impl Into<String>) -> Self {
        ArtifactError::Invalid {
            kind,
            reason: reason.into(),
        }
    }
}

/// Errors raised while scaling, classifying or decoding a feature row
#[derive(Debug, Clone, Error, PartialEq)]
pub enum InferenceError {
    #[error("{stage} expects {expected} features, got {actual}")]
    ShapeMismatch {
        stage: &'static str,
        expected: usize,
        actual: usize,
    },
    #[error("label '{label}' is not a category index (encoder knows {categories} categories)")]
    UnknownCategory { label: String, categories: usize },
    #[error("classifier chose class {index} but only has {classes} classes")]
    ClassIndex { index: usize, classes: usize },
    #[error("encoder does not support inverse transform")]
    NotInvertible,
}
