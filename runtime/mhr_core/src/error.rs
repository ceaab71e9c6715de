use mhr_model::InferenceError;
use thiserror::Error;

use crate::record::Feature;

/// Input that cannot be submitted yet. Recovered locally by the caller.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("incomplete input: {} not filled in", join(.missing))]
    Incomplete { missing: Vec<Feature> },
}

fn join(features: &[Feature]) -> String {
    features
        .iter()
        .map(|f| f.column())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Failure of a single prediction request
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("prediction failed: {0}")]
    Inference(#[from] InferenceError),
}

/// Failure writing the history export
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("csv write failed: {0}")]
    Csv(#[from] csv::Error),
    #[error("csv flush failed: {0}")]
    Flush(#[source] std::io::Error),
}
