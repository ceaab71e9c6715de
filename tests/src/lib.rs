//! Shared fixtures for the end-to-end tests.

use std::path::PathBuf;

use mhr_core::{Feature, InputForm, PredictionPipeline};
use mhr_model::ArtifactPaths;

/// The artifact set shipped in the repository's `artifacts/` directory
pub fn shipped_artifacts() -> ArtifactPaths {
    ArtifactPaths::in_dir(PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../artifacts"))
}

pub fn shipped_pipeline() -> PredictionPipeline {
    PredictionPipeline::load(&shipped_artifacts()).expect("shipped artifacts load")
}

/// Readings in form order: age, systolic, diastolic, blood sugar, body temperature, heart rate
pub fn fill(form: &mut InputForm, values: [f64; 6]) {
    for (feature, value) in Feature::ALL.into_iter().zip(values) {
        form.set(feature, value);
    }
}
