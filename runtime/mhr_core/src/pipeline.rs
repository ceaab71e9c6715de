//! Validate, assemble, scale, classify, decode

use log::debug;
use mhr_model::{ArtifactError, ArtifactPaths, Artifacts, InferenceError, RawLabel};

use crate::error::{PipelineError, ValidationError};
use crate::form::{Draft, ValidationPolicy};
use crate::record::{MeasurementRecord, FEATURE_COLUMNS};

/// Outcome of one successful prediction
#[derive(Debug, Clone, PartialEq)]
pub struct PredictionResult {
    /// Final label, upper-cased
    pub label: String,
    /// What the classifier produced before decoding
    pub raw: RawLabel,
    /// Whether `label` came from the encoder rather than `raw`
    pub decoded: bool,
}

/// Prediction pipeline over a loaded artifact set.
///
/// Holds no per-request state; one instance serves a whole process.
#[derive(Debug, Clone)]
pub struct PredictionPipeline {
    artifacts: Artifacts,
    policy: ValidationPolicy,
}

impl PredictionPipeline {
    pub fn new(artifacts: Artifacts) -> Self {
        Self {
            artifacts,
            policy: ValidationPolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: ValidationPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Load artifacts, checking them against the pipeline's column order
    pub fn load(paths: &ArtifactPaths) -> Result<Self, ArtifactError> {
        Ok(Self::new(Artifacts::load(paths, &FEATURE_COLUMNS)?))
    }

    pub fn artifacts(&self) -> &Artifacts {
        &self.artifacts
    }

    pub fn policy(&self) -> ValidationPolicy {
        self.policy
    }

    pub fn validate(&self, draft: &Draft) -> Result<MeasurementRecord, ValidationError> {
        draft.complete(self.policy)
    }

    /// Run a complete record through scaler, classifier and decoder
    pub fn predict(&self, record: &MeasurementRecord) -> Result<PredictionResult, InferenceError> {
        let row = record.features();
        debug!("feature row {FEATURE_COLUMNS:?} = {row:?}");
        let raw = self.artifacts.classify(&row)?;
        let decoder = self.artifacts.decoder();
        let (label, decoded) = if decoder.can_invert() {
            (decoder.invert(&raw)?, true)
        } else {
            (raw.to_string(), false)
        };
        debug!("raw label {raw} -> {label:?} (decoded: {decoded})");
        Ok(PredictionResult {
            label: label.to_uppercase(),
            raw,
            decoded,
        })
    }

    /// Validate a draft, then predict. No model call is made for incomplete input.
    pub fn predict_draft(
        &self,
        draft: &Draft,
    ) -> Result<(MeasurementRecord, PredictionResult), PipelineError> {
        let record = self.validate(draft)?;
        let result = self.predict(&record)?;
        Ok((record, result))
    }
}
