//! Loading the scaler, classifier and encoder from disk

use std::fs::read_to_string;
use std::path::{Path, PathBuf};

use log::{info, warn};
use serde::de::DeserializeOwned;

use crate::classifier::Classifier;
use crate::encoder::{EncoderArtifact, LabelDecoder};
use crate::error::{ArtifactError, ArtifactKind, InferenceError};
use crate::label::RawLabel;
use crate::scaler::Scaler;

pub const DEFAULT_MODEL_FILE: &str = "model_risk.json";
pub const DEFAULT_SCALER_FILE: &str = "scaler.json";
pub const DEFAULT_ENCODER_FILE: &str = "ordinal_encoder.json";

/// Locations of the three artifact files
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactPaths {
    pub model: PathBuf,
    pub scaler: PathBuf,
    pub encoder: PathBuf,
}

impl ArtifactPaths {
    /// Default file names inside `dir`
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            model: dir.join(DEFAULT_MODEL_FILE),
            scaler: dir.join(DEFAULT_SCALER_FILE),
            encoder: dir.join(DEFAULT_ENCODER_FILE),
        }
    }
}

/// The loaded, validated artifact set. Read-only after construction.
#[derive(Debug, Clone)]
pub struct Artifacts {
    scaler: Scaler,
    classifier: Classifier,
    decoder: LabelDecoder,
}

impl Artifacts {
    /// Validate and assemble already-deserialized artifacts.
    ///
    /// `columns` is the feature order rows will be built in. The scaler and
    /// classifier widths must match it, and a scaler that recorded its own
    /// column names must list them in the same order.
    pub fn from_parts(
        scaler: Scaler,
        classifier: Classifier,
        decoder: LabelDecoder,
        columns: &[&str],
    ) -> Result<Self, ArtifactError> {
        scaler.validate()?;
        classifier.validate()?;
        if scaler.n_features() != columns.len() {
            return Err(ArtifactError::invalid(
                ArtifactKind::Scaler,
                format!(
                    "scaler has {} features, rows have {} columns",
                    scaler.n_features(),
                    columns.len()
                ),
            ));
        }
        if let Some(n) = classifier.input_width() {
            if n != scaler.n_features() {
                return Err(ArtifactError::invalid(
                    ArtifactKind::Classifier,
                    format!(
                        "classifier expects {n} features, scaler produces {}",
                        scaler.n_features()
                    ),
                ));
            }
        }
        if let Some(found) = scaler.feature_names() {
            if found.iter().map(String::as_str).ne(columns.iter().copied()) {
                return Err(ArtifactError::FeatureOrder {
                    expected: columns.iter().map(|c| c.to_string()).collect(),
                    found: found.to_vec(),
                });
            }
        }
        if !decoder.can_invert() {
            warn!("label encoder cannot inverse transform; raw classifier labels will be shown");
        }
        Ok(Self {
            scaler,
            classifier,
            decoder,
        })
    }

    pub fn load(paths: &ArtifactPaths, columns: &[&str]) -> Result<Self, ArtifactError> {
        let classifier: Classifier = read_json(ArtifactKind::Classifier, &paths.model)?;
        let scaler: Scaler = read_json(ArtifactKind::Scaler, &paths.scaler)?;
        let encoder: EncoderArtifact = read_json(ArtifactKind::Encoder, &paths.encoder)?;
        let decoder = LabelDecoder::from_artifact(encoder)?;
        let artifacts = Self::from_parts(scaler, classifier, decoder, columns)?;
        info!(
            "loaded artifacts: {} features, {} classes, decoder invertible: {}",
            artifacts.scaler.n_features(),
            artifacts.classifier.classes.len(),
            artifacts.decoder.can_invert()
        );
        Ok(artifacts)
    }

    pub fn decoder(&self) -> &LabelDecoder {
        &self.decoder
    }

    /// Scale a raw feature row and classify it
    pub fn classify(&self, row: &[f64]) -> Result<RawLabel, InferenceError> {
        let scaled = self.scaler.transform(row)?;
        self.classifier.predict(&scaled)
    }
}

fn read_json<T: DeserializeOwned>(kind: ArtifactKind, path: &Path) -> Result<T, ArtifactError> {
    let text = read_to_string(path).map_err(|source| ArtifactError::Io {
        kind,
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| ArtifactError::Parse {
        kind,
        path: path.to_path_buf(),
        source,
    })
}
