//! Inference artifacts for maternal health risk prediction.
//!
//! Three JSON artifacts are loaded once per process: a fitted feature
//! scaler, a classifier and a label encoder. Together they turn a raw
//! feature row into a raw class label and, when the encoder supports it,
//! back into a category name.

pub mod artifacts;
pub mod classifier;
pub mod encoder;
pub mod error;
pub mod label;
pub mod scaler;
pub mod tree;

pub use artifacts::{
    ArtifactPaths, Artifacts, DEFAULT_ENCODER_FILE, DEFAULT_MODEL_FILE, DEFAULT_SCALER_FILE,
};
pub use classifier::{Classifier, Estimator};
pub use encoder::{EncoderArtifact, LabelDecoder};
pub use error::{ArtifactError, ArtifactKind, InferenceError};
pub use label::RawLabel;
pub use scaler::Scaler;
pub use tree::Tree;
