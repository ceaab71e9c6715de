//! Label encoders used to turn classifier output back into category names

use serde::{Deserialize, Serialize};

use crate::error::{ArtifactError, ArtifactKind, InferenceError};
use crate::label::RawLabel;

/// Serialized encoder, tagged by kind.
///
/// Any unrecognised `kind` still loads, as an encoder without an inverse.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EncoderArtifact {
    /// One category list per encoded column; only the first is used
    Ordinal { categories: Vec<Vec<String>> },
    Label { classes: Vec<String> },
    #[serde(other)]
    Opaque,
}

/// Decodes raw classifier labels, with its inverse capability fixed at load time
#[derive(Debug, Clone, PartialEq)]
pub struct LabelDecoder {
    categories: Option<Vec<String>>,
}

impl LabelDecoder {
    pub fn from_artifact(artifact: EncoderArtifact) -> Result<Self, ArtifactError> {
        let categories = match artifact {
            EncoderArtifact::Ordinal { categories } => {
                let first = categories.into_iter().next().ok_or_else(|| {
                    ArtifactError::invalid(ArtifactKind::Encoder, "ordinal encoder has no columns")
                })?;
                Some(first)
            }
            EncoderArtifact::Label { classes } => Some(classes),
            EncoderArtifact::Opaque => None,
        };
        if let Some(c) = &categories {
            if c.is_empty() {
                return Err(ArtifactError::invalid(
                    ArtifactKind::Encoder,
                    "encoder has no categories",
                ));
            }
        }
        Ok(Self { categories })
    }

    /// Decoder that passes raw labels through unchanged
    pub fn passthrough() -> Self {
        Self { categories: None }
    }

    pub fn can_invert(&self) -> bool {
        self.categories.is_some()
    }

    /// Map a raw class index back to its category name
    pub fn invert(&self, raw: &RawLabel) -> Result<String, InferenceError> {
        let categories = self
            .categories
            .as_ref()
            .ok_or(InferenceError::NotInvertible)?;
        raw.as_index()
            .and_then(|i| categories.get(i))
            .cloned()
            .ok_or_else(|| InferenceError::UnknownCategory {
                label: raw.to_string(),
                categories: categories.len(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ordinal() -> LabelDecoder {
        LabelDecoder::from_artifact(EncoderArtifact::Ordinal {
            categories: vec![vec![
                "high risk".into(),
                "low risk".into(),
                "mid risk".into(),
            ]],
        })
        .unwrap()
    }

    #[test]
    fn ordinal_encoder_inverts_indices() {
        let dec = ordinal();
        assert!(dec.can_invert());
        assert_eq!(dec.invert(&RawLabel::Number(2.0)).unwrap(), "mid risk");
    }

    #[test]
    fn out_of_range_index_is_an_error() {
        let err = ordinal().invert(&RawLabel::Number(3.0)).unwrap_err();
        assert_eq!(
            err,
            InferenceError::UnknownCategory {
                label: "3".into(),
                categories: 3
            }
        );
    }

    #[test]
    fn unknown_kind_loads_without_inverse() {
        let artifact: EncoderArtifact =
            serde_json::from_str(r#"{"kind":"one_hot","drop":"first"}"#).unwrap();
        assert_eq!(artifact, EncoderArtifact::Opaque);
        let dec = LabelDecoder::from_artifact(artifact).unwrap();
        assert!(!dec.can_invert());
        assert_eq!(
            dec.invert(&RawLabel::Number(0.0)).unwrap_err(),
            InferenceError::NotInvertible
        );
    }

    #[test]
    fn empty_category_list_is_rejected() {
        let err = LabelDecoder::from_artifact(EncoderArtifact::Label { classes: vec![] });
        assert!(err.is_err());
    }
}
