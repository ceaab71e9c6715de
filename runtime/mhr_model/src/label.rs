use std::fmt;

use serde::{Deserialize, Serialize};

/// A class label as stored in a classifier artifact.
///
/// Models fit on ordinal-encoded targets carry numeric classes, models fit
/// on the raw target carry strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawLabel {
    Number(f64),
    Text(String),
}

impl RawLabel {
    /// Interpret the label as a position in an encoder's category list
    pub fn as_index(&self) -> Option<usize> {
        match self {
            RawLabel::Number(n) if n.is_finite() && *n >= 0.0 && n.fract() == 0.0 => {
                Some(*n as usize)
            }
            RawLabel::Number(_) => None,
            RawLabel::Text(s) => s.trim().parse::<usize>().ok(),
        }
    }
}

impl fmt::Display for RawLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // integral classes print without a trailing ".0"
            RawLabel::Number(n) if n.is_finite() && n.fract() == 0.0 => write!(f, "{}", *n as i64),
            RawLabel::Number(n) => write!(f, "{n}"),
            RawLabel::Text(s) => write!(f, "{s}"),
        }
    }
}

impl From<&str> for RawLabel {
    fn from(s: &str) -> Self {
        RawLabel::Text(s.to_string())
    }
}

impl From<f64> for RawLabel {
    fn from(n: f64) -> Self {
        RawLabel::Number(n)
    }
}
