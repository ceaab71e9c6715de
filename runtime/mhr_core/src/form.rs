//! The six-field input form.
//!
//! Every field carries an explicit "filled" flag, so a legitimate reading
//! of zero is distinguishable from a field the user never touched. Values
//! are clamped into the declared range on entry; nothing here fails.

use crate::error::ValidationError;
use crate::record::{Feature, MeasurementRecord};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Integer,
    Decimal,
}

/// Declared bounds and presentation of one input field
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldSpec {
    pub feature: Feature,
    pub label: &'static str,
    pub kind: FieldKind,
    pub min: f64,
    pub max: f64,
    /// Prefilled value; `None` means the field starts unfilled
    pub default: Option<f64>,
    pub step: f64,
}

pub static FIELD_SPECS: [FieldSpec; 6] = [
    FieldSpec {
        feature: Feature::Age,
        label: "Usia (tahun)",
        kind: FieldKind::Integer,
        min: 0.0,
        max: 60.0,
        default: None,
        step: 1.0,
    },
    FieldSpec {
        feature: Feature::SystolicBp,
        label: "Tekanan Darah Sistolik (mmHg)",
        kind: FieldKind::Integer,
        min: 0.0,
        max: 200.0,
        default: None,
        step: 1.0,
    },
    FieldSpec {
        feature: Feature::DiastolicBp,
        label: "Tekanan Darah Diastolik (mmHg)",
        kind: FieldKind::Integer,
        min: 0.0,
        max: 140.0,
        default: None,
        step: 1.0,
    },
    FieldSpec {
        feature: Feature::BloodSugar,
        label: "Kadar Gula Darah (mg/dL)",
        kind: FieldKind::Decimal,
        min: 0.0,
        max: 500.0,
        default: None,
        step: 0.01,
    },
    FieldSpec {
        feature: Feature::BodyTemperature,
        label: "Suhu Tubuh (°F)",
        kind: FieldKind::Decimal,
        min: 80.0,
        max: 110.0,
        default: Some(98.6),
        step: 0.1,
    },
    FieldSpec {
        feature: Feature::HeartRate,
        label: "Detak Jantung (bpm)",
        kind: FieldKind::Integer,
        min: 0.0,
        max: 180.0,
        default: None,
        step: 1.0,
    },
];

impl FieldSpec {
    pub fn of(feature: Feature) -> &'static FieldSpec {
        &FIELD_SPECS[feature.index()]
    }

    /// Bring a value into range; integer fields are rounded first
    pub fn clamp(&self, value: f64) -> f64 {
        if value.is_nan() {
            return self.min;
        }
        let v = match self.kind {
            FieldKind::Integer => value.round(),
            FieldKind::Decimal => value,
        };
        v.clamp(self.min, self.max)
    }

    /// Round to the step's decimal precision, removing float drift from stepping
    fn snap(&self, value: f64) -> f64 {
        let decimals = (-self.step.log10()).ceil().max(0.0) as i32;
        let factor = 10f64.powi(decimals);
        (value * factor).round() / factor
    }

    /// Human readable value, integers without a fraction
    pub fn format_value(&self, value: f64) -> String {
        match self.kind {
            FieldKind::Integer => format!("{}", value as i64),
            FieldKind::Decimal => crate::history::format_decimal(value),
        }
    }
}

/// How completeness is judged
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ValidationPolicy {
    /// Also treat an entered zero as "not filled in"
    pub zero_means_unfilled: bool,
}

/// The form's current values; `None` is an unfilled field
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Draft {
    values: [Option<f64>; 6],
}

impl Default for Draft {
    fn default() -> Self {
        Self {
            values: FIELD_SPECS.map(|s| s.default),
        }
    }
}

impl Draft {
    /// A fully filled draft mirroring `record`
    pub fn from_record(record: &MeasurementRecord) -> Self {
        Self {
            values: Feature::ALL.map(|f| Some(record.value(f))),
        }
    }

    pub fn get(&self, feature: Feature) -> Option<f64> {
        self.values[feature.index()]
    }

    pub fn is_filled(&self, feature: Feature) -> bool {
        self.values[feature.index()].is_some()
    }

    /// Fields that block a prediction, in form order
    pub fn missing(&self, policy: ValidationPolicy) -> Vec<Feature> {
        Feature::ALL
            .into_iter()
            .filter(|f| match self.get(*f) {
                None => true,
                Some(v) => policy.zero_means_unfilled && v == 0.0,
            })
            .collect()
    }

    /// Convert into a complete record, or report every missing field
    pub fn complete(&self, policy: ValidationPolicy) -> Result<MeasurementRecord, ValidationError> {
        let missing = self.missing(policy);
        if !missing.is_empty() {
            return Err(ValidationError::Incomplete { missing });
        }
        let v = |f: Feature| self.values[f.index()].unwrap_or_default();
        Ok(MeasurementRecord {
            age: v(Feature::Age) as u32,
            systolic_bp: v(Feature::SystolicBp) as u32,
            diastolic_bp: v(Feature::DiastolicBp) as u32,
            blood_sugar: v(Feature::BloodSugar),
            body_temperature: v(Feature::BodyTemperature),
            heart_rate: v(Feature::HeartRate) as u32,
        })
    }
}

/// The interactive form holding the current draft
#[derive(Debug, Clone, Default)]
pub struct InputForm {
    draft: Draft,
}

impl InputForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn draft(&self) -> &Draft {
        &self.draft
    }

    pub fn value(&self, feature: Feature) -> Option<f64> {
        self.draft.get(feature)
    }

    /// Enter a value; returns what the field actually holds after clamping
    pub fn set(&mut self, feature: Feature, value: f64) -> f64 {
        let stored = FieldSpec::of(feature).clamp(value);
        self.draft.values[feature.index()] = Some(stored);
        stored
    }

    pub fn step_up(&mut self, feature: Feature) -> f64 {
        self.step(feature, 1.0)
    }

    pub fn step_down(&mut self, feature: Feature) -> f64 {
        self.step(feature, -1.0)
    }

    fn step(&mut self, feature: Feature, direction: f64) -> f64 {
        let spec = FieldSpec::of(feature);
        let current = self
            .draft
            .get(feature)
            .or(spec.default)
            .unwrap_or(spec.min);
        let next = spec.snap(current + direction * spec.step);
        self.set(feature, next)
    }

    pub fn clear(&mut self, feature: Feature) {
        self.draft.values[feature.index()] = None;
    }

    /// Back to the declared defaults
    pub fn reset(&mut self) {
        self.draft = Draft::default();
    }
}
