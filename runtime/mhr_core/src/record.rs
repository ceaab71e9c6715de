//! Measurement records and the fixed feature order

use std::fmt;

/// One of the six maternal health measurements
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Feature {
    Age,
    SystolicBp,
    DiastolicBp,
    BloodSugar,
    BodyTemperature,
    HeartRate,
}

/// Column order the scaler and classifier were fit with. Load-bearing.
pub const FEATURE_COLUMNS: [&str; 6] = [
    "Age",
    "SystolicBP",
    "DiastolicBP",
    "BS",
    "BodyTemp",
    "HeartRate",
];

impl Feature {
    pub const ALL: [Feature; 6] = [
        Feature::Age,
        Feature::SystolicBp,
        Feature::DiastolicBp,
        Feature::BloodSugar,
        Feature::BodyTemperature,
        Feature::HeartRate,
    ];

    /// Position in the feature row
    pub fn index(self) -> usize {
        self as usize
    }

    /// Column name used by the model artifacts
    pub fn column(self) -> &'static str {
        FEATURE_COLUMNS[self.index()]
    }

    /// Column heading in the history table and CSV export
    pub fn heading(self) -> &'static str {
        match self {
            Feature::Age => "Usia",
            Feature::SystolicBp => "Sistolik",
            Feature::DiastolicBp => "Diastolik",
            Feature::BloodSugar => "Gula Darah",
            Feature::BodyTemperature => "Suhu Tubuh",
            Feature::HeartRate => "Detak Jantung",
        }
    }

    /// Short key used on the command line
    pub fn key(self) -> &'static str {
        match self {
            Feature::Age => "age",
            Feature::SystolicBp => "systolic",
            Feature::DiastolicBp => "diastolic",
            Feature::BloodSugar => "blood_sugar",
            Feature::BodyTemperature => "body_temp",
            Feature::HeartRate => "heart_rate",
        }
    }

    /// Resolve a key, column name or heading, case-insensitively
    pub fn parse(s: &str) -> Option<Feature> {
        let s = s.trim();
        let normalized = s.to_ascii_lowercase().replace('-', "_");
        Feature::ALL.into_iter().find(|f| {
            normalized == f.key()
                || s.eq_ignore_ascii_case(f.column())
                || s.eq_ignore_ascii_case(f.heading())
        })
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.column())
    }
}

/// A complete set of six readings
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeasurementRecord {
    /// years
    pub age: u32,
    /// mmHg
    pub systolic_bp: u32,
    /// mmHg
    pub diastolic_bp: u32,
    /// mg/dL
    pub blood_sugar: f64,
    /// °F
    pub body_temperature: f64,
    /// bpm
    pub heart_rate: u32,
}

impl MeasurementRecord {
    pub fn value(&self, feature: Feature) -> f64 {
        match feature {
            Feature::Age => self.age as f64,
            Feature::SystolicBp => self.systolic_bp as f64,
            Feature::DiastolicBp => self.diastolic_bp as f64,
            Feature::BloodSugar => self.blood_sugar,
            Feature::BodyTemperature => self.body_temperature,
            Feature::HeartRate => self.heart_rate as f64,
        }
    }

    /// The single feature row, in `FEATURE_COLUMNS` order
    pub fn features(&self) -> [f64; 6] {
        Feature::ALL.map(|f| self.value(f))
    }
}
