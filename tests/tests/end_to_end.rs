use std::fs;

use mhr_core::{Feature, PipelineError, Session, ValidationError, FIELD_SPECS};
use mhr_model::ArtifactPaths;
use pretty_assertions::assert_eq;
use tests::{fill, shipped_artifacts, shipped_pipeline};

const LABELS: [&str; 3] = ["HIGH RISK", "LOW RISK", "MID RISK"];

#[test]
fn example_scenario_from_intake_form() {
    let _ = env_logger::builder().is_test(true).try_init();
    let pipeline = shipped_pipeline();
    let mut session = Session::new();
    fill(session.form_mut(), [25.0, 120.0, 80.0, 90.0, 98.6, 75.0]);

    let label = session.submit(&pipeline).expect("prediction").result.label.clone();
    assert_eq!(label, "LOW RISK");
    assert_eq!(session.history().len(), 1);

    let csv = String::from_utf8(session.history().export().unwrap()).unwrap();
    assert_eq!(
        csv,
        "Usia,Sistolik,Diastolik,Gula Darah,Suhu Tubuh,Detak Jantung,Hasil Prediksi\n\
         25,120,80,90.0,98.6,75,LOW RISK\n"
    );
}

#[test]
fn missing_age_creates_no_entry() {
    let pipeline = shipped_pipeline();
    let mut session = Session::new();
    fill(session.form_mut(), [25.0, 120.0, 80.0, 90.0, 98.6, 75.0]);
    session.form_mut().clear(Feature::Age);

    let err = session.submit(&pipeline).unwrap_err();
    assert!(matches!(
        err,
        PipelineError::Validation(ValidationError::Incomplete { .. })
    ));
    assert!(session.history().is_empty());
}

#[test]
fn every_valid_record_yields_one_label_and_one_entry() {
    let pipeline = shipped_pipeline();
    let mut session = Session::new();

    // sweep each field across its range while the others stay mid-range
    let midpoints: Vec<f64> = FIELD_SPECS
        .iter()
        .map(|s| s.clamp((s.min.max(1.0) + s.max) / 2.0))
        .collect();
    let mut expected_len = 0;
    for (i, spec) in FIELD_SPECS.iter().enumerate() {
        for value in [spec.min.max(1.0), (spec.min + spec.max) / 3.0, spec.max] {
            let mut values = [0.0; 6];
            values.copy_from_slice(&midpoints);
            values[i] = value;
            fill(session.form_mut(), values);

            let label = session.submit(&pipeline).expect("valid record").result.label.clone();
            expected_len += 1;
            assert!(LABELS.contains(&label.as_str()), "unexpected label {label}");
            assert_eq!(session.history().len(), expected_len);
        }
    }

    let bytes = session.history().export().unwrap();
    let mut reader = csv::Reader::from_reader(bytes.as_slice());
    let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
    assert_eq!(rows.len(), expected_len);
    for (row, entry) in rows.iter().zip(session.history().entries()) {
        assert_eq!(row[0].parse::<u32>().unwrap(), entry.record.age);
        assert_eq!(row[3].parse::<f64>().unwrap(), entry.record.blood_sugar);
        assert_eq!(&row[6], entry.result.label.as_str());
    }
}

#[test]
fn encoder_without_inverse_shows_raw_class() {
    let tmp = tempfile::tempdir().unwrap();
    let shipped = shipped_artifacts();
    let paths = ArtifactPaths::in_dir(tmp.path());
    fs::copy(&shipped.model, &paths.model).unwrap();
    fs::copy(&shipped.scaler, &paths.scaler).unwrap();
    fs::write(&paths.encoder, r#"{"kind":"frequency","counts":{"a":1}}"#).unwrap();

    let pipeline = mhr_core::PredictionPipeline::load(&paths).expect("load");
    assert!(!pipeline.artifacts().decoder().can_invert());

    let mut session = Session::new();
    fill(session.form_mut(), [25.0, 120.0, 80.0, 250.0, 98.6, 75.0]);
    let entry = session.submit(&pipeline).expect("prediction");
    assert_eq!(entry.result.label, "0");
    assert!(!entry.result.decoded);
}
