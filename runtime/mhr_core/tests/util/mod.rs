use mhr_core::{Feature, InputForm, PredictionPipeline, FEATURE_COLUMNS};
use mhr_model::{
    Artifacts, Classifier, EncoderArtifact, Estimator, LabelDecoder, RawLabel, Scaler, Tree,
};

/// Three-level tree over standardized features:
/// blood sugar > 200 or systolic > 140 is high risk, age > 35 is mid risk.
pub fn risk_tree() -> Classifier {
    Classifier {
        classes: vec![RawLabel::Number(0.0), RawLabel::Number(1.0), RawLabel::Number(2.0)],
        n_features: Some(6),
        estimator: Estimator::DecisionTree {
            tree: Tree {
                children_left: vec![1, 3, -1, 5, -1, -1, -1],
                children_right: vec![2, 4, -1, 6, -1, -1, -1],
                feature: vec![3, 1, -2, 0, -2, -2, -2],
                threshold: vec![0.7247, 1.4565, -2.0, 0.3808, -2.0, -2.0, -2.0],
                value: vec![
                    vec![83.0, 145.0, 91.0],
                    vec![43.0, 143.0, 86.0],
                    vec![40.0, 2.0, 5.0],
                    vec![13.0, 140.0, 80.0],
                    vec![30.0, 3.0, 6.0],
                    vec![5.0, 120.0, 20.0],
                    vec![8.0, 20.0, 60.0],
                ],
            },
        },
    }
}

pub fn scaler() -> Scaler {
    Scaler::Standard {
        mean: vec![29.87, 113.2, 76.46, 157.1, 98.67, 74.3],
        scale: vec![13.47, 18.4, 13.88, 59.2, 1.37, 8.08],
        feature_names: Some(FEATURE_COLUMNS.iter().map(|c| c.to_string()).collect()),
    }
}

pub fn ordinal_decoder() -> LabelDecoder {
    LabelDecoder::from_artifact(EncoderArtifact::Ordinal {
        categories: vec![vec![
            "high risk".into(),
            "low risk".into(),
            "mid risk".into(),
        ]],
    })
    .expect("decoder")
}

pub fn pipeline_with(decoder: LabelDecoder) -> PredictionPipeline {
    let _ = env_logger::builder().is_test(true).try_init();
    let artifacts =
        Artifacts::from_parts(scaler(), risk_tree(), decoder, &FEATURE_COLUMNS).expect("artifacts");
    PredictionPipeline::new(artifacts)
}

pub fn pipeline() -> PredictionPipeline {
    pipeline_with(ordinal_decoder())
}

/// Fill every field of `form` from (age, systolic, diastolic, sugar, temp, heart rate)
pub fn fill(form: &mut InputForm, values: [f64; 6]) {
    for (feature, value) in Feature::ALL.into_iter().zip(values) {
        form.set(feature, value);
    }
}
