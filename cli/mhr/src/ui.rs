//! User-facing text

use mhr_core::{FieldSpec, InputForm, FIELD_SPECS};

pub const TITLE: &str = "Aplikasi Prediksi Risiko Kesehatan Kehamilan";
pub const FORM_HEADER: &str = "Silakan Masukkan Data Kesehatan Ibu";
pub const INCOMPLETE_WARNING: &str =
    "⚠️ Silakan isi semua data dengan nilai yang valid terlebih dahulu.";
pub const HISTORY_HEADER: &str = "Riwayat Prediksi Sebelumnya";

pub fn result_banner(label: &str) -> String {
    format!("Hasil Prediksi: {label}")
}

fn range(spec: &FieldSpec) -> String {
    format!(
        "{}..={}",
        spec.format_value(spec.min),
        spec.format_value(spec.max)
    )
}

/// The declared fields: key, label, range, default and step
pub fn field_table() -> Vec<String> {
    let mut out = vec![format!(
        "{:<12} {:<32} {:<14} {:<8} {}",
        "key", "label", "range", "default", "step"
    )];
    for spec in &FIELD_SPECS {
        let default = spec
            .default
            .map(|d| spec.format_value(d))
            .unwrap_or_else(|| "-".to_string());
        out.push(format!(
            "{:<12} {:<32} {:<14} {:<8} {}",
            spec.feature.key(),
            spec.label,
            range(spec),
            default,
            spec.step
        ));
    }
    out
}

/// Current form values, one line per field
pub fn form_lines(form: &InputForm) -> Vec<String> {
    FIELD_SPECS
        .iter()
        .map(|spec| {
            let value = form
                .value(spec.feature)
                .map(|v| spec.format_value(v))
                .unwrap_or_else(|| "(kosong)".to_string());
            format!("{:<32} {value}", spec.label)
        })
        .collect()
}
