//! Ordered prediction history for one session

use std::io;

use crate::error::ExportError;
use crate::pipeline::PredictionResult;
use crate::record::MeasurementRecord;

/// Heading of the label column
pub const RESULT_HEADING: &str = "Hasil Prediksi";

/// Export header row, in column order
pub const EXPORT_HEADER: [&str; 7] = [
    "Usia",
    "Sistolik",
    "Diastolik",
    "Gula Darah",
    "Suhu Tubuh",
    "Detak Jantung",
    RESULT_HEADING,
];

/// One stored prediction. Never mutated once appended.
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryEntry {
    pub record: MeasurementRecord,
    pub result: PredictionResult,
}

impl HistoryEntry {
    /// Cell values in `EXPORT_HEADER` order
    pub fn cells(&self) -> [String; 7] {
        let r = &self.record;
        [
            r.age.to_string(),
            r.systolic_bp.to_string(),
            r.diastolic_bp.to_string(),
            format_decimal(r.blood_sugar),
            format_decimal(r.body_temperature),
            r.heart_rate.to_string(),
            self.result.label.clone(),
        ]
    }
}

/// Append-only log of predictions, in insertion order
#[derive(Debug, Clone, Default)]
pub struct HistoryLog {
    entries: Vec<HistoryEntry>,
}

impl HistoryLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, record: MeasurementRecord, result: PredictionResult) -> &HistoryEntry {
        self.entries.push(HistoryEntry { record, result });
        &self.entries[self.entries.len() - 1]
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    /// Text table of all entries with a leading row index.
    ///
    /// Every cell is right-aligned to its column width; columns are
    /// separated by two spaces and each line ends with `\n`.
    pub fn render(&self) -> String {
        let rows: Vec<[String; 7]> = self.entries.iter().map(HistoryEntry::cells).collect();
        let index_width = self.entries.len().saturating_sub(1).to_string().len();

        let mut widths = EXPORT_HEADER.map(|h| h.chars().count());
        for row in &rows {
            for (w, cell) in widths.iter_mut().zip(row.iter()) {
                *w = (*w).max(cell.chars().count());
            }
        }

        let mut out = String::new();
        push_line(&mut out, "", index_width, EXPORT_HEADER.iter().copied(), &widths);
        for (i, row) in rows.iter().enumerate() {
            push_line(
                &mut out,
                &i.to_string(),
                index_width,
                row.iter().map(String::as_str),
                &widths,
            );
        }
        out
    }

    /// UTF-8 CSV with a header row and no index column
    pub fn export(&self) -> Result<Vec<u8>, ExportError> {
        self.export_to(Vec::new())
    }

    /// Write the same CSV into `out` and hand it back once flushed
    pub fn export_to<W: io::Write>(&self, out: W) -> Result<W, ExportError> {
        let mut writer = csv::Writer::from_writer(out);
        writer.write_record(EXPORT_HEADER)?;
        for entry in &self.entries {
            writer.write_record(entry.cells())?;
        }
        writer.flush().map_err(ExportError::Flush)?;
        writer.into_inner().map_err(|e| {
            ExportError::Flush(io::Error::new(e.error().kind(), e.error().to_string()))
        })
    }
}

fn push_line<'a>(
    out: &mut String,
    index: &str,
    index_width: usize,
    cells: impl Iterator<Item = &'a str>,
    widths: &[usize; 7],
) {
    out.push_str(&pad_left(index, index_width));
    for (cell, width) in cells.zip(widths.iter()) {
        out.push_str("  ");
        out.push_str(&pad_left(cell, *width));
    }
    out.push('\n');
}

fn pad_left(s: &str, width: usize) -> String {
    format!("{s:>width$}")
}

/// Decimal formatting that always keeps a fractional part (`90.0`, `98.6`)
pub fn format_decimal(value: f64) -> String {
    let s = value.to_string();
    if value.is_finite() && !s.contains('.') {
        format!("{s}.0")
    } else {
        s
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mhr_model::RawLabel;
    use pretty_assertions::assert_eq;

    fn entry(age: u32, label: &str) -> (MeasurementRecord, PredictionResult) {
        (
            MeasurementRecord {
                age,
                systolic_bp: 120,
                diastolic_bp: 80,
                blood_sugar: 90.0,
                body_temperature: 98.6,
                heart_rate: 75,
            },
            PredictionResult {
                label: label.to_uppercase(),
                raw: RawLabel::Number(1.0),
                decoded: true,
            },
        )
    }

    #[test]
    fn decimals_keep_a_fraction() {
        assert_eq!(format_decimal(90.0), "90.0");
        assert_eq!(format_decimal(98.6), "98.6");
        assert_eq!(format_decimal(0.0), "0.0");
        assert_eq!(format_decimal(123.45), "123.45");
    }

    #[test]
    fn render_single_entry() {
        let mut log = HistoryLog::new();
        let (r, p) = entry(25, "low risk");
        log.append(r, p);
        let expected = concat!(
            "   Usia  Sistolik  Diastolik  Gula Darah  Suhu Tubuh  Detak Jantung  Hasil Prediksi\n",
            "0    25       120         80        90.0        98.6             75        LOW RISK\n",
        );
        assert_eq!(log.render(), expected);
    }

    #[test]
    fn export_has_header_and_rows_in_order() {
        let mut log = HistoryLog::new();
        for (age, label) in [(25, "low risk"), (41, "high risk")] {
            let (r, p) = entry(age, label);
            log.append(r, p);
        }
        let csv = String::from_utf8(log.export().unwrap()).unwrap();
        assert_eq!(
            csv,
            "Usia,Sistolik,Diastolik,Gula Darah,Suhu Tubuh,Detak Jantung,Hasil Prediksi\n\
             25,120,80,90.0,98.6,75,LOW RISK\n\
             41,120,80,90.0,98.6,75,HIGH RISK\n"
        );
    }

    #[test]
    fn empty_log_exports_header_only() {
        let log = HistoryLog::new();
        assert!(log.is_empty());
        let csv = String::from_utf8(log.export().unwrap()).unwrap();
        assert_eq!(
            csv,
            "Usia,Sistolik,Diastolik,Gula Darah,Suhu Tubuh,Detak Jantung,Hasil Prediksi\n"
        );
    }

    #[derive(Debug)]
    struct Unwritable;

    impl io::Write for Unwritable {
        fn write(&mut self, _: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "disk full"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn failed_flush_keeps_the_io_error() {
        let mut log = HistoryLog::new();
        let (r, p) = entry(25, "low risk");
        log.append(r, p);
        let err = log.export_to(Unwritable).unwrap_err();
        let source = std::error::Error::source(&err)
            .and_then(|s| s.downcast_ref::<io::Error>())
            .expect("io source");
        assert_eq!(source.kind(), io::ErrorKind::BrokenPipe);
        assert!(err.to_string().contains("disk full"));
    }

    #[test]
    fn render_and_export_are_idempotent() {
        let mut log = HistoryLog::new();
        let (r, p) = entry(30, "mid risk");
        log.append(r, p);
        assert_eq!(log.render(), log.render());
        assert_eq!(log.export().unwrap(), log.export().unwrap());
        assert_eq!(log.len(), 1);
    }
}
