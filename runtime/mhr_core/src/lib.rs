//! Maternal health risk screening: the input form, the prediction
//! pipeline and the per-session history log.

pub mod error;
pub mod form;
pub mod history;
pub mod pipeline;
pub mod record;
pub mod session;

pub use error::{ExportError, PipelineError, ValidationError};
pub use form::{Draft, FieldKind, FieldSpec, InputForm, ValidationPolicy, FIELD_SPECS};
pub use history::{format_decimal, HistoryEntry, HistoryLog, EXPORT_HEADER, RESULT_HEADING};
pub use pipeline::{PredictionPipeline, PredictionResult};
pub use record::{Feature, MeasurementRecord, FEATURE_COLUMNS};
pub use session::Session;
