//! One interactive session: the form being filled and the history so far.
//!
//! Created when the session starts and dropped when it ends; nothing
//! outlives it.

use log::info;

use crate::error::PipelineError;
use crate::form::InputForm;
use crate::history::{HistoryEntry, HistoryLog};
use crate::pipeline::PredictionPipeline;

#[derive(Debug, Clone, Default)]
pub struct Session {
    form: InputForm,
    history: HistoryLog,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn form(&self) -> &InputForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut InputForm {
        &mut self.form
    }

    pub fn history(&self) -> &HistoryLog {
        &self.history
    }

    /// Predict from the current form and record the outcome.
    ///
    /// Incomplete input leaves the history untouched. The form keeps its
    /// values either way.
    pub fn submit(&mut self, pipeline: &PredictionPipeline) -> Result<&HistoryEntry, PipelineError> {
        let (record, result) = pipeline.predict_draft(self.form.draft())?;
        info!(
            "prediction #{}: {}",
            self.history.len() + 1,
            result.label
        );
        Ok(self.history.append(record, result))
    }
}
