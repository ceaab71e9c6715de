//! Line-oriented front end for the input form.
//!
//! Each line is one user interaction; the reply is the lines to print.

use std::fs;
use std::path::{Path, PathBuf};

use mhr_core::{Feature, FieldSpec, PipelineError, PredictionPipeline, Session, ValidationError};

use crate::ui;

const HELP: &[&str] = &[
    "commands:",
    "  set <field> <value>   fill in a field (value is clamped to its range)",
    "  up <field>            increase a field by one step",
    "  down <field>          decrease a field by one step",
    "  clear <field>         mark a field as not filled in",
    "  show                  show the current form",
    "  fields                list field keys, ranges and defaults",
    "  predict               run the prediction and record it",
    "  history               show previous predictions",
    "  export [file]         write the history as CSV",
    "  reset                 restore the form defaults",
    "  :help, :quit",
];

/// Outcome of one handled line
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Reply {
    pub lines: Vec<String>,
    pub exit: bool,
}

impl Reply {
    fn lines(lines: Vec<String>) -> Self {
        Self { lines, exit: false }
    }

    fn line(line: impl Into<String>) -> Self {
        Self::lines(vec![line.into()])
    }

    fn exit() -> Self {
        Self {
            lines: Vec::new(),
            exit: true,
        }
    }
}

pub struct FormRepl<'p> {
    pipeline: &'p PredictionPipeline,
    session: Session,
    export_file: PathBuf,
}

impl<'p> FormRepl<'p> {
    pub fn new(pipeline: &'p PredictionPipeline, export_file: impl Into<PathBuf>) -> Self {
        Self {
            pipeline,
            session: Session::new(),
            export_file: export_file.into(),
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn prompt(&self) -> &'static str {
        "mhr> "
    }

    pub fn banner(&self) -> Vec<String> {
        vec![
            ui::TITLE.to_string(),
            ui::FORM_HEADER.to_string(),
            "type :help for commands".to_string(),
        ]
    }

    pub fn handle_line(&mut self, line: &str) -> Reply {
        let mut words = line.split_whitespace();
        let Some(command) = words.next() else {
            return Reply::default();
        };
        let args: Vec<&str> = words.collect();

        match command {
            ":help" | "help" => Reply::lines(HELP.iter().map(|s| s.to_string()).collect()),
            ":q" | ":quit" | ":exit" | "quit" | "exit" => Reply::exit(),
            "set" => self.set(&args),
            "up" | "down" | "clear" => match parse_field(args.first().copied()) {
                Ok(feature) => self.adjust(command, feature),
                Err(e) => Reply::line(e),
            },
            "show" => Reply::lines(ui::form_lines(self.session.form())),
            "fields" => Reply::lines(ui::field_table()),
            "predict" => self.predict(),
            "history" => self.history(),
            "export" => {
                let path = args
                    .first()
                    .map(PathBuf::from)
                    .unwrap_or_else(|| self.export_file.clone());
                self.export(&path)
            }
            "reset" => {
                self.session.form_mut().reset();
                Reply::lines(ui::form_lines(self.session.form()))
            }
            other => Reply::line(format!("error: unknown command '{other}' (try :help)")),
        }
    }

    fn set(&mut self, args: &[&str]) -> Reply {
        let feature = match parse_field(args.first().copied()) {
            Ok(f) => f,
            Err(e) => return Reply::line(e),
        };
        let Some(raw) = args.get(1) else {
            return Reply::line("error: usage: set <field> <value>");
        };
        let value: f64 = match raw.replace(',', ".").parse() {
            Ok(v) => v,
            Err(_) => return Reply::line(format!("error: '{raw}' is not a number")),
        };
        let stored = self.session.form_mut().set(feature, value);
        Reply::line(field_line(feature, stored))
    }

    fn adjust(&mut self, command: &str, feature: Feature) -> Reply {
        let form = self.session.form_mut();
        let stored = match command {
            "up" => form.step_up(feature),
            "down" => form.step_down(feature),
            _ => {
                form.clear(feature);
                return Reply::line(format!("{}: (kosong)", FieldSpec::of(feature).label));
            }
        };
        Reply::line(field_line(feature, stored))
    }

    fn predict(&mut self) -> Reply {
        let label = match self.session.submit(self.pipeline) {
            Ok(entry) => entry.result.label.clone(),
            Err(PipelineError::Validation(ValidationError::Incomplete { missing })) => {
                let keys: Vec<&str> = missing.iter().map(|f| f.key()).collect();
                return Reply::lines(vec![
                    ui::INCOMPLETE_WARNING.to_string(),
                    format!("missing: {}", keys.join(", ")),
                ]);
            }
            Err(e) => {
                log::error!("prediction failed: {e}");
                return Reply::line(format!("error: {e}"));
            }
        };
        let mut lines = vec![ui::result_banner(&label)];
        lines.extend(self.history().lines);
        Reply::lines(lines)
    }

    fn history(&self) -> Reply {
        let history = self.session.history();
        if history.is_empty() {
            return Reply::line("no predictions yet");
        }
        let mut lines = vec![ui::HISTORY_HEADER.to_string()];
        lines.extend(history.render().lines().map(str::to_string));
        Reply::lines(lines)
    }

    fn export(&self, path: &Path) -> Reply {
        let history = self.session.history();
        if history.is_empty() {
            return Reply::line("no predictions to export");
        }
        let written = history
            .export()
            .map_err(|e| e.to_string())
            .and_then(|bytes| fs::write(path, bytes).map_err(|e| e.to_string()));
        match written {
            Ok(()) => Reply::line(format!(
                "wrote {} rows to '{}'",
                history.len(),
                path.display()
            )),
            Err(e) => Reply::line(format!("error: failed to write '{}': {e}", path.display())),
        }
    }
}

fn parse_field(arg: Option<&str>) -> Result<Feature, String> {
    let Some(name) = arg else {
        return Err("error: missing field name (see 'fields')".to_string());
    };
    Feature::parse(name).ok_or_else(|| format!("error: unknown field '{name}' (see 'fields')"))
}

fn field_line(feature: Feature, value: f64) -> String {
    let spec = FieldSpec::of(feature);
    format!("{}: {}", spec.label, spec.format_value(value))
}
