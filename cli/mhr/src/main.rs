use std::fs;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use mhr::config::{load_config, Config};
use mhr::repl::FormRepl;
use mhr::{fill_form, ui};
use mhr_core::{PipelineError, PredictionPipeline, Session};
use mhr_model::ArtifactError;

#[derive(Debug, Parser)]
#[command(
    name = "mhr",
    version,
    about = "Maternal health risk screening from six vital-sign readings",
    long_about = "mhr predicts a pregnancy health risk category from six readings:\n\
        age, systolic and diastolic blood pressure, blood sugar, body temperature\n\
        and heart rate. A scaler, a classifier and a label encoder are loaded once\n\
        from JSON artifacts (see mhr.toml).\n\n\
        EXAMPLES:\n\
        \n  mhr fields                                     List form fields and ranges\n\
        \n  mhr predict --age 25 --systolic 120 --diastolic 80 \\\n      --blood-sugar 90 --heart-rate 75     One prediction\n\
        \n  mhr session                                    Interactive form with history"
)]
struct Cli {
    /// Increase verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Configuration file (default: ./mhr.toml when present)
    #[arg(long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List the form fields with their ranges, defaults and steps
    Fields,
    /// Predict the risk category for one set of readings
    Predict(PredictArgs),
    /// Start an interactive form session with prediction history
    Session,
}

#[derive(Debug, Args, Clone, Default)]
struct PredictArgs {
    /// Age in years (0-60)
    #[arg(long)]
    age: Option<u32>,

    /// Systolic blood pressure in mmHg (0-200)
    #[arg(long)]
    systolic: Option<u32>,

    /// Diastolic blood pressure in mmHg (0-140)
    #[arg(long)]
    diastolic: Option<u32>,

    /// Blood sugar in mg/dL (0-500)
    #[arg(long)]
    blood_sugar: Option<f64>,

    /// Body temperature in °F (80-110, default 98.6)
    #[arg(long)]
    body_temp: Option<f64>,

    /// Heart rate in bpm (0-180)
    #[arg(long)]
    heart_rate: Option<u32>,

    /// Also write the result as CSV to FILE
    #[arg(long, value_name = "FILE")]
    export: Option<PathBuf>,
}

impl PredictArgs {
    fn values(&self) -> [Option<f64>; 6] {
        [
            self.age.map(f64::from),
            self.systolic.map(f64::from),
            self.diastolic.map(f64::from),
            self.blood_sugar,
            self.body_temp,
            self.heart_rate.map(f64::from),
        ]
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .try_init();
}

fn load_pipeline(config: &Config) -> Result<PredictionPipeline, ArtifactError> {
    Ok(PredictionPipeline::load(&config.artifact_paths())?.with_policy(config.policy()))
}

fn run_fields() -> i32 {
    for line in ui::field_table() {
        println!("{line}");
    }
    0
}

fn run_predict(config: &Config, args: &PredictArgs) -> i32 {
    let pipeline = match load_pipeline(config) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("error: {e}");
            return 2;
        }
    };

    let mut session = Session::new();
    fill_form(session.form_mut(), args.values());
    match session.submit(&pipeline) {
        Ok(entry) => println!("{}", ui::result_banner(&entry.result.label)),
        Err(PipelineError::Validation(e)) => {
            eprintln!("{}", ui::INCOMPLETE_WARNING);
            eprintln!("{e}");
            return 1;
        }
        Err(e) => {
            eprintln!("error: {e}");
            return 2;
        }
    }

    if let Some(path) = &args.export {
        let written = fs::File::create(path)
            .map_err(|e| e.to_string())
            .and_then(|file| {
                session
                    .history()
                    .export_to(file)
                    .map(drop)
                    .map_err(|e| e.to_string())
            });
        if let Err(e) = written {
            eprintln!("error: failed to write '{}': {e}", path.display());
            return 2;
        }
        log::info!("exported history to '{}'", path.display());
    }
    0
}

fn run_session(config: &Config) -> i32 {
    use rustyline::error::ReadlineError;
    use rustyline::Editor;

    let pipeline = match load_pipeline(config) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("error: {e}");
            return 2;
        }
    };
    let mut rl = match Editor::<(), rustyline::history::DefaultHistory>::new() {
        Ok(e) => e,
        Err(e) => {
            eprintln!("error: failed to initialize session: {e}");
            return 2;
        }
    };

    let mut repl = FormRepl::new(&pipeline, config.export.file_name.clone());
    for line in repl.banner() {
        println!("{line}");
    }
    loop {
        match rl.readline(repl.prompt()) {
            Ok(line) => {
                let trimmed = line.trim();
                if !trimmed.is_empty() {
                    let _ = rl.add_history_entry(trimmed);
                }
                let reply = repl.handle_line(&line);
                for l in reply.lines {
                    println!("{l}");
                }
                if reply.exit {
                    return 0;
                }
            }
            Err(ReadlineError::Interrupted) => continue,
            Err(ReadlineError::Eof) => return 0,
            Err(e) => {
                eprintln!("error: session failed: {e}");
                return 2;
            }
        }
    }
}

fn run_cli() -> i32 {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let config = match load_config(cli.config.as_deref(), &cwd) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("error: {e}");
            return 2;
        }
    };

    match &cli.command {
        Command::Fields => run_fields(),
        Command::Predict(args) => run_predict(&config, args),
        Command::Session => run_session(&config),
    }
}

fn main() {
    std::process::exit(run_cli());
}
