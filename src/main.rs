//! profile-form CLI
//!
//! Fill in employee and user-profile forms in the terminal, or apply
//! field assignments from the command line.

use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use tracing::{warn, Level};

use profile_form::assign::parse_assignment;
use profile_form::config::{load_config, load_config_from, AppConfig};
use profile_form::logging::{self, default_log_file, LogTarget};
use profile_form::reducer::{FormReducer, ReducerMode};
use profile_form::report::{format_schema, format_submission};
use profile_form::schema::Schema;
use profile_form::submit::{submit, LogSink, MemorySink, SubmissionResult, WriterSink};
use profile_form::tui::run::run;
use profile_form::tui::state::App;
use profile_form::types::{FormVariant, OutputFormat};

#[derive(Parser)]
#[command(name = "profile-form")]
#[command(about = "Fill in employee and user-profile forms")]
#[command(version)]
struct Cli {
    /// More log output (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Config file (default: <config dir>/profile-form/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fill in a form interactively
    Fill {
        #[command(flatten)]
        form: FormArgs,
    },

    /// Apply field assignments to a fresh form and submit it
    Apply {
        #[command(flatten)]
        form: FormArgs,

        /// Field assignment, e.g. --set fullName="Tran Thi B" (repeatable)
        #[arg(long = "set", value_name = "FIELD=VALUE")]
        assignments: Vec<String>,
    },

    /// Print the fields of a form
    Schema {
        /// Form variant
        #[arg(long, value_enum)]
        variant: Option<VariantArg>,

        /// Output format
        #[arg(long, value_enum)]
        format: Option<OutputFormatArg>,
    },
}

#[derive(Args)]
struct FormArgs {
    /// Form variant
    #[arg(long, value_enum)]
    variant: Option<VariantArg>,

    /// Reject unknown fields and mismatched input kinds
    #[arg(long)]
    strict: bool,

    /// Output format for submissions
    #[arg(long, value_enum)]
    format: Option<OutputFormatArg>,
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum VariantArg {
    Employee,
    Profile,
}

impl From<VariantArg> for FormVariant {
    fn from(arg: VariantArg) -> Self {
        match arg {
            VariantArg::Employee => FormVariant::Employee,
            VariantArg::Profile => FormVariant::Profile,
        }
    }
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum OutputFormatArg {
    Human,
    Json,
}

impl From<OutputFormatArg> for OutputFormat {
    fn from(arg: OutputFormatArg) -> Self {
        match arg {
            OutputFormatArg::Human => OutputFormat::Human,
            OutputFormatArg::Json => OutputFormat::Json,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = load_settings(cli.config.as_ref()).and_then(|config| {
        let level = log_level(&config, cli.verbose);
        match cli.command {
            Commands::Fill { form } => cmd_fill(Settings::resolve(&config, &form), level, config.log_file),
            Commands::Apply { form, assignments } => {
                cmd_apply(Settings::resolve(&config, &form), level, &assignments)
            }
            Commands::Schema { variant, format } => cmd_schema(
                variant.map_or(config.variant, Into::into),
                format.map_or(config.format, Into::into),
            ),
        }
    });

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

// ============================================================================
// SETTINGS RESOLUTION
// ============================================================================

/// Effective options for one form command: flags over config file.
struct Settings {
    variant: FormVariant,
    mode: ReducerMode,
    format: OutputFormat,
}

impl Settings {
    fn resolve(config: &AppConfig, args: &FormArgs) -> Self {
        let mode = if args.strict { ReducerMode::Strict } else { config.reducer_mode() };
        Settings {
            variant: args.variant.map_or(config.variant, Into::into),
            mode,
            format: args.format.map_or(config.format, Into::into),
        }
    }

    fn reducer(&self) -> FormReducer {
        FormReducer::new(Schema::for_variant(self.variant), self.mode)
    }
}

fn load_settings(path: Option<&PathBuf>) -> Result<AppConfig, String> {
    match path {
        Some(p) => load_config_from(p),
        None => load_config(),
    }
    .map_err(|e| e.to_string())
}

/// `-v` raises the configured level; it never lowers it.
fn log_level(config: &AppConfig, verbose: u8) -> Level {
    let configured = Level::from(config.log_level);
    let requested = match verbose {
        0 => return configured,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    // tracing orders levels by verbosity: TRACE > DEBUG > INFO.
    configured.max(requested)
}

// ============================================================================
// COMMAND HANDLERS
// ============================================================================

fn cmd_fill(settings: Settings, level: Level, log_file: Option<PathBuf>) -> Result<(), String> {
    let log_file = log_file.unwrap_or_else(default_log_file);
    logging::init(level, &LogTarget::File(log_file.clone()))
        .map_err(|e| format!("Cannot open log file {}: {}", log_file.display(), e))?;

    let mut app = App::new(settings.reducer());
    let mut collected = MemorySink::default();
    let mut sink = (LogSink, &mut collected);
    run(&mut app, &mut sink).map_err(|e| e.to_string())?;

    if collected.received.is_empty() {
        eprintln!("No form submitted.");
        return Ok(());
    }

    for submission in &collected.received {
        let text = format_submission(submission, settings.format).map_err(|e| e.to_string())?;
        println!("{}", text);
    }
    eprintln!("Log: {}", log_file.display());

    Ok(())
}

fn cmd_apply(settings: Settings, level: Level, assignments: &[String]) -> Result<(), String> {
    logging::init(level, &LogTarget::Stderr).map_err(|e| e.to_string())?;

    let reducer = settings.reducer();
    let mut state = reducer.initial_state();

    for raw in assignments {
        let change = parse_assignment(reducer.schema(), raw).map_err(|e| e.to_string())?;
        state = reducer.apply(&state, &change).map_err(|e| e.to_string())?;
    }

    // The reducer does not enforce required fields; report them only.
    for spec in reducer.schema().missing_required(&state) {
        warn!(field = spec.name, "required field is blank");
    }

    let stdout = io::stdout();
    let mut sink = (LogSink, WriterSink::new(stdout.lock(), settings.format));
    match submit(&state, settings.variant, &mut sink) {
        SubmissionResult::Delivered(_) => Ok(()),
        SubmissionResult::Rejected { error, .. } => Err(format!("Submission failed: {}", error)),
    }
}

fn cmd_schema(variant: FormVariant, format: OutputFormat) -> Result<(), String> {
    let schema = Schema::for_variant(variant);
    let text = format_schema(&schema, format).map_err(|e| e.to_string())?;
    print!("{}", text);
    if !text.ends_with('\n') {
        println!();
    }
    Ok(())
}
