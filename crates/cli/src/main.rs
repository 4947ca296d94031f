// Rollcall CLI - reconcile a webinar roster against a session log

mod exit_codes;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use chrono::NaiveDate;
use clap::{ArgAction, Parser, Subcommand};
use rollcall_io::FileKind;
use rollcall_recon::{ReconConfig, ReconInput, ReconResult, Table};

use exit_codes::{
    recon_exit_code, EXIT_ERROR, EXIT_INVALID_CONFIG, EXIT_IO, EXIT_SUCCESS, EXIT_USAGE,
};

/// Default output file name
const DEFAULT_OUTPUT: &str = "Updated_Table1.xlsx";

/// Worksheet name used for .xlsx output
const OUTPUT_SHEET: &str = "Updated Table1";

#[derive(Parser)]
#[command(name = "rollcall")]
#[command(about = "Reconcile a webinar roster against a session attendance log")]
#[command(version)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug). RUST_LOG overrides.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Annotate the roster with time in session and training status
    #[command(after_help = "\
Examples:
  rollcall run --roster Table1.xlsx --session Table2.xlsx
  rollcall run --roster roster.csv --session log.csv -o result.csv
  rollcall run --roster Table1.xlsx --session Table2.xlsx --as-of 2026-01-31
  rollcall run --roster Table1.xlsx --session Table2.xlsx --config webinar.toml --json")]
    Run {
        /// Roster file (Table1): .xlsx, .xls, .xlsb, .ods, .csv or .tsv
        #[arg(long, value_name = "FILE")]
        roster: PathBuf,

        /// Session log file (Table2)
        #[arg(long, value_name = "FILE")]
        session: PathBuf,

        /// Output file (.xlsx, .csv or .tsv)
        #[arg(long, short = 'o', value_name = "FILE", default_value = DEFAULT_OUTPUT)]
        output: PathBuf,

        /// TOML config (thresholds, column names)
        #[arg(long, value_name = "TOML", env = "ROLLCALL_CONFIG")]
        config: Option<PathBuf>,

        /// Reference date for the stale-entry check (default: today)
        #[arg(long, value_name = "YYYY-MM-DD")]
        as_of: Option<NaiveDate>,

        /// Sheet to read from spreadsheet inputs (default: first sheet)
        #[arg(long, value_name = "NAME")]
        sheet: Option<String>,

        /// Print the full result as JSON to stdout
        #[arg(long)]
        json: bool,
    },

    /// Validate a config file without running
    #[command(after_help = "\
Examples:
  rollcall validate webinar.toml")]
    Validate {
        /// Path to the .toml config file
        config: PathBuf,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Run {
            roster,
            session,
            output,
            config,
            as_of,
            sheet,
            json,
        } => cmd_run(roster, session, output, config, as_of, sheet, json),
        Commands::Validate { config } => cmd_validate(config),
    };

    match result {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(CliError { code, message, hint }) => {
            if !message.is_empty() {
                eprintln!("error: {}", message);
            }
            if let Some(hint) = hint {
                eprintln!("hint:  {}", hint);
            }
            ExitCode::from(code)
        }
    }
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();
}

#[derive(Debug)]
pub struct CliError {
    pub code: u8,
    pub message: String,
    pub hint: Option<String>,
}

impl CliError {
    pub fn args(msg: impl Into<String>) -> Self {
        Self { code: EXIT_USAGE, message: msg.into(), hint: None }
    }

    pub fn io(msg: impl Into<String>) -> Self {
        Self { code: EXIT_IO, message: msg.into(), hint: None }
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self { code: EXIT_INVALID_CONFIG, message: msg.into(), hint: None }
    }

    pub fn general(msg: impl Into<String>) -> Self {
        Self { code: EXIT_ERROR, message: msg.into(), hint: None }
    }

    /// Create error from an engine error with the matching exit code.
    pub fn recon(err: rollcall_recon::ReconError) -> Self {
        let code = recon_exit_code(&err);
        let hint = match &err {
            rollcall_recon::ReconError::MissingColumn { .. } => Some(
                "column names are exact and case-sensitive; remap them under [roster.columns] or [session.columns]"
                    .to_string(),
            ),
            _ => None,
        };
        Self { code, message: err.to_string(), hint }
    }

    /// Add a hint to an existing error.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

// ============================================================================
// run
// ============================================================================

fn cmd_run(
    roster_path: PathBuf,
    session_path: PathBuf,
    output_path: PathBuf,
    config_path: Option<PathBuf>,
    as_of: Option<NaiveDate>,
    sheet: Option<String>,
    json_output: bool,
) -> Result<(), CliError> {
    let mut config = match config_path {
        Some(ref path) => load_config(path)?,
        None => ReconConfig::default(),
    };
    if let Some(date) = as_of {
        config.escalation.reference_date = Some(date);
    }

    // Reject unwritable output kinds before reading anything
    check_output_path(&output_path)?;

    let roster = read_input(&roster_path, sheet.as_deref())?;
    let session_log = read_input(&session_path, sheet.as_deref())?;
    let input = ReconInput { roster, session_log };

    let result = rollcall_recon::run(&config, &input).map_err(CliError::recon)?;

    rollcall_io::write_table(&result.to_table(), &output_path, OUTPUT_SHEET)
        .map_err(CliError::io)?;
    eprintln!("wrote {}", output_path.display());

    if json_output {
        let json_str = serde_json::to_string_pretty(&result)
            .map_err(|e| CliError::general(format!("JSON serialization error: {e}")))?;
        println!("{json_str}");
    }

    print_summary(&result);
    Ok(())
}

fn load_config(path: &Path) -> Result<ReconConfig, CliError> {
    let config_str = std::fs::read_to_string(path)
        .map_err(|e| CliError::io(format!("cannot read config {}: {e}", path.display())))?;
    ReconConfig::from_toml(&config_str).map_err(|e| CliError::config(e.to_string()))
}

fn check_output_path(path: &Path) -> Result<(), CliError> {
    let kind = FileKind::from_path(path).map_err(CliError::args)?;
    let is_xlsx = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("xlsx"));
    if kind == FileKind::Spreadsheet && !is_xlsx {
        return Err(CliError::args(format!(
            "{}: cannot write this spreadsheet format",
            path.display()
        ))
        .with_hint("use an .xlsx, .csv or .tsv output path"));
    }
    Ok(())
}

fn read_input(path: &Path, sheet: Option<&str>) -> Result<Table, CliError> {
    if !path.exists() {
        return Err(CliError::io(format!("{}: no such file", path.display())));
    }
    FileKind::from_path(path).map_err(CliError::args)?;
    let table = rollcall_io::read_table(path, sheet).map_err(CliError::io)?;
    log::info!(
        "{}: {} row(s), columns: {}",
        path.display(),
        table.len(),
        table.headers.join(", ")
    );
    Ok(table)
}

fn print_summary(result: &ReconResult) {
    let s = &result.summary;
    eprintln!(
        "reconciled {} row(s): {} by email, {} by name, {} unmatched",
        s.total_rows, s.matched_by_email, s.matched_by_name, s.unmatched,
    );
    for (label, count) in &s.status_counts {
        eprintln!("  {label}: {count}");
    }
    if result.meta.escalation_enabled {
        eprintln!(
            "escalated {} stale row(s) as of {}",
            s.escalated, result.meta.reference_date
        );
    } else {
        eprintln!("no entry-date column; stale-entry check skipped");
    }
}

// ============================================================================
// validate
// ============================================================================

fn cmd_validate(config_path: PathBuf) -> Result<(), CliError> {
    let config = load_config(&config_path)?;
    eprintln!(
        "valid: '{}' (name threshold {}, complete at {} minutes, stale after {} days)",
        config.name,
        config.matching.name_threshold,
        config.status.complete_minutes,
        config.escalation.stale_after_days,
    );
    Ok(())
}
