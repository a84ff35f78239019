//! `configurator` command-line front end.
//!
//! Reads a flat configuration file against a TOML schema and prints the
//! typed result as JSON on stdout. Logs go to stderr.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use thiserror::Error;

use configurator::config::{load_schema, ConfigError, Configurator, OptionalSet, SchemaError};
use configurator::observability::{init_logging, LogFormat};

#[derive(Parser)]
#[command(name = "configurator", version)]
#[command(about = "Read a flat configuration file against a typed schema", long_about = None)]
struct Cli {
    /// Configuration file to read.
    file: PathBuf,

    /// TOML schema with a [parameters] table of name = "type".
    #[arg(short, long, value_name = "SCHEMA")]
    schema: PathBuf,

    /// Additional optional parameter names (recorded, not enforced).
    #[arg(long = "optional", value_name = "NAME")]
    optional: Vec<String>,

    /// Pretty-print the JSON output.
    #[arg(long)]
    pretty: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Log output format.
    #[arg(long, value_enum, default_value_t = LogFormat::Human)]
    log_format: LogFormat,
}

/// Process exit codes.
struct Exit;

impl Exit {
    const CONFIG_ERROR: u8 = 2;
    const IO_ERROR: u8 = 3;
    const USAGE_ERROR: u8 = 64;
}

#[derive(Debug, Error)]
enum AppError {
    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("failed to encode output: {0}")]
    Json(#[from] serde_json::Error),
}

impl AppError {
    fn exit_code(&self) -> u8 {
        match self {
            AppError::Schema(SchemaError::Io { .. })
            | AppError::Config(ConfigError::FileNotFound { .. })
            | AppError::Config(ConfigError::Io { .. }) => Exit::IO_ERROR,
            AppError::Schema(SchemaError::Parse { .. })
            | AppError::Config(_)
            | AppError::Json(_) => Exit::CONFIG_ERROR,
        }
    }
}

fn run(cli: Cli) -> Result<String, AppError> {
    let schema_file = load_schema(&cli.schema)?;

    let optional: OptionalSet = schema_file
        .optional()
        .iter()
        .map(str::to_string)
        .chain(cli.optional)
        .collect();

    let mut configurator = Configurator::new(schema_file.parameters).with_optional(optional);
    let config = configurator.read(&cli.file)?;

    tracing::info!(
        file = %cli.file.display(),
        parameters = config.len(),
        "Configuration read"
    );

    let output = if cli.pretty {
        serde_json::to_string_pretty(&config)?
    } else {
        serde_json::to_string(&config)?
    };
    Ok(output)
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            // --help and --version are not failures.
            return if e.use_stderr() {
                ExitCode::from(Exit::USAGE_ERROR)
            } else {
                ExitCode::SUCCESS
            };
        }
    };
    init_logging(cli.log_format, cli.verbose);

    match run(cli) {
        Ok(output) => {
            println!("{}", output);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(e.exit_code())
        }
    }
}
