//! xlsx-records CLI - XLSX sheet extraction tool
//!
//! Prints the header, the table, or typed records of a workbook's first sheet.

use clap::{Parser, Subcommand};
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use serde_json::{Map, Value};
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use xlsx_records::{ExtractOptions, FieldKind, FieldValue, RecordMapper, Schema};

/// First-sheet XLSX extraction to JSON tables and records
#[derive(Parser)]
#[command(
    name = "xlsx-records",
    author = "iyulab",
    version,
    about = "Extract the first sheet of an XLSX workbook",
    long_about = "xlsx-records - XLSX sheet extraction tool.\n\n\
                  Reads the first worksheet, uses its first row as column names \
                  and prints the data as a JSON table or as typed records."
)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the column names of the first sheet
    Columns {
        /// Input file path
        input: PathBuf,
    },

    /// Convert the first sheet to a JSON table
    Table {
        /// Input file path
        input: PathBuf,

        /// Output file path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output compact JSON (no indentation)
        #[arg(long)]
        compact: bool,

        /// Keep "-" cells instead of emptying them
        #[arg(long)]
        keep_placeholder: bool,
    },

    /// Convert rows to JSON records with typed fields
    Records {
        /// Input file path
        input: PathBuf,

        /// Field declaration as COLUMN:KIND (kind: text, date, decimal, int)
        #[arg(short, long = "field", required = true, value_parser = parse_field)]
        fields: Vec<(String, FieldKind)>,

        /// Output file path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output compact JSON (no indentation)
        #[arg(long)]
        compact: bool,
    },

    /// Show version information
    Version,
}

fn parse_field(arg: &str) -> Result<(String, FieldKind), String> {
    let (name, kind) = arg
        .rsplit_once(':')
        .ok_or_else(|| format!("expected COLUMN:KIND, got '{}'", arg))?;
    let kind = FieldKind::from_name(kind)
        .ok_or_else(|| format!("unknown kind '{}' (use text, date, decimal or int)", kind))?;
    Ok((name.to_string(), kind))
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Columns { input } => {
            let columns = xlsx_records::column_names(&input)?;
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            for column in columns {
                writeln!(handle, "{}", column)?;
            }
        }

        Commands::Table {
            input,
            output,
            compact,
            keep_placeholder,
        } => {
            let pb = create_spinner("Reading sheet...");

            let mut options = ExtractOptions::new();
            if keep_placeholder {
                options = options.without_placeholder();
            }
            let table = xlsx_records::read_table_with_options(&input, &options)?;

            pb.set_message("Rendering to JSON...");
            let json = to_json(&table, compact)?;

            pb.finish_and_clear();
            write_output(output.as_ref(), &json)?;

            if let Some(path) = output {
                println!(
                    "{} Wrote {} rows to {}",
                    "✓".green().bold(),
                    table.row_count(),
                    path.display()
                );
            }
        }

        Commands::Records {
            input,
            fields,
            output,
            compact,
        } => {
            let pb = create_spinner("Reading sheet...");

            let table = xlsx_records::read_table(&input)?;
            let missing: Vec<&str> = fields
                .iter()
                .map(|(name, _)| name.as_str())
                .filter(|name| table.column_index(name).is_none())
                .collect();

            pb.set_message("Mapping records...");
            let schema = json_schema(&fields);
            let records = RecordMapper::new(&schema).map_rows(&table)?;
            let json = to_json(&records, compact)?;

            pb.finish_and_clear();
            if !missing.is_empty() {
                eprintln!(
                    "{} No column for: {}",
                    "!".yellow().bold(),
                    missing.join(", ")
                );
            }
            write_output(output.as_ref(), &json)?;

            if let Some(path) = output {
                println!(
                    "{} Wrote {} records to {}",
                    "✓".green().bold(),
                    records.len(),
                    path.display()
                );
            }
        }

        Commands::Version => {
            print_version();
        }
    }

    Ok(())
}

/// A schema that stores each declared column into a JSON object.
fn json_schema(fields: &[(String, FieldKind)]) -> Schema<Map<String, Value>> {
    fields
        .iter()
        .fold(Schema::default(), |schema, (name, kind)| {
            let key = name.clone();
            schema.value(name.as_str(), *kind, move |record, value| {
                record.insert(key.clone(), json_value(value));
            })
        })
}

fn json_value(value: FieldValue) -> Value {
    match value {
        FieldValue::DateTime(dt) => Value::String(dt.format("%Y-%m-%dT%H:%M:%S%.f").to_string()),
        FieldValue::Decimal(d) => Value::String(d.to_string()),
        FieldValue::Int32(n) => Value::from(n),
        FieldValue::Text(s) => Value::String(s),
    }
}

fn to_json<T: serde::Serialize + ?Sized>(
    value: &T,
    compact: bool,
) -> Result<String, serde_json::Error> {
    if compact {
        serde_json::to_string(value)
    } else {
        serde_json::to_string_pretty(value)
    }
}

fn print_version() {
    println!(
        "{} {}",
        "xlsx-records".green().bold(),
        env!("CARGO_PKG_VERSION")
    );
    println!("First-sheet XLSX extraction to tables and typed records");
}

fn create_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner()
        .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"])
        .template("{spinner:.blue} {msg}")
    {
        pb.set_style(style);
    }
    pb.set_message(message.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(100));
    pb
}

fn write_output(path: Option<&PathBuf>, content: &str) -> Result<(), Box<dyn std::error::Error>> {
    match path {
        Some(p) => {
            fs::write(p, content)?;
        }
        None => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            writeln!(handle, "{}", content)?;
        }
    }
    Ok(())
}
