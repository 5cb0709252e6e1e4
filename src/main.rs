//! Ala Hash - Main entrypoint.
//!
//! Loads configuration, initializes logging and runs one of the
//! subcommands: loading a JSON document of key/value pairs into the hash
//! table, validating configuration, or writing a default configuration file.

use std::fs;
use std::path::{Path, PathBuf};

use ala_hash_lib::config::{AlaConfig, ConfigLoader, LogConfig, ENV_PREFIX};
use ala_hash_lib::data_structures::ala_hash_table::{AlaHashTable, Key, ProbingMode};
use ala_hash_lib::error::{AlaError, AlaResult};
use anyhow::Context;
use clap::{Args as ClapArgs, Parser, Subcommand};
use serde_json::Value;
use tracing::{info, warn};

/// Command line arguments for Ala Hash.
#[derive(Parser, Debug)]
#[clap(name = "Ala Hash", version, author, about)]
struct Args {
    /// Path to configuration file
    #[clap(short, long, value_parser)]
    config: Option<PathBuf>,

    /// Trace every probe and resize decision
    #[clap(long)]
    debug: bool,

    /// Command to execute
    #[clap(subcommand)]
    command: Command,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Command {
    /// Load key/value pairs from a JSON file into a table
    Load(LoadArgs),

    /// Validate the configuration file
    Validate,

    /// Generate a default configuration file
    GenConfig {
        /// Path to output configuration file
        #[clap(short, long, value_parser)]
        output: PathBuf,
    },
}

/// Arguments of the `load` subcommand.
#[derive(ClapArgs, Debug)]
struct LoadArgs {
    /// JSON file holding an array of [key, value] pairs or an object
    #[clap(short, long, value_parser)]
    input: PathBuf,

    /// Probing mode, overriding the configuration ("linear" or "double")
    #[clap(short, long)]
    mode: Option<ProbingMode>,

    /// Initial capacity, overriding the configuration
    #[clap(long)]
    capacity: Option<usize>,

    /// Keys to look up after loading (JSON literals; bare words are strings)
    #[clap(short, long)]
    lookup: Vec<String>,

    /// Keys to remove after loading (JSON literals; bare words are strings)
    #[clap(short, long)]
    remove: Vec<String>,

    /// Write the table items to this file as a JSON array of pairs
    #[clap(short, long, value_parser)]
    output: Option<PathBuf>,
}

/// Initialize the logging system.
fn init_logging(log: &LogConfig, debug: bool) -> AlaResult<()> {
    let default_level = if debug { "trace" } else { log.level.as_str() };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_line_number(log.source_location)
        .with_file(log.source_location);

    let result = if log.json {
        tracing::subscriber::set_global_default(builder.json().finish())
    } else {
        tracing::subscriber::set_global_default(builder.pretty().finish())
    };

    result.map_err(|e| AlaError::Custom(format!("Failed to set global tracing subscriber: {e}")))
}

/// Parses a command line key. JSON integers and strings are accepted; anything
/// that is not valid JSON is taken as a bare string.
fn parse_key(raw: &str) -> AlaResult<Key> {
    match serde_json::from_str::<Value>(raw) {
        Ok(value) => Ok(Key::try_from(&value)?),
        Err(_) => Ok(Key::from(raw)),
    }
}

/// Reads the entries of a JSON document. Arrays keep their row order, objects
/// are read in key order.
fn read_entries(path: &Path) -> AlaResult<Vec<(Key, Value)>> {
    let contents = fs::read_to_string(path)?;
    let document: Value = serde_json::from_str(&contents)?;

    match document {
        Value::Object(map) => Ok(map.into_iter().map(|(k, v)| (Key::Str(k), v)).collect()),
        Value::Array(rows) => rows
            .into_iter()
            .enumerate()
            .map(|(row, pair)| -> AlaResult<(Key, Value)> {
                match pair {
                    Value::Array(mut fields) if fields.len() == 2 => {
                        let value = fields.pop().unwrap_or(Value::Null);
                        let key = Key::try_from(&fields[0])?;
                        Ok((key, value))
                    }
                    _ => Err(AlaError::Custom(format!(
                        "Row {row} is not a [key, value] pair"
                    ))),
                }
            })
            .collect(),
        _ => Err(AlaError::Custom(
            "Expected a JSON array of [key, value] pairs or a JSON object".to_string(),
        )),
    }
}

/// Outcome of a `load` run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct LoadReport {
    /// Rows whose key was new to the table
    unique: usize,
    /// Rows that overwrote an earlier row with the same key
    duplicates: usize,
    /// Entries left after removals
    entries: usize,
    /// Final capacity
    capacity: usize,
}

fn run_load(config: &AlaConfig, args: LoadArgs, debug: bool) -> AlaResult<LoadReport> {
    let mut settings = config.table.clone();
    if let Some(mode) = args.mode {
        settings.probing_mode = mode;
    }
    if let Some(capacity) = args.capacity {
        settings.initial_capacity = capacity;
    }
    settings.trace_probes |= debug;

    let mut table: AlaHashTable<Key, Value> = AlaHashTable::with_config(settings.to_table_config());

    let entries = read_entries(&args.input)?;
    let mut unique = 0usize;
    let mut duplicates = 0usize;
    for (key, value) in entries {
        if table.put(key, value)?.is_some() {
            duplicates += 1;
        } else {
            unique += 1;
        }
    }
    info!(unique, duplicates, "Loaded {:?}", args.input);

    for raw in &args.remove {
        let key = parse_key(raw)?;
        match table.remove(&key) {
            Ok(_) => info!(key = %key, "Removed"),
            Err(e) => warn!(key = %key, error = %e, "Remove failed"),
        }
    }

    for raw in &args.lookup {
        let key = match parse_key(raw) {
            Ok(key) => key,
            Err(e) => {
                warn!(key = %raw, error = %e, "Skipping lookup");
                continue;
            }
        };
        match table.get(&key) {
            Ok(value) => info!(key = %key, value = %value, "Found"),
            Err(_) => info!(key = %key, "Not found"),
        }
    }

    info!(
        entries = table.len(),
        capacity = table.capacity(),
        load_factor = table.load_factor(),
        tombstones = table.tombstone_count(),
        probing_mode = %table.probing_mode(),
        "Table statistics"
    );

    if let Some(output) = &args.output {
        if let Some(parent) = output.parent() {
            fs::create_dir_all(parent)?;
        }
        let file = fs::File::create(output)?;
        serde_json::to_writer_pretty(file, &table.items())?;
        info!("Table items written to {:?}", output);
    }

    Ok(LoadReport {
        unique,
        duplicates,
        entries: table.len(),
        capacity: table.capacity(),
    })
}

/// Main entry point for the application.
fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let config_loader = ConfigLoader::new(args.config.as_deref(), ENV_PREFIX);
    let config = config_loader
        .load()
        .with_context(|| format!("Failed to load configuration from {:?}", args.config))?;

    init_logging(&config.log, args.debug)?;

    match args.command {
        Command::Load(load) => {
            let input = load.input.clone();
            let report = run_load(&config, load, args.debug)
                .with_context(|| format!("Failed to load {input:?}"))?;
            info!(
                unique = report.unique,
                duplicates = report.duplicates,
                entries = report.entries,
                capacity = report.capacity,
                "Load finished"
            );
        }
        Command::Validate => {
            info!("Configuration validated successfully");
        }
        Command::GenConfig { output } => {
            info!("Generating default configuration");
            let default_config = AlaConfig::default();

            if let Some(parent) = output.parent() {
                fs::create_dir_all(parent).map_err(AlaError::Io)?;
            }

            let toml = toml::to_string_pretty(&default_config)
                .map_err(|e| AlaError::Custom(format!("Failed to serialize config: {e}")))?;

            fs::write(&output, toml).map_err(AlaError::Io)?;

            info!("Default configuration written to {:?}", output);
        }
    }

    Ok(())
}
