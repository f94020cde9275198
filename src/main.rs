//! Zircuit - Equivalent-Circuit Impedance Tables
//!
//! Parses a ZView ".mdl" equivalent-circuit model, evaluates its impedance
//! over a logarithmic frequency sweep and writes the resulting table.
//!
//! # Usage
//!
//! ```bash
//! zircuit model.mdl > model.dat
//! zircuit model.mdl --format csv --minus-imag -o model.csv
//! zircuit model.mdl --start 0.01 --stop 1e7 --points-per-decade 10
//! zircuit model.mdl --describe
//! ```

use std::io;
use std::path::PathBuf;
use std::str::FromStr;

use clap::Parser;
use log::LevelFilter;

use zircuit_core::{
    mdl, FrequencySweep, MappingValue, Result, ZircuitError, DEFAULT_F_START, DEFAULT_F_STOP,
    DEFAULT_PTS_PER_DECADE,
};

/// Output table format.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum OutputFormat {
    Zview,
    Csv,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "zview" => Ok(OutputFormat::Zview),
            "csv" => Ok(OutputFormat::Csv),
            other => Err(format!("unknown format '{other}' (expected 'zview' or 'csv')")),
        }
    }
}

/// Equivalent-circuit impedance table generator
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the equivalent-circuit model file (.mdl)
    #[arg(value_name = "MODEL_FILE")]
    model_file: PathBuf,

    /// Sweep start frequency in Hz
    #[arg(long, default_value_t = DEFAULT_F_START)]
    start: f64,

    /// Sweep stop frequency in Hz
    #[arg(long, default_value_t = DEFAULT_F_STOP)]
    stop: f64,

    /// Sweep density in points per decade
    #[arg(long, default_value_t = DEFAULT_PTS_PER_DECADE)]
    points_per_decade: usize,

    /// Output format: zview (tab separated, no header) or csv
    #[arg(long, default_value = "zview")]
    format: OutputFormat,

    /// Write the table to a file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Negate the imaginary column (and label it -Z_im in CSV headers)
    #[arg(long)]
    minus_imag: bool,

    /// Print the model's label and parameter mapping instead of a table
    #[arg(long)]
    describe: bool,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "warn")]
    log_level: String,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize the logger with the specified log level
    let log_level = LevelFilter::from_str(&args.log_level).unwrap_or_else(|_| {
        eprintln!(
            "Invalid log level: {}. Using 'warn' instead.",
            args.log_level
        );
        LevelFilter::Warn
    });
    env_logger::Builder::from_env(env_logger::Env::default())
        .filter_level(log_level)
        .init();

    // Parse the model file
    let model = mdl::parse_file(&args.model_file)?;

    if args.describe {
        println!("{}", model.label());
        println!("{}", MappingValue::Nested(model.as_mapping()));
        return Ok(());
    }

    // Evaluate over the sweep
    let sweep =
        FrequencySweep::new(args.start, args.stop).with_pts_per_decade(args.points_per_decade);
    let table = model.zdata(&sweep.points());

    // Write the table
    match &args.output {
        Some(path) => match args.format {
            OutputFormat::Zview => table.to_zview(path, args.minus_imag)?,
            OutputFormat::Csv => table.to_csv(path, args.minus_imag)?,
        },
        None => {
            let stdout = io::stdout().lock();
            match args.format {
                OutputFormat::Zview => table.write_zview(stdout, args.minus_imag),
                OutputFormat::Csv => table.write_csv(stdout, args.minus_imag),
            }
            .map_err(|source| ZircuitError::file_write("stdout", source))?;
        }
    }

    Ok(())
}
