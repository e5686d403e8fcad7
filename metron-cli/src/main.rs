//! Metron command line
//!
//! Usage: metron [--json] [--steps] [--normalize] <quantity> [target]
//!
//! - `metron "10 MiB" b` converts a quantity into another unit
//! - `metron "72 km/hr" m/s` converts between compound units
//! - `metron --normalize "7200 s"` picks the best human-scale unit
//!
//! Quantities starting with `-` follow `--`: `metron -- "-40 km" m`.
//!
//! Logs go to stderr; set `RUST_LOG` (default `warn`) to see registration
//! and path resolution.

mod catalog;

use std::process::ExitCode;
use clap::Parser;
use metron_core::{ErrorReport, UnitError};
use metron_units::{Quantity, Units};
use serde::Serialize;
use tracing::{debug, error};
use tracing_subscriber::EnvFilter;

/// Convert and combine quantities with units
#[derive(Parser, Debug, Clone, PartialEq)]
#[command(name = "metron", version)]
#[command(about = "Convert quantities between units", long_about = None)]
struct Args {
    /// Quantity to read (e.g., "10 MiB" or "50km/hr")
    quantity: String,

    /// Unit or unit expression to convert into (e.g., "b" or "m/s")
    target: Option<String>,

    /// Print the result as JSON
    #[arg(long)]
    json: bool,

    /// List the system conversions crossed
    #[arg(long)]
    steps: bool,

    /// Re-express the result in its best-fit unit
    #[arg(long)]
    normalize: bool,
}

/// Result of one invocation
#[derive(Debug, Serialize)]
struct Report<'u> {
    input: String,
    result: Quantity<'u>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    steps: Vec<String>,
}

fn run<'u>(args: &Args, units: &'u Units) -> Result<Report<'u>, UnitError> {
    let mut quantity = units.parse(&args.quantity)?;
    let mut steps = Vec::new();

    if let Some(target) = &args.target {
        let target_unit = units.compound(target)?;
        if args.steps {
            if let (Some(from), Some(to)) = (quantity.unit().as_primitive(), target_unit.as_primitive()) {
                for step in units.conversion_steps(from, to)? {
                    steps.push(format!("{} -> {}", system_name(units, step.from), system_name(units, step.to)));
                }
            }
        }
        quantity = quantity.in_compound(&target_unit)?;
    }

    if args.normalize {
        quantity = quantity.normalized()?;
    }

    debug!(input = %args.quantity, result = %quantity, "converted");
    Ok(Report { input: args.quantity.clone(), result: quantity, steps })
}

fn system_name(units: &Units, id: metron_units::SystemId) -> &str {
    units.system_by_id(id).map(|s| s.name()).unwrap_or("?")
}

fn render(args: &Args, report: &Report<'_>) -> String {
    if args.json {
        return serde_json::to_string(report).unwrap_or_else(|e| format!("{{\"error\":\"{}\"}}", e));
    }
    let mut out = match &args.target {
        Some(_) => format!("{} = {}", report.input.trim(), report.result),
        None => report.result.to_string(),
    };
    for step in &report.steps {
        out.push_str(&format!("\n  {}", step));
    }
    out
}

fn render_error(args: &Args, err: &UnitError) -> String {
    let report = ErrorReport::from(err);
    if args.json {
        serde_json::to_string(&report).unwrap_or_else(|_| report.to_string())
    } else {
        report.to_string()
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            if let Err(io) = e.print() {
                error!(error = %io, "failed to print usage");
            }
            // --help and --version land here too
            return if e.use_stderr() { ExitCode::from(2) } else { ExitCode::SUCCESS };
        }
    };

    let units = match catalog::standard() {
        Ok(units) => units,
        Err(e) => {
            error!(error = %e, "failed to build unit catalog");
            return ExitCode::FAILURE;
        }
    };

    match run(&args, &units) {
        Ok(report) => {
            println!("{}", render(&args, &report));
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("{}", render_error(&args, &e));
            // Malformed input is a usage problem, not an unsupported conversion
            if e.is_parse_error() {
                ExitCode::from(2)
            } else {
                ExitCode::FAILURE
            }
        }
    }
}
