//! FILENAME: cli/src/main.rs
//! `pivot` - build pivot-table axes from tab-delimited input.
//!
//! Reads newline-delimited, tab-separated records from a file or
//! standard input, groups rows along two configurable axes, and prints
//! each axis's archetype groups. Matrix assembly is left to downstream
//! tooling; this binary exposes the axes it would consume.

use std::fs::File;
use std::io::{self, BufReader, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use codec::AxisSpec;
use pivot_engine::{ArchetypeGroup, Axis, Pivot, PivotConfig};
use serde::Serialize;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Parser)]
#[command(
    name = "pivot",
    about = "Build pivot-table axes from tab-delimited input."
)]
struct Args {
    /// Left axis: comma-separated signed 1-based column indices
    /// (e.g. "+2,-1" = column 2 ascending, then column 1 descending).
    #[arg(short = 'L', long, value_name = "COLUMNS")]
    left: Option<String>,

    /// Top axis; same syntax as --left.
    #[arg(short = 'T', long, value_name = "COLUMNS")]
    top: Option<String>,

    /// Treat the first row as column labels.
    #[arg(long)]
    header: bool,

    /// Output format.
    #[arg(long, value_enum, default_value = "text")]
    format: OutputFormat,

    /// Input file; reads standard input when omitted.
    input: Option<PathBuf>,
}

/// JSON output shape: labels, row count, and both axes' groups.
#[derive(Serialize)]
struct Report<'a> {
    labels: &'a [String],
    rows: u64,
    left: &'a [ArchetypeGroup],
    top: &'a [ArchetypeGroup],
}

fn main() -> ExitCode {
    env_logger::init();
    match run(Args::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("pivot: {:#}", err);
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<()> {
    // Axis specifications are validated before the store is touched.
    let left = parse_axis(args.left.as_deref(), "--left")?;
    let top = parse_axis(args.top.as_deref(), "--top")?;
    let config = PivotConfig::new(left, top).with_header(args.header);

    let mut pivot = Pivot::open(config)?;
    match &args.input {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("cannot open \"{}\"", path.display()))?;
            pivot.ingest(BufReader::new(file))?;
        }
        None => {
            let stdin = io::stdin();
            pivot.ingest(stdin.lock())?;
        }
    }

    let left_groups: Vec<ArchetypeGroup> = pivot
        .groups(Axis::Left)?
        .collect::<Result<_, _>>()?;
    let top_groups: Vec<ArchetypeGroup> = pivot
        .groups(Axis::Top)?
        .collect::<Result<_, _>>()?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match args.format {
        OutputFormat::Text => {
            render_text(&mut out, Axis::Left, &left_groups)?;
            render_text(&mut out, Axis::Top, &top_groups)?;
        }
        OutputFormat::Json => {
            let report = Report {
                labels: pivot.labels(),
                rows: pivot.row_count(),
                left: &left_groups,
                top: &top_groups,
            };
            serde_json::to_writer_pretty(&mut out, &report)?;
            writeln!(out)?;
        }
    }

    pivot.close()?;
    Ok(())
}

fn parse_axis(spec: Option<&str>, flag: &str) -> Result<AxisSpec> {
    match spec {
        Some(spec) => {
            AxisSpec::parse(spec).with_context(|| format!("invalid {} specification", flag))
        }
        None => Ok(AxisSpec::default()),
    }
}

fn render_text(out: &mut impl Write, axis: Axis, groups: &[ArchetypeGroup]) -> Result<()> {
    writeln!(out, "# {} axis: {} group(s)", axis.name(), groups.len())?;
    for group in groups {
        let values = group
            .archetype
            .values()
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("\t");
        let rows = group
            .rows
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(",");
        writeln!(out, "{}\t[{}]", values, rows)?;
    }
    Ok(())
}
