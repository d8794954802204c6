//! Flattens an experiment sessions export into `<name>_processed.json` and a
//! matching CSV table.

use {
    anyhow::{Context, Result},
    clap::{CommandFactory, Parser},
    experiment_flatten::{
        document::load_rows,
        export::{CsvExport, csv_output, default_json_output, export_csv, export_json},
        summary::Summary,
    },
    std::{io::Write, path::PathBuf, process::ExitCode},
    tracing_subscriber::EnvFilter,
};

/// Flatten experiment session logs (keystroke timing, survey responses) into JSON and CSV rows
#[derive(Parser, Debug)]
#[command(name = "experiment-flatten", version)]
struct Cli {
    /// Exported sessions JSON file
    input: Option<PathBuf>,

    /// Where to write the processed rows [default: <INPUT> with .json -> _processed.json]
    output: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Outcome {
    Completed,
    /// No input was given; usage was printed instead.
    Usage,
}

impl From<Outcome> for ExitCode {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Completed => ExitCode::SUCCESS,
            Outcome::Usage => ExitCode::FAILURE,
        }
    }
}

fn run(Cli { input, output }: Cli, out: &mut impl Write) -> Result<Outcome> {
    let Some(input) = input else {
        writeln!(out, "{}", Cli::command().render_usage())?;
        writeln!(out, "\nExample:")?;
        writeln!(out, "  experiment-flatten experiment_sessions-1765243892.json")?;
        return Ok(Outcome::Usage);
    };

    let rows = load_rows(&input).context("loading experiment export")?;

    let json_path = output.unwrap_or_else(|| default_json_output(&input));
    export_json(&json_path, &rows).context("writing processed rows as JSON")?;
    writeln!(out, "✓ Processed {} entries from raw data", rows.len())?;
    writeln!(out, "✓ Output saved to: {}", json_path.display())?;
    writeln!(out, "\n{}", Summary::of(&rows))?;

    let csv_path = csv_output(&json_path);
    match export_csv(&csv_path, &rows).context("writing processed rows as CSV")? {
        CsvExport::Written { .. } => writeln!(out, "✓ CSV exported to: {}", csv_path.display())?,
        CsvExport::NothingToExport => writeln!(out, "No results to export")?,
    }

    writeln!(out, "\n✓ Processing complete!")?;
    Ok(Outcome::Completed)
}

fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    run(Cli::parse(), &mut std::io::stdout().lock()).map(ExitCode::from)
}
