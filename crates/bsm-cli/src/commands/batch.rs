//! Batch command implementation
//!
//! Prices every row of a CSV file (or stdin) in input order.

use std::fs::File;
use std::io::{self, Read, Write};
use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::Args;
use tracing::{info, warn};

use super::RunContext;
use crate::reader::CsvOptionReader;
use crate::report::ReportWriter;

#[derive(Args, Debug, Clone)]
pub struct BatchArgs {
    /// CSV file of options; reads stdin when omitted or '-'
    pub input: Option<PathBuf>,

    /// Abort on the first invalid row instead of skipping it
    #[arg(long)]
    pub strict: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BatchSummary {
    pub priced: usize,
    pub skipped: usize,
}

/// Run the batch command against the file or stdin named in `args`.
pub fn run<W: Write>(args: &BatchArgs, ctx: &RunContext, out: W) -> anyhow::Result<BatchSummary> {
    let source: Box<dyn Read> = match args.input.as_deref() {
        Some(path) if path.as_os_str() != "-" => {
            info!("Loading options from: {}", path.display());
            let file = File::open(path)
                .with_context(|| format!("failed to open CSV file {}", path.display()))?;
            Box::new(file)
        }
        _ => {
            info!("Loading options from stdin");
            Box::new(io::stdin().lock())
        }
    };

    run_with(source, args.strict, ctx, out)
}

/// Price every row of `source`, writing results to `out` as they are produced.
pub fn run_with<R: Read, W: Write>(
    source: R,
    strict: bool,
    ctx: &RunContext,
    out: W,
) -> anyhow::Result<BatchSummary> {
    let reader = CsvOptionReader::new(&ctx.defaults, ctx.today);
    let mut writer = ReportWriter::new(out, ctx.format, ctx.precision);
    let mut summary = BatchSummary::default();

    for entry in reader.entries(source) {
        match entry.result {
            Ok(option) => {
                writer.write(&option)?;
                summary.priced += 1;
            }
            Err(e) if strict => {
                writer.finish()?;
                bail!("invalid record at line {}: {}", entry.line, e);
            }
            Err(e) => {
                warn!("Skipping invalid record at line {}: {}", entry.line, e);
                summary.skipped += 1;
            }
        }
    }

    writer.finish()?;
    info!(
        priced = summary.priced,
        skipped = summary.skipped,
        "Batch pricing complete"
    );
    Ok(summary)
}
