//! Display utilities and output helpers for the kumo CLI.

use anyhow::{Context, Result};
use clap::ValueEnum;
use indicatif::{ProgressBar, ProgressStyle};
use kumo_lib::prelude::*;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Output format for bars and payloads.
#[derive(Clone, Copy, Debug, ValueEnum)]
pub(crate) enum Format {
    Csv,
    Json,
    Ndjson,
}

impl From<Format> for OutputFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Csv => Self::Csv,
            Format::Json => Self::Json,
            Format::Ndjson => Self::Ndjson,
        }
    }
}

impl std::fmt::Display for Format {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", OutputFormat::from(*self))
    }
}

/// Opens the output destination, falling back to stdout.
pub(crate) fn open_output(output: Option<&Path>) -> Result<Box<dyn Write + Send>> {
    match output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Cannot create output file: {}", path.display()))?;
            Ok(Box::new(BufWriter::new(file)))
        }
        None => Ok(Box::new(BufWriter::new(std::io::stdout()))),
    }
}

/// Spinner reporting replay progress on stderr.
pub(crate) fn spinner(quiet: bool) -> Result<ProgressBar> {
    if quiet {
        return Ok(ProgressBar::hidden());
    }

    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} [{elapsed_precise}] {pos} payloads | {msg}")?,
    );
    Ok(pb)
}

/// One-line description of a payload for progress messages.
pub(crate) fn describe(payload: &RenderPayload) -> String {
    let cloud = payload
        .leading_direction()
        .map_or_else(|| "no cloud yet".to_string(), |direction| format!("{direction} cloud"));
    format!(
        "{} bars, {} regions, {cloud}",
        payload.bars.len(),
        payload.segments.len()
    )
}
