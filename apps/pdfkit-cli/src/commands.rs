//! Subcommand implementations
//!
//! Each returns the text to print so `main` stays a thin dispatcher.

use std::path::Path;

use anyhow::{Context, Result};
use pdfkit_core::format::{self, Unit};
use pdfkit_core::{PdfKitConfig, SaveOutcome, SaveRequest};
use tracing::warn;

use crate::download::DirectoryDownloader;
use crate::host::persister;
use crate::terminal::reveal_target;

/// `ranges`: selected pages, 1-based and zero-based.
pub fn ranges(expression: &str, pages: usize, check: bool) -> Result<String> {
    if check {
        pdfkit_core::validate_page_ranges(expression, pages)
            .with_context(|| format!("Invalid page selection '{}'", expression))?;
    }

    let indices = pdfkit_core::parse_page_ranges(expression, pages);
    let one_based: Vec<String> = indices.iter().map(|i| (i + 1).to_string()).collect();
    let zero_based: Vec<String> = indices.iter().map(|i| i.to_string()).collect();

    Ok(format!(
        "{} of {} pages: {}\nindices: [{}]",
        indices.len(),
        pages,
        one_based.join(", "),
        zero_based.join(", ")
    ))
}

/// `page-size`: standard name plus dimensions in `unit`.
pub fn page_size(width: f64, height: f64, unit: Unit) -> String {
    format!(
        "{} ({} x {} {})",
        format::standard_page_name(width, height),
        format::convert_points(width, unit),
        format::convert_points(height, unit),
        unit.code()
    )
}

pub fn bytes(count: u64, decimals: Option<usize>, config: &PdfKitConfig) -> String {
    format::format_bytes(count, decimals.unwrap_or(config.display.byte_decimals))
}

pub fn truncate(name: &str, max: Option<usize>, config: &PdfKitConfig) -> String {
    format::truncate_filename(name, max.unwrap_or(config.display.filename_max_length))
}

/// Options for `save`
#[derive(Debug, Clone, Default)]
pub struct SaveArgs<'a> {
    pub name: Option<&'a str>,
    pub headless: bool,
    pub reveal: bool,
}

/// `save`: run INPUT through the persistence flow.
pub async fn save(
    input: &Path,
    args: SaveArgs<'_>,
    downloader: DirectoryDownloader,
    config: &PdfKitConfig,
) -> Result<SaveOutcome> {
    let bytes = tokio::fs::read(input)
        .await
        .with_context(|| format!("Failed to read input file: {}", input.display()))?;

    let name = match args.name {
        Some(name) => name.to_string(),
        None => input
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .context("Input path has no file name; pass --name")?,
    };

    let persister = persister(args.headless, downloader, config.save.clone());
    let outcome = persister.persist(SaveRequest::new(bytes, name)).await?;

    match &outcome {
        SaveOutcome::NativeSaved { path } if args.reveal => {
            let folder = reveal_target(path);
            match persister.loader().shell() {
                Some(shell) => {
                    if let Err(e) = shell.open(&folder.to_string_lossy()).await {
                        warn!(error = %e, "Could not open folder");
                    }
                }
                None => warn!("No shell opener available; not revealing the file"),
            }
        }
        SaveOutcome::NativeCancelled => eprintln!("Save cancelled"),
        SaveOutcome::NativeFailedFallback { reason } => {
            eprintln!("Native save failed ({}); used the downloads folder instead", reason)
        }
        _ => {}
    }

    Ok(outcome)
}
