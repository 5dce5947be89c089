//! `pdfkit` binary
//!
//! Entry point for the command-line host.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use pdfkit_cli::commands::{self, SaveArgs};
use pdfkit_cli::{default_config_path, DirectoryDownloader};
use pdfkit_core::format::Unit;
use pdfkit_core::PdfKitConfig;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "pdfkit")]
#[command(version, about = "Page ranges, display helpers and the save flow from the command line")]
struct Args {
    /// Configuration file (TOML)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Parse a page selection like "1-3, 5, 8-10"
    Ranges {
        expression: String,
        /// Total number of pages in the document
        #[arg(long)]
        pages: usize,
        /// Fail on the first invalid segment instead of skipping it
        #[arg(long)]
        check: bool,
    },
    /// Name a page size given in points
    PageSize {
        width: f64,
        height: f64,
        /// Display unit: pt, in, mm or px
        #[arg(long, default_value = "pt")]
        unit: String,
    },
    /// Format a byte count
    Bytes {
        count: u64,
        #[arg(long)]
        decimals: Option<usize>,
    },
    /// Shorten a filename, keeping its extension
    Truncate {
        name: String,
        #[arg(long)]
        max: Option<usize>,
    },
    /// Save a file through the native prompt, falling back to the downloads folder
    Save {
        input: PathBuf,
        /// Suggested file name (defaults to the input's name)
        #[arg(long)]
        name: Option<String>,
        /// Skip the prompt and save straight to the downloads folder
        #[arg(long)]
        headless: bool,
        /// Open the containing folder after saving
        #[arg(long)]
        reveal: bool,
    },
}

fn load_config(explicit: Option<&PathBuf>) -> Result<PdfKitConfig> {
    if let Some(path) = explicit {
        return PdfKitConfig::from_file(path);
    }
    match default_config_path().filter(|p| p.is_file()) {
        Some(path) => {
            tracing::debug!("Using config {}", path.display());
            PdfKitConfig::from_file(path)
        }
        None => Ok(PdfKitConfig::default()),
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let args = Args::parse();

    // stdout carries command output; logs go to stderr
    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = load_config(args.config.as_ref())?;

    match args.command {
        Command::Ranges {
            expression,
            pages,
            check,
        } => println!("{}", commands::ranges(&expression, pages, check)?),
        Command::PageSize {
            width,
            height,
            unit,
        } => println!("{}", commands::page_size(width, height, Unit::from_code(&unit))),
        Command::Bytes { count, decimals } => {
            println!("{}", commands::bytes(count, decimals, &config))
        }
        Command::Truncate { name, max } => println!("{}", commands::truncate(&name, max, &config)),
        Command::Save {
            input,
            name,
            headless,
            reveal,
        } => {
            let outcome = commands::save(
                &input,
                SaveArgs {
                    name: name.as_deref(),
                    headless,
                    reveal,
                },
                DirectoryDownloader::user_downloads(),
                &config,
            )
            .await?;
            tracing::debug!(?outcome, "Save finished");
        }
    }

    Ok(())
}
