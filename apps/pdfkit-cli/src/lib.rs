//! Command-line host for the PDF toolkit
//!
//! Provides the native side of the save flow outside a webview: a terminal
//! "Save As" prompt, direct file writes, a system opener, and a
//! downloads-folder fallback. Also exposes the page-range parser and display
//! helpers as subcommands.

pub mod commands;
pub mod download;
pub mod host;
pub mod terminal;

pub use download::DirectoryDownloader;
pub use host::{persister, CliEnvironment, CliPersister, ConsoleNotifier};
pub use terminal::{SystemShell, TerminalDialog, TerminalEnvironment};

use std::path::PathBuf;

/// `<config dir>/pdfkit/config.toml`, used when `--config` is not given
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("pdfkit").join("config.toml"))
}
