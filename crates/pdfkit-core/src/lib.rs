//! Save-path coordination and page-selection utilities for the PDF toolkit
//!
//! This crate owns the decisions a PDF-editing UI makes around a finished
//! document, independent of where the UI runs:
//! - `persist`: native "Save As" when the host offers it, browser-style
//!   download otherwise, with every native failure degrading to the download
//! - `page_ranges`: parse user input like "1-3, 5, 8-10" against a page count
//! - `format`: unit conversion, page-size names, byte sizes, filename truncation
//!
//! Hosts plug in through the traits in `environment`, `capabilities` and
//! `persist`. The wasm crate wires them to the Tauri bridge and the DOM; the
//! CLI wires them to the terminal and the local filesystem.
//!
//! ## Usage
//!
//! ```ignore
//! use pdfkit_core::{Persister, SaveRequest, PdfKitConfig};
//!
//! let persister = Persister::new(env, downloader, notifier, PdfKitConfig::default().save);
//! let outcome = persister.persist(SaveRequest::new(bytes, "merged.pdf")).await?;
//! if !outcome.already_communicated() {
//!     show_download_toast();
//! }
//! ```

pub mod capabilities;
pub mod config;
pub mod environment;
pub mod error;
pub mod format;
pub mod page_ranges;
pub mod persist;

pub use capabilities::{
    CapabilityKind, CapabilityLoader, CapabilityStatus, FileSystem, SaveDialog, SaveDialogOptions,
    Shell,
};
#[cfg(feature = "native-fs")]
pub use capabilities::TokioFileSystem;
pub use config::{DisplayConfig, PdfKitConfig, SaveConfig};
pub use environment::{BrowserEnvironment, Environment, EnvironmentKind};
pub use error::PdfKitError;
pub use page_ranges::{parse_page_ranges, validate_page_ranges, RangeError};
pub use persist::{
    file_type_filters, Downloader, FileTypeFilter, Notifier, Persister, SaveOutcome, SaveRequest,
};
