//! Persistence coordinator
//!
//! Decides how a finished byte buffer reaches the user:
//! 1. Native environment with dialog + filesystem → "Save As" prompt, then write
//! 2. Anything else, or any native failure → browser-style download
//!
//! Native failures never surface as errors. They are logged and the request
//! degrades to the download path, which is the only thing that can fail the
//! whole operation.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{error, info};

use crate::capabilities::{CapabilityKind, CapabilityLoader, SaveDialogOptions};
use crate::config::SaveConfig;
use crate::environment::Environment;
use crate::error::PdfKitError;

/// A finished document and the name to offer for it.
#[derive(Debug, Clone)]
pub struct SaveRequest {
    bytes: Vec<u8>,
    suggested_name: String,
}

impl SaveRequest {
    pub fn new(bytes: impl Into<Vec<u8>>, suggested_name: impl Into<String>) -> Self {
        Self {
            bytes: bytes.into(),
            suggested_name: suggested_name.into(),
        }
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn suggested_name(&self) -> &str {
        &self.suggested_name
    }
}

/// Which save path was taken. Exactly one per `persist` call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SaveOutcome {
    /// Written through the native dialog; the user already saw a confirmation
    NativeSaved { path: PathBuf },
    /// User dismissed the native dialog. Not an error.
    NativeCancelled,
    /// Plain browser download
    BrowserDownloadTriggered,
    /// Native path failed and the download ran instead
    NativeFailedFallback { reason: String },
}

impl SaveOutcome {
    /// True when the user has already been told what happened, so the caller
    /// must not show its own confirmation.
    pub fn already_communicated(&self) -> bool {
        matches!(
            self,
            SaveOutcome::NativeSaved { .. } | SaveOutcome::NativeCancelled
        )
    }

    pub fn saved_path(&self) -> Option<&Path> {
        match self {
            SaveOutcome::NativeSaved { path } => Some(path.as_path()),
            _ => None,
        }
    }
}

/// One entry of a save dialog's file-type dropdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileTypeFilter {
    pub label: String,
    /// Lowercase, without the leading dot
    pub extensions: Vec<String>,
}

const FILTER_TABLE: &[(&str, &str, &[&str])] = &[
    ("pdf", "PDF Documents", &["pdf"]),
    ("zip", "ZIP Archives", &["zip"]),
    ("png", "PNG Images", &["png"]),
    ("jpg", "JPEG Images", &["jpg", "jpeg"]),
    ("jpeg", "JPEG Images", &["jpg", "jpeg"]),
    ("webp", "WebP Images", &["webp"]),
    ("bmp", "BMP Images", &["bmp"]),
    ("tiff", "TIFF Images", &["tiff", "tif"]),
    ("tif", "TIFF Images", &["tiff", "tif"]),
    ("json", "JSON Files", &["json"]),
    ("txt", "Text Files", &["txt"]),
];

/// Dialog filters for a suggested filename. Unknown or missing extensions
/// yield no filters, which shows all files.
pub fn file_type_filters(filename: &str) -> Vec<FileTypeFilter> {
    let Some((_, ext)) = filename.rsplit_once('.') else {
        return Vec::new();
    };
    let ext = ext.to_lowercase();

    FILTER_TABLE
        .iter()
        .find(|(key, _, _)| *key == ext)
        .map(|(_, label, extensions)| FileTypeFilter {
            label: label.to_string(),
            extensions: extensions.iter().map(|e| e.to_string()).collect(),
        })
        .into_iter()
        .collect()
}

/// Hands bytes to the user without a native dialog (anchor click in a
/// browser, downloads folder on a headless host).
#[async_trait(?Send)]
pub trait Downloader {
    async fn trigger(&self, bytes: &[u8], filename: &str) -> Result<(), PdfKitError>;
}

/// Tells the user where a native save landed.
///
/// Infallible: the file is already written when this runs, and a notification
/// problem must not turn into a second save.
pub trait Notifier {
    fn confirm_saved(&self, path: &Path);
}

pub struct Persister<E, D, N> {
    loader: CapabilityLoader<E>,
    downloader: D,
    notifier: N,
    config: SaveConfig,
}

impl<E, D, N> Persister<E, D, N>
where
    E: Environment,
    D: Downloader,
    N: Notifier,
{
    pub fn new(environment: E, downloader: D, notifier: N, config: SaveConfig) -> Self {
        Self {
            loader: CapabilityLoader::new(environment),
            downloader,
            notifier,
            config,
        }
    }

    pub fn loader(&self) -> &CapabilityLoader<E> {
        &self.loader
    }

    pub fn config(&self) -> &SaveConfig {
        &self.config
    }

    /// Persist `request`, natively when possible.
    ///
    /// # Errors
    /// Only when the download fallback itself fails.
    pub async fn persist(&self, request: SaveRequest) -> Result<SaveOutcome, PdfKitError> {
        let fallback_reason = if self.loader.environment().is_native() {
            match self.save_native(&request).await {
                Ok(outcome) => return Ok(outcome),
                Err(e) => {
                    error!(
                        file = %request.suggested_name(),
                        error = %e,
                        "Native save failed, falling back to download"
                    );
                    Some(e.to_string())
                }
            }
        } else {
            None
        };

        self.downloader
            .trigger(request.bytes(), request.suggested_name())
            .await?;

        info!(
            file = %request.suggested_name(),
            bytes = request.bytes().len(),
            "Download triggered"
        );

        Ok(match fallback_reason {
            Some(reason) => SaveOutcome::NativeFailedFallback { reason },
            None => SaveOutcome::BrowserDownloadTriggered,
        })
    }

    async fn save_native(&self, request: &SaveRequest) -> Result<SaveOutcome, PdfKitError> {
        self.loader.ensure_capabilities().await;

        let dialog = self
            .loader
            .dialog()
            .ok_or(PdfKitError::CapabilityUnavailable(CapabilityKind::Dialog))?;
        let filesystem = self
            .loader
            .filesystem()
            .ok_or(PdfKitError::CapabilityUnavailable(CapabilityKind::FileSystem))?;

        let filters = file_type_filters(request.suggested_name());
        let options = SaveDialogOptions {
            title: &self.config.dialog_title,
            default_name: request.suggested_name(),
            filters: &filters,
            default_directory: self.config.default_directory.as_deref(),
        };

        match dialog.prompt_save_location(&options).await? {
            Some(path) => {
                filesystem.write_bytes(&path, request.bytes()).await?;
                info!(path = %path.display(), bytes = request.bytes().len(), "File saved");
                self.notifier.confirm_saved(&path);
                Ok(SaveOutcome::NativeSaved { path })
            }
            None => {
                info!("Save cancelled by user");
                Ok(SaveOutcome::NativeCancelled)
            }
        }
    }
}
