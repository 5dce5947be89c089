use thiserror::Error;

use crate::capabilities::CapabilityKind;

#[derive(Error, Debug)]
pub enum PdfKitError {
    #[error("Capability '{0}' is not available in this environment")]
    CapabilityUnavailable(CapabilityKind),

    #[error("Failed to load capability '{kind}': {reason}")]
    CapabilityLoad { kind: CapabilityKind, reason: String },

    #[error("Save dialog failed: {0}")]
    Dialog(String),

    #[error("Could not write file: {0}")]
    Write(String),

    #[error("Shell command failed: {0}")]
    Shell(String),

    #[error("Download failed: {0}")]
    Download(String),
}
