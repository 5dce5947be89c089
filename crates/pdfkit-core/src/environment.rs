//! Host environment seam
//!
//! An `Environment` answers one question cheaply (are we inside a desktop
//! shell with native file access?) and knows how to acquire the optional
//! native capabilities when the answer is yes. Hosts pick an implementation
//! at startup; `BrowserEnvironment` is the plain-tab case.

use std::rc::Rc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::capabilities::{CapabilityKind, FileSystem, SaveDialog, Shell};
use crate::error::PdfKitError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnvironmentKind {
    /// Desktop shell with native dialogs and filesystem access
    Native,
    /// Sandboxed browser tab
    Browser,
}

/// Execution context the toolkit is running in.
///
/// Futures are not `Send`: the UI runs on a single cooperative thread and the
/// native handles (JS objects in the webview, stdin in the CLI) are not
/// shareable across threads anyway.
#[async_trait(?Send)]
pub trait Environment {
    fn kind(&self) -> EnvironmentKind;

    /// Must never panic, and must stay cheap enough to call on every save.
    fn is_native(&self) -> bool {
        self.kind() == EnvironmentKind::Native
    }

    async fn acquire_dialog(&self) -> Result<Rc<dyn SaveDialog>, PdfKitError>;

    async fn acquire_filesystem(&self) -> Result<Rc<dyn FileSystem>, PdfKitError>;

    async fn acquire_shell(&self) -> Result<Rc<dyn Shell>, PdfKitError>;
}

/// Plain browser tab: no native capabilities, saves go through a download.
#[derive(Debug, Default, Clone, Copy)]
pub struct BrowserEnvironment;

#[async_trait(?Send)]
impl Environment for BrowserEnvironment {
    fn kind(&self) -> EnvironmentKind {
        EnvironmentKind::Browser
    }

    async fn acquire_dialog(&self) -> Result<Rc<dyn SaveDialog>, PdfKitError> {
        Err(PdfKitError::CapabilityUnavailable(CapabilityKind::Dialog))
    }

    async fn acquire_filesystem(&self) -> Result<Rc<dyn FileSystem>, PdfKitError> {
        Err(PdfKitError::CapabilityUnavailable(CapabilityKind::FileSystem))
    }

    async fn acquire_shell(&self) -> Result<Rc<dyn Shell>, PdfKitError> {
        Err(PdfKitError::CapabilityUnavailable(CapabilityKind::Shell))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_browser_environment_is_not_native() {
        let env = BrowserEnvironment;
        assert_eq!(env.kind(), EnvironmentKind::Browser);
        assert!(!env.is_native());
    }

    #[tokio::test]
    async fn test_browser_environment_has_no_capabilities() {
        let env = BrowserEnvironment;
        assert!(matches!(
            env.acquire_dialog().await,
            Err(PdfKitError::CapabilityUnavailable(CapabilityKind::Dialog))
        ));
        assert!(matches!(
            env.acquire_filesystem().await,
            Err(PdfKitError::CapabilityUnavailable(CapabilityKind::FileSystem))
        ));
        assert!(matches!(
            env.acquire_shell().await,
            Err(PdfKitError::CapabilityUnavailable(CapabilityKind::Shell))
        ));
    }
}
