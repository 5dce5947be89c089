//! Environment selection and save confirmation for the CLI

use std::path::Path;
use std::rc::Rc;

use async_trait::async_trait;
use pdfkit_core::{
    BrowserEnvironment, Environment, EnvironmentKind, FileSystem, Notifier, PdfKitError,
    Persister, SaveConfig, SaveDialog, Shell,
};
use tracing::info;

use crate::download::DirectoryDownloader;
use crate::terminal::TerminalEnvironment;

/// Environment picked from the command line
#[derive(Debug, Clone, Copy)]
pub enum CliEnvironment {
    /// Interactive prompt and direct writes
    Terminal(TerminalEnvironment),
    /// No native capabilities; every save goes to the downloads folder
    Headless(BrowserEnvironment),
}

impl CliEnvironment {
    pub fn select(headless: bool) -> Self {
        if headless {
            CliEnvironment::Headless(BrowserEnvironment)
        } else {
            CliEnvironment::Terminal(TerminalEnvironment)
        }
    }
}

#[async_trait(?Send)]
impl Environment for CliEnvironment {
    fn kind(&self) -> EnvironmentKind {
        match self {
            CliEnvironment::Terminal(env) => env.kind(),
            CliEnvironment::Headless(env) => env.kind(),
        }
    }

    async fn acquire_dialog(&self) -> Result<Rc<dyn SaveDialog>, PdfKitError> {
        match self {
            CliEnvironment::Terminal(env) => env.acquire_dialog().await,
            CliEnvironment::Headless(env) => env.acquire_dialog().await,
        }
    }

    async fn acquire_filesystem(&self) -> Result<Rc<dyn FileSystem>, PdfKitError> {
        match self {
            CliEnvironment::Terminal(env) => env.acquire_filesystem().await,
            CliEnvironment::Headless(env) => env.acquire_filesystem().await,
        }
    }

    async fn acquire_shell(&self) -> Result<Rc<dyn Shell>, PdfKitError> {
        match self {
            CliEnvironment::Terminal(env) => env.acquire_shell().await,
            CliEnvironment::Headless(env) => env.acquire_shell().await,
        }
    }
}

/// Prints the saved path to stdout
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn confirm_saved(&self, path: &Path) {
        info!(path = %path.display(), "Save confirmed");
        println!("Saved to {}", path.display());
    }
}

pub type CliPersister = Persister<CliEnvironment, DirectoryDownloader, ConsoleNotifier>;

pub fn persister(headless: bool, downloader: DirectoryDownloader, config: SaveConfig) -> CliPersister {
    Persister::new(
        CliEnvironment::select(headless),
        downloader,
        ConsoleNotifier,
        config,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use pdfkit_core::{SaveOutcome, SaveRequest};

    #[test]
    fn test_select() {
        assert!(CliEnvironment::select(false).is_native());
        assert!(!CliEnvironment::select(true).is_native());
    }

    #[tokio::test]
    async fn test_headless_save_lands_in_downloads() {
        let dir = tempfile::tempdir().unwrap();
        let persister = persister(
            true,
            DirectoryDownloader::new(dir.path()),
            SaveConfig::default(),
        );

        let outcome = persister
            .persist(SaveRequest::new(&b"%PDF"[..], "split.pdf"))
            .await
            .unwrap();

        assert_eq!(outcome, SaveOutcome::BrowserDownloadTriggered);
        assert!(dir.path().join("split.pdf").exists());
        assert!(!persister.loader().status().filesystem);
    }

    #[tokio::test]
    async fn test_headless_never_acquires() {
        let env = CliEnvironment::select(true);
        assert!(env.acquire_shell().await.is_err());
        assert!(env.acquire_filesystem().await.is_err());
    }
}
