//! Optional native capabilities and their load-once cache
//!
//! A desktop host can offer three facilities: a "Save As" dialog, raw file
//! writes, and a shell opener. None of them is guaranteed. `CapabilityLoader`
//! acquires each one lazily, caches it for the lifetime of the loader, and
//! swallows acquisition failures so callers simply see `None` and fall back.

use std::cell::RefCell;
use std::fmt;
use std::future::Future;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use crate::environment::Environment;
use crate::error::PdfKitError;
use crate::persist::FileTypeFilter;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CapabilityKind {
    Dialog,
    FileSystem,
    Shell,
}

impl fmt::Display for CapabilityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CapabilityKind::Dialog => write!(f, "dialog"),
            CapabilityKind::FileSystem => write!(f, "fs"),
            CapabilityKind::Shell => write!(f, "shell"),
        }
    }
}

/// Everything a native "Save As" prompt needs to render.
#[derive(Debug, Clone)]
pub struct SaveDialogOptions<'a> {
    pub title: &'a str,
    pub default_name: &'a str,
    /// Empty means "show all files"
    pub filters: &'a [FileTypeFilter],
    pub default_directory: Option<&'a Path>,
}

impl SaveDialogOptions<'_> {
    /// Suggested name joined onto the default directory, if one is configured.
    pub fn default_path(&self) -> PathBuf {
        match self.default_directory {
            Some(dir) => dir.join(self.default_name),
            None => PathBuf::from(self.default_name),
        }
    }
}

#[async_trait(?Send)]
pub trait SaveDialog {
    /// Returns `Ok(None)` when the user dismisses the prompt.
    async fn prompt_save_location(
        &self,
        options: &SaveDialogOptions<'_>,
    ) -> Result<Option<PathBuf>, PdfKitError>;
}

#[async_trait(?Send)]
pub trait FileSystem {
    async fn write_bytes(&self, path: &Path, bytes: &[u8]) -> Result<(), PdfKitError>;
}

#[async_trait(?Send)]
pub trait Shell {
    /// Open a path or URL with the platform's default handler.
    async fn open(&self, target: &str) -> Result<(), PdfKitError>;
}

/// Which capabilities are currently cached.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapabilityStatus {
    pub dialog: bool,
    pub filesystem: bool,
    pub shell: bool,
}

/// Load-once cache of the native capabilities an `Environment` can provide.
///
/// Acquisition is advisory: a second caller racing an in-flight load may see
/// a partially filled cache, and a handle cached by one caller is never
/// replaced by another.
pub struct CapabilityLoader<E> {
    environment: E,
    dialog: RefCell<Option<Rc<dyn SaveDialog>>>,
    filesystem: RefCell<Option<Rc<dyn FileSystem>>>,
    shell: RefCell<Option<Rc<dyn Shell>>>,
}

impl<E: Environment> CapabilityLoader<E> {
    pub fn new(environment: E) -> Self {
        Self {
            environment,
            dialog: RefCell::new(None),
            filesystem: RefCell::new(None),
            shell: RefCell::new(None),
        }
    }

    pub fn environment(&self) -> &E {
        &self.environment
    }

    /// Acquire any capability not yet cached. No-op outside a native environment.
    ///
    /// Failures are logged and leave that capability unavailable; the next
    /// call tries it again. Never returns an error.
    pub async fn ensure_capabilities(&self) {
        if !self.environment.is_native() {
            return;
        }

        let env = &self.environment;
        load_once(&self.dialog, CapabilityKind::Dialog, || env.acquire_dialog()).await;
        load_once(&self.filesystem, CapabilityKind::FileSystem, || {
            env.acquire_filesystem()
        })
        .await;
        load_once(&self.shell, CapabilityKind::Shell, || env.acquire_shell()).await;
    }

    pub fn dialog(&self) -> Option<Rc<dyn SaveDialog>> {
        self.dialog.borrow().clone()
    }

    pub fn filesystem(&self) -> Option<Rc<dyn FileSystem>> {
        self.filesystem.borrow().clone()
    }

    pub fn shell(&self) -> Option<Rc<dyn Shell>> {
        self.shell.borrow().clone()
    }

    pub fn status(&self) -> CapabilityStatus {
        CapabilityStatus {
            dialog: self.dialog.borrow().is_some(),
            filesystem: self.filesystem.borrow().is_some(),
            shell: self.shell.borrow().is_some(),
        }
    }
}

async fn load_once<T, F, Fut>(slot: &RefCell<Option<Rc<T>>>, kind: CapabilityKind, acquire: F)
where
    T: ?Sized,
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<Rc<T>, PdfKitError>>,
{
    if slot.borrow().is_some() {
        return;
    }

    debug!(capability = %kind, "Acquiring native capability");
    match acquire().await {
        Ok(handle) => {
            // No borrow is held across the await above; re-check before writing
            let mut cached = slot.borrow_mut();
            if cached.is_none() {
                *cached = Some(handle);
            }
        }
        Err(e) => {
            error!(capability = %kind, error = %e, "Failed to load native capability");
        }
    }
}

/// `FileSystem` backed by tokio, for hosts that run natively.
#[cfg(feature = "native-fs")]
#[derive(Debug, Default, Clone, Copy)]
pub struct TokioFileSystem;

#[cfg(feature = "native-fs")]
#[async_trait(?Send)]
impl FileSystem for TokioFileSystem {
    async fn write_bytes(&self, path: &Path, bytes: &[u8]) -> Result<(), PdfKitError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| PdfKitError::Write(format!("{}: {}", parent.display(), e)))?;
        }

        tokio::fs::write(path, bytes)
            .await
            .map_err(|e| PdfKitError::Write(format!("{}: {}", path.display(), e)))
    }
}
