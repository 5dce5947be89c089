use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use pdfkit_core::{Downloader, PdfKitError};
use tokio::fs::{File, OpenOptions};
use tokio::io::AsyncWriteExt;
use tracing::{debug, info};

/// Fallback "download": drop the file into a directory, browser style.
///
/// An existing file is never overwritten; the name gets a ` (1)`, ` (2)`...
/// suffix instead.
#[derive(Debug, Clone)]
pub struct DirectoryDownloader {
    directory: PathBuf,
}

impl DirectoryDownloader {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }

    /// The user's downloads folder, else home, else the working directory.
    pub fn user_downloads() -> Self {
        let directory = dirs::download_dir()
            .or_else(dirs::home_dir)
            .unwrap_or_else(|| PathBuf::from("."));
        Self::new(directory)
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }
}

#[async_trait(?Send)]
impl Downloader for DirectoryDownloader {
    async fn trigger(&self, bytes: &[u8], filename: &str) -> Result<(), PdfKitError> {
        tokio::fs::create_dir_all(&self.directory)
            .await
            .map_err(|e| PdfKitError::Download(format!("{}: {}", self.directory.display(), e)))?;

        let (target, mut file) = create_unique(&self.directory, sanitize(filename)).await?;
        file.write_all(bytes)
            .await
            .map_err(|e| PdfKitError::Download(format!("{}: {}", target.display(), e)))?;
        file.flush()
            .await
            .map_err(|e| PdfKitError::Download(format!("{}: {}", target.display(), e)))?;

        info!(path = %target.display(), "Downloaded");
        println!("Downloaded to {}", target.display());
        Ok(())
    }
}

/// Keep only the final path component; suggested names are not paths.
fn sanitize(filename: &str) -> &str {
    let name = filename
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(filename)
        .trim();
    if name.is_empty() || name == "." || name == ".." {
        "download"
    } else {
        name
    }
}

/// Create the first free name in `directory`, atomically.
///
/// `create_new` fails on an existing file, so a name taken between attempts
/// moves on to the next suffix instead of being truncated.
async fn create_unique(directory: &Path, filename: &str) -> Result<(PathBuf, File), PdfKitError> {
    for candidate in candidate_paths(directory, filename) {
        match OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&candidate)
            .await
        {
            Ok(file) => return Ok((candidate, file)),
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                debug!(path = %candidate.display(), "Name taken, trying next");
            }
            Err(e) => {
                return Err(PdfKitError::Download(format!(
                    "{}: {}",
                    candidate.display(),
                    e
                )))
            }
        }
    }

    Err(PdfKitError::Download(format!(
        "{}: no free name for {}",
        directory.display(),
        filename
    )))
}

/// `name.ext`, then `name (1).ext`, `name (2).ext`...
fn candidate_paths<'a>(
    directory: &'a Path,
    filename: &'a str,
) -> impl Iterator<Item = PathBuf> + 'a {
    let (stem, extension) = match filename.rfind('.') {
        Some(dot) if dot > 0 => filename.split_at(dot),
        _ => (filename, ""),
    };

    std::iter::once(directory.join(filename)).chain(
        (1..u32::MAX).map(move |n| directory.join(format!("{} ({}){}", stem, n, extension))),
    )
}
