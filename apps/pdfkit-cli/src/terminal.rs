//! Native capabilities for an interactive terminal
//!
//! The "Save As" dialog is a line prompt on stderr answered on stdin, files
//! are written with tokio, and the shell opener is the platform's
//! `xdg-open` / `open` / `start`.

use std::cell::RefCell;
use std::io::{self, IsTerminal, Write};
use std::path::{Path, PathBuf};
use std::rc::Rc;

use async_trait::async_trait;
use pdfkit_core::{
    CapabilityKind, Environment, EnvironmentKind, FileSystem, PdfKitError, SaveDialog,
    SaveDialogOptions, Shell, TokioFileSystem,
};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tokio::process::Command;
use tokio::sync::Mutex;
use tracing::debug;

/// Native environment backed by the controlling terminal
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalEnvironment;

#[async_trait(?Send)]
impl Environment for TerminalEnvironment {
    fn kind(&self) -> EnvironmentKind {
        EnvironmentKind::Native
    }

    async fn acquire_dialog(&self) -> Result<Rc<dyn SaveDialog>, PdfKitError> {
        if !io::stdin().is_terminal() {
            return Err(PdfKitError::CapabilityLoad {
                kind: CapabilityKind::Dialog,
                reason: "stdin is not a terminal".into(),
            });
        }
        Ok(Rc::new(TerminalDialog::stdio()))
    }

    async fn acquire_filesystem(&self) -> Result<Rc<dyn FileSystem>, PdfKitError> {
        Ok(Rc::new(TokioFileSystem))
    }

    async fn acquire_shell(&self) -> Result<Rc<dyn Shell>, PdfKitError> {
        Ok(Rc::new(SystemShell))
    }
}

type Input = Box<dyn AsyncBufRead + Unpin>;

/// Line-based "Save As" prompt. The answer is awaited, so the runtime keeps
/// running while the user types.
pub struct TerminalDialog {
    input: Mutex<Input>,
    output: RefCell<Box<dyn Write>>,
}

impl TerminalDialog {
    pub fn new(input: Input, output: Box<dyn Write>) -> Self {
        Self {
            input: Mutex::new(input),
            output: RefCell::new(output),
        }
    }

    /// Prompt on stderr so stdout stays clean for command output.
    pub fn stdio() -> Self {
        Self::new(
            Box::new(BufReader::new(tokio::io::stdin())),
            Box::new(io::stderr()),
        )
    }
}

#[async_trait(?Send)]
impl SaveDialog for TerminalDialog {
    async fn prompt_save_location(
        &self,
        options: &SaveDialogOptions<'_>,
    ) -> Result<Option<PathBuf>, PdfKitError> {
        let io_error = |e: io::Error| PdfKitError::Dialog(e.to_string());

        {
            let mut out = self.output.borrow_mut();
            writeln!(out, "{}", options.title).map_err(io_error)?;
            writeln!(out, "  suggested: {}", options.default_path().display()).map_err(io_error)?;
            if !options.filters.is_empty() {
                let types: Vec<String> = options
                    .filters
                    .iter()
                    .map(|f| format!("{} (*.{})", f.label, f.extensions.join(", *.")))
                    .collect();
                writeln!(out, "  type: {}", types.join("; ")).map_err(io_error)?;
            }
            write!(out, "Save to (empty to cancel): ").map_err(io_error)?;
            out.flush().map_err(io_error)?;
        }

        let mut answer = String::new();
        let read = self
            .input
            .lock()
            .await
            .read_line(&mut answer)
            .await
            .map_err(io_error)?;

        // EOF counts as cancel
        if read == 0 {
            return Ok(None);
        }

        Ok(resolve_answer(&answer, options))
    }
}

/// Turn a typed answer into a destination path.
///
/// Empty means cancel. `~` expands to the home directory, relative answers
/// resolve against the default directory, a trailing separator or an existing
/// directory receives the suggested name, and a missing extension takes the
/// first filter's.
pub fn resolve_answer(answer: &str, options: &SaveDialogOptions<'_>) -> Option<PathBuf> {
    let answer = answer.trim();
    if answer.is_empty() {
        return None;
    }

    let mut path = expand_home(answer);
    if path.is_relative() {
        if let Some(dir) = options.default_directory {
            path = dir.join(path);
        }
    }

    if answer.ends_with(std::path::MAIN_SEPARATOR) || answer.ends_with('/') || path.is_dir() {
        path = path.join(options.default_name);
    }

    if path.extension().is_none() {
        if let Some(ext) = options.filters.first().and_then(|f| f.extensions.first()) {
            path.set_extension(ext);
        }
    }

    debug!(path = %path.display(), "Resolved save location");
    Some(path)
}

fn expand_home(answer: &str) -> PathBuf {
    let rest = match answer.strip_prefix('~') {
        Some(rest) if rest.is_empty() || rest.starts_with('/') || rest.starts_with('\\') => rest,
        _ => return PathBuf::from(answer),
    };

    match dirs::home_dir() {
        Some(home) => home.join(rest.trim_start_matches(['/', '\\'])),
        None => PathBuf::from(answer),
    }
}

/// Opens files and folders with the desktop's default handler
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemShell;

impl SystemShell {
    fn command(target: &str) -> Command {
        if cfg!(target_os = "macos") {
            let mut cmd = Command::new("open");
            cmd.arg(target);
            cmd
        } else if cfg!(target_os = "windows") {
            let mut cmd = Command::new("cmd");
            cmd.args(["/C", "start", "", target]);
            cmd
        } else {
            let mut cmd = Command::new("xdg-open");
            cmd.arg(target);
            cmd
        }
    }
}

#[async_trait(?Send)]
impl Shell for SystemShell {
    async fn open(&self, target: &str) -> Result<(), PdfKitError> {
        let status = Self::command(target)
            .status()
            .await
            .map_err(|e| PdfKitError::Shell(e.to_string()))?;

        if status.success() {
            Ok(())
        } else {
            Err(PdfKitError::Shell(format!(
                "opener exited with {} for {}",
                status, target
            )))
        }
    }
}

/// Folder to reveal after saving `path`
pub fn reveal_target(path: &Path) -> &Path {
    path.parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pdfkit_core::file_type_filters;
    use pretty_assertions::assert_eq;
    use std::io::Cursor;
    use tokio::io::AsyncWriteExt;

    fn options<'a>(
        filters: &'a [pdfkit_core::FileTypeFilter],
        dir: Option<&'a Path>,
    ) -> SaveDialogOptions<'a> {
        SaveDialogOptions {
            title: "Save file",
            default_name: "merged.pdf",
            filters,
            default_directory: dir,
        }
    }

    #[test]
    fn test_empty_answer_cancels() {
        let opts = options(&[], None);
        assert_eq!(resolve_answer("", &opts), None);
        assert_eq!(resolve_answer("   \n", &opts), None);
    }

    #[test]
    fn test_absolute_answer_kept() {
        let opts = options(&[], Some(Path::new("/srv/out")));
        assert_eq!(
            resolve_answer("/tmp/a.pdf\n", &opts),
            Some(PathBuf::from("/tmp/a.pdf"))
        );
    }

    #[test]
    fn test_relative_answer_uses_default_directory() {
        let opts = options(&[], Some(Path::new("/srv/out")));
        assert_eq!(
            resolve_answer("report.pdf", &opts),
            Some(PathBuf::from("/srv/out/report.pdf"))
        );
    }

    #[test]
    fn test_directory_answer_gets_suggested_name() {
        let dir = tempfile::tempdir().unwrap();
        let opts = options(&[], None);
        let answer = dir.path().to_string_lossy().into_owned();
        assert_eq!(
            resolve_answer(&answer, &opts),
            Some(dir.path().join("merged.pdf"))
        );
        assert_eq!(
            resolve_answer("/not/yet/created/", &opts),
            Some(PathBuf::from("/not/yet/created/merged.pdf"))
        );
    }

    #[test]
    fn test_missing_extension_from_filter() {
        let filters = file_type_filters("merged.pdf");
        let opts = options(&filters, Some(Path::new("/srv")));
        assert_eq!(
            resolve_answer("final", &opts),
            Some(PathBuf::from("/srv/final.pdf"))
        );
        assert_eq!(
            resolve_answer("final.txt", &opts),
            Some(PathBuf::from("/srv/final.txt"))
        );
    }

    #[test]
    fn test_home_expansion() {
        let opts = options(&[], None);
        if let Some(home) = dirs::home_dir() {
            assert_eq!(
                resolve_answer("~/out.pdf", &opts),
                Some(home.join("out.pdf"))
            );
        }
        // Only a bare `~` or `~/` expands
        assert_eq!(
            resolve_answer("~user.pdf", &opts),
            Some(PathBuf::from("~user.pdf"))
        );
    }

    #[test]
    fn test_reveal_target() {
        assert_eq!(reveal_target(Path::new("/a/b/c.pdf")), Path::new("/a/b"));
        assert_eq!(reveal_target(Path::new("c.pdf")), Path::new("."));
    }

    #[tokio::test]
    async fn test_dialog_reads_answer() {
        let dialog = TerminalDialog::new(
            Box::new(Cursor::new("/tmp/picked.pdf\n")),
            Box::new(io::sink()),
        );
        let filters = file_type_filters("merged.pdf");
        let picked = dialog
            .prompt_save_location(&options(&filters, None))
            .await
            .unwrap();
        assert_eq!(picked, Some(PathBuf::from("/tmp/picked.pdf")));
    }

    #[tokio::test]
    async fn test_dialog_eof_and_blank_cancel() {
        for input in ["", "\n"] {
            let dialog =
                TerminalDialog::new(Box::new(Cursor::new(input)), Box::new(io::sink()));
            let picked = dialog
                .prompt_save_location(&options(&[], None))
                .await
                .unwrap();
            assert_eq!(picked, None);
        }
    }

    #[tokio::test]
    async fn test_dialog_waits_for_late_answer() {
        let (reader, mut writer) = tokio::io::duplex(64);
        let dialog = TerminalDialog::new(Box::new(BufReader::new(reader)), Box::new(io::sink()));
        let opts = options(&[], Some(Path::new("/srv")));

        let (picked, _) = tokio::join!(dialog.prompt_save_location(&opts), async {
            tokio::task::yield_now().await;
            writer.write_all(b"late.pdf\n").await.unwrap();
        });

        assert_eq!(picked.unwrap(), Some(PathBuf::from("/srv/late.pdf")));
    }
}
