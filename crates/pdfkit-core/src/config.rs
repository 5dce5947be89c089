//! Toolkit configuration
//!
//! Every field has a default, so an empty TOML document (or no file at all)
//! is a valid configuration.

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PdfKitConfig {
    pub save: SaveConfig,
    pub display: DisplayConfig,
}

impl PdfKitConfig {
    /// Load configuration from a TOML file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or the TOML is malformed
    pub fn from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::from_toml_str(&content)
            .with_context(|| format!("Invalid config file: {}", path.display()))
    }

    /// Parse configuration from a TOML string
    ///
    /// # Example
    ///
    /// ```
    /// use pdfkit_core::config::PdfKitConfig;
    ///
    /// let config = PdfKitConfig::from_toml_str(r#"
    ///     [save]
    ///     dialog_title = "Export PDF"
    /// "#).unwrap();
    /// assert_eq!(config.save.dialog_title, "Export PDF");
    /// assert_eq!(config.display.filename_max_length, 25);
    /// ```
    pub fn from_toml_str(s: &str) -> anyhow::Result<Self> {
        let config: Self = toml::from_str(s).context("Failed to parse TOML configuration")?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> anyhow::Result<()> {
        if self.save.dialog_title.trim().is_empty() {
            anyhow::bail!("save.dialog_title must not be empty");
        }
        if self.display.byte_decimals > 10 {
            anyhow::bail!(
                "display.byte_decimals must be at most 10, got {}",
                self.display.byte_decimals
            );
        }
        Ok(())
    }
}

/// Native save dialog settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SaveConfig {
    pub dialog_title: String,
    /// Directory the dialog opens in; host default when unset
    pub default_directory: Option<PathBuf>,
}

impl Default for SaveConfig {
    fn default() -> Self {
        Self {
            dialog_title: "Save file".to_string(),
            default_directory: None,
        }
    }
}

/// Defaults for the formatting helpers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub filename_max_length: usize,
    pub byte_decimals: usize,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            filename_max_length: crate::format::filename::DEFAULT_MAX_LENGTH,
            byte_decimals: 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_empty_document_uses_defaults() {
        let config = PdfKitConfig::from_toml_str("").unwrap();
        assert_eq!(config, PdfKitConfig::default());
        assert_eq!(config.save.dialog_title, "Save file");
        assert_eq!(config.save.default_directory, None);
        assert_eq!(config.display.filename_max_length, 25);
        assert_eq!(config.display.byte_decimals, 1);
    }

    #[test]
    fn test_partial_sections() {
        let config = PdfKitConfig::from_toml_str(
            r#"
            [save]
            default_directory = "/srv/exports"

            [display]
            byte_decimals = 2
            "#,
        )
        .unwrap();

        assert_eq!(config.save.dialog_title, "Save file");
        assert_eq!(
            config.save.default_directory,
            Some(PathBuf::from("/srv/exports"))
        );
        assert_eq!(config.display.byte_decimals, 2);
        assert_eq!(config.display.filename_max_length, 25);
    }

    #[test]
    fn test_malformed_toml_rejected() {
        assert!(PdfKitConfig::from_toml_str("[save\ndialog_title = 1").is_err());
    }

    #[test]
    fn test_wrong_type_rejected() {
        assert!(PdfKitConfig::from_toml_str("[display]\nbyte_decimals = \"two\"").is_err());
    }

    #[test]
    fn test_blank_title_rejected() {
        let err = PdfKitConfig::from_toml_str("[save]\ndialog_title = \"  \"").unwrap_err();
        assert!(err.to_string().contains("dialog_title"));
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[display]\nfilename_max_length = 40").unwrap();

        let config = PdfKitConfig::from_file(file.path()).unwrap();
        assert_eq!(config.display.filename_max_length, 40);
    }

    #[test]
    fn test_from_missing_file_has_context() {
        let err = PdfKitConfig::from_file("/definitely/not/here.toml").unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }
}
