//! Service configuration.
//!
//! The working directories and the extension allow-list live in an explicit
//! [`ConvertConfig`] handed to the handler rather than in process-wide
//! constants, so tests can point the service at temporary directories.
//!
//! Configuration is loaded from a TOML file (`./pdf2docx.toml`, then the
//! user config directory) with per-field defaults; CLI flags override file
//! values.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default upload directory, relative to the working directory.
pub const DEFAULT_UPLOAD_DIR: &str = "uploads";

/// Default output directory, relative to the working directory.
pub const DEFAULT_OUTPUT_DIR: &str = "outputs";

/// Local config file name.
pub const LOCAL_CONFIG_FILE: &str = "pdf2docx.toml";

/// Configuration file errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Conversion service configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ConvertConfig {
    /// Directory incoming files are written to.
    pub upload_dir: PathBuf,
    /// Directory converted files are written to.
    pub output_dir: PathBuf,
    /// Allowed upload extensions, matched case-insensitively.
    pub allowed_extensions: Vec<String>,
    /// Keep upload/output files after the response instead of deleting them.
    pub keep_files: bool,
    /// Explicit path to the LibreOffice binary; discovered on PATH if unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub soffice_path: Option<PathBuf>,
}

impl Default for ConvertConfig {
    fn default() -> Self {
        Self {
            upload_dir: PathBuf::from(DEFAULT_UPLOAD_DIR),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            allowed_extensions: vec!["pdf".to_string()],
            keep_files: false,
            soffice_path: None,
        }
    }
}

impl ConvertConfig {
    /// Set the upload directory.
    pub fn with_upload_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.upload_dir = dir.into();
        self
    }

    /// Set the output directory.
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    /// Set the file retention flag.
    pub fn with_keep_files(mut self, keep: bool) -> Self {
        self.keep_files = keep;
        self
    }

    /// Check a declared filename against the extension allow-list.
    ///
    /// A name with no extension is never allowed.
    pub fn is_allowed(&self, filename: &str) -> bool {
        match filename.rsplit_once('.') {
            Some((_, ext)) => self
                .allowed_extensions
                .iter()
                .any(|allowed| allowed.eq_ignore_ascii_case(ext)),
            None => false,
        }
    }

    /// Load configuration from an explicit TOML file.
    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&raw)?)
    }

    /// Load configuration from the default locations.
    ///
    /// Tries `./pdf2docx.toml`, then `<config dir>/pdf2docx-server/config.toml`.
    /// Falls back to defaults when no file exists; a file that exists but
    /// fails to parse is an error.
    pub fn load() -> Result<Self, ConfigError> {
        let local = PathBuf::from(LOCAL_CONFIG_FILE);
        if local.exists() {
            return Self::load_from_path(&local);
        }

        if let Some(config_dir) = dirs::config_dir() {
            let user = config_dir.join("pdf2docx-server").join("config.toml");
            if user.exists() {
                return Self::load_from_path(&user);
            }
        }

        Ok(Self::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ConvertConfig::default();
        assert_eq!(config.upload_dir, PathBuf::from("uploads"));
        assert_eq!(config.output_dir, PathBuf::from("outputs"));
        assert_eq!(config.allowed_extensions, vec!["pdf".to_string()]);
        assert!(!config.keep_files);
        assert!(config.soffice_path.is_none());
    }

    #[test]
    fn test_builder() {
        let config = ConvertConfig::default()
            .with_upload_dir("/tmp/up")
            .with_output_dir("/tmp/out")
            .with_keep_files(true);

        assert_eq!(config.upload_dir, PathBuf::from("/tmp/up"));
        assert_eq!(config.output_dir, PathBuf::from("/tmp/out"));
        assert!(config.keep_files);
    }

    #[test]
    fn test_is_allowed() {
        let config = ConvertConfig::default();
        assert!(config.is_allowed("report.pdf"));
        assert!(config.is_allowed("report.PDF"));
        assert!(config.is_allowed("archive.tar.pdf"));
        assert!(!config.is_allowed("report.docx"));
        assert!(!config.is_allowed("report"));
        assert!(!config.is_allowed(""));
    }

    #[test]
    fn test_load_from_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pdf2docx.toml");
        std::fs::write(
            &path,
            r#"
upload_dir = "incoming"
keep_files = true
"#,
        )
        .unwrap();

        let config = ConvertConfig::load_from_path(&path).unwrap();
        assert_eq!(config.upload_dir, PathBuf::from("incoming"));
        assert!(config.keep_files);
        // Unspecified fields fall back to defaults.
        assert_eq!(config.output_dir, PathBuf::from("outputs"));
        assert_eq!(config.allowed_extensions, vec!["pdf".to_string()]);
    }

    #[test]
    fn test_load_from_path_rejects_bad_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pdf2docx.toml");
        std::fs::write(&path, "upload_dir = [nonsense").unwrap();

        assert!(matches!(
            ConvertConfig::load_from_path(&path),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_toml_round_trip() {
        let config = ConvertConfig::default().with_keep_files(true);
        let raw = toml::to_string(&config).unwrap();
        let parsed: ConvertConfig = toml::from_str(&raw).unwrap();
        assert_eq!(parsed.keep_files, config.keep_files);
        assert_eq!(parsed.upload_dir, config.upload_dir);
    }
}
