//! Conversion invoker.
//!
//! Wraps the external document converter behind the narrow
//! [`DocumentConverter`] trait so the real tool can be swapped for a fake in
//! tests. The production implementation shells out to LibreOffice in
//! headless mode; the conversion itself is treated as an opaque routine.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Command;

use tempfile::TempDir;
use tracing::{debug, error, info};

use crate::config::ConvertConfig;
use crate::error::ConvertError;

/// MIME type of the conversion target format.
pub const DOCX_MIME: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

/// Extension of the conversion target format.
pub const DOCX_EXTENSION: &str = "docx";

/// Default converter binary name.
pub const SOFFICE_BIN: &str = "soffice";

/// A routine that converts a whole document into the target format.
///
/// `convert` transforms the document at `input` and writes the result to
/// `output`, returning the output path on success. Implementations must
/// report failure as a [`ConvertError`] rather than panicking, and must
/// release any resources they open on both success and failure paths.
pub trait DocumentConverter: Send + Sync {
    fn convert(&self, input: &Path, output: &Path) -> Result<PathBuf, ConvertError>;
}

/// Deterministic output path for a converted document.
///
/// `base` is the upload's base name; the extension is appended rather than
/// substituted so names like `archive.tar` keep their inner dots.
pub fn docx_output_path(output_dir: &Path, base: &str) -> PathBuf {
    output_dir.join(format!("{base}.{DOCX_EXTENSION}"))
}

/// LibreOffice-backed converter.
///
/// Invokes `soffice --headless --convert-to docx` with a per-invocation
/// scratch profile directory so concurrent conversions do not contend on the
/// shared user profile lock. The scratch directory is removed when the
/// invocation returns, on success and on every failure path.
#[derive(Debug, Clone, Default)]
pub struct SofficeConverter {
    binary: Option<PathBuf>,
}

impl SofficeConverter {
    /// Converter that discovers `soffice` on `PATH`.
    pub fn new() -> Self {
        Self { binary: None }
    }

    /// Converter honoring the config's binary override.
    pub fn from_config(config: &ConvertConfig) -> Self {
        Self {
            binary: config.soffice_path.clone(),
        }
    }

    /// Locate the converter binary.
    pub fn resolve_binary(&self) -> Result<PathBuf, ConvertError> {
        match &self.binary {
            Some(path) if path.exists() => Ok(path.clone()),
            Some(path) => Err(ConvertError::NotFound(path.display().to_string())),
            None => which::which(SOFFICE_BIN)
                .map_err(|_| ConvertError::NotFound(SOFFICE_BIN.to_string())),
        }
    }

    /// Whether the converter binary is available.
    pub fn is_available(&self) -> bool {
        self.resolve_binary().is_ok()
    }
}

/// Argument list for one soffice conversion.
fn soffice_args(input: &Path, out_dir: &Path, profile_dir: &Path) -> Vec<OsString> {
    vec![
        format!("-env:UserInstallation=file://{}", profile_dir.display()).into(),
        "--headless".into(),
        "--convert-to".into(),
        DOCX_EXTENSION.into(),
        "--outdir".into(),
        out_dir.as_os_str().to_os_string(),
        input.as_os_str().to_os_string(),
    ]
}

impl DocumentConverter for SofficeConverter {
    fn convert(&self, input: &Path, output: &Path) -> Result<PathBuf, ConvertError> {
        let binary = self.resolve_binary().inspect_err(|e| {
            error!(error = %e, "converter unavailable");
        })?;
        let out_dir = output.parent().unwrap_or_else(|| Path::new("."));

        // Scratch profile, dropped (and deleted) on every exit path.
        let profile = TempDir::new()?;
        let args = soffice_args(input, out_dir, profile.path());

        info!(
            input = %input.display(),
            output = %output.display(),
            "starting PDF to DOCX conversion"
        );
        debug!(binary = %binary.display(), ?args, "invoking converter");

        let result = Command::new(&binary).args(&args).output()?;

        if !result.status.success() {
            let stderr = String::from_utf8_lossy(&result.stderr);
            let err = ConvertError::Tool {
                tool: binary.display().to_string(),
                detail: format!("exit status {}: {}", result.status, stderr.trim()),
            };
            error!(input = %input.display(), error = %err, "conversion failed");
            return Err(err);
        }

        // soffice names its output after the input stem; line it up with the
        // requested path when they differ.
        let produced = match input.file_stem() {
            Some(stem) => docx_output_path(out_dir, &stem.to_string_lossy()),
            None => return Err(ConvertError::MissingOutput(output.to_path_buf())),
        };
        if !produced.exists() {
            error!(path = %produced.display(), "converter reported success but wrote no output");
            return Err(ConvertError::MissingOutput(produced));
        }
        if produced != *output {
            std::fs::rename(&produced, output)?;
        }

        info!(output = %output.display(), "conversion successful");
        Ok(output.to_path_buf())
    }
}
