//! Conversion error types.

use std::path::PathBuf;

use thiserror::Error;

/// Errors produced by the conversion invoker.
///
/// These never escape to the client as-is; the web layer maps them to a
/// generic 500 response and logs the underlying cause.
#[derive(Debug, Error)]
pub enum ConvertError {
    /// The external converter binary could not be located.
    #[error("converter not found: {0}")]
    NotFound(String),

    /// Spawning the converter or touching the filesystem failed.
    #[error("conversion I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The converter ran but exited with a failure status.
    #[error("{tool} failed: {detail}")]
    Tool { tool: String, detail: String },

    /// The converter reported success but the output file is missing.
    #[error("converter produced no output at {}", .0.display())]
    MissingOutput(PathBuf),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_display() {
        let err = ConvertError::NotFound("soffice".to_string());
        assert_eq!(err.to_string(), "converter not found: soffice");
    }

    #[test]
    fn test_tool_display() {
        let err = ConvertError::Tool {
            tool: "soffice".to_string(),
            detail: "exit status 1".to_string(),
        };
        assert_eq!(err.to_string(), "soffice failed: exit status 1");
    }

    #[test]
    fn test_missing_output_display() {
        let err = ConvertError::MissingOutput(PathBuf::from("/out/report.docx"));
        assert!(err.to_string().contains("/out/report.docx"));
    }

    #[test]
    fn test_io_from() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: ConvertError = io.into();
        assert!(matches!(err, ConvertError::Io(_)));
    }
}
