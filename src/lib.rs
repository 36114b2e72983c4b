//! pdf2docx-server - PDF to DOCX conversion service
//!
//! An HTTP service that accepts an uploaded PDF on `POST /convert` and
//! returns the converted DOCX, delegating the conversion itself to
//! LibreOffice in headless mode. Everything around that call is thin glue:
//! extension validation, filename sanitization, request-scoped storage under
//! `uploads/`/`outputs/`, and attachment streaming.
//!
//! The conversion routine sits behind the [`DocumentConverter`] trait so the
//! external tool can be swapped for a fake in tests.

pub mod cli;
pub mod config;
pub mod convert;
pub mod error;
pub mod sanitize;
pub mod web;

pub use cli::{Cli, Commands, ConvertArgs, ServeArgs};
pub use config::{ConfigError, ConvertConfig};
pub use convert::{
    docx_output_path, DocumentConverter, SofficeConverter, DOCX_EXTENSION, DOCX_MIME, SOFFICE_BIN,
};
pub use error::ConvertError;
pub use sanitize::sanitize_filename;
pub use web::{
    api_routes, router_with_state, ApiError, AppState, DocxDownload, HealthResponse, ServerConfig,
    ToolStatus, WebServer,
};

/// Process exit codes.
pub mod exit_codes {
    /// Successful completion.
    pub const SUCCESS: i32 = 0;
    /// Unspecified failure.
    pub const GENERAL_ERROR: i32 = 1;
    /// Input file not found.
    pub const INPUT_NOT_FOUND: i32 = 2;
}
