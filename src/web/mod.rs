//! Web server module for pdf2docx-server
//!
//! Provides the REST API for PDF to DOCX conversion.
//!
//! # Endpoints
//!
//! - `POST /convert` — upload a PDF (multipart field `file`), receive the
//!   converted DOCX as an attachment
//! - `GET /health` — health check with converter availability
//!
//! # Usage
//!
//! ```bash
//! pdf2docx-server serve --port 8000
//! ```

mod routes;
mod server;
mod shutdown;

pub use routes::{api_routes, ApiError, AppState, DocxDownload, HealthResponse, ToolStatus};
pub use server::{router_with_state, ServerConfig, WebServer};
pub use shutdown::wait_for_shutdown_signal;

/// Default server port.
pub const DEFAULT_PORT: u16 = 8000;

/// Default bind address.
pub const DEFAULT_BIND: &str = "127.0.0.1";

/// Default upload limit in bytes (50 MB).
pub const DEFAULT_UPLOAD_LIMIT: usize = 50 * 1024 * 1024;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_constants() {
        assert_eq!(DEFAULT_PORT, 8000);
        assert_eq!(DEFAULT_BIND, "127.0.0.1");
        assert_eq!(DEFAULT_UPLOAD_LIMIT, 50 * 1024 * 1024);
    }
}
