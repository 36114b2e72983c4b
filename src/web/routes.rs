//! REST API routes for the conversion service.
//!
//! Provides the PDF upload/convert endpoint and a health check.

use std::path::Path;
use std::sync::Arc;

use axum::{
    extract::{Multipart, State},
    http::{header, StatusCode},
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, error, info, warn};

use crate::config::ConvertConfig;
use crate::convert::{docx_output_path, DocumentConverter, SofficeConverter, DOCX_MIME};
use crate::sanitize::sanitize_filename;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: ConvertConfig,
    pub converter: Arc<dyn DocumentConverter>,
    pub version: String,
    pub started_at: DateTime<Utc>,
}

impl AppState {
    /// State backed by the real LibreOffice converter.
    pub fn new(config: ConvertConfig) -> Self {
        let converter = Arc::new(SofficeConverter::from_config(&config));
        Self::with_converter(config, converter)
    }

    /// State with an explicit converter; lets tests substitute a fake.
    pub fn with_converter(config: ConvertConfig, converter: Arc<dyn DocumentConverter>) -> Self {
        Self {
            config,
            converter,
            version: env!("CARGO_PKG_VERSION").to_string(),
            started_at: Utc::now(),
        }
    }
}

/// Build the API router.
pub fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/convert", post(convert_document))
        .route("/health", get(health_check))
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub started_at: String,
    pub uptime_seconds: i64,
    pub tools: ToolStatus,
}

#[derive(Debug, Serialize)]
pub struct ToolStatus {
    pub soffice: bool,
}

/// Health check endpoint.
async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let tools = ToolStatus {
        soffice: SofficeConverter::from_config(&state.config).is_available(),
    };

    Json(HealthResponse {
        status: "healthy".to_string(),
        version: state.version.clone(),
        started_at: state.started_at.to_rfc3339(),
        uptime_seconds: (Utc::now() - state.started_at).num_seconds(),
        tools,
    })
}

/// Upload a PDF and return the converted DOCX.
///
/// A request moves through validate → store → convert → respond; every
/// failure along the way produces a JSON error response.
async fn convert_document(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<DocxDownload, ApiError> {
    let mut filename: Option<String> = None;
    let mut data: Option<Vec<u8>> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(format!("Invalid multipart data: {e}")))?
    {
        if field.name() == Some("file") {
            filename = field.file_name().map(str::to_string);
            data = Some(
                field
                    .bytes()
                    .await
                    .map_err(|e| ApiError::BadRequest(format!("Failed to read file: {e}")))?
                    .to_vec(),
            );
        }
    }

    let Some(data) = data else {
        warn!("no file part in the request");
        return Err(ApiError::BadRequest("No file part".to_string()));
    };

    let filename = filename.unwrap_or_default();
    if filename.is_empty() {
        warn!("no file selected by the client");
        return Err(ApiError::BadRequest("No selected file".to_string()));
    }

    if !state.config.is_allowed(&filename) {
        warn!(%filename, "invalid file type attempted");
        return Err(ApiError::BadRequest(
            "Invalid file type. Only PDF is allowed.".to_string(),
        ));
    }

    let safe_name = sanitize_filename(&filename);
    if safe_name.is_empty() {
        warn!(%filename, "filename empty after sanitizing");
        return Err(ApiError::BadRequest("No selected file".to_string()));
    }

    tokio::fs::create_dir_all(&state.config.upload_dir).await?;
    let pdf_path = state.config.upload_dir.join(&safe_name);
    tokio::fs::write(&pdf_path, &data).await?;
    info!(path = %pdf_path.display(), bytes = data.len(), "file uploaded");

    let base = Path::new(&safe_name)
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| safe_name.clone());

    tokio::fs::create_dir_all(&state.config.output_dir).await?;
    let docx_path = docx_output_path(&state.config.output_dir, &base);

    // The converter blocks; keep it off the async workers.
    let converter = state.converter.clone();
    let input = pdf_path.clone();
    let output = docx_path.clone();
    let result = tokio::task::spawn_blocking(move || converter.convert(&input, &output)).await;

    let converted = match result {
        Ok(Ok(path)) => path,
        Ok(Err(e)) => {
            error!(input = %pdf_path.display(), error = %e, "conversion failed");
            cleanup(&state.config, &pdf_path, &docx_path).await;
            return Err(ApiError::Internal("Failed to convert file".to_string()));
        }
        Err(e) => {
            error!(error = %e, "conversion task panicked");
            cleanup(&state.config, &pdf_path, &docx_path).await;
            return Err(ApiError::Internal(format!("Conversion task failed: {e}")));
        }
    };

    let body = tokio::fs::read(&converted).await?;
    info!(path = %converted.display(), bytes = body.len(), "sending converted file");

    cleanup(&state.config, &pdf_path, &converted).await;

    Ok(DocxDownload {
        data: body,
        filename: format!("{base}.docx"),
    })
}

/// Remove the request's upload and output files unless retention is on.
///
/// Cleanup never fails the request; problems are logged and forgotten.
async fn cleanup(config: &ConvertConfig, upload: &Path, output: &Path) {
    if config.keep_files {
        return;
    }
    for path in [upload, output] {
        if let Err(e) = tokio::fs::remove_file(path).await {
            if e.kind() != std::io::ErrorKind::NotFound {
                debug!(path = %path.display(), error = %e, "cleanup failed");
            }
        }
    }
}

/// Successful conversion response: the DOCX as a downloadable attachment.
#[derive(Debug)]
pub struct DocxDownload {
    pub data: Vec<u8>,
    pub filename: String,
}

impl IntoResponse for DocxDownload {
    fn into_response(self) -> Response {
        (
            StatusCode::OK,
            [
                (header::CONTENT_TYPE, DOCX_MIME.to_string()),
                (
                    header::CONTENT_DISPOSITION,
                    format!("attachment; filename=\"{}\"", self.filename),
                ),
            ],
            self.data,
        )
            .into_response()
    }
}

/// API error type.
#[derive(Debug)]
pub enum ApiError {
    /// Client-side input error (400).
    BadRequest(String),
    /// Conversion or unexpected server error (500).
    Internal(String),
}

impl From<std::io::Error> for ApiError {
    fn from(e: std::io::Error) -> Self {
        ApiError::Internal(e.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        #[derive(Serialize)]
        struct ErrorResponse {
            error: String,
        }

        let (status, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_state_new() {
        let state = AppState::new(ConvertConfig::default());
        assert!(!state.version.is_empty());
    }

    #[test]
    fn test_tool_status_serialize() {
        let status = ToolStatus { soffice: true };
        let json = serde_json::to_string(&status).unwrap();
        assert!(json.contains("\"soffice\":true"));
    }

    #[test]
    fn test_health_response_serialize() {
        let response = HealthResponse {
            status: "healthy".to_string(),
            version: "0.1.0".to_string(),
            started_at: "2024-01-01T00:00:00Z".to_string(),
            uptime_seconds: 42,
            tools: ToolStatus { soffice: false },
        };
        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("\"status\":\"healthy\""));
        assert!(json.contains("\"version\":\"0.1.0\""));
        assert!(json.contains("\"uptime_seconds\":42"));
    }

    #[test]
    fn test_docx_download_headers() {
        let download = DocxDownload {
            data: b"fake".to_vec(),
            filename: "report.docx".to_string(),
        };
        let response = download.into_response();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            DOCX_MIME
        );
        assert_eq!(
            response.headers().get(header::CONTENT_DISPOSITION).unwrap(),
            "attachment; filename=\"report.docx\""
        );
    }

    #[test]
    fn test_api_error_status_mapping() {
        let bad = ApiError::BadRequest("No file part".to_string()).into_response();
        assert_eq!(bad.status(), StatusCode::BAD_REQUEST);

        let internal = ApiError::Internal("boom".to_string()).into_response();
        assert_eq!(internal.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_io_error_maps_to_internal() {
        let io = std::io::Error::new(std::io::ErrorKind::Other, "disk on fire");
        let err: ApiError = io.into();
        assert!(matches!(err, ApiError::Internal(_)));
    }
}
