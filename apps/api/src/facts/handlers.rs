//! Axum route handlers for the fact extraction API.

use axum::{
    extract::{Multipart, State},
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::extraction::oracle::OracleRequest;
use crate::extraction::pdf::extract_text;
use crate::extraction::prompts::GUIDANCE;
use crate::facts::assemble::process_document;
use crate::facts::export::{build_workbook, validate_rows, FILE_NAME, XLSX_CONTENT_TYPE};
use crate::facts::models::{NormalizedRow, RawFact};
use crate::facts::reconcile::ingest;
use crate::facts::schema::keys;
use crate::state::AppState;

/// Multipart field carrying the PDF.
const UPLOAD_FIELD: &str = "file";

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct ExtractionResponse {
    pub extraction_id: Uuid,
    pub row_count: usize,
    pub rows: Vec<NormalizedRow>,
}

impl ExtractionResponse {
    fn new(rows: Vec<NormalizedRow>) -> Self {
        Self {
            extraction_id: Uuid::new_v4(),
            row_count: rows.len(),
            rows,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct NormalizeRequest {
    #[serde(default)]
    pub source_text: String,
    pub facts: Vec<RawFact>,
}

/// Rows previously returned by `/extract` or `/normalize`, handed back for download.
#[derive(Debug, Deserialize)]
pub struct ExportRequest {
    pub rows: Vec<NormalizedRow>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/extract
///
/// Multipart PDF upload → text → oracle → normalized rows.
pub async fn handle_extract(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<ExtractionResponse>, AppError> {
    let rows = extract_rows(&state, multipart).await?;
    let response = ExtractionResponse::new(rows);
    info!("Extraction {} produced {} rows", response.extraction_id, response.row_count);
    Ok(Json(response))
}

/// POST /api/v1/extract/xlsx
///
/// Same pipeline as `/extract`, answered with the spreadsheet.
pub async fn handle_extract_xlsx(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Response, AppError> {
    let rows = extract_rows(&state, multipart).await?;
    Ok(xlsx_attachment(build_workbook(&rows)?))
}

/// POST /api/v1/normalize
///
/// Runs only the normalization pipeline over caller-supplied facts.
pub async fn handle_normalize(
    State(state): State<AppState>,
    Json(request): Json<NormalizeRequest>,
) -> Result<Json<ExtractionResponse>, AppError> {
    let candidates = ingest(request.facts);
    let rows = process_document(&request.source_text, candidates, &state.backfill)?;
    Ok(Json(ExtractionResponse::new(rows)))
}

/// POST /api/v1/export
///
/// Writes caller-held rows to `Output.xlsx`.
pub async fn handle_export(Json(request): Json<ExportRequest>) -> Result<Response, AppError> {
    let rows = validate_rows(request.rows)?;
    Ok(xlsx_attachment(build_workbook(&rows)?))
}

// ────────────────────────────────────────────────────────────────────────────
// Helpers
// ────────────────────────────────────────────────────────────────────────────

async fn extract_rows(
    state: &AppState,
    multipart: Multipart,
) -> Result<Vec<NormalizedRow>, AppError> {
    let upload = read_upload(multipart).await?;
    let text = extract_text(upload).await?;

    let raw = state
        .oracle
        .extract(OracleRequest {
            document_text: &text,
            keys: keys(),
            guidance: GUIDANCE,
        })
        .await?;

    process_document(&text, ingest(raw), &state.backfill)
}

async fn read_upload(mut multipart: Multipart) -> Result<Bytes, AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Malformed multipart body: {e}")))?
    {
        if field.name() == Some(UPLOAD_FIELD) {
            return field
                .bytes()
                .await
                .map_err(|e| AppError::Validation(format!("Could not read upload: {e}")));
        }
    }
    Err(AppError::Validation(format!(
        "Missing multipart field '{UPLOAD_FIELD}'"
    )))
}

fn xlsx_attachment(workbook: Vec<u8>) -> Response {
    (
        [
            (header::CONTENT_TYPE, XLSX_CONTENT_TYPE.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{FILE_NAME}\""),
            ),
        ],
        workbook,
    )
        .into_response()
}
