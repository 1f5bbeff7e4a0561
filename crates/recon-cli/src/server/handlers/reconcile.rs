//! Reconciliation handlers.

use std::sync::Arc;

use axum::{
    extract::{Multipart, Query, State},
    http::header,
    response::{IntoResponse, Response},
};
use recon::{JsonEncoder, ReportEncoder, ReportFormat, XlsxEncoder};
use serde::Deserialize;

use super::upload::ReconcileForm;
use crate::server::error::{ApiError, PlainTextError};
use crate::server::state::AppState;

/// Filename offered to the browser for the form download.
pub const REPORT_FILENAME: &str = "reconciliation_report.xlsx";

#[derive(Debug, Deserialize)]
pub struct ReportQuery {
    /// `json` (default) or `xlsx`.
    pub format: Option<String>,
}

/// POST / - form upload; responds with the XLSX report as an attachment.
///
/// Errors are plain text so the browser shows them as-is.
pub async fn reconcile_form(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Response, PlainTextError> {
    let form = ReconcileForm::from_multipart(multipart).await?;
    let encoder = XlsxEncoder::new();
    let content_type = encoder.content_type();
    let bytes = run_report(&state, form, Box::new(encoder)).await?;

    Ok(attachment(bytes, content_type, REPORT_FILENAME))
}

/// POST /api/reconcile - same inputs, JSON errors; JSON report by default.
pub async fn reconcile_api(
    State(state): State<AppState>,
    Query(query): Query<ReportQuery>,
    multipart: Multipart,
) -> Result<Response, ApiError> {
    let format = match query.format.as_deref() {
        None => ReportFormat::Json,
        Some(raw) => raw.parse::<ReportFormat>().map_err(ApiError::BadRequest)?,
    };
    let encoder: Box<dyn ReportEncoder> = match format {
        ReportFormat::Json => Box::new(JsonEncoder::new()),
        ReportFormat::Xlsx => Box::new(XlsxEncoder::new()),
        ReportFormat::Csv => {
            return Err(ApiError::BadRequest(
                "CSV reports span several files; use json or xlsx".to_string(),
            ));
        }
    };
    let content_type = encoder.content_type();

    let form = ReconcileForm::from_multipart(multipart).await?;
    let bytes = run_report(&state, form, encoder).await?;

    match format {
        ReportFormat::Xlsx => Ok(attachment(bytes, content_type, REPORT_FILENAME)),
        _ => Ok(([(header::CONTENT_TYPE, content_type)], bytes).into_response()),
    }
}

/// Load both uploads, reconcile and encode off the async runtime.
async fn run_report(
    state: &AppState,
    form: ReconcileForm,
    encoder: Box<dyn ReportEncoder>,
) -> Result<Vec<u8>, ApiError> {
    let (file_a, file_b, keys) = form.into_parts()?;
    let reconciler = Arc::clone(&state.reconciler);

    tracing::info!(
        file_a = %file_a.name,
        file_b = %file_b.name,
        primary_key = %keys.primary_key,
        "reconciliation requested"
    );

    let bytes = tokio::task::spawn_blocking(move || -> recon::Result<Vec<u8>> {
        let a = reconciler.load_bytes(&file_a.name, &file_a.bytes)?;
        let b = reconciler.load_bytes(&file_b.name, &file_b.bytes)?;
        let report = reconciler.reconcile_sources(&a, &b, &keys)?;
        encoder.encode(&report)
    })
    .await
    .map_err(|e| ApiError::Internal(format!("reconciliation task failed: {}", e)))??;

    Ok(bytes)
}

fn attachment(bytes: Vec<u8>, content_type: &str, filename: &str) -> Response {
    (
        [
            (header::CONTENT_TYPE, content_type.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", filename),
            ),
        ],
        bytes,
    )
        .into_response()
}
