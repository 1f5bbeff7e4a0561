//! Column discovery for an uploaded file.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Multipart, State},
};
use serde::Serialize;

use super::upload::UploadedFile;
use crate::server::error::ApiError;
use crate::server::state::AppState;

#[derive(Debug, Serialize)]
pub struct ColumnsResponse {
    pub file: String,
    pub format: String,
    pub hash: String,
    pub row_count: usize,
    pub columns: Vec<String>,
}

/// POST /api/columns - header row of the uploaded `file` field.
pub async fn get_columns(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<ColumnsResponse>, ApiError> {
    let mut upload = None;
    while let Some(field) = multipart.next_field().await? {
        if field.name() == Some("file") {
            upload = UploadedFile::from_field(field).await?;
        }
    }
    let upload = upload.ok_or_else(|| ApiError::BadRequest("Missing file.".to_string()))?;

    let reconciler = Arc::clone(&state.reconciler);
    let source = tokio::task::spawn_blocking(move || {
        reconciler.load_bytes(&upload.name, &upload.bytes)
    })
    .await
    .map_err(|e| ApiError::Internal(format!("column lookup failed: {}", e)))??;

    let meta = source.metadata;
    Ok(Json(ColumnsResponse {
        file: meta.file,
        format: meta.format,
        hash: meta.hash,
        row_count: meta.row_count,
        columns: source.dataset.columns().to_vec(),
    }))
}
