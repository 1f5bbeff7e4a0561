//! Multipart form parsing shared by the upload routes.

use axum::body::Bytes;
use axum::extract::Multipart;
use axum::extract::multipart::Field;
use recon::KeyConfig;

use crate::server::error::ApiError;

/// One uploaded file; `name` is the client-supplied filename without any
/// directory part.
#[derive(Debug)]
pub struct UploadedFile {
    pub name: String,
    pub bytes: Bytes,
}

impl UploadedFile {
    /// Read a file field. A part with no filename is a file input left blank.
    pub async fn from_field(field: Field<'_>) -> Result<Option<Self>, ApiError> {
        let name = field.file_name().map(base_name).unwrap_or_default();
        let bytes = field.bytes().await?;
        if name.is_empty() {
            return Ok(None);
        }
        Ok(Some(Self { name, bytes }))
    }
}

/// Fields of the reconciliation form.
#[derive(Debug, Default)]
pub struct ReconcileForm {
    pub file_a: Option<UploadedFile>,
    pub file_b: Option<UploadedFile>,
    pub primary_key: Option<String>,
    pub secondary_keys: Vec<String>,
}

impl ReconcileForm {
    /// Collect the known fields; anything else is ignored.
    pub async fn from_multipart(mut multipart: Multipart) -> Result<Self, ApiError> {
        let mut form = Self::default();

        while let Some(field) = multipart.next_field().await? {
            let name = field.name().unwrap_or_default().to_string();
            match name.as_str() {
                "file_a" => form.file_a = UploadedFile::from_field(field).await?,
                "file_b" => form.file_b = UploadedFile::from_field(field).await?,
                "primary_key" => {
                    let value = field.text().await?;
                    form.primary_key = (!value.is_empty()).then_some(value);
                }
                "secondary_keys" => {
                    let value = field.text().await?;
                    if !value.is_empty() {
                        form.secondary_keys.push(value);
                    }
                }
                _ => {}
            }
        }

        Ok(form)
    }

    /// Both files and a primary key, or [`ApiError::MissingInput`].
    pub fn into_parts(self) -> Result<(UploadedFile, UploadedFile, KeyConfig), ApiError> {
        match (self.file_a, self.file_b, self.primary_key) {
            (Some(a), Some(b), Some(key)) => {
                let keys = KeyConfig::new(key).with_secondary_keys(self.secondary_keys);
                Ok((a, b, keys))
            }
            _ => Err(ApiError::MissingInput),
        }
    }
}

/// Strip any directory components a browser may send.
fn base_name(raw: &str) -> String {
    raw.rsplit(['/', '\\']).next().unwrap_or(raw).to_string()
}
