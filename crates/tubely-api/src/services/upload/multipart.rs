//! Reading the single file part of an upload form.

use axum::extract::Multipart;
use bytes::{Bytes, BytesMut};
use tubely_core::AppError;
use tubely_processing::UploadValidator;

/// A file part read fully into memory. Lives for one request.
#[derive(Debug)]
pub struct UploadedFile {
    pub data: Bytes,
    pub content_type: String,
    pub file_name: String,
}

impl UploadedFile {
    pub fn size(&self) -> usize {
        self.data.len()
    }
}

/// Read the file part named after the validator's upload kind.
///
/// A part only counts as a file when it carries a filename. Reading stops as
/// soon as the part grows past the size ceiling, so an oversized body is never
/// buffered beyond one extra chunk. Other fields are skipped.
pub async fn read_file_field(
    multipart: &mut Multipart,
    validator: &UploadValidator,
) -> Result<UploadedFile, AppError> {
    let kind = validator.kind();
    let mut uploaded: Option<UploadedFile> = None;

    while let Some(mut field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("Unable to parse form file: {}", e.body_text())))?
    {
        if field.name() != Some(kind.field_name()) {
            continue;
        }

        let Some(file_name) = field.file_name().map(str::to_string) else {
            continue;
        };

        if uploaded.is_some() {
            return Err(AppError::BadRequest(format!(
                "Only one {} file may be uploaded",
                kind.field_name()
            )));
        }

        let content_type = field
            .content_type()
            .unwrap_or("application/octet-stream")
            .to_string();

        let mut buffer = BytesMut::new();
        while let Some(chunk) = field
            .chunk()
            .await
            .map_err(|e| AppError::BadRequest(format!("Unable to read form file: {}", e.body_text())))?
        {
            if buffer.len() + chunk.len() > validator.max_size() {
                return Err(validator.too_large().into());
            }
            buffer.extend_from_slice(&chunk);
        }

        uploaded = Some(UploadedFile {
            data: buffer.freeze(),
            content_type,
            file_name,
        });
    }

    uploaded.ok_or_else(|| AppError::BadRequest(format!("{} file missing", kind.label())))
}
