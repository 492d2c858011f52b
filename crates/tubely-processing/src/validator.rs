//! Upload gates that run before anything touches disk or the network.

use tubely_core::{AppError, UploadKind};

#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("{label} exceeds the max upload size of {max_mb} MB")]
    FileTooLarge { label: &'static str, max_mb: usize },

    #[error("Invalid file type: {content_type}")]
    InvalidContentType { content_type: String },

    #[error("File content does not match declared type {declared}")]
    SignatureMismatch { declared: String },

    #[error("Empty file")]
    EmptyFile,
}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        AppError::BadRequest(err.to_string())
    }
}

/// Size, allow-list and signature checks for one kind of upload.
#[derive(Debug, Clone)]
pub struct UploadValidator {
    kind: UploadKind,
    max_size: usize,
    verify_signature: bool,
}

impl UploadValidator {
    pub fn new(kind: UploadKind, max_size: usize, verify_signature: bool) -> Self {
        Self {
            kind,
            max_size,
            verify_signature,
        }
    }

    pub fn kind(&self) -> UploadKind {
        self.kind
    }

    pub fn max_size(&self) -> usize {
        self.max_size
    }

    pub fn validate_size(&self, size: usize) -> Result<(), ValidationError> {
        if size > self.max_size {
            return Err(self.too_large());
        }
        if size == 0 {
            return Err(ValidationError::EmptyFile);
        }
        Ok(())
    }

    /// Error reported when a payload exceeds the ceiling.
    pub fn too_large(&self) -> ValidationError {
        ValidationError::FileTooLarge {
            label: self.kind.label(),
            max_mb: self.max_size / (1024 * 1024),
        }
    }

    /// The declared type must be exactly one of the allow-list entries; only
    /// surrounding whitespace is ignored.
    pub fn validate_content_type(&self, declared: &str) -> Result<String, ValidationError> {
        let declared = declared.trim();

        if !self
            .kind
            .allowed_content_types()
            .iter()
            .any(|allowed| *allowed == declared)
        {
            return Err(ValidationError::InvalidContentType {
                content_type: declared.to_string(),
            });
        }

        Ok(declared.to_string())
    }

    /// Compare the leading bytes with the signature of the declared type.
    pub fn validate_signature(&self, data: &[u8], content_type: &str) -> Result<(), ValidationError> {
        if !self.verify_signature {
            return Ok(());
        }

        match sniff_content_type(data) {
            Some(sniffed) if sniffed == content_type => Ok(()),
            _ => Err(ValidationError::SignatureMismatch {
                declared: content_type.to_string(),
            }),
        }
    }

    /// All gates in order. Returns the accepted content type.
    pub fn validate(&self, data: &[u8], declared: &str) -> Result<String, ValidationError> {
        self.validate_size(data.len())?;
        let content_type = self.validate_content_type(declared)?;
        self.validate_signature(data, &content_type)?;
        Ok(content_type)
    }
}

/// Identify an allowed media type from its magic bytes.
pub fn sniff_content_type(data: &[u8]) -> Option<&'static str> {
    const PNG_SIGNATURE: &[u8] = b"\x89PNG\r\n\x1a\n";
    const JPEG_SIGNATURE: &[u8] = b"\xff\xd8\xff";

    if data.len() >= 8 && &data[4..8] == b"ftyp" {
        Some("video/mp4")
    } else if data.starts_with(PNG_SIGNATURE) {
        Some("image/png")
    } else if data.starts_with(JPEG_SIGNATURE) {
        Some("image/jpeg")
    } else {
        None
    }
}

/// File extension for an allowed content type.
pub fn extension_for(content_type: &str) -> Option<&'static str> {
    match content_type {
        "video/mp4" => Some("mp4"),
        "image/jpeg" => Some("jpeg"),
        "image/png" => Some("png"),
        _ => None,
    }
}

/// Content type to serve a stored file with, from its extension.
pub fn content_type_for_extension(extension: &str) -> Option<&'static str> {
    match extension.to_lowercase().as_str() {
        "mp4" => Some("video/mp4"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "png" => Some("image/png"),
        _ => None,
    }
}
