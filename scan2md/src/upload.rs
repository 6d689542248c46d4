//! Upload validation: presence, credential resolution, MIME allow-list,
//! and size ceiling. Pure checks, no I/O.

use crate::config::UploadConfig;
use crate::error::{AppError, Result};

/// A multipart `image` part as captured off the wire, before validation.
#[derive(Debug, Clone)]
pub struct RawUpload {
    pub bytes: Vec<u8>,
    pub content_type: Option<String>,
    pub file_name: Option<String>,
}

/// A validated upload, safe to materialize.
#[derive(Debug, Clone)]
pub struct UploadRequest {
    pub bytes: Vec<u8>,
    pub content_type: String,
    pub file_name: Option<String>,
}

impl UploadRequest {
    /// Extension for the scratch artifact name: the original filename's
    /// extension when present, otherwise derived from the MIME type.
    pub fn extension(&self) -> &str {
        if let Some(name) = &self.file_name {
            if let Some((_, ext)) = name.rsplit_once('.') {
                if !ext.is_empty() {
                    return ext;
                }
            }
        }
        match self.content_type.as_str() {
            "image/jpeg" => "jpg",
            "image/png" => "png",
            "image/gif" => "gif",
            "image/webp" => "webp",
            _ => "bin",
        }
    }
}

/// Checks the upload candidate in order: file presence, credential
/// resolvability, declared MIME type against the allow-list, byte length
/// against the ceiling.
pub fn validate(
    upload: Option<RawUpload>,
    credential: Option<&str>,
    config: &UploadConfig,
) -> Result<UploadRequest> {
    let upload = upload.ok_or(AppError::MissingFile)?;

    if credential.map_or(true, |c| c.trim().is_empty()) {
        return Err(AppError::MissingCredential);
    }

    let content_type = upload.content_type.clone().unwrap_or_default();
    if !config
        .allowed_types
        .iter()
        .any(|t| t.eq_ignore_ascii_case(&content_type))
    {
        let declared = if content_type.is_empty() {
            "unknown".to_string()
        } else {
            content_type
        };
        return Err(AppError::UnsupportedType(declared));
    }

    if upload.bytes.len() > config.max_bytes {
        return Err(AppError::TooLarge {
            size: upload.bytes.len(),
            limit: config.max_bytes,
        });
    }

    Ok(UploadRequest {
        bytes: upload.bytes,
        content_type,
        file_name: upload.file_name,
    })
}
