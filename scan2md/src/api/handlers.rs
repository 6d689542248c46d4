//! Request orchestration for `POST /process`.
//!
//! One request walks: multipart intake → validation → scratch materialize →
//! provider recognize → scratch release (always, exactly once) → markdown
//! normalize → respond.

use axum::extract::{Multipart, State};
use axum::http::HeaderMap;
use axum::Json;
use serde::Serialize;

use crate::error::{AppError, Result};
use crate::markdown;
use crate::upload::{self, RawUpload};

use super::state::AppState;

#[derive(Debug, Serialize)]
pub struct ProcessResponse {
    pub markdown: String,
}

/// `POST /process`
///
/// Multipart form field `image` (binary), optional `x-api-key` header.
/// `200 {"markdown": string}` on success; `400 {"error": string}` for
/// caller errors; `500 {"error": string}` with a generic message for
/// provider/storage failures.
pub async fn process_image(
    State(state): State<AppState>,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> Result<Json<ProcessResponse>> {
    let mut raw: Option<RawUpload> = None;

    while let Ok(Some(field)) = multipart.next_field().await {
        if field.name() != Some("image") {
            continue;
        }
        let file_name = field.file_name().map(str::to_string);
        let content_type = field.content_type().map(str::to_string);
        // A part that dies mid-stream never delivered a usable file.
        let bytes = field.bytes().await.map_err(|_| AppError::MissingFile)?;
        raw = Some(RawUpload {
            bytes: bytes.to_vec(),
            content_type,
            file_name,
        });
    }

    let credential = headers
        .get("x-api-key")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
        .or_else(|| state.config.ocr.api_key.clone());

    let validated = upload::validate(raw, credential.as_deref(), &state.config.upload)?;
    let Some(credential) = credential else {
        // validate has already rejected unresolvable credentials
        return Err(AppError::MissingCredential);
    };

    let artifact = state
        .scratch
        .materialize(&validated.bytes, validated.extension())
        .await?;

    let recognized = state.ocr.recognize(&artifact, &credential).await;

    // Release sits on the straight-line path so it runs exactly once
    // whether recognition succeeded, failed, or timed out.
    state.scratch.release(artifact).await;

    let markdown = markdown::normalize(&recognized?);

    Ok(Json(ProcessResponse { markdown }))
}
