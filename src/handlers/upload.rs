use std::path::Path as FsPath;

use axum::{
    extract::{Multipart, State},
    Json,
};
use chrono::Utc;
use serde_json::{json, Value};

use crate::context::AppContext;
use crate::error::ApiError;

/// POST /api/upload - store a multipart "image" field and return its path.
///
/// No type or size validation; callers associate the returned path with a
/// post in a separate request.
pub async fn create(
    State(ctx): State<AppContext>,
    mut multipart: Multipart,
) -> Result<Json<Value>, ApiError> {
    while let Some(field) = multipart.next_field().await.map_err(|_| ApiError::MissingFile)? {
        if field.name() != Some("image") {
            continue;
        }

        let original = field.file_name().unwrap_or("upload").to_string();
        let bytes = field.bytes().await.map_err(|e| {
            tracing::error!("failed to read upload body: {}", e);
            ApiError::Internal
        })?;

        let stored_name = stored_filename(&original, Utc::now().timestamp_millis());
        let dest = ctx.config.upload_dir.join(&stored_name);

        tokio::fs::create_dir_all(&ctx.config.upload_dir).await.map_err(|e| {
            tracing::error!("failed to create upload dir: {}", e);
            ApiError::Internal
        })?;
        tokio::fs::write(&dest, &bytes).await.map_err(|e| {
            tracing::error!("failed to write upload: {}", e);
            ApiError::Internal
        })?;

        return Ok(Json(json!({ "path": dest.display().to_string() })));
    }

    Err(ApiError::MissingFile)
}

/// Collision-resistant stored name: millisecond timestamp prefix plus the
/// final path component of the client-supplied filename.
fn stored_filename(original: &str, timestamp_millis: i64) -> String {
    let base = FsPath::new(original)
        .file_name()
        .and_then(|name| name.to_str())
        .filter(|name| !name.is_empty())
        .unwrap_or("upload");
    format!("{}-{}", timestamp_millis, base)
}
