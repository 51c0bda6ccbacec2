// handlers/protected/upload.rs - POST /api/upload/image and DELETE /api/upload/image/:filename

use axum::extract::{Multipart, Path, State};
use serde::Serialize;
use serde_json::Value;
use uuid::Uuid;

use crate::error::ApiError;
use crate::middleware::{message, ApiResponse, ApiResult, AuthAdmin};
use crate::services::storage::{upload_extension, validate_key, ALLOWED_IMAGE_TYPES};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub url: String,
    pub filename: String,
}

/// Store the multipart field `file` under a fresh `<uuid>.<ext>` name
pub async fn image(
    admin: AuthAdmin,
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> ApiResult<UploadResponse> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some("file") {
            continue;
        }

        let content_type = field.content_type().unwrap_or_default().to_string();
        if !ALLOWED_IMAGE_TYPES.contains(&content_type.as_str()) {
            return Err(ApiError::bad_request(format!(
                "File type not allowed. Allowed types: {}",
                ALLOWED_IMAGE_TYPES.join(", ")
            )));
        }

        let extension = upload_extension(field.file_name(), &content_type);
        let filename = format!("{}.{}", Uuid::new_v4(), extension);
        let data = field.bytes().await?;

        let url = state.storage.put(&filename, data.to_vec(), &content_type).await?;
        tracing::info!(
            filename = %filename,
            size = data.len(),
            backend = state.storage.scheme(),
            admin = %admin.username,
            "image uploaded"
        );
        return Ok(ApiResponse::success(UploadResponse { url, filename }));
    }

    Err(ApiError::invalid_field("file", "This field is required"))
}

pub async fn delete_image(
    _admin: AuthAdmin,
    State(state): State<AppState>,
    Path(filename): Path<String>,
) -> ApiResult<Value> {
    validate_key(&filename)?;
    state.storage.delete(&filename).await?;
    Ok(message("File deleted successfully"))
}
