//! Audio HTTP Handlers
//!
//! 合成产物的下载与过期清理

use axum::{
    body::Body,
    extract::{Path, State},
    http::{header, StatusCode},
    response::Response,
    Json,
};
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tokio::fs;
use tokio_util::io::ReaderStream;

use crate::application::{ApplicationError, CleanupOutputs};
use crate::infrastructure::http::dto::ApiResponse;
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

/// 获取合成音频文件
///
/// GET /api/audio/{filename}
pub async fn get_audio(
    State(state): State<Arc<AppState>>,
    Path(filename): Path<String>,
) -> Result<Response, ApiError> {
    let path = state
        .output_storage
        .resolve(&filename)
        .await
        .map_err(|e| ApiError::from(ApplicationError::from(e)))?;

    let file = fs::File::open(&path)
        .await
        .map_err(|e| ApiError::Internal(format!("Failed to open audio file: {}", e)))?;

    let metadata = file
        .metadata()
        .await
        .map_err(|e| ApiError::Internal(format!("Failed to get file metadata: {}", e)))?;

    let stream = ReaderStream::new(file);
    let body = Body::from_stream(stream);

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "audio/wav")
        .header(header::CONTENT_LENGTH, metadata.len())
        .header(header::CACHE_CONTROL, "max-age=3600")
        .header(
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", filename),
        )
        .body(body)
        .map_err(|e| ApiError::Internal(format!("Failed to build response: {}", e)))
}

/// 清理结果响应
#[derive(Debug, Serialize)]
pub struct CleanupResponseDto {
    pub deleted_files: u64,
    pub freed_bytes: u64,
}

/// 清理过期的合成产物
///
/// DELETE /api/cleanup
pub async fn cleanup_outputs(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<CleanupResponseDto>>, ApiError> {
    let result = state
        .cleanup_handler
        .handle(CleanupOutputs {
            max_age: Duration::from_secs(state.output_max_age_secs),
        })
        .await?;

    Ok(Json(ApiResponse::success(CleanupResponseDto {
        deleted_files: result.deleted_files,
        freed_bytes: result.freed_bytes,
    })))
}
