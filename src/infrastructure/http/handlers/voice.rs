//! Voice HTTP Handlers

use axum::{
    body::Body,
    extract::{Multipart, Path, State},
    http::{header, StatusCode},
    response::Response,
    Json,
};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::fs;
use tokio_util::io::ReaderStream;
use uuid::Uuid;

use crate::application::{DeleteVoice, GetVoice, ListVoices, RegisterVoice, SearchVoices};
use crate::domain::voice::AudioFormat;
use crate::infrastructure::http::dto::{
    ApiResponse, DeleteVoiceRequest, Empty, GetVoiceRequest, SearchVoicesRequest, VoiceDetailDto,
    VoiceSummaryDto,
};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

// ============================================================================
// Handlers
// ============================================================================

/// 上传音色
///
/// multipart 字段: name（必填）、description（可选）、file（必填）。
/// 上传内容先落到暂存目录，注册表复制出私有副本后暂存文件即删除
pub async fn upload_voice(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<Json<ApiResponse<VoiceDetailDto>>, ApiError> {
    let mut name: Option<String> = None;
    let mut description: Option<String> = None;
    let mut audio_data: Option<Vec<u8>> = None;
    let mut audio_format: Option<AudioFormat> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(format!("Failed to read multipart field: {}", e)))?
    {
        let field_name = field.name().unwrap_or_default().to_string();

        match field_name.as_str() {
            "name" => {
                name = Some(
                    field
                        .text()
                        .await
                        .map_err(|e| ApiError::BadRequest(format!("Failed to read name: {}", e)))?,
                );
            }
            "description" => {
                description = Some(field.text().await.map_err(|e| {
                    ApiError::BadRequest(format!("Failed to read description: {}", e))
                })?);
            }
            "file" => {
                audio_format = field
                    .file_name()
                    .map(PathBuf::from)
                    .as_deref()
                    .and_then(std::path::Path::extension)
                    .and_then(|e| e.to_str())
                    .and_then(AudioFormat::from_extension);

                if audio_format.is_none() {
                    return Err(ApiError::BadRequest(
                        "Only WAV, MP3, FLAC, OGG audio files are allowed".to_string(),
                    ));
                }

                audio_data = Some(
                    field
                        .bytes()
                        .await
                        .map_err(|e| ApiError::BadRequest(format!("Failed to read file: {}", e)))?
                        .to_vec(),
                );
            }
            _ => {}
        }
    }

    let name = name.ok_or_else(|| ApiError::BadRequest("Name is required".to_string()))?;
    let audio_data =
        audio_data.ok_or_else(|| ApiError::BadRequest("Audio file is required".to_string()))?;
    let format = audio_format.unwrap_or(AudioFormat::Wav);

    // 落盘暂存文件，交给注册表复制
    fs::create_dir_all(&state.uploads_dir)
        .await
        .map_err(|e| ApiError::Internal(format!("Failed to create uploads directory: {}", e)))?;

    let spool_path = state
        .uploads_dir
        .join(format!("upload_{}.{}", Uuid::new_v4(), format.extension()));
    fs::write(&spool_path, &audio_data)
        .await
        .map_err(|e| ApiError::Internal(format!("Failed to save upload: {}", e)))?;

    let command = RegisterVoice {
        name,
        source_audio_path: spool_path.clone(),
        description: description.unwrap_or_default(),
    };

    let result = state.register_voice_handler.handle(command).await;

    // 注册表已持有私有副本（或注册失败），暂存文件都不再需要
    if let Err(e) = fs::remove_file(&spool_path).await {
        tracing::warn!(path = %spool_path.display(), error = %e, "Failed to remove spooled upload");
    }

    let record = result?;

    Ok(Json(ApiResponse::success(VoiceDetailDto {
        id: record.id,
        name: record.name,
        description: record.description,
        duration_secs: record.duration_secs,
        sample_rate: record.sample_rate,
        file_size: record.file_size,
        created_at: record.created_at.to_rfc3339(),
    })))
}

/// 获取音色列表
pub async fn list_voices(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<Vec<VoiceSummaryDto>>>, ApiError> {
    let result = state.list_voices_handler.handle(ListVoices).await?;

    Ok(Json(ApiResponse::success(
        result.into_iter().map(VoiceSummaryDto::from).collect(),
    )))
}

/// 搜索音色
pub async fn search_voices(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SearchVoicesRequest>,
) -> Result<Json<ApiResponse<Vec<VoiceSummaryDto>>>, ApiError> {
    let result = state
        .search_voices_handler
        .handle(SearchVoices {
            keyword: req.keyword,
        })
        .await?;

    Ok(Json(ApiResponse::success(
        result.into_iter().map(VoiceSummaryDto::from).collect(),
    )))
}

/// 获取音色详情
pub async fn get_voice(
    State(state): State<Arc<AppState>>,
    Json(req): Json<GetVoiceRequest>,
) -> Result<Json<ApiResponse<VoiceDetailDto>>, ApiError> {
    let result = state
        .get_voice_handler
        .handle(GetVoice { name: req.name })
        .await?;

    Ok(Json(ApiResponse::success(VoiceDetailDto::from(result))))
}

/// 删除音色
pub async fn delete_voice(
    State(state): State<Arc<AppState>>,
    Json(req): Json<DeleteVoiceRequest>,
) -> Result<Json<ApiResponse<Empty>>, ApiError> {
    state
        .delete_voice_handler
        .handle(DeleteVoice { name: req.name })
        .await?;

    Ok(Json(ApiResponse::ok()))
}

/// 下载音色参考音频
pub async fn download_voice_audio(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> Result<Response, ApiError> {
    let audio_path = state
        .voice_registry
        .lookup_audio_path(&name)
        .await
        .ok_or_else(|| ApiError::NotFound(format!("Voice not found: {}", name)))?;

    let file = fs::File::open(&audio_path)
        .await
        .map_err(|e| ApiError::Internal(format!("Failed to open audio file: {}", e)))?;

    let metadata = file
        .metadata()
        .await
        .map_err(|e| ApiError::Internal(format!("Failed to get file metadata: {}", e)))?;

    let extension = audio_path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("wav");
    let content_type = AudioFormat::from_extension(extension)
        .map(|f| f.content_type())
        .unwrap_or("application/octet-stream");

    // 流式返回文件内容
    let stream = ReaderStream::new(file);
    let body = Body::from_stream(stream);

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, content_type)
        .header(header::CONTENT_LENGTH, metadata.len())
        .header(
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}.{}\"", name, extension),
        )
        .body(body)
        .map_err(|e| ApiError::Internal(format!("Failed to build response: {}", e)))
}
