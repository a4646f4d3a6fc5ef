//! TTS HTTP Handlers
//!
//! 合成入口：通过注册表解析音色后调用推理引擎

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::application::SynthesizeSpeech;
use crate::infrastructure::http::dto::{ApiResponse, SynthesizeRequest, SynthesizeResponseDto};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

/// 合成语音
///
/// POST /api/tts
pub async fn synthesize(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SynthesizeRequest>,
) -> Result<Json<ApiResponse<SynthesizeResponseDto>>, ApiError> {
    let command = SynthesizeSpeech {
        text: req.text,
        voice_name: req.voice_name,
        params: req.params,
    };

    let result = state.synthesize_handler.handle(command).await?;

    Ok(Json(ApiResponse::success(SynthesizeResponseDto {
        task_id: result.task_id,
        audio_url: result.audio_url,
        duration: result.elapsed_secs,
    })))
}
