//! Status Handler
//!
//! 服务状态：音色数量与推理服务可达性

use axum::{extract::State, Json};
use serde::Serialize;
use std::sync::Arc;

use crate::infrastructure::http::dto::ApiResponse;
use crate::infrastructure::http::state::AppState;

/// 服务状态响应
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub voices_count: usize,
    pub engine_available: bool,
}

/// Status endpoint
///
/// GET /api/status
pub async fn status(State(state): State<Arc<AppState>>) -> Json<ApiResponse<StatusResponse>> {
    let voices_count = state.voice_registry.count().await;
    let engine_available = state.tts_engine.health_check().await;

    Json(ApiResponse::success(StatusResponse {
        status: "running",
        version: env!("CARGO_PKG_VERSION"),
        voices_count,
        engine_available,
    }))
}
