//! HTTP Routes
//!
//! API 路由定义
//!
//! API Endpoints:
//! - /api/ping              GET    健康检查
//! - /api/status            GET    服务状态（音色数量、引擎可达性）
//! - /api/tts               POST   合成语音（返回音频 URL）
//! - /api/audio/{filename}  GET    下载合成音频
//! - /api/cleanup           DELETE 清理过期合成产物
//! - /api/voice/upload      POST   上传音色（multipart）
//! - /api/voice/delete      POST   删除音色
//! - /api/voice/get         POST   获取音色详情
//! - /api/voice/list        GET    列出所有音色
//! - /api/voice/search      POST   按关键词搜索音色
//! - /api/voice/audio/{name} GET   下载音色参考音频

use axum::{
    routing::{delete, get, post},
    Router,
};
use std::sync::Arc;

use super::handlers;
use super::state::AppState;

/// 创建所有路由
pub fn create_routes() -> Router<Arc<AppState>> {
    Router::new().nest("/api", api_routes())
}

/// API 路由
fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/ping", get(handlers::ping))
        .route("/status", get(handlers::status))
        .route("/tts", post(handlers::synthesize))
        .route("/audio/:filename", get(handlers::get_audio))
        .route("/cleanup", delete(handlers::cleanup_outputs))
        .nest("/voice", voice_routes())
}

/// Voice 路由
fn voice_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/upload", post(handlers::upload_voice))
        .route("/delete", post(handlers::delete_voice))
        .route("/get", post(handlers::get_voice))
        .route("/list", get(handlers::list_voices))
        .route("/search", post(handlers::search_voices))
        .route("/audio/:name", get(handlers::download_voice_audio))
}
