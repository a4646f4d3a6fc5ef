//! Application State
//!
//! 包含所有 Command/Query Handlers 的应用状态。
//! 注册表等共享资源在 main 中显式构造后注入，无任何全局状态

use std::path::PathBuf;
use std::sync::Arc;

use crate::application::{
    // Command handlers
    CleanupOutputsHandler, DeleteVoiceHandler, RegisterVoiceHandler, SynthesizeSpeechHandler,
    // Query handlers
    GetVoiceHandler, ListVoicesHandler, SearchVoicesHandler,
    // Ports
    OutputStoragePort, TtsEnginePort, VoiceRegistryPort,
};

/// 应用状态
pub struct AppState {
    // ========== Ports ==========
    pub voice_registry: Arc<dyn VoiceRegistryPort>,
    pub tts_engine: Arc<dyn TtsEnginePort>,
    pub output_storage: Arc<dyn OutputStoragePort>,

    // ========== Command Handlers ==========
    pub register_voice_handler: RegisterVoiceHandler,
    pub delete_voice_handler: DeleteVoiceHandler,
    pub synthesize_handler: SynthesizeSpeechHandler,
    pub cleanup_handler: CleanupOutputsHandler,

    // ========== Query Handlers ==========
    pub get_voice_handler: GetVoiceHandler,
    pub list_voices_handler: ListVoicesHandler,
    pub search_voices_handler: SearchVoicesHandler,

    /// 上传文件的暂存目录
    pub uploads_dir: PathBuf,
    /// 输出清理的过期阈值（秒）
    pub output_max_age_secs: u64,
}

impl AppState {
    /// 创建应用状态
    pub fn new(
        voice_registry: Arc<dyn VoiceRegistryPort>,
        tts_engine: Arc<dyn TtsEnginePort>,
        output_storage: Arc<dyn OutputStoragePort>,
        uploads_dir: PathBuf,
        output_max_age_secs: u64,
    ) -> Self {
        Self {
            // Ports
            voice_registry: voice_registry.clone(),
            tts_engine: tts_engine.clone(),
            output_storage: output_storage.clone(),

            // Command handlers
            register_voice_handler: RegisterVoiceHandler::new(voice_registry.clone()),
            delete_voice_handler: DeleteVoiceHandler::new(voice_registry.clone()),
            synthesize_handler: SynthesizeSpeechHandler::new(
                voice_registry.clone(),
                tts_engine.clone(),
                output_storage.clone(),
            ),
            cleanup_handler: CleanupOutputsHandler::new(output_storage.clone()),

            // Query handlers
            get_voice_handler: GetVoiceHandler::new(voice_registry.clone()),
            list_voices_handler: ListVoicesHandler::new(voice_registry.clone()),
            search_voices_handler: SearchVoicesHandler::new(voice_registry),

            uploads_dir,
            output_max_age_secs,
        }
    }
}
