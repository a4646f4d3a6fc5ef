//! TTS Commands

use crate::application::ports::GenerationParams;
use std::time::Duration;

/// 合成语音命令
#[derive(Debug, Clone)]
pub struct SynthesizeSpeech {
    pub text: String,
    pub voice_name: String,
    pub params: GenerationParams,
}

/// 清理过期输出文件命令
#[derive(Debug, Clone)]
pub struct CleanupOutputs {
    pub max_age: Duration,
}
