//! TTS Engine Port - TTS 推理引擎抽象
//!
//! 定义 TTS 推理的抽象接口，具体实现在 infrastructure/adapters 层。
//! 引擎只拿到参考音频的只读路径，绝不获得其所有权

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

/// TTS 错误
#[derive(Debug, Error)]
pub enum TtsError {
    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Request timeout")]
    Timeout,

    #[error("Service error: {0}")]
    ServiceError(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// 生成采样参数
///
/// 默认值与推理服务端保持一致
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationParams {
    #[serde(default = "default_do_sample")]
    pub do_sample: bool,
    #[serde(default = "default_top_p")]
    pub top_p: f64,
    #[serde(default = "default_top_k")]
    pub top_k: u32,
    #[serde(default = "default_temperature")]
    pub temperature: f64,
    #[serde(default)]
    pub length_penalty: f64,
    #[serde(default = "default_num_beams")]
    pub num_beams: u32,
    #[serde(default = "default_repetition_penalty")]
    pub repetition_penalty: f64,
    #[serde(default = "default_max_mel_tokens")]
    pub max_mel_tokens: u32,
    #[serde(default = "default_max_text_tokens_per_sentence")]
    pub max_text_tokens_per_sentence: u32,
}

fn default_do_sample() -> bool {
    true
}

fn default_top_p() -> f64 {
    0.8
}

fn default_top_k() -> u32 {
    30
}

fn default_temperature() -> f64 {
    1.0
}

fn default_num_beams() -> u32 {
    3
}

fn default_repetition_penalty() -> f64 {
    10.0
}

fn default_max_mel_tokens() -> u32 {
    600
}

fn default_max_text_tokens_per_sentence() -> u32 {
    120
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self {
            do_sample: default_do_sample(),
            top_p: default_top_p(),
            top_k: default_top_k(),
            temperature: default_temperature(),
            length_penalty: 0.0,
            num_beams: default_num_beams(),
            repetition_penalty: default_repetition_penalty(),
            max_mel_tokens: default_max_mel_tokens(),
            max_text_tokens_per_sentence: default_max_text_tokens_per_sentence(),
        }
    }
}

/// TTS 推理请求
#[derive(Debug, Clone)]
pub struct InferRequest {
    /// 要合成的文本内容
    pub text: String,
    /// 参考音频路径（来自注册表，原样传递，引擎只读）
    pub prompt_audio: PathBuf,
    /// 音色名称（用于日志和追踪）
    pub voice_name: String,
    /// 生成采样参数
    pub params: GenerationParams,
}

/// TTS 推理响应
#[derive(Debug, Clone)]
pub struct InferResponse {
    /// 原始音频数据（WAV）
    pub audio_data: Vec<u8>,
    /// 音频时长（毫秒）
    pub duration_ms: Option<u64>,
    /// 采样率
    pub sample_rate: Option<u32>,
}

/// TTS Engine Port
///
/// 外部 TTS 推理服务的抽象接口
#[async_trait]
pub trait TtsEnginePort: Send + Sync {
    /// 执行 TTS 推理
    ///
    /// 发送文本和参考音频路径到推理服务，返回合成的音频数据
    async fn infer(&self, request: InferRequest) -> Result<InferResponse, TtsError>;

    /// 检查推理服务是否可用
    async fn health_check(&self) -> bool {
        true // 默认实现
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generation_params_defaults() {
        let params = GenerationParams::default();
        assert!(params.do_sample);
        assert_eq!(params.top_p, 0.8);
        assert_eq!(params.top_k, 30);
        assert_eq!(params.num_beams, 3);
        assert_eq!(params.max_mel_tokens, 600);
    }

    #[test]
    fn test_generation_params_partial_json() {
        let params: GenerationParams = serde_json::from_str(r#"{"temperature": 0.7}"#).unwrap();
        assert_eq!(params.temperature, 0.7);
        assert_eq!(params.top_k, 30);
        assert_eq!(params.repetition_penalty, 10.0);
    }
}
