//! Fake TTS Client - 用于测试的 TTS 客户端
//!
//! 始终返回固定的音频数据，不实际调用推理服务

use async_trait::async_trait;
use std::path::PathBuf;

use crate::application::ports::{InferRequest, InferResponse, TtsEnginePort, TtsError};

/// Fake TTS Client 配置
#[derive(Debug, Clone)]
pub struct FakeTtsClientConfig {
    /// 固定返回的音频文件路径
    pub audio_file_path: PathBuf,
    /// 固定返回的音频时长（毫秒）
    pub duration_ms: u64,
    /// 采样率
    pub sample_rate: u32,
}

/// Fake TTS Client
///
/// 用于测试和无引擎开发环境，始终返回配置的固定音频
pub struct FakeTtsClient {
    config: FakeTtsClientConfig,
    /// 缓存的音频数据
    audio_data: Vec<u8>,
}

impl FakeTtsClient {
    /// 创建新的 FakeTtsClient
    pub fn new(config: FakeTtsClientConfig) -> Result<Self, std::io::Error> {
        let audio_data = std::fs::read(&config.audio_file_path)?;
        tracing::info!(
            path = %config.audio_file_path.display(),
            duration_ms = config.duration_ms,
            "FakeTtsClient initialized"
        );
        Ok(Self { config, audio_data })
    }
}

#[async_trait]
impl TtsEnginePort for FakeTtsClient {
    async fn infer(&self, request: InferRequest) -> Result<InferResponse, TtsError> {
        tracing::debug!(
            text_len = request.text.len(),
            voice = %request.voice_name,
            prompt_audio = %request.prompt_audio.display(),
            "FakeTtsClient: returning fixed audio"
        );

        // 模拟推理延迟
        tokio::time::sleep(tokio::time::Duration::from_millis(200)).await;

        Ok(InferResponse {
            audio_data: self.audio_data.clone(),
            duration_ms: Some(self.config.duration_ms),
            sample_rate: Some(self.config.sample_rate),
        })
    }

    async fn health_check(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::GenerationParams;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_fake_client_returns_fixed_audio() {
        let dir = TempDir::new().unwrap();
        let audio_path = dir.path().join("fixed.wav");
        std::fs::write(&audio_path, b"fixed-audio").unwrap();

        let client = FakeTtsClient::new(FakeTtsClientConfig {
            audio_file_path: audio_path,
            duration_ms: 5000,
            sample_rate: 22050,
        })
        .unwrap();

        let response = client
            .infer(InferRequest {
                text: "test".to_string(),
                prompt_audio: PathBuf::from("/tmp/ref.wav"),
                voice_name: "测试".to_string(),
                params: GenerationParams::default(),
            })
            .await
            .unwrap();

        assert_eq!(response.audio_data, b"fixed-audio");
        assert_eq!(response.duration_ms, Some(5000));
        assert!(client.health_check().await);
    }
}
