//! TTS Command Handlers
//!
//! 合成流程: 注册表解析音色 → 推理引擎 → 输出存储

use std::sync::Arc;
use std::time::Instant;

use crate::application::commands::{CleanupOutputs, SynthesizeSpeech};
use crate::application::error::ApplicationError;
use crate::application::ports::{
    CleanupResult, InferRequest, OutputStoragePort, TtsEnginePort, VoiceRegistryPort,
};

// ============================================================================
// SynthesizeSpeech
// ============================================================================

/// 合成语音响应
#[derive(Debug, Clone)]
pub struct SynthesizeSpeechResponse {
    pub task_id: String,
    /// 对外的音频下载路径（相对 URL）
    pub audio_url: String,
    /// 合成耗时（秒）
    pub elapsed_secs: f64,
}

/// SynthesizeSpeech Handler
pub struct SynthesizeSpeechHandler {
    registry: Arc<dyn VoiceRegistryPort>,
    tts_engine: Arc<dyn TtsEnginePort>,
    output_storage: Arc<dyn OutputStoragePort>,
}

impl SynthesizeSpeechHandler {
    pub fn new(
        registry: Arc<dyn VoiceRegistryPort>,
        tts_engine: Arc<dyn TtsEnginePort>,
        output_storage: Arc<dyn OutputStoragePort>,
    ) -> Self {
        Self {
            registry,
            tts_engine,
            output_storage,
        }
    }

    pub async fn handle(
        &self,
        command: SynthesizeSpeech,
    ) -> Result<SynthesizeSpeechResponse, ApplicationError> {
        if command.text.trim().is_empty() {
            return Err(ApplicationError::validation("Text cannot be empty"));
        }

        // 音色缺失是正常否定结果，向调用方报告为未找到
        let prompt_audio = self
            .registry
            .lookup_audio_path(&command.voice_name)
            .await
            .ok_or_else(|| ApplicationError::not_found("Voice", command.voice_name.clone()))?;

        let start = Instant::now();

        let response = self
            .tts_engine
            .infer(InferRequest {
                text: command.text,
                prompt_audio,
                voice_name: command.voice_name.clone(),
                params: command.params,
            })
            .await?;

        let stored = self.output_storage.save(&response.audio_data).await?;
        let elapsed_secs = start.elapsed().as_secs_f64();

        tracing::info!(
            task_id = %stored.task_id,
            voice = %command.voice_name,
            audio_size = response.audio_data.len(),
            elapsed_secs,
            "Speech synthesized"
        );

        Ok(SynthesizeSpeechResponse {
            audio_url: format!("/api/audio/{}", stored.filename),
            task_id: stored.task_id,
            elapsed_secs,
        })
    }
}

// ============================================================================
// CleanupOutputs
// ============================================================================

/// CleanupOutputs Handler
pub struct CleanupOutputsHandler {
    output_storage: Arc<dyn OutputStoragePort>,
}

impl CleanupOutputsHandler {
    pub fn new(output_storage: Arc<dyn OutputStoragePort>) -> Self {
        Self { output_storage }
    }

    pub async fn handle(&self, command: CleanupOutputs) -> Result<CleanupResult, ApplicationError> {
        let result = self.output_storage.cleanup(command.max_age).await?;

        tracing::info!(
            deleted_files = result.deleted_files,
            freed_bytes = result.freed_bytes,
            "Output cleanup finished"
        );

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::{
        GenerationParams, InferResponse, OutputStorageError, RegistryError, StoredOutput,
        TtsError, VoiceRecord, VoiceSummary,
    };
    use async_trait::async_trait;
    use std::path::{Path, PathBuf};
    use std::sync::Mutex;
    use std::time::Duration;

    struct StubRegistry {
        path: Option<PathBuf>,
    }

    #[async_trait]
    impl VoiceRegistryPort for StubRegistry {
        async fn register(
            &self,
            _source: &Path,
            _name: &str,
            _description: &str,
        ) -> Result<VoiceRecord, RegistryError> {
            unimplemented!()
        }

        async fn get(&self, _name: &str) -> Option<VoiceRecord> {
            None
        }

        async fn lookup_audio_path(&self, _name: &str) -> Option<PathBuf> {
            self.path.clone()
        }

        async fn list(&self) -> Vec<VoiceSummary> {
            vec![]
        }

        async fn search(&self, _keyword: &str) -> Vec<VoiceSummary> {
            vec![]
        }

        async fn delete(&self, _name: &str) -> Result<(), RegistryError> {
            Ok(())
        }

        async fn count(&self) -> usize {
            0
        }
    }

    struct StubEngine;

    #[async_trait]
    impl TtsEnginePort for StubEngine {
        async fn infer(&self, request: InferRequest) -> Result<InferResponse, TtsError> {
            assert!(!request.text.is_empty());
            Ok(InferResponse {
                audio_data: vec![1, 2, 3, 4],
                duration_ms: Some(1000),
                sample_rate: Some(22050),
            })
        }
    }

    struct StubOutputs {
        saved: Mutex<Vec<Vec<u8>>>,
    }

    #[async_trait]
    impl OutputStoragePort for StubOutputs {
        async fn save(&self, data: &[u8]) -> Result<StoredOutput, OutputStorageError> {
            self.saved.lock().unwrap().push(data.to_vec());
            Ok(StoredOutput {
                task_id: "task-1".to_string(),
                filename: "tts_task-1.wav".to_string(),
                path: PathBuf::from("/tmp/tts_task-1.wav"),
            })
        }

        async fn resolve(&self, _filename: &str) -> Result<PathBuf, OutputStorageError> {
            unimplemented!()
        }

        async fn cleanup(&self, _max_age: Duration) -> Result<CleanupResult, OutputStorageError> {
            Ok(CleanupResult {
                deleted_files: 2,
                freed_bytes: 1024,
            })
        }
    }

    fn handler(registry_path: Option<PathBuf>) -> (SynthesizeSpeechHandler, Arc<StubOutputs>) {
        let outputs = Arc::new(StubOutputs {
            saved: Mutex::new(vec![]),
        });
        let handler = SynthesizeSpeechHandler::new(
            Arc::new(StubRegistry {
                path: registry_path,
            }),
            Arc::new(StubEngine),
            outputs.clone(),
        );
        (handler, outputs)
    }

    #[tokio::test]
    async fn test_synthesize_success() {
        let (handler, outputs) = handler(Some(PathBuf::from("/tmp/ref.wav")));

        let result = handler
            .handle(SynthesizeSpeech {
                text: "你好".to_string(),
                voice_name: "测试".to_string(),
                params: GenerationParams::default(),
            })
            .await
            .unwrap();

        assert_eq!(result.task_id, "task-1");
        assert_eq!(result.audio_url, "/api/audio/tts_task-1.wav");
        assert_eq!(outputs.saved.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_synthesize_unknown_voice() {
        let (handler, _) = handler(None);

        let err = handler
            .handle(SynthesizeSpeech {
                text: "你好".to_string(),
                voice_name: "不存在".to_string(),
                params: GenerationParams::default(),
            })
            .await
            .unwrap_err();

        assert!(matches!(err, ApplicationError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_synthesize_empty_text() {
        let (handler, outputs) = handler(Some(PathBuf::from("/tmp/ref.wav")));

        let err = handler
            .handle(SynthesizeSpeech {
                text: "   ".to_string(),
                voice_name: "测试".to_string(),
                params: GenerationParams::default(),
            })
            .await
            .unwrap_err();

        assert!(matches!(err, ApplicationError::ValidationError(_)));
        assert!(outputs.saved.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_cleanup_outputs() {
        let outputs = Arc::new(StubOutputs {
            saved: Mutex::new(vec![]),
        });
        let handler = CleanupOutputsHandler::new(outputs);

        let result = handler
            .handle(CleanupOutputs {
                max_age: Duration::from_secs(3600),
            })
            .await
            .unwrap();

        assert_eq!(result.deleted_files, 2);
    }
}
