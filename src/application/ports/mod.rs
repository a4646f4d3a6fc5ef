//! Application Ports - 出站端口定义
//!
//! 定义应用层与基础设施层的抽象接口

mod audio_probe;
mod output_storage;
mod tts_engine;
mod voice_registry;

pub use audio_probe::{AudioInfo, AudioProbePort, ProbeError};
pub use output_storage::{CleanupResult, OutputStorageError, OutputStoragePort, StoredOutput};
pub use tts_engine::{GenerationParams, InferRequest, InferResponse, TtsEnginePort, TtsError};
pub use voice_registry::{RegistryError, VoiceRecord, VoiceRegistryPort, VoiceSummary};
