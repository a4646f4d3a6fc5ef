//! 应用层 - 用例编排
//!
//! 包含：
//! - ports: 六边形架构端口定义（VoiceRegistry、TtsEngine、AudioProbe、OutputStorage）
//! - commands: CQRS 命令及处理器
//! - queries: CQRS 查询及处理器
//! - error: 应用层错误定义

pub mod commands;
pub mod error;
pub mod ports;
pub mod queries;

// Re-exports
pub use commands::{
    // TTS commands
    CleanupOutputs,
    SynthesizeSpeech,
    // Voice commands
    DeleteVoice,
    RegisterVoice,
    // Handlers
    handlers::{
        CleanupOutputsHandler, DeleteVoiceHandler, RegisterVoiceHandler,
        SynthesizeSpeechHandler, SynthesizeSpeechResponse,
    },
};

pub use error::ApplicationError;

pub use ports::{
    // Audio probe
    AudioInfo,
    AudioProbePort,
    ProbeError,
    // Output storage
    CleanupResult,
    OutputStorageError,
    OutputStoragePort,
    StoredOutput,
    // Voice registry
    RegistryError,
    VoiceRecord,
    VoiceRegistryPort,
    VoiceSummary,
    // TTS engine
    GenerationParams,
    InferRequest,
    InferResponse,
    TtsEnginePort,
    TtsError,
};

pub use queries::{
    // Voice queries
    GetVoice,
    ListVoices,
    SearchVoices,
    // Handlers
    handlers::{GetVoiceHandler, ListVoicesHandler, SearchVoicesHandler, VoiceDetailResponse},
};
