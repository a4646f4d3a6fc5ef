//! Revoice - 音色克隆 TTS API 服务
//!
//! 架构设计: DDD + CQRS + Hexagonal Architecture
//!
//! 领域层 (domain/):
//! - Voice Context: 音色管理上下文
//!
//! 应用层 (application/):
//! - Ports: 端口定义（VoiceRegistry, TtsEngine, AudioProbe, OutputStorage）
//! - Commands: CQRS 命令处理器
//! - Queries: CQRS 查询处理器
//!
//! 基础设施层 (infrastructure/):
//! - HTTP: RESTful API
//! - Persistence: JSON 平面文件音色注册表
//! - Adapters: TTS Client, Audio Probe, Output Storage

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::{load_config, AppConfig};
