//! Audio Probe Port - 出站端口
//!
//! 定义参考音频元数据探测的抽象接口。
//! 探测失败绝不阻断注册流程：调用方捕获 ProbeError 并降级为零值元数据

use std::path::Path;
use thiserror::Error;

/// 探测错误
#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("Unsupported audio format: {0}")]
    Unsupported(String),

    #[error("Decode error: {0}")]
    DecodeError(String),

    #[error("IO error: {0}")]
    IoError(String),
}

/// 音频元数据
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AudioInfo {
    /// 时长（秒）
    pub duration_secs: f64,
    /// 采样率（Hz）
    pub sample_rate: u32,
}

/// Audio Probe Port
pub trait AudioProbePort: Send + Sync {
    /// 探测音频文件的时长与采样率
    fn probe(&self, path: &Path) -> Result<AudioInfo, ProbeError>;
}
