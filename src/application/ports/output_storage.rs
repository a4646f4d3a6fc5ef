//! Output Storage Port - 出站端口
//!
//! 定义合成音频产物的存储抽象：落盘、按文件名解析、过期清理

use async_trait::async_trait;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// 输出存储错误
#[derive(Debug, Error)]
pub enum OutputStorageError {
    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Invalid filename: {0}")]
    InvalidFilename(String),

    #[error("IO error: {0}")]
    IoError(String),
}

/// 已保存的输出文件
#[derive(Debug, Clone)]
pub struct StoredOutput {
    /// 任务 ID（文件名的主体部分）
    pub task_id: String,
    /// 对外暴露的文件名
    pub filename: String,
    /// 磁盘路径
    pub path: PathBuf,
}

/// 清理结果
#[derive(Debug, Clone, Default)]
pub struct CleanupResult {
    /// 删除的文件数量
    pub deleted_files: u64,
    /// 释放的空间（字节）
    pub freed_bytes: u64,
}

/// Output Storage Port - 出站端口
///
/// 管理合成产物文件的存储与过期清理
#[async_trait]
pub trait OutputStoragePort: Send + Sync {
    /// 保存合成音频，返回生成的任务 ID 与文件名
    async fn save(&self, data: &[u8]) -> Result<StoredOutput, OutputStorageError>;

    /// 将对外文件名解析为磁盘路径
    ///
    /// 拒绝包含路径分隔符或 `..` 的文件名；文件不存在时返回 FileNotFound
    async fn resolve(&self, filename: &str) -> Result<PathBuf, OutputStorageError>;

    /// 清理早于 max_age 的输出文件
    async fn cleanup(&self, max_age: Duration) -> Result<CleanupResult, OutputStorageError>;
}
