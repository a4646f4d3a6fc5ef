//! Voice Registry Port - 出站端口
//!
//! 定义音色注册表的抽象接口：名称 → 音色记录的持久化映射，
//! 每条记录持有注册表私有的参考音频副本。
//! 具体实现在 infrastructure 层（JSON 平面文件）

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Registry 错误
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("Voice already exists: {0}")]
    NameConflict(String),

    #[error("Source audio not found: {0}")]
    SourceNotFound(PathBuf),

    #[error("Voice not found: {0}")]
    NotFound(String),

    #[error("Invalid voice name: {0}")]
    InvalidName(String),

    #[error("Persistence error: {0}")]
    Persistence(String),

    #[error("IO error: {0}")]
    Io(String),
}

/// 音色记录（持久化实体）
///
/// 不变量:
/// - `audio_path` 指向注册表自己复制的私有文件，绝不引用调用方提供的源路径
/// - `name` 创建后不可变（无重命名操作）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VoiceRecord {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub audio_path: PathBuf,
    pub created_at: DateTime<Utc>,
    /// 参考音频时长（秒），探测失败时为 0
    #[serde(default)]
    pub duration_secs: f64,
    /// 采样率（Hz），探测失败时为 0
    #[serde(default)]
    pub sample_rate: u32,
    #[serde(default)]
    pub file_size: u64,
}

/// 音色摘要（列表/搜索输出）
#[derive(Debug, Clone, Serialize)]
pub struct VoiceSummary {
    pub name: String,
    pub description: String,
    pub duration_secs: f64,
    pub created_at: DateTime<Utc>,
    pub file_size: u64,
}

impl From<&VoiceRecord> for VoiceSummary {
    fn from(record: &VoiceRecord) -> Self {
        Self {
            name: record.name.clone(),
            description: record.description.clone(),
            duration_secs: record.duration_secs,
            created_at: record.created_at,
            file_size: record.file_size,
        }
    }
}

/// Voice Registry Port
///
/// 并发约束: 写操作（register / delete）必须串行执行，
/// 读操作可以并发但需观察到一致的映射快照
#[async_trait]
pub trait VoiceRegistryPort: Send + Sync {
    /// 注册音色：复制源音频为私有副本，探测元数据，落盘
    async fn register(
        &self,
        source: &Path,
        name: &str,
        description: &str,
    ) -> Result<VoiceRecord, RegistryError>;

    /// 根据名称获取音色记录（不校验音频文件是否仍存在）
    async fn get(&self, name: &str) -> Option<VoiceRecord>;

    /// 解析音色的参考音频路径
    ///
    /// 仅当名称存在且对应音频文件仍在磁盘上时返回路径，
    /// 否则返回 None（缺失是正常否定结果，不是错误）
    async fn lookup_audio_path(&self, name: &str) -> Option<PathBuf>;

    /// 列出所有音色摘要，按创建时间倒序
    ///
    /// 后备音频文件已丢失的条目被静默跳过
    async fn list(&self) -> Vec<VoiceSummary>;

    /// 按关键词搜索音色（名称/描述的大小写不敏感子串匹配）
    async fn search(&self, keyword: &str) -> Vec<VoiceSummary>;

    /// 删除音色：移除音频文件（容忍其已不存在）与映射条目，落盘
    async fn delete(&self, name: &str) -> Result<(), RegistryError>;

    /// 当前可用音色数量（等于 list().len()）
    async fn count(&self) -> usize;
}
