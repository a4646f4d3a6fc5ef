//! JSON Voice Registry - 平面文件音色注册表
//!
//! 实现 VoiceRegistryPort trait
//!
//! 存储布局:
//! - `{voices_dir}/voices.json`: 名称 → 音色记录的 JSON 对象，每次变更全量重写
//! - `{voices_dir}/{id}.{ext}`: 每个音色一份私有参考音频副本
//!
//! 进程存活期间以内存映射为准，文件仅用于跨重启持久化。
//! 启动时加载失败（文件缺失/损坏）降级为空映射，可用性优先于持久性。

use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::fs;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::application::ports::{
    AudioProbePort, RegistryError, VoiceRecord, VoiceRegistryPort, VoiceSummary,
};
use crate::domain::voice::VoiceName;

/// 注册表数据库文件名
const DB_FILE_NAME: &str = "voices.json";

/// JSON 平面文件音色注册表
///
/// 并发模型: 单把 RwLock 保护内存映射。
/// register/delete 在写锁内完成整个 检查-复制-插入-落盘 序列，
/// 保证全量重写不会覆盖并发写者的变更；读操作共享读锁
pub struct JsonVoiceRegistry {
    voices_dir: PathBuf,
    db_path: PathBuf,
    probe: Arc<dyn AudioProbePort>,
    voices: RwLock<HashMap<String, VoiceRecord>>,
}

impl JsonVoiceRegistry {
    /// 加载注册表
    ///
    /// 创建存储目录，读取并解析数据库文件；
    /// 解析失败时以空映射启动并告警，不让进程失败
    pub async fn load(
        voices_dir: impl AsRef<Path>,
        probe: Arc<dyn AudioProbePort>,
    ) -> Result<Self, RegistryError> {
        let voices_dir = voices_dir.as_ref().to_path_buf();

        fs::create_dir_all(&voices_dir)
            .await
            .map_err(|e| RegistryError::Io(e.to_string()))?;

        let db_path = voices_dir.join(DB_FILE_NAME);
        let voices = Self::load_db(&db_path).await;

        tracing::info!(
            dir = %voices_dir.display(),
            voices = voices.len(),
            "Voice registry loaded"
        );

        Ok(Self {
            voices_dir,
            db_path,
            probe,
            voices: RwLock::new(voices),
        })
    }

    /// 读取数据库文件，任何失败都降级为空映射
    async fn load_db(db_path: &Path) -> HashMap<String, VoiceRecord> {
        match fs::read(db_path).await {
            Ok(bytes) => match serde_json::from_slice(&bytes) {
                Ok(voices) => voices,
                Err(e) => {
                    tracing::warn!(
                        path = %db_path.display(),
                        error = %e,
                        "Voice database is corrupt, starting with empty registry"
                    );
                    HashMap::new()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => HashMap::new(),
            Err(e) => {
                tracing::warn!(
                    path = %db_path.display(),
                    error = %e,
                    "Failed to read voice database, starting with empty registry"
                );
                HashMap::new()
            }
        }
    }

    /// 全量重写数据库文件
    async fn persist(&self, voices: &HashMap<String, VoiceRecord>) -> Result<(), RegistryError> {
        let json = serde_json::to_string_pretty(voices)
            .map_err(|e| RegistryError::Persistence(e.to_string()))?;

        fs::write(&self.db_path, json)
            .await
            .map_err(|e| RegistryError::Persistence(e.to_string()))
    }

    /// 生成摘要列表：跳过后备文件已丢失的条目，按创建时间倒序
    async fn summaries(&self, keyword: Option<&str>) -> Vec<VoiceSummary> {
        let keyword = keyword
            .map(str::to_lowercase)
            .filter(|k| !k.is_empty());

        let voices = self.voices.read().await;
        let mut result = Vec::with_capacity(voices.len());

        for record in voices.values() {
            if !fs::try_exists(&record.audio_path).await.unwrap_or(false) {
                continue;
            }
            if let Some(ref keyword) = keyword {
                let matched = record.name.to_lowercase().contains(keyword.as_str())
                    || record.description.to_lowercase().contains(keyword.as_str());
                if !matched {
                    continue;
                }
            }
            result.push(VoiceSummary::from(record));
        }

        result.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        result
    }
}

#[async_trait]
impl VoiceRegistryPort for JsonVoiceRegistry {
    async fn register(
        &self,
        source: &Path,
        name: &str,
        description: &str,
    ) -> Result<VoiceRecord, RegistryError> {
        let name = VoiceName::new(name)
            .map_err(|e| RegistryError::InvalidName(e.to_string()))?;

        // 写锁覆盖整个 检查-复制-插入-落盘 序列
        let mut voices = self.voices.write().await;

        if voices.contains_key(name.as_str()) {
            return Err(RegistryError::NameConflict(name.into_string()));
        }

        if !fs::try_exists(source).await.unwrap_or(false) {
            return Err(RegistryError::SourceNotFound(source.to_path_buf()));
        }

        let id = Uuid::new_v4().to_string();
        let extension = source
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .unwrap_or_else(|| "wav".to_string());
        let audio_path = self.voices_dir.join(format!("{}.{}", id, extension));

        fs::copy(source, &audio_path)
            .await
            .map_err(|e| RegistryError::Io(e.to_string()))?;

        // 元数据探测失败降级为零值，绝不阻断注册
        let (duration_secs, sample_rate) = match self.probe.probe(&audio_path) {
            Ok(info) => (info.duration_secs, info.sample_rate),
            Err(e) => {
                tracing::warn!(
                    name = %name,
                    error = %e,
                    "Audio probe failed, recording zero metadata"
                );
                (0.0, 0)
            }
        };

        let file_size = fs::metadata(&audio_path)
            .await
            .map(|m| m.len())
            .unwrap_or(0);

        let record = VoiceRecord {
            id,
            name: name.as_str().to_string(),
            description: description.to_string(),
            audio_path: audio_path.clone(),
            created_at: Utc::now(),
            duration_secs,
            sample_rate,
            file_size,
        };

        voices.insert(record.name.clone(), record.clone());

        if let Err(e) = self.persist(&voices).await {
            // 落盘失败时回滚插入并清理已复制的音频，避免孤儿文件
            voices.remove(&record.name);
            if let Err(remove_err) = fs::remove_file(&audio_path).await {
                tracing::warn!(
                    path = %audio_path.display(),
                    error = %remove_err,
                    "Failed to remove copied audio after persistence failure"
                );
            }
            return Err(e);
        }

        Ok(record)
    }

    async fn get(&self, name: &str) -> Option<VoiceRecord> {
        self.voices.read().await.get(name).cloned()
    }

    async fn lookup_audio_path(&self, name: &str) -> Option<PathBuf> {
        let path = self.voices.read().await.get(name)?.audio_path.clone();
        if fs::try_exists(&path).await.unwrap_or(false) {
            Some(path)
        } else {
            None
        }
    }

    async fn list(&self) -> Vec<VoiceSummary> {
        self.summaries(None).await
    }

    async fn search(&self, keyword: &str) -> Vec<VoiceSummary> {
        self.summaries(Some(keyword)).await
    }

    async fn delete(&self, name: &str) -> Result<(), RegistryError> {
        let mut voices = self.voices.write().await;

        let record = voices
            .get(name)
            .ok_or_else(|| RegistryError::NotFound(name.to_string()))?;

        // 删除对文件系统是幂等的：文件已不存在不算失败
        match fs::remove_file(&record.audio_path).await {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => return Err(RegistryError::Io(e.to_string())),
        }

        voices.remove(name);
        self.persist(&voices).await?;

        Ok(())
    }

    async fn count(&self) -> usize {
        self.list().await.len()
    }
}
