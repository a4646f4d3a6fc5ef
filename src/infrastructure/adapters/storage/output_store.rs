//! File Output Storage - 文件系统合成产物存储实现
//!
//! 实现 OutputStoragePort trait
//!
//! 布局: `{outputs_dir}/tts_{task_id}.wav`，task_id 为 uuid v4

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};
use tokio::fs;
use uuid::Uuid;

use crate::application::ports::{
    CleanupResult, OutputStorageError, OutputStoragePort, StoredOutput,
};

/// 输出文件名前缀
const OUTPUT_PREFIX: &str = "tts_";

/// 文件系统输出存储
pub struct FileOutputStorage {
    /// 存储根目录
    base_dir: PathBuf,
}

impl FileOutputStorage {
    /// 创建新的输出存储
    pub async fn new(base_dir: impl AsRef<Path>) -> Result<Self, OutputStorageError> {
        let base_dir = base_dir.as_ref().to_path_buf();

        fs::create_dir_all(&base_dir)
            .await
            .map_err(|e| OutputStorageError::IoError(e.to_string()))?;

        Ok(Self { base_dir })
    }

    /// 获取存储根目录
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// 校验对外文件名，拒绝路径穿越
    fn validate_filename(filename: &str) -> Result<(), OutputStorageError> {
        let suspicious = filename.is_empty()
            || filename.contains('/')
            || filename.contains('\\')
            || filename.contains("..");
        if suspicious {
            return Err(OutputStorageError::InvalidFilename(filename.to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl OutputStoragePort for FileOutputStorage {
    async fn save(&self, data: &[u8]) -> Result<StoredOutput, OutputStorageError> {
        let task_id = Uuid::new_v4().to_string();
        let filename = format!("{}{}.wav", OUTPUT_PREFIX, task_id);
        let path = self.base_dir.join(&filename);

        fs::write(&path, data)
            .await
            .map_err(|e| OutputStorageError::IoError(e.to_string()))?;

        tracing::debug!(
            task_id = %task_id,
            size = data.len(),
            "Saved synthesized audio"
        );

        Ok(StoredOutput {
            task_id,
            filename,
            path,
        })
    }

    async fn resolve(&self, filename: &str) -> Result<PathBuf, OutputStorageError> {
        Self::validate_filename(filename)?;

        let path = self.base_dir.join(filename);
        if !fs::try_exists(&path).await.unwrap_or(false) {
            return Err(OutputStorageError::FileNotFound(filename.to_string()));
        }

        Ok(path)
    }

    async fn cleanup(&self, max_age: Duration) -> Result<CleanupResult, OutputStorageError> {
        let now = SystemTime::now();
        let mut result = CleanupResult::default();

        let mut entries = fs::read_dir(&self.base_dir)
            .await
            .map_err(|e| OutputStorageError::IoError(e.to_string()))?;

        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| OutputStorageError::IoError(e.to_string()))?
        {
            let name = entry.file_name();
            let Some(name) = name.to_str() else {
                continue;
            };
            if !name.starts_with(OUTPUT_PREFIX) || !name.ends_with(".wav") {
                continue;
            }

            let Ok(metadata) = entry.metadata().await else {
                continue;
            };
            let modified = metadata.modified().unwrap_or(now);
            let expired = now
                .duration_since(modified)
                .map(|age| age > max_age)
                .unwrap_or(false);

            if expired && fs::remove_file(entry.path()).await.is_ok() {
                result.deleted_files += 1;
                result.freed_bytes += metadata.len();
            }
        }

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_save_and_resolve() {
        let dir = TempDir::new().unwrap();
        let storage = FileOutputStorage::new(dir.path()).await.unwrap();

        let stored = storage.save(b"wav-bytes").await.unwrap();
        assert!(stored.filename.starts_with("tts_"));
        assert!(stored.filename.ends_with(".wav"));

        let path = storage.resolve(&stored.filename).await.unwrap();
        assert_eq!(fs::read(&path).await.unwrap(), b"wav-bytes");
    }

    #[tokio::test]
    async fn test_resolve_missing() {
        let dir = TempDir::new().unwrap();
        let storage = FileOutputStorage::new(dir.path()).await.unwrap();

        let err = storage.resolve("tts_unknown.wav").await.unwrap_err();
        assert!(matches!(err, OutputStorageError::FileNotFound(_)));
    }

    #[tokio::test]
    async fn test_resolve_rejects_traversal() {
        let dir = TempDir::new().unwrap();
        let storage = FileOutputStorage::new(dir.path()).await.unwrap();

        for bad in ["../etc/passwd", "a/b.wav", "..", ""] {
            let err = storage.resolve(bad).await.unwrap_err();
            assert!(matches!(err, OutputStorageError::InvalidFilename(_)));
        }
    }

    #[tokio::test]
    async fn test_cleanup_removes_only_expired_outputs() {
        let dir = TempDir::new().unwrap();
        let storage = FileOutputStorage::new(dir.path()).await.unwrap();

        let stored = storage.save(b"fresh").await.unwrap();
        // 非输出文件不受清理影响
        fs::write(dir.path().join("keep.txt"), b"other").await.unwrap();

        // max_age 为零时所有输出都过期
        let result = storage.cleanup(Duration::ZERO).await.unwrap();
        assert_eq!(result.deleted_files, 1);
        assert!(!fs::try_exists(&stored.path).await.unwrap());
        assert!(fs::try_exists(dir.path().join("keep.txt")).await.unwrap());

        // 大 max_age 时新文件保留
        let stored = storage.save(b"fresh").await.unwrap();
        let result = storage.cleanup(Duration::from_secs(3600)).await.unwrap();
        assert_eq!(result.deleted_files, 0);
        assert!(fs::try_exists(&stored.path).await.unwrap());
    }
}
