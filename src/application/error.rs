//! 应用层错误定义
//!
//! 统一的命令/查询错误类型

use thiserror::Error;

/// 应用层错误
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// 资源未找到
    #[error("{resource_type} not found: {name}")]
    NotFound {
        resource_type: &'static str,
        name: String,
    },

    /// 资源冲突
    #[error("Conflict: {0}")]
    Conflict(String),

    /// 验证错误
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// 外部服务错误
    #[error("External service error: {0}")]
    ExternalServiceError(String),

    /// 存储错误
    #[error("Storage error: {0}")]
    StorageError(String),

    /// 内部错误
    #[error("Internal error: {0}")]
    InternalError(String),
}

impl ApplicationError {
    /// 创建 NotFound 错误
    pub fn not_found(resource_type: &'static str, name: impl Into<String>) -> Self {
        Self::NotFound {
            resource_type,
            name: name.into(),
        }
    }

    /// 创建验证错误
    pub fn validation(message: impl Into<String>) -> Self {
        Self::ValidationError(message.into())
    }

    /// 创建内部错误
    pub fn internal(message: impl Into<String>) -> Self {
        Self::InternalError(message.into())
    }
}

impl From<crate::application::ports::RegistryError> for ApplicationError {
    fn from(err: crate::application::ports::RegistryError) -> Self {
        use crate::application::ports::RegistryError;
        match err {
            RegistryError::NameConflict(name) => {
                Self::Conflict(format!("Voice already exists: {}", name))
            }
            RegistryError::SourceNotFound(path) => {
                Self::ValidationError(format!("Source audio not found: {}", path.display()))
            }
            RegistryError::NotFound(name) => Self::not_found("Voice", name),
            RegistryError::InvalidName(msg) => Self::ValidationError(msg),
            RegistryError::Persistence(msg) | RegistryError::Io(msg) => Self::StorageError(msg),
        }
    }
}

impl From<crate::application::ports::TtsError> for ApplicationError {
    fn from(err: crate::application::ports::TtsError) -> Self {
        Self::ExternalServiceError(err.to_string())
    }
}

impl From<crate::application::ports::OutputStorageError> for ApplicationError {
    fn from(err: crate::application::ports::OutputStorageError) -> Self {
        use crate::application::ports::OutputStorageError;
        match err {
            OutputStorageError::FileNotFound(name) => Self::not_found("Audio", name),
            OutputStorageError::InvalidFilename(msg) => Self::ValidationError(msg),
            OutputStorageError::IoError(msg) => Self::StorageError(msg),
        }
    }
}
