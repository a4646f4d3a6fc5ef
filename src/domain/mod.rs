//! Domain Layer - 领域层
//!
//! 包含一个限界上下文:
//! - Voice Context: 音色管理

pub mod voice;
