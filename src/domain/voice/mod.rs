//! Voice Context - 音色限界上下文
//!
//! 职责:
//! - 音色名称与参考音频格式校验
//! - 音色元数据约束

mod value_objects;

pub use value_objects::{AudioFormat, VoiceName};
