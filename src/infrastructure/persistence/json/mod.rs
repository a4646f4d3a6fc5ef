//! JSON 平面文件持久化

mod voice_registry;

pub use voice_registry::JsonVoiceRegistry;
