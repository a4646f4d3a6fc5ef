//! Voice Commands

use std::path::PathBuf;

/// 注册音色命令
///
/// `source_audio_path` 是请求层落盘的临时上传文件，
/// 注册表会复制出私有副本，源文件随后即可删除
#[derive(Debug, Clone)]
pub struct RegisterVoice {
    pub name: String,
    pub source_audio_path: PathBuf,
    pub description: String,
}

/// 删除音色命令
#[derive(Debug, Clone)]
pub struct DeleteVoice {
    pub name: String,
}
