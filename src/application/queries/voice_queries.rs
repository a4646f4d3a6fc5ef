//! Voice Queries

/// 获取音色详情查询
#[derive(Debug, Clone)]
pub struct GetVoice {
    pub name: String,
}

/// 列出所有音色查询
#[derive(Debug, Clone)]
pub struct ListVoices;

/// 按关键词搜索音色查询
///
/// 空关键词等价于 ListVoices
#[derive(Debug, Clone)]
pub struct SearchVoices {
    pub keyword: String,
}
