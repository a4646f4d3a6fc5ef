//! Data Transfer Objects

use serde::{Deserialize, Serialize};

use crate::application::ports::GenerationParams;

// ============================================================================
// 统一响应结构
// ============================================================================

/// 统一 API 响应格式
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub errno: i32,
    pub error: String,
    pub data: Option<T>,
}

impl<T: Serialize> ApiResponse<T> {
    /// 成功响应
    pub fn success(data: T) -> Self {
        Self {
            errno: 0,
            error: String::new(),
            data: Some(data),
        }
    }
}

/// 空数据响应
#[derive(Debug, Serialize)]
pub struct Empty {}

impl ApiResponse<Empty> {
    /// 成功但无数据
    pub fn ok() -> Self {
        Self {
            errno: 0,
            error: String::new(),
            data: Some(Empty {}),
        }
    }
}

// ============================================================================
// Voice DTOs
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct GetVoiceRequest {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct DeleteVoiceRequest {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct SearchVoicesRequest {
    #[serde(default)]
    pub keyword: String,
}

#[derive(Debug, Serialize)]
pub struct VoiceSummaryDto {
    pub name: String,
    pub description: String,
    pub duration_secs: f64,
    pub created_at: String,
    pub file_size: u64,
}

impl From<crate::application::ports::VoiceSummary> for VoiceSummaryDto {
    fn from(summary: crate::application::ports::VoiceSummary) -> Self {
        Self {
            name: summary.name,
            description: summary.description,
            duration_secs: summary.duration_secs,
            created_at: summary.created_at.to_rfc3339(),
            file_size: summary.file_size,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct VoiceDetailDto {
    pub id: String,
    pub name: String,
    pub description: String,
    pub duration_secs: f64,
    pub sample_rate: u32,
    pub file_size: u64,
    pub created_at: String,
}

impl From<crate::application::VoiceDetailResponse> for VoiceDetailDto {
    fn from(detail: crate::application::VoiceDetailResponse) -> Self {
        Self {
            id: detail.id,
            name: detail.name,
            description: detail.description,
            duration_secs: detail.duration_secs,
            sample_rate: detail.sample_rate,
            file_size: detail.file_size,
            created_at: detail.created_at,
        }
    }
}

// ============================================================================
// TTS DTOs
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct SynthesizeRequest {
    pub text: String,
    pub voice_name: String,
    #[serde(flatten)]
    pub params: GenerationParams,
}

#[derive(Debug, Serialize)]
pub struct SynthesizeResponseDto {
    pub task_id: String,
    pub audio_url: String,
    /// 合成耗时（秒）
    pub duration: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_synthesize_request_with_defaults() {
        let req: SynthesizeRequest =
            serde_json::from_str(r#"{"text": "你好", "voice_name": "Alice"}"#).unwrap();
        assert_eq!(req.text, "你好");
        assert_eq!(req.voice_name, "Alice");
        assert_eq!(req.params.top_k, 30);
    }

    #[test]
    fn test_synthesize_request_overrides_params() {
        let req: SynthesizeRequest = serde_json::from_str(
            r#"{"text": "你好", "voice_name": "Alice", "temperature": 0.5, "num_beams": 1}"#,
        )
        .unwrap();
        assert_eq!(req.params.temperature, 0.5);
        assert_eq!(req.params.num_beams, 1);
        assert!(req.params.do_sample);
    }
}
