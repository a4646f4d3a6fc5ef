//! Voice Query Handlers

use std::sync::Arc;

use crate::application::error::ApplicationError;
use crate::application::ports::{VoiceRecord, VoiceRegistryPort, VoiceSummary};
use crate::application::queries::{GetVoice, ListVoices, SearchVoices};

// ============================================================================
// Response DTOs
// ============================================================================

/// 音色详情响应
#[derive(Debug, Clone)]
pub struct VoiceDetailResponse {
    pub id: String,
    pub name: String,
    pub description: String,
    pub duration_secs: f64,
    pub sample_rate: u32,
    pub file_size: u64,
    pub created_at: String,
}

impl From<VoiceRecord> for VoiceDetailResponse {
    fn from(record: VoiceRecord) -> Self {
        Self {
            id: record.id,
            name: record.name,
            description: record.description,
            duration_secs: record.duration_secs,
            sample_rate: record.sample_rate,
            file_size: record.file_size,
            created_at: record.created_at.to_rfc3339(),
        }
    }
}

// ============================================================================
// Handlers
// ============================================================================

/// GetVoice Handler
pub struct GetVoiceHandler {
    registry: Arc<dyn VoiceRegistryPort>,
}

impl GetVoiceHandler {
    pub fn new(registry: Arc<dyn VoiceRegistryPort>) -> Self {
        Self { registry }
    }

    pub async fn handle(&self, query: GetVoice) -> Result<VoiceDetailResponse, ApplicationError> {
        let record = self
            .registry
            .get(&query.name)
            .await
            .ok_or_else(|| ApplicationError::not_found("Voice", query.name))?;

        Ok(VoiceDetailResponse::from(record))
    }
}

/// ListVoices Handler
pub struct ListVoicesHandler {
    registry: Arc<dyn VoiceRegistryPort>,
}

impl ListVoicesHandler {
    pub fn new(registry: Arc<dyn VoiceRegistryPort>) -> Self {
        Self { registry }
    }

    pub async fn handle(&self, _query: ListVoices) -> Result<Vec<VoiceSummary>, ApplicationError> {
        Ok(self.registry.list().await)
    }
}

/// SearchVoices Handler
pub struct SearchVoicesHandler {
    registry: Arc<dyn VoiceRegistryPort>,
}

impl SearchVoicesHandler {
    pub fn new(registry: Arc<dyn VoiceRegistryPort>) -> Self {
        Self { registry }
    }

    pub async fn handle(
        &self,
        query: SearchVoices,
    ) -> Result<Vec<VoiceSummary>, ApplicationError> {
        Ok(self.registry.search(&query.keyword).await)
    }
}
