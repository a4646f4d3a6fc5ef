//! Voice Command Handlers

use std::sync::Arc;

use crate::application::commands::{DeleteVoice, RegisterVoice};
use crate::application::error::ApplicationError;
use crate::application::ports::{VoiceRecord, VoiceRegistryPort};

// ============================================================================
// RegisterVoice
// ============================================================================

/// RegisterVoice Handler
pub struct RegisterVoiceHandler {
    registry: Arc<dyn VoiceRegistryPort>,
}

impl RegisterVoiceHandler {
    pub fn new(registry: Arc<dyn VoiceRegistryPort>) -> Self {
        Self { registry }
    }

    pub async fn handle(&self, command: RegisterVoice) -> Result<VoiceRecord, ApplicationError> {
        let record = self
            .registry
            .register(
                &command.source_audio_path,
                &command.name,
                &command.description,
            )
            .await?;

        tracing::info!(
            voice_id = %record.id,
            name = %record.name,
            duration_secs = record.duration_secs,
            "Voice registered"
        );

        Ok(record)
    }
}

// ============================================================================
// DeleteVoice
// ============================================================================

/// DeleteVoice Handler
pub struct DeleteVoiceHandler {
    registry: Arc<dyn VoiceRegistryPort>,
}

impl DeleteVoiceHandler {
    pub fn new(registry: Arc<dyn VoiceRegistryPort>) -> Self {
        Self { registry }
    }

    pub async fn handle(&self, command: DeleteVoice) -> Result<(), ApplicationError> {
        self.registry.delete(&command.name).await?;

        tracing::info!(name = %command.name, "Voice deleted");

        Ok(())
    }
}
