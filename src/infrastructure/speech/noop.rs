//! No-op speech recognizer adapter
//!
//! Used where no speech recognition capability exists.

use async_trait::async_trait;
use tokio::sync::mpsc;

use crate::application::ports::{RecognitionError, SpeechRecognizer};
use crate::domain::dictation::{RecognitionEvent, UiLanguage};

/// Recognizer that reports itself unsupported
pub struct NoOpRecognizer;

impl NoOpRecognizer {
    pub fn new() -> Self {
        Self
    }
}

impl Default for NoOpRecognizer {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SpeechRecognizer for NoOpRecognizer {
    fn is_supported(&self) -> bool {
        false
    }

    async fn start(
        &self,
        _language: UiLanguage,
    ) -> Result<mpsc::UnboundedReceiver<RecognitionEvent>, RecognitionError> {
        Err(RecognitionError::Unsupported)
    }

    async fn stop(&self) -> Result<(), RecognitionError> {
        Ok(())
    }
}
