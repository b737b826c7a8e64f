//! Speech recognition port interface

use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::mpsc;

use crate::domain::dictation::{RecognitionEvent, UiLanguage};

/// Speech recognition errors
#[derive(Debug, Clone, Error)]
pub enum RecognitionError {
    #[error("Speech recognition is not supported on this platform")]
    Unsupported,

    #[error("Failed to start speech recognition: {0}")]
    StartFailed(String),

    #[error("Failed to stop speech recognition: {0}")]
    StopFailed(String),
}

/// Port for a live speech-to-text capability
#[async_trait]
pub trait SpeechRecognizer: Send + Sync {
    /// Whether the platform offers speech recognition at all
    fn is_supported(&self) -> bool;

    /// Start recognizing in the given language.
    ///
    /// Events arrive on the returned channel in order. The channel closes
    /// once the recognizer has stopped and flushed its last result.
    async fn start(
        &self,
        language: UiLanguage,
    ) -> Result<mpsc::UnboundedReceiver<RecognitionEvent>, RecognitionError>;

    /// Stop recognizing. Results produced before the stop are still delivered.
    async fn stop(&self) -> Result<(), RecognitionError>;
}
