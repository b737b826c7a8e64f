//! Dictation capture use case

use std::sync::{Arc, Mutex, MutexGuard};

use thiserror::Error;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::domain::dictation::{DictationSession, DictationState, RecognitionEvent, UiLanguage};

use super::ports::{RecognitionError, SpeechRecognizer};

/// Errors from starting a dictation session
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DictationError {
    #[error("Voice input is not supported on this platform")]
    UnsupportedCapability,

    #[error("Failed to start recording. Please check microphone permissions. ({0})")]
    AcquisitionFailure(String),

    #[error("A dictation session is already active")]
    AlreadyActive,
}

impl From<RecognitionError> for DictationError {
    fn from(err: RecognitionError) -> Self {
        match err {
            RecognitionError::Unsupported => Self::UnsupportedCapability,
            other => Self::AcquisitionFailure(other.to_string()),
        }
    }
}

struct Pump {
    finish: oneshot::Sender<()>,
    handle: JoinHandle<()>,
}

/// Start/stop wrapper around a speech recognizer.
///
/// Owns the recognizer exclusively while a session is active and folds its
/// event stream into a single current transcript.
pub struct DictationCapture<S: SpeechRecognizer> {
    recognizer: S,
    session: Arc<Mutex<DictationSession>>,
    pump: tokio::sync::Mutex<Option<Pump>>,
}

impl<S: SpeechRecognizer> DictationCapture<S> {
    pub fn new(recognizer: S) -> Self {
        Self {
            recognizer,
            session: Arc::new(Mutex::new(DictationSession::new())),
            pump: tokio::sync::Mutex::new(None),
        }
    }

    fn session(&self) -> MutexGuard<'_, DictationSession> {
        lock_session(&self.session)
    }

    pub fn recognizer(&self) -> &S {
        &self.recognizer
    }

    pub fn is_supported(&self) -> bool {
        self.recognizer.is_supported()
    }

    pub fn state(&self) -> DictationState {
        self.session().state()
    }

    pub fn is_active(&self) -> bool {
        !self.session().is_idle()
    }

    /// Language pinned by the active session
    pub fn active_locale(&self) -> Option<UiLanguage> {
        self.session().locale()
    }

    /// Live transcript of the active session, untrimmed
    pub fn current_transcript(&self) -> String {
        self.session().transcript().to_string()
    }

    /// Start a session in `language`.
    ///
    /// The language is copied into the session; later changes to the caller's
    /// language do not affect it.
    pub async fn begin(&self, language: UiLanguage) -> Result<(), DictationError> {
        let mut pump = self.pump.lock().await;

        if !self.recognizer.is_supported() {
            warn!("speech recognition unsupported");
            return Err(DictationError::UnsupportedCapability);
        }

        self.session()
            .begin(language)
            .map_err(|_| DictationError::AlreadyActive)?;

        let events = match self.recognizer.start(language).await {
            Ok(events) => events,
            Err(e) => {
                let _ = self.session().abort();
                warn!(error = %e, "speech recognition failed to start");
                return Err(e.into());
            }
        };

        let (finish_tx, finish_rx) = oneshot::channel();
        let handle = tokio::spawn(pump_events(
            Arc::clone(&self.session),
            events,
            finish_rx,
        ));
        *pump = Some(Pump {
            finish: finish_tx,
            handle,
        });

        info!(locale = language.recognition_locale(), "dictation started");
        Ok(())
    }

    /// Stop the session and return its trimmed transcript.
    ///
    /// Returns an empty string when no session is active.
    pub async fn end(&self) -> String {
        let mut pump = self.pump.lock().await;

        if self.session().finalize().is_err() {
            debug!("end called without an active dictation session");
            return String::new();
        }

        if let Err(e) = self.recognizer.stop().await {
            warn!(error = %e, "speech recognition did not stop cleanly");
        }

        if let Some(Pump { finish, handle }) = pump.take() {
            let _ = finish.send(());
            if let Err(e) = handle.await {
                warn!(error = %e, "dictation event pump failed");
            }
        }

        let (confirmed, transcript) = {
            let mut session = self.session();
            (session.is_confirmed(), session.finish().unwrap_or_default())
        };
        info!(
            chars = transcript.chars().count(),
            confirmed,
            "dictation ended"
        );
        transcript
    }
}

fn lock_session(session: &Mutex<DictationSession>) -> MutexGuard<'_, DictationSession> {
    session.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Apply recognizer events in arrival order until the stream closes or the
/// session asks to finish, then flush whatever is already buffered.
async fn pump_events(
    session: Arc<Mutex<DictationSession>>,
    mut events: mpsc::UnboundedReceiver<RecognitionEvent>,
    mut finish: oneshot::Receiver<()>,
) {
    loop {
        tokio::select! {
            biased;
            event = events.recv() => match event {
                Some(event) => apply_event(&session, event),
                None => break,
            },
            _ = &mut finish => {
                while let Ok(event) = events.try_recv() {
                    apply_event(&session, event);
                }
                break;
            }
        }
    }
}

fn apply_event(session: &Mutex<DictationSession>, event: RecognitionEvent) {
    if let RecognitionEvent::Error(ref message) = event {
        warn!(error = %message, "speech recognition error");
    }
    lock_session(session).apply(event);
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    struct MockRecognizer {
        supported: bool,
        fail_start: bool,
        sender: Mutex<Option<mpsc::UnboundedSender<RecognitionEvent>>>,
        started_with: Mutex<Vec<UiLanguage>>,
    }

    impl MockRecognizer {
        fn new() -> Self {
            Self {
                supported: true,
                fail_start: false,
                sender: Mutex::new(None),
                started_with: Mutex::new(Vec::new()),
            }
        }

        fn emit(&self, event: RecognitionEvent) {
            if let Some(tx) = self.sender.lock().unwrap().as_ref() {
                tx.send(event).unwrap();
            }
        }
    }

    #[async_trait]
    impl SpeechRecognizer for MockRecognizer {
        fn is_supported(&self) -> bool {
            self.supported
        }

        async fn start(
            &self,
            language: UiLanguage,
        ) -> Result<mpsc::UnboundedReceiver<RecognitionEvent>, RecognitionError> {
            if self.fail_start {
                return Err(RecognitionError::StartFailed("permission denied".into()));
            }
            let (tx, rx) = mpsc::unbounded_channel();
            *self.sender.lock().unwrap() = Some(tx);
            self.started_with.lock().unwrap().push(language);
            Ok(rx)
        }

        async fn stop(&self) -> Result<(), RecognitionError> {
            self.sender.lock().unwrap().take();
            Ok(())
        }
    }

    #[tokio::test]
    async fn final_result_replaces_interim() {
        let capture = DictationCapture::new(MockRecognizer::new());
        capture.begin(UiLanguage::English).await.unwrap();
        assert_eq!(capture.state(), DictationState::Recording);

        capture
            .recognizer
            .emit(RecognitionEvent::Interim("What are my ch".into()));
        capture
            .recognizer
            .emit(RecognitionEvent::Final("What are my chances? ".into()));

        assert_eq!(capture.end().await, "What are my chances?");
        assert_eq!(capture.state(), DictationState::Idle);
    }

    #[tokio::test]
    async fn end_without_speech_returns_empty() {
        let capture = DictationCapture::new(MockRecognizer::new());
        capture.begin(UiLanguage::English).await.unwrap();
        assert_eq!(capture.end().await, "");
    }

    #[tokio::test]
    async fn end_while_idle_returns_empty() {
        let capture = DictationCapture::new(MockRecognizer::new());
        assert_eq!(capture.end().await, "");
    }

    #[tokio::test]
    async fn unsupported_platform_fails_fast() {
        let recognizer = MockRecognizer {
            supported: false,
            ..MockRecognizer::new()
        };
        let capture = DictationCapture::new(recognizer);

        assert!(!capture.is_supported());
        assert_eq!(
            capture.begin(UiLanguage::English).await,
            Err(DictationError::UnsupportedCapability)
        );
        assert!(!capture.is_active());
    }

    #[tokio::test]
    async fn acquisition_failure_leaves_capture_idle() {
        let recognizer = MockRecognizer {
            fail_start: true,
            ..MockRecognizer::new()
        };
        let capture = DictationCapture::new(recognizer);

        let err = capture.begin(UiLanguage::English).await.unwrap_err();
        assert!(matches!(err, DictationError::AcquisitionFailure(_)));
        assert_eq!(capture.state(), DictationState::Idle);
    }

    #[tokio::test]
    async fn begin_while_active_fails() {
        let capture = DictationCapture::new(MockRecognizer::new());
        capture.begin(UiLanguage::English).await.unwrap();

        assert_eq!(
            capture.begin(UiLanguage::Tamil).await,
            Err(DictationError::AlreadyActive)
        );
        assert_eq!(capture.recognizer.started_with.lock().unwrap().len(), 1);
        assert_eq!(capture.active_locale(), Some(UiLanguage::English));
    }

    #[tokio::test]
    async fn locale_is_pinned_at_begin() {
        let capture = DictationCapture::new(MockRecognizer::new());
        let mut language = UiLanguage::Tamil;
        capture.begin(language).await.unwrap();
        language = UiLanguage::English;

        assert_eq!(capture.active_locale(), Some(UiLanguage::Tamil));
        assert_ne!(capture.active_locale(), Some(language));
        assert_eq!(
            *capture.recognizer.started_with.lock().unwrap(),
            vec![UiLanguage::Tamil]
        );
    }

    #[tokio::test]
    async fn recognition_errors_do_not_end_session() {
        let capture = DictationCapture::new(MockRecognizer::new());
        capture.begin(UiLanguage::English).await.unwrap();

        capture
            .recognizer
            .emit(RecognitionEvent::Final("Is the lease valid?".into()));
        capture
            .recognizer
            .emit(RecognitionEvent::Error("network".into()));

        assert_eq!(capture.end().await, "Is the lease valid?");
    }

    #[tokio::test]
    async fn sessions_can_repeat() {
        let capture = DictationCapture::new(MockRecognizer::new());

        capture.begin(UiLanguage::English).await.unwrap();
        capture.recognizer.emit(RecognitionEvent::Final("one".into()));
        assert_eq!(capture.end().await, "one");

        capture.begin(UiLanguage::Tamil).await.unwrap();
        assert_eq!(capture.current_transcript(), "");
        capture.recognizer.emit(RecognitionEvent::Final("two".into()));
        assert_eq!(capture.end().await, "two");
    }

    #[test]
    fn recognition_error_mapping() {
        assert_eq!(
            DictationError::from(RecognitionError::Unsupported),
            DictationError::UnsupportedCapability
        );
        assert!(matches!(
            DictationError::from(RecognitionError::StartFailed("x".into())),
            DictationError::AcquisitionFailure(_)
        ));
    }
}
