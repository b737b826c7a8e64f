//! Line-based speech recognizer adapter
//!
//! Treats a text stream as the output of a continuous recognizer. Each line
//! extends the utterance and is reported as a final result covering
//! everything said so far. Lines starting with `~` are reported as interim
//! guesses and do not extend it. A blank line or end of input ends listening.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, Lines};
use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::JoinHandle;
use tracing::debug;

use crate::application::ports::{RecognitionError, SpeechRecognizer};
use crate::domain::dictation::{RecognitionEvent, UiLanguage};

/// Prefix marking an interim line
const INTERIM_PREFIX: char = '~';

struct Listening {
    stop: oneshot::Sender<()>,
    handle: JoinHandle<()>,
}

/// Recognizer fed by lines of text, such as stdin
/// Partial lines stay buffered in the shared reader when a session stops
/// mid-line, so the next session sees the whole line.
pub struct LineRecognizer<R> {
    source: Arc<tokio::sync::Mutex<Lines<R>>>,
    listening: Mutex<Option<Listening>>,
    drained: Mutex<Option<watch::Receiver<bool>>>,
}

impl<R> LineRecognizer<R>
where
    R: AsyncBufRead + Unpin + Send + 'static,
{
    pub fn new(source: R) -> Self {
        Self {
            source: Arc::new(tokio::sync::Mutex::new(source.lines())),
            listening: Mutex::new(None),
            drained: Mutex::new(None),
        }
    }

    /// Wait until the current session's input has ended.
    ///
    /// Returns immediately when no session was started.
    pub async fn finished(&self) {
        let drained = self
            .drained
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone();
        if let Some(mut drained) = drained {
            let _ = drained.wait_for(|done| *done).await;
        }
    }
}

#[async_trait]
impl<R> SpeechRecognizer for LineRecognizer<R>
where
    R: AsyncBufRead + Unpin + Send + 'static,
{
    fn is_supported(&self) -> bool {
        true
    }

    async fn start(
        &self,
        language: UiLanguage,
    ) -> Result<mpsc::UnboundedReceiver<RecognitionEvent>, RecognitionError> {
        let mut listening = self
            .listening
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        if listening.is_some() {
            return Err(RecognitionError::StartFailed(
                "recognizer is already listening".to_string(),
            ));
        }

        let (events_tx, events_rx) = mpsc::unbounded_channel();
        let (stop_tx, stop_rx) = oneshot::channel();
        let (done_tx, done_rx) = watch::channel(false);

        let handle = tokio::spawn(read_lines(
            Arc::clone(&self.source),
            events_tx,
            stop_rx,
            done_tx,
        ));

        *listening = Some(Listening {
            stop: stop_tx,
            handle,
        });
        *self
            .drained
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = Some(done_rx);

        debug!(locale = language.recognition_locale(), "line recognizer listening");
        Ok(events_rx)
    }

    async fn stop(&self) -> Result<(), RecognitionError> {
        let listening = self
            .listening
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .take();

        if let Some(Listening { stop, handle }) = listening {
            let _ = stop.send(());
            handle
                .await
                .map_err(|e| RecognitionError::StopFailed(e.to_string()))?;
        }
        Ok(())
    }
}

async fn read_lines<R>(
    source: Arc<tokio::sync::Mutex<Lines<R>>>,
    events: mpsc::UnboundedSender<RecognitionEvent>,
    mut stop: oneshot::Receiver<()>,
    done: watch::Sender<bool>,
) where
    R: AsyncBufRead + Unpin + Send,
{
    let mut lines = source.lock().await;
    let mut utterance = String::new();

    loop {
        tokio::select! {
            biased;
            _ = &mut stop => break,
            read = lines.next_line() => match read {
                Ok(None) => break,
                Ok(Some(line)) => {
                    let text = line.trim();
                    if text.is_empty() {
                        break;
                    }
                    let event = match text.strip_prefix(INTERIM_PREFIX) {
                        Some(guess) => RecognitionEvent::Interim(join(&utterance, guess.trim())),
                        None => {
                            utterance = join(&utterance, text);
                            RecognitionEvent::Final(utterance.clone())
                        }
                    };
                    if events.send(event).is_err() {
                        break;
                    }
                }
                Err(e) => {
                    let _ = events.send(RecognitionEvent::Error(e.to_string()));
                    break;
                }
            }
        }
    }

    let _ = done.send(true);
}

fn join(utterance: &str, segment: &str) -> String {
    match (utterance.is_empty(), segment.is_empty()) {
        (true, _) => segment.to_string(),
        (_, true) => utterance.to_string(),
        _ => format!("{utterance} {segment}"),
    }
}
