//! Document intake use case

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::domain::document::{
    DocumentMimeType, FileSelection, UploadedDocument, MAX_DOCUMENT_BYTES,
};

use super::ports::{DocumentReader, ReadError, ReadProgressCallback};

/// Errors from document intake
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IntakeError {
    #[error("Invalid file type \"{mime_type}\". Please upload PDF or DOCX files only.")]
    InvalidFileType { mime_type: String },

    #[error("File size {size_bytes} bytes exceeds the 10MB limit")]
    FileTooLarge { size_bytes: u64 },

    #[error("Failed to read file: {0}")]
    ReadFailure(String),

    /// A newer selection replaced this attempt
    #[error("Upload superseded by a newer selection")]
    Superseded,
}

/// Intake progress callback, called with a percentage in [0, 100]
pub type IntakeProgressCallback = Arc<dyn Fn(u8) + Send + Sync>;

#[derive(Debug, Default)]
struct IntakeState {
    attempt: u64,
    cancel: Option<Arc<AtomicBool>>,
    document: Option<UploadedDocument>,
    progress: u8,
    uploading: bool,
    last_error: Option<IntakeError>,
}

impl IntakeState {
    /// Start a new attempt, cancelling the previous one and dropping its document
    fn supersede(&mut self) -> (u64, Arc<AtomicBool>) {
        if let Some(previous) = self.cancel.take() {
            previous.store(true, Ordering::SeqCst);
        }
        let cancel = Arc::new(AtomicBool::new(false));
        self.attempt += 1;
        self.cancel = Some(Arc::clone(&cancel));
        self.document = None;
        self.progress = 0;
        self.uploading = false;
        self.last_error = None;
        (self.attempt, cancel)
    }
}

/// Validates a selected file and decodes it into an [`UploadedDocument`].
///
/// Each selection supersedes the previous one: the earlier read is cancelled,
/// its progress stops reaching the caller, and any accepted document is
/// dropped before validation starts. Progress callbacks run while the intake
/// state is locked and must not call back into the intake.
pub struct DocumentIntake<R: DocumentReader> {
    reader: R,
    state: Arc<Mutex<IntakeState>>,
}

impl<R: DocumentReader> DocumentIntake<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            state: Arc::new(Mutex::new(IntakeState::default())),
        }
    }

    fn lock(&self) -> MutexGuard<'_, IntakeState> {
        lock_state(&self.state)
    }

    /// The currently accepted document, if any
    pub fn document(&self) -> Option<UploadedDocument> {
        self.lock().document.clone()
    }

    /// Progress of the current attempt
    pub fn progress(&self) -> u8 {
        self.lock().progress
    }

    pub fn is_uploading(&self) -> bool {
        self.lock().uploading
    }

    /// Failure of the current attempt, if it failed
    pub fn last_error(&self) -> Option<IntakeError> {
        self.lock().last_error.clone()
    }

    /// Deselect: cancel any read in progress and drop the accepted document
    pub fn clear(&self) {
        self.lock().supersede();
        debug!("document selection cleared");
    }

    /// Validate and decode a selected file.
    ///
    /// Size is checked before type, so an oversized file is always
    /// `FileTooLarge`. On any failure the previously accepted document stays
    /// cleared.
    pub async fn select(
        &self,
        selection: FileSelection,
        on_progress: Option<IntakeProgressCallback>,
    ) -> Result<UploadedDocument, IntakeError> {
        let (attempt, cancel) = self.lock().supersede();

        let mime_type = match validate(&selection) {
            Ok(mime_type) => mime_type,
            Err(e) => {
                warn!(file = %selection.name, error = %e, "document rejected");
                self.finish_attempt(attempt, Err(e.clone()), None);
                return Err(e);
            }
        };

        {
            let mut state = self.lock();
            if state.attempt != attempt {
                return Err(IntakeError::Superseded);
            }
            state.uploading = true;
        }
        let _guard = AttemptGuard {
            state: Arc::clone(&self.state),
            attempt,
        };
        debug!(
            file = %selection.name,
            bytes = selection.size_bytes,
            attempt,
            "reading document"
        );

        let progress = self.progress_relay(attempt, on_progress.clone());
        let read = self
            .reader
            .read(&selection.path, selection.size_bytes, cancel, progress)
            .await;

        let outcome = match read {
            Ok(bytes) => Ok(UploadedDocument::new(
                selection.name.clone(),
                selection.size_bytes,
                mime_type,
                String::from_utf8_lossy(&bytes).into_owned(),
            )),
            Err(ReadError::Cancelled) => Err(IntakeError::Superseded),
            Err(e) => Err(IntakeError::ReadFailure(e.to_string())),
        };

        if !self.finish_attempt(attempt, outcome.clone(), on_progress.as_ref()) {
            debug!(file = %selection.name, attempt, "stale upload dropped");
            return Err(IntakeError::Superseded);
        }

        match &outcome {
            Ok(document) => {
                info!(
                    file = %document.name(),
                    size = %document.human_readable_size(),
                    "document accepted"
                );
            }
            Err(e) => warn!(file = %selection.name, error = %e, "document read failed"),
        }

        outcome
    }

    /// Record the outcome if the attempt is still current.
    /// Returns false when a newer attempt has taken over.
    fn finish_attempt(
        &self,
        attempt: u64,
        outcome: Result<UploadedDocument, IntakeError>,
        on_progress: Option<&IntakeProgressCallback>,
    ) -> bool {
        let mut state = self.lock();
        if state.attempt != attempt {
            return false;
        }
        state.uploading = false;
        state.cancel = None;
        match outcome {
            Ok(document) => {
                state.document = Some(document);
                state.last_error = None;
                if state.progress < 100 {
                    state.progress = 100;
                    if let Some(cb) = on_progress {
                        cb(100);
                    }
                }
            }
            Err(IntakeError::Superseded) => {}
            Err(e) => {
                state.document = None;
                state.last_error = Some(e);
            }
        }
        true
    }

    /// Forward byte progress as a percentage, only while the attempt is
    /// current and only when it does not go backwards.
    fn progress_relay(
        &self,
        attempt: u64,
        on_progress: Option<IntakeProgressCallback>,
    ) -> ReadProgressCallback {
        let shared = Arc::clone(&self.state);
        Arc::new(move |loaded: u64, total: u64| {
            let percent = percentage(loaded, total);
            let mut state = lock_state(&shared);
            if state.attempt != attempt || percent < state.progress {
                return;
            }
            state.progress = percent;
            if let Some(ref cb) = on_progress {
                cb(percent);
            }
        })
    }
}

/// Settles an attempt whose `select` future is dropped before the read ends
struct AttemptGuard {
    state: Arc<Mutex<IntakeState>>,
    attempt: u64,
}

impl Drop for AttemptGuard {
    fn drop(&mut self) {
        let mut state = lock_state(&self.state);
        if state.attempt != self.attempt || !state.uploading {
            return;
        }
        state.uploading = false;
        if let Some(cancel) = state.cancel.take() {
            cancel.store(true, Ordering::SeqCst);
        }
        debug!(attempt = self.attempt, "upload abandoned");
    }
}

fn lock_state(state: &Mutex<IntakeState>) -> MutexGuard<'_, IntakeState> {
    state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn validate(selection: &FileSelection) -> Result<DocumentMimeType, IntakeError> {
    if selection.size_bytes > MAX_DOCUMENT_BYTES {
        return Err(IntakeError::FileTooLarge {
            size_bytes: selection.size_bytes,
        });
    }
    DocumentMimeType::from_mime(&selection.mime_type).ok_or_else(|| IntakeError::InvalidFileType {
        mime_type: selection.mime_type.clone(),
    })
}

fn percentage(loaded: u64, total: u64) -> u8 {
    if total == 0 {
        return 100;
    }
    (loaded.min(total).saturating_mul(100) / total) as u8
}
