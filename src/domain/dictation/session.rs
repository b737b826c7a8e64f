//! Dictation session state machine

use std::fmt;
use thiserror::Error;

use super::language::UiLanguage;

/// Dictation session states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DictationState {
    #[default]
    Idle,
    Recording,
    Finalizing,
}

impl DictationState {
    /// Get the string representation
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Recording => "recording",
            Self::Finalizing => "finalizing",
        }
    }
}

impl fmt::Display for DictationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single update from the speech recognition capability
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecognitionEvent {
    /// Unconfirmed text that may still change
    Interim(String),
    /// Confirmed text for the current segment
    Final(String),
    /// A recognition error reported mid-session
    Error(String),
}

/// Error when an invalid dictation transition is attempted
#[derive(Debug, Clone, Error)]
#[error("Invalid dictation transition: cannot {action} while {current_state}")]
pub struct InvalidDictationTransition {
    pub current_state: DictationState,
    pub action: String,
}

/// Dictation session entity.
///
/// Holds a single "current transcript" value. Every recognition update,
/// interim or final, replaces it; text is never concatenated.
///
/// State machine:
///   IDLE -> RECORDING (begin)
///   RECORDING -> FINALIZING (finalize)
///   FINALIZING -> IDLE (finish, yields the trimmed transcript)
///   RECORDING -> IDLE (abort)
#[derive(Debug, Default)]
pub struct DictationSession {
    state: DictationState,
    locale: Option<UiLanguage>,
    transcript: String,
    is_final: bool,
}

impl DictationSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> DictationState {
        self.state
    }

    pub fn is_idle(&self) -> bool {
        self.state == DictationState::Idle
    }

    /// Language pinned when the session began
    pub fn locale(&self) -> Option<UiLanguage> {
        self.locale
    }

    /// Current transcript, untrimmed
    pub fn transcript(&self) -> &str {
        &self.transcript
    }

    /// Whether the current transcript came from a final result
    pub fn is_confirmed(&self) -> bool {
        self.is_final
    }

    /// Transition from IDLE to RECORDING, pinning the language by value
    pub fn begin(&mut self, language: UiLanguage) -> Result<(), InvalidDictationTransition> {
        if self.state != DictationState::Idle {
            return Err(self.invalid("begin dictation"));
        }
        self.state = DictationState::Recording;
        self.locale = Some(language);
        self.transcript.clear();
        self.is_final = false;
        Ok(())
    }

    /// Apply a recognition update.
    ///
    /// Returns true when the transcript changed. Updates outside RECORDING
    /// and FINALIZING are ignored.
    pub fn apply(&mut self, event: RecognitionEvent) -> bool {
        if self.state == DictationState::Idle {
            return false;
        }
        match event {
            RecognitionEvent::Interim(text) => {
                self.transcript = text;
                self.is_final = false;
                true
            }
            RecognitionEvent::Final(text) => {
                self.transcript = text;
                self.is_final = true;
                true
            }
            RecognitionEvent::Error(_) => false,
        }
    }

    /// Transition from RECORDING to FINALIZING
    pub fn finalize(&mut self) -> Result<(), InvalidDictationTransition> {
        if self.state != DictationState::Recording {
            return Err(self.invalid("finalize dictation"));
        }
        self.state = DictationState::Finalizing;
        Ok(())
    }

    /// Transition from FINALIZING to IDLE, returning the trimmed transcript
    pub fn finish(&mut self) -> Result<String, InvalidDictationTransition> {
        if self.state != DictationState::Finalizing {
            return Err(self.invalid("finish dictation"));
        }
        let transcript = self.transcript.trim().to_string();
        self.reset();
        Ok(transcript)
    }

    /// Transition from RECORDING to IDLE without producing a transcript
    pub fn abort(&mut self) -> Result<(), InvalidDictationTransition> {
        if self.state != DictationState::Recording {
            return Err(self.invalid("abort dictation"));
        }
        self.reset();
        Ok(())
    }

    fn reset(&mut self) {
        self.state = DictationState::Idle;
        self.locale = None;
        self.transcript.clear();
        self.is_final = false;
    }

    fn invalid(&self, action: &str) -> InvalidDictationTransition {
        InvalidDictationTransition {
            current_state: self.state,
            action: action.to_string(),
        }
    }
}
