//! Dictation domain module

mod language;
mod session;

pub use language::{UiLanguage, ALL_LANGUAGES};
pub use session::{DictationSession, DictationState, InvalidDictationTransition, RecognitionEvent};
