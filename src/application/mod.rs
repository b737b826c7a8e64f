//! Application layer - Use cases and port interfaces
//!
//! Contains the case submission workflow and trait definitions
//! for external system interactions.

pub mod analysis;
pub mod composer;
pub mod dictation;
pub mod history;
pub mod intake;
pub mod ports;

// Re-export use cases
pub use analysis::{AnalysisClient, AnalysisError};
pub use composer::{CaseComposer, SubmitError};
pub use dictation::{DictationCapture, DictationError};
pub use history::CaseHistory;
pub use intake::{DocumentIntake, IntakeError, IntakeProgressCallback};
