//! Domain layer - Core business logic
//!
//! Contains value objects, entities, and domain errors.
//! This layer has no dependencies on external systems.

pub mod analysis;
pub mod case;
pub mod config;
pub mod dictation;
pub mod document;
pub mod error;

// Re-export common types
pub use analysis::{AnalysisResult, RequestFlight, RequestState, UserRecord};
pub use case::{AnalysisRequest, CaseDraft};
pub use config::{AppConfig, Duration};
pub use dictation::{DictationSession, DictationState, UiLanguage};
pub use document::{DocumentMimeType, FileSelection, UploadedDocument};
pub use error::*;
