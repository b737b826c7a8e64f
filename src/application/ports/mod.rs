//! Port interfaces (traits) for external systems
//!
//! These traits define the boundaries between the application
//! and infrastructure layers.

pub mod analysis_service;
pub mod config;
pub mod document_reader;
pub mod record_store;
pub mod speech;

// Re-export common types
pub use analysis_service::{AnalysisService, ServiceFailure};
pub use config::ConfigStore;
pub use document_reader::{DocumentReader, ReadError, ReadProgressCallback};
pub use record_store::{RecordStore, RecordStoreError};
pub use speech::{RecognitionError, SpeechRecognizer};
