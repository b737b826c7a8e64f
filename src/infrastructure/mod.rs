//! Infrastructure layer - Adapter implementations
//!
//! Contains concrete implementations of the port interfaces,
//! integrating with the filesystem, the analysis service over HTTP,
//! and line-based speech input.

pub mod analysis;
pub mod config;
pub mod document;
pub mod records;
pub mod speech;

// Re-export adapters
pub use analysis::HttpAnalysisService;
pub use config::XdgConfigStore;
pub use document::FsDocumentReader;
pub use records::JsonFileRecordStore;
pub use speech::{LineRecognizer, NoOpRecognizer};
