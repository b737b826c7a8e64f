//! LexAI - legal case submission client
//!
//! This crate validates an uploaded case document, captures a question
//! typed or dictated by the user, and drives a remote analysis service
//! to produce a structured legal-strength assessment.
//!
//! # Architecture
//!
//! The crate follows hexagonal (ports & adapters) architecture:
//!
//! - **Domain**: Value objects, state machines, and errors
//! - **Application**: Use cases and port interfaces (traits)
//! - **Infrastructure**: Adapter implementations (filesystem, HTTP, stdin dictation)
//! - **CLI**: Command-line interface and output formatting

pub mod application;
pub mod cli;
pub mod domain;
pub mod infrastructure;
