//! Document reading port interface

use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

/// Document read errors
#[derive(Debug, Clone, Error)]
pub enum ReadError {
    #[error("Failed to read document: {0}")]
    Io(String),

    #[error("Document changed while reading: expected {expected} bytes, read {actual}")]
    SizeMismatch { expected: u64, actual: u64 },

    #[error("Read was cancelled")]
    Cancelled,
}

/// Read progress callback type.
/// Parameters: (loaded_bytes, total_bytes)
pub type ReadProgressCallback = Arc<dyn Fn(u64, u64) + Send + Sync>;

/// Port for reading a selected file's bytes
#[async_trait]
pub trait DocumentReader: Send + Sync {
    /// Read the whole file.
    ///
    /// # Arguments
    /// * `path` - The file to read
    /// * `expected_size` - Size reported when the file was selected
    /// * `cancel` - Checked between chunks; when set the read stops with `Cancelled`
    /// * `on_progress` - Called after every chunk with (loaded, total)
    async fn read(
        &self,
        path: &Path,
        expected_size: u64,
        cancel: Arc<AtomicBool>,
        on_progress: ReadProgressCallback,
    ) -> Result<Vec<u8>, ReadError>;
}
