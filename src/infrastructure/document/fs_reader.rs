//! Filesystem document reader adapter

use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::fs::File;
use tokio::io::AsyncReadExt;

use crate::application::ports::{DocumentReader, ReadError, ReadProgressCallback};

/// Default read chunk size
const CHUNK_SIZE: usize = 64 * 1024;

/// Reads documents from the local filesystem in fixed-size chunks
pub struct FsDocumentReader {
    chunk_size: usize,
}

impl FsDocumentReader {
    pub fn new() -> Self {
        Self {
            chunk_size: CHUNK_SIZE,
        }
    }

    /// Reader with a custom chunk size (minimum 1 byte)
    pub fn with_chunk_size(chunk_size: usize) -> Self {
        Self {
            chunk_size: chunk_size.max(1),
        }
    }
}

impl Default for FsDocumentReader {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DocumentReader for FsDocumentReader {
    async fn read(
        &self,
        path: &Path,
        expected_size: u64,
        cancel: Arc<AtomicBool>,
        on_progress: ReadProgressCallback,
    ) -> Result<Vec<u8>, ReadError> {
        let mut file = File::open(path)
            .await
            .map_err(|e| ReadError::Io(e.to_string()))?;

        let mut bytes = Vec::with_capacity(expected_size as usize);
        let mut chunk = vec![0u8; self.chunk_size];

        on_progress(0, expected_size);
        loop {
            if cancel.load(Ordering::SeqCst) {
                return Err(ReadError::Cancelled);
            }

            let n = file
                .read(&mut chunk)
                .await
                .map_err(|e| ReadError::Io(e.to_string()))?;
            if n == 0 {
                break;
            }

            bytes.extend_from_slice(&chunk[..n]);
            if bytes.len() as u64 > expected_size {
                break;
            }
            on_progress(bytes.len() as u64, expected_size);
        }

        let actual = bytes.len() as u64;
        if actual != expected_size {
            return Err(ReadError::SizeMismatch {
                expected: expected_size,
                actual,
            });
        }

        Ok(bytes)
    }
}
