//! Uploaded document value objects

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Largest accepted document: 10 MiB
pub const MAX_DOCUMENT_BYTES: u64 = 10 * 1024 * 1024;

/// MIME string reported for files whose type cannot be inferred
pub const UNKNOWN_MIME_TYPE: &str = "application/octet-stream";

/// Accepted document MIME types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DocumentMimeType {
    Pdf,
    Docx,
}

impl DocumentMimeType {
    /// Get the MIME type string
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pdf => "application/pdf",
            Self::Docx => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        }
    }

    /// Get the file extension
    pub const fn extension(&self) -> &'static str {
        match self {
            Self::Pdf => "pdf",
            Self::Docx => "docx",
        }
    }

    /// Match an exact MIME string; anything else is not an accepted type
    pub fn from_mime(mime: &str) -> Option<Self> {
        match mime.trim().to_ascii_lowercase().as_str() {
            "application/pdf" => Some(Self::Pdf),
            "application/vnd.openxmlformats-officedocument.wordprocessingml.document" => {
                Some(Self::Docx)
            }
            _ => None,
        }
    }

    /// Infer from a file extension (case-insensitive, no leading dot)
    pub fn from_extension(ext: &str) -> Option<Self> {
        [Self::Pdf, Self::Docx]
            .into_iter()
            .find(|mime| mime.extension().eq_ignore_ascii_case(ext))
    }
}

impl fmt::Display for DocumentMimeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A raw, not yet validated file reference picked by the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileSelection {
    pub name: String,
    pub size_bytes: u64,
    /// MIME string as reported by the picker; validated during intake
    pub mime_type: String,
    pub path: PathBuf,
}

impl FileSelection {
    pub fn new(
        name: impl Into<String>,
        size_bytes: u64,
        mime_type: impl Into<String>,
        path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            name: name.into(),
            size_bytes,
            mime_type: mime_type.into(),
            path: path.into(),
        }
    }

    /// Build a selection from a path on disk, inferring the MIME string
    /// from the extension.
    pub async fn from_path(path: impl AsRef<Path>) -> std::io::Result<Self> {
        let path = path.as_ref();
        let metadata = tokio::fs::metadata(path).await?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        Ok(Self {
            name,
            size_bytes: metadata.len(),
            mime_type: mime_for_path(path).to_string(),
            path: path.to_path_buf(),
        })
    }
}

/// MIME string inferred from a path's extension
pub fn mime_for_path(path: &Path) -> &'static str {
    path.extension()
        .and_then(|ext| ext.to_str())
        .and_then(DocumentMimeType::from_extension)
        .map(|mime| mime.as_str())
        .unwrap_or(UNKNOWN_MIME_TYPE)
}

/// A validated and decoded document.
///
/// Only built by intake after validation succeeds; never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedDocument {
    name: String,
    size_bytes: u64,
    mime_type: DocumentMimeType,
    text_content: String,
}

impl UploadedDocument {
    pub(crate) fn new(
        name: impl Into<String>,
        size_bytes: u64,
        mime_type: DocumentMimeType,
        text_content: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            size_bytes,
            mime_type,
            text_content: text_content.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn size_bytes(&self) -> u64 {
        self.size_bytes
    }

    pub fn mime_type(&self) -> DocumentMimeType {
        self.mime_type
    }

    pub fn text_content(&self) -> &str {
        &self.text_content
    }

    /// Get human-readable size
    pub fn human_readable_size(&self) -> String {
        human_readable_size(self.size_bytes)
    }
}

/// Format a byte count as B / KB / MB with one decimal
pub fn human_readable_size(bytes: u64) -> String {
    if bytes < 1024 {
        format!("{} B", bytes)
    } else if bytes < 1024 * 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    }
}
