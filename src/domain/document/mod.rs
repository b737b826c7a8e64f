//! Document domain module

mod uploaded_document;

pub use uploaded_document::{
    human_readable_size, mime_for_path, DocumentMimeType, FileSelection, UploadedDocument,
    MAX_DOCUMENT_BYTES, UNKNOWN_MIME_TYPE,
};
