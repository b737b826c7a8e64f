//! Case draft entity and the immutable request snapshot

use serde::{Deserialize, Serialize};

use crate::domain::document::UploadedDocument;

/// The document and question currently being composed.
/// Last write wins for both fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CaseDraft {
    document: Option<UploadedDocument>,
    question: String,
}

impl CaseDraft {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn document(&self) -> Option<&UploadedDocument> {
        self.document.as_ref()
    }

    pub fn question(&self) -> &str {
        &self.question
    }

    pub fn set_document(&mut self, document: Option<UploadedDocument>) {
        self.document = document;
    }

    pub fn set_question(&mut self, question: impl Into<String>) {
        self.question = question.into();
    }

    /// Both parts present and the trimmed question is non-empty
    pub fn is_complete(&self) -> bool {
        self.document.is_some() && !self.question.trim().is_empty()
    }

    /// Freeze the draft into a request, or None if it is incomplete
    pub fn snapshot(&self) -> Option<AnalysisRequest> {
        if !self.is_complete() {
            return None;
        }
        let document = self.document.as_ref()?;
        Some(AnalysisRequest {
            file_name: document.name().to_string(),
            file_size_bytes: document.size_bytes(),
            document_content: document.text_content().to_string(),
            question_text: self.question.trim().to_string(),
        })
    }
}

/// Immutable snapshot of a draft at the moment of submission.
///
/// Serializes to the remote service's request shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisRequest {
    #[serde(rename = "fileName")]
    pub file_name: String,
    #[serde(rename = "fileSize")]
    pub file_size_bytes: u64,
    #[serde(rename = "content")]
    pub document_content: String,
    #[serde(rename = "question")]
    pub question_text: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::document::DocumentMimeType;

    fn document() -> UploadedDocument {
        UploadedDocument::new("case.pdf", 2_097_152, DocumentMimeType::Pdf, "contract text")
    }

    #[test]
    fn empty_draft_is_incomplete() {
        let draft = CaseDraft::new();
        assert!(!draft.is_complete());
        assert!(draft.snapshot().is_none());
    }

    #[test]
    fn whitespace_question_is_incomplete() {
        let mut draft = CaseDraft::new();
        draft.set_document(Some(document()));
        draft.set_question("   \n\t");
        assert!(!draft.is_complete());
    }

    #[test]
    fn question_without_document_is_incomplete() {
        let mut draft = CaseDraft::new();
        draft.set_question("What are my chances?");
        assert!(!draft.is_complete());
    }

    #[test]
    fn snapshot_copies_fields_and_trims_question() {
        let mut draft = CaseDraft::new();
        draft.set_document(Some(document()));
        draft.set_question("  What are my chances?  ");

        let request = draft.snapshot().unwrap();
        assert_eq!(request.file_name, "case.pdf");
        assert_eq!(request.file_size_bytes, 2_097_152);
        assert_eq!(request.document_content, "contract text");
        assert_eq!(request.question_text, "What are my chances?");
        // The draft itself keeps the untrimmed text
        assert_eq!(draft.question(), "  What are my chances?  ");
    }

    #[test]
    fn last_write_wins() {
        let mut draft = CaseDraft::new();
        draft.set_question("first");
        draft.set_question("second");
        assert_eq!(draft.question(), "second");

        draft.set_document(Some(document()));
        draft.set_document(None);
        assert!(draft.document().is_none());
    }

    #[test]
    fn request_serializes_to_service_shape() {
        let request = AnalysisRequest {
            file_name: "case.pdf".to_string(),
            file_size_bytes: 42,
            document_content: "body".to_string(),
            question_text: "Why?".to_string(),
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "fileName": "case.pdf",
                "fileSize": 42,
                "content": "body",
                "question": "Why?"
            })
        );
    }
}
