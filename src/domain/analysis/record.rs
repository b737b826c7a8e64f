//! Durable user record shapes

use serde::{Deserialize, Serialize};

use super::result::AnalysisResult;
use crate::domain::document::UploadedDocument;

/// A document as stored in the record log
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentRecord {
    pub content: String,
    pub file_name: String,
    pub file_size: u64,
    pub file_type: String,
}

impl From<&UploadedDocument> for DocumentRecord {
    fn from(document: &UploadedDocument) -> Self {
        Self {
            content: document.text_content().to_string(),
            file_name: document.name().to_string(),
            file_size: document.size_bytes(),
            file_type: document.mime_type().as_str().to_string(),
        }
    }
}

/// Everything a user has submitted and received, in append order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    pub id: String,
    pub uploaded_documents: Vec<DocumentRecord>,
    pub questions: Vec<String>,
    pub analysis_results: Vec<AnalysisResult>,
}

impl UserRecord {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }

    /// Append one submission and its result
    pub fn append(&mut self, document: DocumentRecord, question: String, result: AnalysisResult) {
        self.uploaded_documents.push(document);
        self.questions.push(question);
        self.analysis_results.push(result);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::document::DocumentMimeType;

    #[test]
    fn document_record_from_uploaded() {
        let doc = UploadedDocument::new("lease.docx", 10, DocumentMimeType::Docx, "text");
        let record = DocumentRecord::from(&doc);
        assert_eq!(record.file_name, "lease.docx");
        assert_eq!(record.file_size, 10);
        assert_eq!(record.file_type, DocumentMimeType::Docx.as_str());
        assert_eq!(record.content, "text");
    }

    #[test]
    fn append_keeps_order_and_duplicates() {
        let doc = UploadedDocument::new("a.pdf", 1, DocumentMimeType::Pdf, "x");
        let mut record = UserRecord::new("user-1");
        record.append((&doc).into(), "q1".into(), AnalysisResult::default());
        record.append((&doc).into(), "q1".into(), AnalysisResult::default());

        assert_eq!(record.questions, vec!["q1", "q1"]);
        assert_eq!(record.uploaded_documents.len(), 2);
        assert_eq!(record.analysis_results.len(), 2);
    }

    #[test]
    fn serializes_with_camel_case_keys() {
        let record = UserRecord::new("u");
        let json = serde_json::to_value(&record).unwrap();
        assert!(json.get("uploadedDocuments").is_some());
        assert!(json.get("analysisResults").is_some());
    }
}
