//! Case history use case

use tracing::info;

use crate::domain::analysis::{AnalysisResult, DocumentRecord, UserRecord};
use crate::domain::document::UploadedDocument;

use super::ports::{RecordStore, RecordStoreError};

/// Append-only log of analysed cases, one record per user
pub struct CaseHistory<S: RecordStore> {
    store: S,
}

impl<S: RecordStore> CaseHistory<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Append a completed analysis to the user's record, creating it on
    /// first use. The three lists grow together.
    pub async fn append(
        &self,
        user_id: &str,
        document: &UploadedDocument,
        question: &str,
        result: &AnalysisResult,
    ) -> Result<UserRecord, RecordStoreError> {
        let saved = self
            .store
            .append(
                user_id,
                DocumentRecord::from(document),
                question.trim().to_string(),
                result.clone(),
            )
            .await?;
        info!(
            user = user_id,
            entries = saved.analysis_results.len(),
            "case history updated"
        );
        Ok(saved)
    }

    pub async fn record(&self, user_id: &str) -> Result<Option<UserRecord>, RecordStoreError> {
        self.store.get(user_id).await
    }

    pub async fn all(&self) -> Result<Vec<UserRecord>, RecordStoreError> {
        self.store.list_all().await
    }

    pub async fn forget(&self, user_id: &str) -> Result<(), RecordStoreError> {
        self.store.delete(user_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::document::DocumentMimeType;
    use async_trait::async_trait;
    use std::collections::BTreeMap;
    use std::sync::Mutex;

    #[derive(Default)]
    struct MemoryStore {
        records: Mutex<BTreeMap<String, UserRecord>>,
    }

    #[async_trait]
    impl RecordStore for MemoryStore {
        async fn get(&self, id: &str) -> Result<Option<UserRecord>, RecordStoreError> {
            Ok(self.records.lock().unwrap().get(id).cloned())
        }

        async fn save(&self, record: UserRecord) -> Result<UserRecord, RecordStoreError> {
            self.records
                .lock()
                .unwrap()
                .insert(record.id.clone(), record.clone());
            Ok(record)
        }

        async fn update(
            &self,
            id: &str,
            record: UserRecord,
        ) -> Result<UserRecord, RecordStoreError> {
            let mut records = self.records.lock().unwrap();
            match records.get_mut(id) {
                Some(slot) => {
                    *slot = record.clone();
                    Ok(record)
                }
                None => Err(RecordStoreError::NotFound(id.to_string())),
            }
        }

        async fn append(
            &self,
            id: &str,
            document: DocumentRecord,
            question: String,
            result: AnalysisResult,
        ) -> Result<UserRecord, RecordStoreError> {
            let mut records = self.records.lock().unwrap();
            let record = records
                .entry(id.to_string())
                .or_insert_with(|| UserRecord::new(id));
            record.append(document, question, result);
            Ok(record.clone())
        }

        async fn delete(&self, id: &str) -> Result<(), RecordStoreError> {
            self.records.lock().unwrap().remove(id);
            Ok(())
        }

        async fn list_all(&self) -> Result<Vec<UserRecord>, RecordStoreError> {
            Ok(self.records.lock().unwrap().values().cloned().collect())
        }
    }

    fn document(name: &str) -> UploadedDocument {
        UploadedDocument::new(
            name.to_string(),
            12,
            DocumentMimeType::Docx,
            "lease terms".to_string(),
        )
    }

    fn result(summary: &str) -> AnalysisResult {
        AnalysisResult {
            summary: summary.to_string(),
            ..AnalysisResult::default()
        }
    }

    #[tokio::test]
    async fn first_append_creates_record() {
        let history = CaseHistory::new(MemoryStore::default());
        let record = history
            .append("asha", &document("lease.docx"), " Is it valid? ", &result("valid"))
            .await
            .unwrap();

        assert_eq!(record.id, "asha");
        assert_eq!(record.questions, vec!["Is it valid?".to_string()]);
        assert_eq!(record.uploaded_documents[0].file_name, "lease.docx");
        assert_eq!(record.analysis_results[0].summary, "valid");
    }

    #[tokio::test]
    async fn appends_keep_lists_aligned() {
        let history = CaseHistory::new(MemoryStore::default());
        history
            .append("asha", &document("a.docx"), "one", &result("r1"))
            .await
            .unwrap();
        history
            .append("asha", &document("b.docx"), "two", &result("r2"))
            .await
            .unwrap();

        let record = history.record("asha").await.unwrap().unwrap();
        assert_eq!(record.uploaded_documents.len(), 2);
        assert_eq!(record.questions, vec!["one", "two"]);
        assert_eq!(record.analysis_results[1].summary, "r2");
    }

    #[tokio::test]
    async fn users_are_kept_apart_and_forgettable() {
        let history = CaseHistory::new(MemoryStore::default());
        history
            .append("asha", &document("a.docx"), "one", &result("r1"))
            .await
            .unwrap();
        history
            .append("ravi", &document("b.docx"), "two", &result("r2"))
            .await
            .unwrap();

        assert_eq!(history.all().await.unwrap().len(), 2);
        history.forget("asha").await.unwrap();
        assert!(history.record("asha").await.unwrap().is_none());
        assert!(history.record("ravi").await.unwrap().is_some());
    }
}
