//! Record storage port interface

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::analysis::{AnalysisResult, DocumentRecord, UserRecord};

/// Record storage errors
#[derive(Debug, Clone, Error)]
pub enum RecordStoreError {
    #[error("No record for user '{0}'")]
    NotFound(String),

    #[error("Record storage I/O failed: {0}")]
    Io(String),

    #[error("Record storage is corrupt: {0}")]
    Corrupt(String),
}

/// Port for the durable user record log
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Fetch one record, None if the user has none
    async fn get(&self, id: &str) -> Result<Option<UserRecord>, RecordStoreError>;

    /// Store a record under its own id, replacing any existing one
    async fn save(&self, record: UserRecord) -> Result<UserRecord, RecordStoreError>;

    /// Replace an existing record; fails with NotFound if absent
    async fn update(&self, id: &str, record: UserRecord) -> Result<UserRecord, RecordStoreError>;

    /// Append one analysed case to a user's record in a single step,
    /// creating the record on first use
    async fn append(
        &self,
        id: &str,
        document: DocumentRecord,
        question: String,
        result: AnalysisResult,
    ) -> Result<UserRecord, RecordStoreError>;

    /// Remove a record; removing a missing record is not an error
    async fn delete(&self, id: &str) -> Result<(), RecordStoreError>;

    /// All records, ordered by id
    async fn list_all(&self) -> Result<Vec<UserRecord>, RecordStoreError>;
}
