//! JSON file record store adapter

use std::collections::BTreeMap;
use std::path::PathBuf;

use async_trait::async_trait;
use tokio::fs;
use tokio::sync::Mutex;

use crate::application::ports::{RecordStore, RecordStoreError};
use crate::domain::analysis::{AnalysisResult, DocumentRecord, UserRecord};

type RecordMap = BTreeMap<String, UserRecord>;

/// Record log kept as a single JSON object keyed by user id
pub struct JsonFileRecordStore {
    path: PathBuf,
    // Serializes read-modify-write cycles within this process
    io: Mutex<()>,
}

impl JsonFileRecordStore {
    /// Store at `<data dir>/lexai/records.json`
    pub fn new() -> Self {
        let data_dir = dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("~/.local/share"))
            .join("lexai");
        Self::with_path(data_dir.join("records.json"))
    }

    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            io: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    async fn read_all(&self) -> Result<RecordMap, RecordStoreError> {
        let content = match fs::read(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(RecordMap::new()),
            Err(e) => return Err(RecordStoreError::Io(e.to_string())),
        };
        if content.iter().all(u8::is_ascii_whitespace) {
            return Ok(RecordMap::new());
        }
        serde_json::from_slice(&content).map_err(|e| RecordStoreError::Corrupt(e.to_string()))
    }

    async fn write_all(&self, records: &RecordMap) -> Result<(), RecordStoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| RecordStoreError::Io(e.to_string()))?;
        }

        let json = serde_json::to_vec_pretty(records)
            .map_err(|e| RecordStoreError::Io(e.to_string()))?;

        // Write beside the target, then rename over it
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json)
            .await
            .map_err(|e| RecordStoreError::Io(e.to_string()))?;
        fs::rename(&tmp, &self.path)
            .await
            .map_err(|e| RecordStoreError::Io(e.to_string()))
    }
}

impl Default for JsonFileRecordStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RecordStore for JsonFileRecordStore {
    async fn get(&self, id: &str) -> Result<Option<UserRecord>, RecordStoreError> {
        let _io = self.io.lock().await;
        Ok(self.read_all().await?.remove(id))
    }

    async fn save(&self, record: UserRecord) -> Result<UserRecord, RecordStoreError> {
        let _io = self.io.lock().await;
        let mut records = self.read_all().await?;
        records.insert(record.id.clone(), record.clone());
        self.write_all(&records).await?;
        Ok(record)
    }

    async fn update(&self, id: &str, mut record: UserRecord) -> Result<UserRecord, RecordStoreError> {
        let _io = self.io.lock().await;
        let mut records = self.read_all().await?;
        let slot = records
            .get_mut(id)
            .ok_or_else(|| RecordStoreError::NotFound(id.to_string()))?;
        record.id = id.to_string();
        *slot = record.clone();
        self.write_all(&records).await?;
        Ok(record)
    }

    async fn append(
        &self,
        id: &str,
        document: DocumentRecord,
        question: String,
        result: AnalysisResult,
    ) -> Result<UserRecord, RecordStoreError> {
        let _io = self.io.lock().await;
        let mut records = self.read_all().await?;
        let record = records
            .entry(id.to_string())
            .or_insert_with(|| UserRecord::new(id));
        record.append(document, question, result);
        let record = record.clone();
        self.write_all(&records).await?;
        Ok(record)
    }

    async fn delete(&self, id: &str) -> Result<(), RecordStoreError> {
        let _io = self.io.lock().await;
        let mut records = self.read_all().await?;
        if records.remove(id).is_some() {
            self.write_all(&records).await?;
        }
        Ok(())
    }

    async fn list_all(&self) -> Result<Vec<UserRecord>, RecordStoreError> {
        let _io = self.io.lock().await;
        Ok(self.read_all().await?.into_values().collect())
    }
}
