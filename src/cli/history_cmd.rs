//! History command handler

use crate::application::ports::{RecordStore, RecordStoreError};
use crate::application::CaseHistory;

use super::presenter::Presenter;

/// List stored analyses, for one user or for everyone
pub async fn handle_history_command<S: RecordStore>(
    user: Option<String>,
    store: S,
    presenter: &Presenter,
) -> Result<(), RecordStoreError> {
    let history = CaseHistory::new(store);

    let records = match user {
        Some(id) => history.record(&id).await?.into_iter().collect(),
        None => history.all().await?,
    };

    if records.is_empty() {
        presenter.info("No analyses recorded yet");
        return Ok(());
    }

    for record in &records {
        presenter.history_record(record);
    }
    Ok(())
}
