//! Case composer use case

use std::sync::{Mutex, MutexGuard};

use thiserror::Error;
use tracing::{debug, info};

use crate::domain::analysis::AnalysisResult;
use crate::domain::case::CaseDraft;
use crate::domain::document::UploadedDocument;

use super::analysis::{AnalysisClient, AnalysisError};
use super::intake::IntakeError;
use super::ports::AnalysisService;

/// Errors from submitting a case
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitError {
    #[error("Please upload a document and enter a question before submitting")]
    NotReady,

    #[error(transparent)]
    Analysis(#[from] AnalysisError),
}

impl SubmitError {
    /// True when the submission was ignored because another is running
    pub fn is_in_progress(&self) -> bool {
        matches!(self, Self::Analysis(AnalysisError::SubmissionInProgress))
    }
}

/// Holds the draft case and gates its submission.
///
/// The draft survives a submission so the user can resubmit after a failure.
/// The latest result stays visible until a newer one replaces it.
pub struct CaseComposer<A: AnalysisService> {
    client: AnalysisClient<A>,
    draft: Mutex<CaseDraft>,
    latest: Mutex<Option<AnalysisResult>>,
}

impl<A: AnalysisService> CaseComposer<A> {
    pub fn new(client: AnalysisClient<A>) -> Self {
        Self {
            client,
            draft: Mutex::new(CaseDraft::new()),
            latest: Mutex::new(None),
        }
    }

    fn draft_mut(&self) -> MutexGuard<'_, CaseDraft> {
        self.draft.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn latest_mut(&self) -> MutexGuard<'_, Option<AnalysisResult>> {
        self.latest.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn client(&self) -> &AnalysisClient<A> {
        &self.client
    }

    /// Copy of the current draft
    pub fn draft(&self) -> CaseDraft {
        self.draft_mut().clone()
    }

    pub fn set_document(&self, document: Option<UploadedDocument>) {
        self.draft_mut().set_document(document);
    }

    pub fn set_question(&self, question: impl Into<String>) {
        self.draft_mut().set_question(question);
    }

    /// Take the outcome of a document selection.
    ///
    /// An accepted document replaces the draft's. A failed selection clears
    /// it. A superseded selection changes nothing since its replacement
    /// reports separately.
    pub fn accept_intake(&self, outcome: &Result<UploadedDocument, IntakeError>) {
        match outcome {
            Ok(document) => self.set_document(Some(document.clone())),
            Err(IntakeError::Superseded) => {}
            Err(_) => self.set_document(None),
        }
    }

    pub fn is_in_flight(&self) -> bool {
        self.client.is_in_flight()
    }

    /// Document present, question non-blank and nothing in flight
    pub fn is_submittable(&self) -> bool {
        self.draft_mut().is_complete() && !self.client.is_in_flight()
    }

    pub fn latest_result(&self) -> Option<AnalysisResult> {
        self.latest_mut().clone()
    }

    /// Snapshot the draft and send it for analysis.
    pub async fn submit(&self) -> Result<AnalysisResult, SubmitError> {
        let request = match self.draft_mut().snapshot() {
            Some(request) => request,
            None => {
                debug!("submit ignored: draft incomplete");
                return Err(SubmitError::NotReady);
            }
        };

        let result = self.client.analyze(&request).await?;
        *self.latest_mut() = Some(result.clone());
        info!(file = %request.file_name, "case analysis stored");
        Ok(result)
    }
}
