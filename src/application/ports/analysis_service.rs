//! Remote analysis service port interface

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::analysis::AnalysisResult;
use crate::domain::case::AnalysisRequest;

/// Categorized transport or remote failure
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ServiceFailure {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Analysis service error: {0}")]
    Service(String),

    #[error("Analysis request timed out")]
    Timeout,
}

/// Port for the remote analysis service
#[async_trait]
pub trait AnalysisService: Send + Sync {
    /// Send one request and return the complete analysis.
    ///
    /// Not idempotent: the service may persist a record per call.
    async fn analyze(&self, request: &AnalysisRequest) -> Result<AnalysisResult, ServiceFailure>;
}

#[async_trait]
impl AnalysisService for Box<dyn AnalysisService> {
    async fn analyze(&self, request: &AnalysisRequest) -> Result<AnalysisResult, ServiceFailure> {
        self.as_ref().analyze(request).await
    }
}
