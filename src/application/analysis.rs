//! Analysis client use case

use std::sync::{Mutex, MutexGuard};

use thiserror::Error;
use tracing::{info, warn};

use crate::domain::analysis::{AnalysisResult, RequestFlight, RequestState};
use crate::domain::case::AnalysisRequest;

use super::ports::{AnalysisService, ServiceFailure};

/// Errors surfaced by the analysis client
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnalysisError {
    #[error("An analysis is already in progress")]
    SubmissionInProgress,

    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Analysis service error: {0}")]
    ServiceError(String),

    #[error("The analysis service did not respond in time")]
    Timeout,
}

impl From<ServiceFailure> for AnalysisError {
    fn from(failure: ServiceFailure) -> Self {
        match failure {
            ServiceFailure::Network(msg) => Self::NetworkError(msg),
            ServiceFailure::Service(msg) => Self::ServiceError(msg),
            ServiceFailure::Timeout => Self::Timeout,
        }
    }
}

/// Single-flight client for the remote analysis service.
///
/// A call made while another is pending is rejected, never queued. Failed
/// calls are not retried: the service may persist a record per call, so
/// resubmitting is left to the user.
pub struct AnalysisClient<A: AnalysisService> {
    service: A,
    flight: Mutex<RequestFlight>,
}

impl<A: AnalysisService> AnalysisClient<A> {
    pub fn new(service: A) -> Self {
        Self {
            service,
            flight: Mutex::new(RequestFlight::new()),
        }
    }

    fn flight(&self) -> MutexGuard<'_, RequestFlight> {
        lock_flight(&self.flight)
    }

    pub fn service(&self) -> &A {
        &self.service
    }

    pub fn state(&self) -> RequestState {
        self.flight().state()
    }

    pub fn is_in_flight(&self) -> bool {
        self.flight().is_pending()
    }

    /// Number of requests actually sent to the service
    pub fn dispatched(&self) -> u64 {
        self.flight().dispatched()
    }

    /// Send a request and wait for the complete result.
    pub async fn analyze(&self, request: &AnalysisRequest) -> Result<AnalysisResult, AnalysisError> {
        if self.flight().dispatch().is_err() {
            warn!(file = %request.file_name, "analysis rejected: request already in flight");
            return Err(AnalysisError::SubmissionInProgress);
        }
        let mut guard = FlightGuard::new(&self.flight);

        info!(
            file = %request.file_name,
            bytes = request.file_size_bytes,
            "analysis dispatched"
        );

        match self.service.analyze(request).await {
            Ok(result) => {
                guard.resolve(true);
                info!(risk = %result.risk_level, "analysis succeeded");
                Ok(result)
            }
            Err(failure) => {
                guard.resolve(false);
                warn!(error = %failure, "analysis failed");
                Err(failure.into())
            }
        }
    }
}

fn lock_flight(flight: &Mutex<RequestFlight>) -> MutexGuard<'_, RequestFlight> {
    flight.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Resolves the flight exactly once. A call dropped before the service
/// answered counts as failed so the client can accept new submissions.
struct FlightGuard<'a> {
    flight: &'a Mutex<RequestFlight>,
    resolved: bool,
}

impl<'a> FlightGuard<'a> {
    fn new(flight: &'a Mutex<RequestFlight>) -> Self {
        Self {
            flight,
            resolved: false,
        }
    }

    fn resolve(&mut self, success: bool) {
        if self.resolved {
            return;
        }
        self.resolved = true;
        let mut flight = lock_flight(self.flight);
        let _ = if success { flight.succeed() } else { flight.fail() };
    }
}

impl Drop for FlightGuard<'_> {
    fn drop(&mut self) {
        if !self.resolved {
            warn!("analysis call dropped before completion");
            self.resolve(false);
        }
    }
}
