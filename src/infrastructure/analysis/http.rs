//! HTTP analysis service adapter

use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use crate::application::ports::{AnalysisService, ServiceFailure};
use crate::domain::analysis::AnalysisResult;
use crate::domain::case::AnalysisRequest;

/// Path of the analysis endpoint under the service URL
const ANALYZE_PATH: &str = "/analyze";

/// Connection setup limit, independent of the request timeout
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// JSON-over-HTTP client for the remote analysis service
pub struct HttpAnalysisService {
    base_url: String,
    client: reqwest::Client,
}

impl HttpAnalysisService {
    /// Create a client for `base_url`.
    ///
    /// `timeout` bounds each whole request; `None` waits indefinitely.
    pub fn new(base_url: impl Into<String>, timeout: Option<Duration>) -> Result<Self, ServiceFailure> {
        let mut builder = reqwest::Client::builder().connect_timeout(CONNECT_TIMEOUT);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| ServiceFailure::Network(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client,
        })
    }

    fn endpoint(&self) -> String {
        format!("{}{}", self.base_url, ANALYZE_PATH)
    }

    fn classify(error: reqwest::Error) -> ServiceFailure {
        if error.is_timeout() {
            ServiceFailure::Timeout
        } else if error.is_decode() {
            ServiceFailure::Service(format!("invalid response body: {error}"))
        } else {
            ServiceFailure::Network(error.to_string())
        }
    }
}

#[async_trait]
impl AnalysisService for HttpAnalysisService {
    async fn analyze(&self, request: &AnalysisRequest) -> Result<AnalysisResult, ServiceFailure> {
        let url = self.endpoint();
        debug!(%url, "posting analysis request");

        let response = self
            .client
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(Self::classify)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let body = body.trim();
            return Err(ServiceFailure::Service(if body.is_empty() {
                format!("HTTP {status}")
            } else {
                format!("HTTP {status}: {body}")
            }));
        }

        let body = response.bytes().await.map_err(Self::classify)?;
        serde_json::from_slice(&body)
            .map_err(|e| ServiceFailure::Service(format!("invalid response body: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_joins_without_double_slash() {
        let service = HttpAnalysisService::new("http://localhost:8080/", None).unwrap();
        assert_eq!(service.endpoint(), "http://localhost:8080/analyze");
    }

    #[test]
    fn endpoint_keeps_base_path() {
        let service =
            HttpAnalysisService::new("https://legal.example/api", Some(Duration::from_secs(5)))
                .unwrap();
        assert_eq!(service.endpoint(), "https://legal.example/api/analyze");
    }
}
