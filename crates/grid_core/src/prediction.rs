use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use shared::protocol::{GridSnapshot, PredictResponse, PredictionLabel, PREDICT_PATH};
use thiserror::Error;
use tracing::debug;
use url::Url;

pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Everything that can go wrong between sending a snapshot and holding a
/// label. All variants are recoverable: the caller abandons the prediction.
#[derive(Debug, Error)]
pub enum PredictionError {
    #[error("invalid prediction endpoint '{url}': {reason}")]
    InvalidEndpoint { url: String, reason: String },
    #[error("prediction transport failure: {0}")]
    Transport(#[source] reqwest::Error),
    #[error("prediction request timed out after {0:?}")]
    TimedOut(Duration),
    #[error("prediction service returned HTTP {status}")]
    Status { status: u16 },
    #[error("malformed prediction response: {0}")]
    MalformedResponse(String),
}

#[async_trait]
pub trait PredictionClient: Send + Sync {
    async fn predict(&self, snapshot: &GridSnapshot) -> Result<PredictionLabel, PredictionError>;
}

pub struct HttpPredictionClient {
    http: Client,
    endpoint: Url,
    timeout: Duration,
}

impl HttpPredictionClient {
    pub fn new(server_url: &str, timeout: Duration) -> Result<Self, PredictionError> {
        let endpoint = predict_endpoint(server_url)?;
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(PredictionError::Transport)?;
        Ok(Self {
            http,
            endpoint,
            timeout,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    fn transport_error(&self, err: reqwest::Error) -> PredictionError {
        if err.is_timeout() {
            PredictionError::TimedOut(self.timeout)
        } else {
            PredictionError::Transport(err)
        }
    }
}

#[async_trait]
impl PredictionClient for HttpPredictionClient {
    async fn predict(&self, snapshot: &GridSnapshot) -> Result<PredictionLabel, PredictionError> {
        debug!(endpoint = %self.endpoint, cells = snapshot.len(), "posting snapshot");
        let response = self
            .http
            .post(self.endpoint.clone())
            .json(snapshot)
            .send()
            .await
            .map_err(|err| self.transport_error(err))?;

        let status = response.status();
        if !status.is_success() {
            return Err(PredictionError::Status {
                status: status.as_u16(),
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|err| self.transport_error(err))?;
        let decoded: PredictResponse = serde_json::from_slice(&body)
            .map_err(|err| PredictionError::MalformedResponse(err.to_string()))?;
        PredictionLabel::try_from(decoded)
            .map_err(|err| PredictionError::MalformedResponse(err.to_string()))
    }
}

/// Resolves the predict route beneath `server_url`, keeping any path prefix
/// the service is mounted under.
pub fn predict_endpoint(server_url: &str) -> Result<Url, PredictionError> {
    let invalid = |reason: String| PredictionError::InvalidEndpoint {
        url: server_url.to_string(),
        reason,
    };

    let mut base = Url::parse(server_url.trim()).map_err(|err| invalid(err.to_string()))?;
    if base.cannot_be_a_base() {
        return Err(invalid("url cannot carry a path".to_string()));
    }
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    base.join(PREDICT_PATH)
        .map_err(|err| invalid(err.to_string()))
}

#[cfg(test)]
#[path = "tests/prediction_tests.rs"]
mod tests;
