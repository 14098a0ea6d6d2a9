use std::time::Duration;

use reqwest::StatusCode;
use serde::Deserialize;
use shared::dto::BenefitRequest;
use shared::Benefit;
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("unexpected status {status}")]
    Status { status: StatusCode, error: Option<String> },
    #[error("invalid response body: {0}")]
    Decode(String),
    #[error("benefit not verified: {0}")]
    Rejected(String),
}

impl ClientError {
    /// True when the service could not produce an answer at all, as opposed
    /// to answering without a benefit.
    pub fn is_unavailable(&self) -> bool {
        !matches!(self, ClientError::Rejected(_))
    }
}

#[derive(Debug, Deserialize)]
struct Reply {
    #[serde(default)]
    benefit: Option<Benefit>,
    #[serde(default)]
    error: Option<String>,
}

/// HTTP client for `POST /verify-benefit` with a per-request timeout.
#[derive(Debug, Clone)]
pub struct BenefitClient {
    http: reqwest::Client,
    endpoint: String,
}

impl BenefitClient {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            endpoint: endpoint.into(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub async fn verify(&self, req: &BenefitRequest) -> Result<Benefit, ClientError> {
        let resp = self.http.post(&self.endpoint).json(req).send().await?;
        let status = resp.status();
        let body = resp.bytes().await?;
        debug!(%status, bytes = body.len(), "verify-benefit response");

        if !status.is_success() {
            let error = serde_json::from_slice::<Reply>(&body).ok().and_then(|r| r.error);
            return Err(ClientError::Status { status, error });
        }
        let reply: Reply =
            serde_json::from_slice(&body).map_err(|e| ClientError::Decode(e.to_string()))?;
        match reply.benefit {
            Some(benefit) => Ok(benefit),
            None => Err(ClientError::Rejected(
                reply.error.unwrap_or_else(|| "Unable to verify benefit".to_string()),
            )),
        }
    }
}
