use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use thiserror::Error;
use tracing::{info, warn};

use crate::domain::{ScanRequest, ScanVerdict};

#[derive(Debug, Error)]
pub enum ScanError {
    #[error("please enter a URL to scan")]
    Validation,
    #[error("server returned {0}")]
    Transport(u16),
    #[error("invalid response format from server ({0})")]
    Schema(String),
    #[error("request could not be completed: {0}")]
    Network(#[from] reqwest::Error),
}

impl ScanError {
    /// Message shown to the user. Always points at the scanning service,
    /// whatever the failure was.
    pub fn user_message(&self, endpoint: &str) -> String {
        format!(
            "Failed to scan URL: {self}. Make sure the scanning service is running and reachable at {endpoint}."
        )
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::Validation => "validation",
            Self::Transport(_) => "transport",
            Self::Schema(_) => "schema",
            Self::Network(_) => "network",
        }
    }
}

/// Anything able to turn a scan request into a verdict.
#[async_trait]
pub trait VerdictSource {
    fn endpoint(&self) -> &str;
    async fn fetch(&self, req: &ScanRequest) -> Result<ScanVerdict, ScanError>;
}

#[derive(Clone)]
pub struct ScanClient {
    endpoint: String,
    http: Client,
}

impl ScanClient {
    pub fn new(endpoint: String, timeout: Duration) -> Result<Self> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            endpoint: endpoint.trim().to_string(),
            http,
        })
    }
}

#[async_trait]
impl VerdictSource for ScanClient {
    fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn fetch(&self, req: &ScanRequest) -> Result<ScanVerdict, ScanError> {
        info!(url = req.url(), endpoint = %self.endpoint, "scan.start");

        let resp = self.http.post(&self.endpoint).json(req).send().await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(ScanError::Transport(status.as_u16()));
        }

        let raw = resp.bytes().await?;
        let verdict = decode_verdict(&raw)?;

        let out_of_range = verdict.out_of_range_fields();
        if !out_of_range.is_empty() {
            warn!(fields = ?out_of_range, "scan.out_of_range");
        }
        info!(
            is_phishing = verdict.is_phishing,
            confidence = verdict.confidence,
            risk_level = verdict.risk_level.as_deref().unwrap_or(""),
            "scan.resolved"
        );

        Ok(verdict)
    }
}

/// Checks the one field the contract requires (`is_phishing` must be a JSON
/// boolean) before decoding the rest leniently.
pub fn decode_verdict(raw: &[u8]) -> Result<ScanVerdict, ScanError> {
    let value: Value = serde_json::from_slice(raw)
        .map_err(|e| ScanError::Schema(format!("body is not JSON: {e}")))?;

    if !matches!(value.get("is_phishing"), Some(Value::Bool(_))) {
        return Err(ScanError::Schema("is_phishing must be a boolean".into()));
    }

    serde_json::from_value(value).map_err(|e| ScanError::Schema(e.to_string()))
}
