use serde_json::Value;

use super::error::SubmitError;
use crate::model::FormRecord;

/// Where form records are posted unless configured otherwise.
pub const DEFAULT_ENDPOINT: &str = "https://reqres.in/api/users";

/// Posts [`FormRecord`]s to a fixed endpoint.
///
/// Cloning is cheap; clones share one connection pool.
#[derive(Debug, Clone)]
pub struct SubmissionClient {
    client: reqwest::Client,
    endpoint: String,
}

impl SubmissionClient {
    /// Creates a client that posts to `endpoint`.
    pub fn new(endpoint: impl Into<String>) -> Result<Self, SubmitError> {
        let client = reqwest::Client::builder()
            .build()
            .map_err(SubmitError::Client)?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }

    /// Returns the endpoint records are posted to.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Sends `record` as a JSON body and returns the parsed response body.
    ///
    /// Any 2xx status with a JSON body is a success. Everything else,
    /// including transport failures, is an error.
    pub async fn submit(&self, record: &FormRecord) -> Result<Value, SubmitError> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(record)
            .send()
            .await
            .map_err(SubmitError::Network)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SubmitError::Status { status, body });
        }

        response.json().await.map_err(SubmitError::Decode)
    }
}
