//! Backend client.

use std::time::{Duration, Instant};

use bando_model::Analysis;
use reqwest::{Client, RequestBuilder, Response};
use tracing::{debug, error, info, warn};

use crate::config::BackendConfig;
use crate::error::{ClientError, ClientResult};

/// Client for the disciplinare-analysis backend.
#[derive(Debug, Clone)]
pub struct BackendClient {
    client: Client,
    config: BackendConfig,
}

impl BackendClient {
    /// Build a client with the configured timeout.
    pub fn new(config: BackendConfig) -> ClientResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(ClientError::Http)?;
        Ok(Self { client, config })
    }

    /// The configured base URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    /// Fetch the analysis snapshot for one document, retrying transient
    /// failures with exponential backoff. The decoded payload is validated
    /// before it is returned.
    pub async fn fetch_analysis(&self, file_name: &str) -> ClientResult<Analysis> {
        let url = format!("{}/analyses/{file_name}", self.config.base_url);
        let body = self
            .with_retries("fetch_analysis", || self.client.get(&url))
            .await?;
        Ok(Analysis::from_json(&body)?)
    }

    /// List the documents the backend has finished analyzing.
    pub async fn list_analyses(&self) -> ClientResult<Vec<String>> {
        let url = format!("{}/analyses", self.config.base_url);
        let body = self
            .with_retries("list_analyses", || self.client.get(&url))
            .await?;
        serde_json::from_str(&body).map_err(|e| ClientError::Model(e.into()))
    }

    /// Upload a PDF for analysis. The backend queues it; a later
    /// [`fetch_analysis`](Self::fetch_analysis) picks up the result.
    pub async fn upload_document(&self, file_name: &str, bytes: Vec<u8>) -> ClientResult<()> {
        let url = format!("{}/documents/{file_name}", self.config.base_url);
        info!(file = %file_name, size = bytes.len(), "uploading document");
        let response = self
            .authorize(
                self.client
                    .post(&url)
                    .header("Content-Type", "application/pdf")
                    .body(bytes),
            )
            .send()
            .await
            .map_err(|e| self.map_transport(e))?;
        self.check_status(response).await.map(|_| ())
    }

    /// Run one request builder with the configured retry budget.
    async fn with_retries<F>(&self, operation: &str, build: F) -> ClientResult<String>
    where
        F: Fn() -> RequestBuilder,
    {
        let mut last_error: Option<ClientError> = None;
        let mut retries = 0;

        while retries <= self.config.max_retries {
            if retries > 0 {
                let delay = Duration::from_millis(
                    self.config.retry_delay_ms * (2_u64.pow(retries - 1)),
                );
                warn!(
                    operation,
                    retry = retries,
                    delay_ms = delay.as_millis() as u64,
                    "retrying backend request"
                );
                tokio::time::sleep(delay).await;
            }

            let start = Instant::now();
            match self.execute(build()).await {
                Ok(body) => {
                    info!(
                        operation,
                        latency_ms = start.elapsed().as_millis() as u64,
                        "backend request succeeded"
                    );
                    return Ok(body);
                }
                Err(e) => {
                    error!(
                        operation,
                        error = %e,
                        latency_ms = start.elapsed().as_millis() as u64,
                        retry = retries,
                        "backend request failed"
                    );
                    if !e.is_retryable() {
                        return Err(e);
                    }
                    last_error = Some(e);
                    retries += 1;
                }
            }
        }

        Err(ClientError::Unavailable {
            message: last_error
                .map(|e| e.to_string())
                .unwrap_or_else(|| "unknown error".to_string()),
            retries,
        })
    }

    async fn execute(&self, request: RequestBuilder) -> ClientResult<String> {
        debug!("sending backend request");
        let response = self
            .authorize(request)
            .send()
            .await
            .map_err(|e| self.map_transport(e))?;
        let response = self.check_status(response).await?;
        response.text().await.map_err(ClientError::Http)
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.config.api_key {
            Some(key) => request.header("Authorization", format!("Bearer {key}")),
            None => request,
        }
    }

    fn map_transport(&self, err: reqwest::Error) -> ClientError {
        if err.is_timeout() {
            ClientError::Timeout {
                timeout_ms: self.config.timeout_ms,
            }
        } else {
            ClientError::Http(err)
        }
    }

    async fn check_status(&self, response: Response) -> ClientResult<Response> {
        let status = response.status();
        if status.is_success() {
            Ok(response)
        } else {
            let message = response.text().await.unwrap_or_default();
            Err(ClientError::Api {
                status: status.as_u16(),
                message,
            })
        }
    }
}
