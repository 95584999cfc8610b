use crate::error::{GenAiError, GenAiResult};
use async_trait::async_trait;
use config_engine::GenAiSettings;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};

/// Transport to the flow service
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FlowClient: Send + Sync {
    /// Run a named flow and return its `result` payload
    async fn run_flow(&self, flow: &str, input: Value) -> GenAiResult<Value>;

    /// Succeeds when the flow service answers its health endpoint
    async fn health(&self) -> GenAiResult<()>;
}

#[derive(Debug, Serialize)]
struct FlowRequest {
    data: Value,
}

#[derive(Debug, Deserialize)]
struct FlowResponse {
    result: Value,
}

/// Flow service client over HTTP
///
/// Flows are invoked with `POST {base_url}/{flow}` and a `{"data": ...}`
/// body; the service answers `{"result": ...}`.
pub struct HttpFlowClient {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl HttpFlowClient {
    pub fn new(settings: &GenAiSettings) -> GenAiResult<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(secs) = settings.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder
            .build()
            .map_err(|e| GenAiError::Request(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            api_key: settings.api_key.clone().filter(|k| !k.is_empty()),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

#[async_trait]
impl FlowClient for HttpFlowClient {
    async fn run_flow(&self, flow: &str, input: Value) -> GenAiResult<Value> {
        let url = self.url(flow);
        debug!(flow, url = %url, "Invoking flow");

        let mut request = self.client.post(&url).json(&FlowRequest { data: input });
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request
            .send()
            .await
            .map_err(|e| GenAiError::Request(format!("Flow request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            warn!(flow, status, "Flow returned an error status");
            return Err(GenAiError::Status {
                flow: flow.to_string(),
                status,
                body: logger_redacted::redact(&body),
            });
        }

        let envelope: FlowResponse = response
            .json()
            .await
            .map_err(|e| GenAiError::InvalidResponse(format!("Failed to parse flow response: {e}")))?;

        Ok(envelope.result)
    }

    async fn health(&self) -> GenAiResult<()> {
        let response = self
            .client
            .get(self.url("health"))
            .send()
            .await
            .map_err(|e| GenAiError::Request(format!("Health check failed: {e}")))?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(GenAiError::Status {
                flow: "health".to_string(),
                status: response.status().as_u16(),
                body: String::new(),
            })
        }
    }
}
