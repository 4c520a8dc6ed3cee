//! LettaClient -- concrete [`MemoryService`] implementation for a
//! Letta-compatible agent server.
//!
//! Issues two calls: `GET /v1/agents/{id}` to fetch memory blocks and
//! `POST /v1/agents/{id}/messages` to push an exchange summary. Both are
//! bounded by the configured query timeout, carried by the reqwest
//! client itself so it applies independently of the caller's context.

use std::time::Duration;

use serde_json::Value;

use recall_core::format::update_summary;
use recall_core::service::MemoryService;
use recall_types::chat::ROLE_USER;
use recall_types::config::MemoryConfig;
use recall_types::error::MemoryError;
use recall_types::memory::MemoryBlock;

/// HTTP client for the external memory service.
///
/// One long-lived instance is shared by all requests; the underlying
/// connection pool and timeout settings are read-only after construction
/// and safe for concurrent fetch/push calls.
pub struct LettaClient {
    config: MemoryConfig,
    client: reqwest::Client,
}

impl LettaClient {
    /// Create a new client from the given configuration.
    pub fn new(config: MemoryConfig) -> Self {
        let timeout = Duration::from_millis(config.timeout_ms());
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .expect("failed to create reqwest client");

        Self { config, client }
    }

    /// Override the service base URL (useful for tests).
    #[allow(dead_code)]
    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.config.server_url = base_url;
        self
    }

    /// The configuration this client was built with.
    pub fn config(&self) -> &MemoryConfig {
        &self.config
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.server_url, path)
    }
}

impl MemoryService for LettaClient {
    async fn fetch_memory(&self) -> Result<Vec<MemoryBlock>, MemoryError> {
        if !self.config.is_active() {
            return Ok(Vec::new());
        }

        let url = self.url(&format!("/v1/agents/{}", self.config.agent_id));
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| MemoryError::Transport(e.to_string()))?;

        let status = response.status();
        if status != reqwest::StatusCode::OK {
            return Err(MemoryError::UpstreamStatus(status.as_u16()));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| MemoryError::Transport(e.to_string()))?;

        // A body that is not the expected shape yields no blocks rather
        // than an error; individual malformed fields default to "".
        Ok(serde_json::from_slice::<Value>(&body)
            .map(|root| parse_memory_blocks(&root))
            .unwrap_or_default())
    }

    async fn push_update(
        &self,
        user_message: &str,
        assistant_response: &str,
    ) -> Result<(), MemoryError> {
        if !self.config.is_active() {
            return Ok(());
        }

        let summary = update_summary(user_message, assistant_response);
        let url = self.url(&format!("/v1/agents/{}/messages", self.config.agent_id));

        self.client
            .post(&url)
            .json(&message_payload(&summary))
            .send()
            .await
            .map_err(|e| MemoryError::Transport(e.to_string()))?;

        Ok(())
    }
}

/// Extract `memory.blocks[*].{label,value}` from an agent response body.
fn parse_memory_blocks(root: &Value) -> Vec<MemoryBlock> {
    root.pointer("/memory/blocks")
        .and_then(Value::as_array)
        .map(|blocks| {
            blocks
                .iter()
                .map(|block| {
                    MemoryBlock::new(
                        block.get("label").and_then(Value::as_str).unwrap_or_default(),
                        block.get("value").and_then(Value::as_str).unwrap_or_default(),
                    )
                })
                .collect()
        })
        .unwrap_or_default()
}

/// The one-element message list posted to the ingestion endpoint.
fn message_payload(content: &str) -> Value {
    serde_json::json!({
        "messages": [{ "role": ROLE_USER, "content": content }]
    })
}
