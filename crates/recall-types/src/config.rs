//! Configuration for the memory interception layer.
//!
//! Constructed once at process start (usually via
//! `recall_infra::config::load_from_env`) and read-only thereafter.

use serde::{Deserialize, Serialize};

/// Default timeout for memory service queries, in milliseconds.
pub const DEFAULT_TIMEOUT_MS: u64 = 300;

/// Default base URL of the memory service.
pub const DEFAULT_SERVER_URL: &str = "http://localhost:8283";

/// Configuration for the Letta memory integration.
///
/// When the config is not [`active`](MemoryConfig::is_active), every
/// operation in the layer is a defined no-op pass-through: no network
/// call is ever attempted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemoryConfig {
    /// Master switch for the whole layer.
    pub enabled: bool,
    /// Base URL of the memory service, e.g. "http://localhost:8283".
    pub server_url: String,
    /// ID of the agent holding the memory blocks.
    pub agent_id: String,
    /// Timeout for memory service queries in milliseconds (0 means default).
    pub timeout_ms: u64,
}

impl MemoryConfig {
    /// Whether the layer should do any work at all.
    ///
    /// An empty agent ID disables the layer even when `enabled` is set,
    /// because there is no addressable memory to talk to.
    pub fn is_active(&self) -> bool {
        self.enabled && !self.agent_id.is_empty()
    }

    /// The effective query timeout, substituting the default for zero.
    pub fn timeout_ms(&self) -> u64 {
        if self.timeout_ms == 0 {
            DEFAULT_TIMEOUT_MS
        } else {
            self.timeout_ms
        }
    }
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            server_url: DEFAULT_SERVER_URL.to_string(),
            agent_id: String::new(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }
}
